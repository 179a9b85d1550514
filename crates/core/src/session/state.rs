//! Mutable session state and the display strings derived from it

use crate::core_types::{Axis, Charge, ChargeId, Vec2};

/// Positions of the two dipole charges
///
/// Magnitudes are fixed at `+q` and `-q` on construction; only positions change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionState {
    positive: Charge,
    negative: Charge,
}

impl SessionState {
    /// A dipole of strength `magnitude` with the given charge positions
    #[must_use]
    pub fn new(magnitude: f32, positive_at: Vec2, negative_at: Vec2) -> Self {
        let q = magnitude.abs();
        Self {
            positive: Charge::new(q, positive_at),
            negative: Charge::new(-q, negative_at),
        }
    }

    /// The charge addressed by `id`
    #[must_use]
    pub fn charge(&self, id: ChargeId) -> &Charge {
        match id {
            ChargeId::Positive => &self.positive,
            ChargeId::Negative => &self.negative,
        }
    }

    pub(crate) fn charge_mut(&mut self, id: ChargeId) -> &mut Charge {
        match id {
            ChargeId::Positive => &mut self.positive,
            ChargeId::Negative => &mut self.negative,
        }
    }

    /// Both charges, positive first
    #[must_use]
    pub fn charges(&self) -> [Charge; 2] {
        [self.positive, self.negative]
    }

    /// Euclidean distance between the charges
    #[must_use]
    pub fn separation(&self) -> f32 {
        (self.negative.position() - self.positive.position()).norm()
    }

    /// Display strings for the control panel
    #[must_use]
    pub fn labels(&self, coulomb_constant: f32) -> SessionLabels {
        let coord = |id: ChargeId, axis: Axis| {
            format!("{:.1}", self.charge(id).position()[axis.index()])
        };
        let q = self.positive.magnitude();
        SessionLabels {
            positive_x: coord(ChargeId::Positive, Axis::X),
            positive_y: coord(ChargeId::Positive, Axis::Y),
            negative_x: coord(ChargeId::Negative, Axis::X),
            negative_y: coord(ChargeId::Negative, Axis::Y),
            separation: format!("Separation: {:.2} m", self.separation()),
            charges: format!("q₊ = +{q:.2} C\nq₋ = −{q:.2} C"),
            constant: format!("k = {coulomb_constant:.2} N·m²/C²"),
        }
    }
}

/// Text shown next to the sliders and in the information panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLabels {
    /// One-decimal readout of the +q x slider
    pub positive_x: String,
    /// One-decimal readout of the +q y slider
    pub positive_y: String,
    /// One-decimal readout of the -q x slider
    pub negative_x: String,
    /// One-decimal readout of the -q y slider
    pub negative_y: String,
    /// `Separation: d.dd m`
    pub separation: String,
    /// Charge values, one per line
    pub charges: String,
    /// Coulomb constant
    pub constant: String,
}

impl SessionLabels {
    /// Readout for the slider controlling `axis` of `id`
    #[must_use]
    pub fn coordinate(&self, id: ChargeId, axis: Axis) -> &str {
        match (id, axis) {
            (ChargeId::Positive, Axis::X) => &self.positive_x,
            (ChargeId::Positive, Axis::Y) => &self.positive_y,
            (ChargeId::Negative, Axis::X) => &self.negative_x,
            (ChargeId::Negative, Axis::Y) => &self.negative_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitudes_are_equal_and_opposite() {
        let state = SessionState::new(-2.0, Vec2::zeros(), Vec2::new(1.0, 0.0));
        assert_eq!(state.charge(ChargeId::Positive).magnitude(), 2.0);
        assert_eq!(state.charge(ChargeId::Negative).magnitude(), -2.0);
    }

    #[test]
    fn test_position_updates_keep_magnitudes() {
        let mut state = SessionState::new(1.5, Vec2::zeros(), Vec2::new(1.0, 0.0));
        state.charge_mut(ChargeId::Negative).set_coordinate(Axis::X, -3.0);
        state.charge_mut(ChargeId::Positive).set_position(Vec2::new(2.0, 2.0));
        let [pos, neg] = state.charges();
        assert_eq!(pos.magnitude(), -neg.magnitude());
        assert_eq!(pos.magnitude(), 1.5);
    }

    #[test]
    fn test_separation_and_labels() {
        let state = SessionState::new(1.0, Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert_eq!(state.separation(), 2.0);

        let labels = state.labels(1.0);
        assert_eq!(labels.separation, "Separation: 2.00 m");
        assert_eq!(labels.coordinate(ChargeId::Positive, Axis::X), "-1.0");
        assert_eq!(labels.coordinate(ChargeId::Negative, Axis::Y), "0.0");
        assert_eq!(labels.charges, "q₊ = +1.00 C\nq₋ = −1.00 C");
        assert_eq!(labels.constant, "k = 1.00 N·m²/C²");
    }

    #[test]
    fn test_separation_is_euclidean() {
        let state = SessionState::new(1.0, Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert_eq!(state.separation(), 5.0);
        assert_eq!(state.labels(1.0).separation, "Separation: 5.00 m");
    }
}
