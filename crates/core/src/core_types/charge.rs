//! Point charges and the identifiers used to address them from the UI

use super::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sign of a point charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Field points away from the charge
    Positive,
    /// Field points toward the charge
    Negative,
}

impl Polarity {
    /// Sign multiplier (+1 or -1)
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }

    /// Marker symbol drawn over the charge
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Polarity::Positive => '+',
            Polarity::Negative => '−',
        }
    }
}

/// Which of the two dipole charges a slider controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeId {
    /// The `+q` charge
    Positive,
    /// The `-q` charge
    Negative,
}

impl ChargeId {
    /// Both ids, positive first
    pub const ALL: [ChargeId; 2] = [ChargeId::Positive, ChargeId::Negative];

    /// Polarity of the charge this id refers to
    #[must_use]
    pub fn polarity(self) -> Polarity {
        match self {
            ChargeId::Positive => Polarity::Positive,
            ChargeId::Negative => Polarity::Negative,
        }
    }

    /// Subscript used in labels (`X₁`, `Y₂`)
    #[must_use]
    pub fn subscript(self) -> char {
        match self {
            ChargeId::Positive => '₁',
            ChargeId::Negative => '₂',
        }
    }
}

/// Coordinate axis of a position slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal coordinate
    X,
    /// Vertical coordinate
    Y,
}

impl Axis {
    /// Index into a `Vec2`
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// A point charge: signed magnitude at a position in the plot plane
///
/// The magnitude is fixed at construction; only the position can change,
/// and only from inside the crate (the session clamps it first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    magnitude: f32,
    position: Vec2,
}

impl Charge {
    /// Create a charge with a signed magnitude at `position`
    #[must_use]
    pub fn new(magnitude: f32, position: Vec2) -> Self {
        Self {
            magnitude,
            position,
        }
    }

    /// Signed charge magnitude
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Current position
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Polarity derived from the sign of the magnitude
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        if self.magnitude < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }

    pub(crate) fn set_coordinate(&mut self, axis: Axis, value: f32) {
        self.position[axis.index()] = value;
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_from_sign() {
        assert_eq!(
            Charge::new(1.0, Vec2::zeros()).polarity(),
            Polarity::Positive
        );
        assert_eq!(
            Charge::new(-2.5, Vec2::zeros()).polarity(),
            Polarity::Negative
        );
    }

    #[test]
    fn test_set_coordinate_touches_one_axis() {
        let mut charge = Charge::new(1.0, Vec2::new(-1.0, 0.5));
        charge.set_coordinate(Axis::Y, 3.0);
        assert_eq!(charge.position(), Vec2::new(-1.0, 3.0));
        assert_eq!(charge.magnitude(), 1.0);
    }

    #[test]
    fn test_ids_map_to_polarity() {
        assert_eq!(ChargeId::Positive.polarity().sign(), 1.0);
        assert_eq!(ChargeId::Negative.polarity().sign(), -1.0);
        assert_eq!(ChargeId::Negative.polarity().symbol(), '−');
    }
}
