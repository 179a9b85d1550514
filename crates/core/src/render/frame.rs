//! The scene handed to rendering surfaces after every recompute

use super::ContourScale;
use crate::core_types::{ChargeId, Polarity, Vec2};
use crate::grid::SampleGrid;
use crate::session::{DisplayConfig, SessionLabels, SessionState};
use crate::solver::{FieldData, VectorField};
use std::sync::Arc;

/// Circular marker drawn over a charge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeMarker {
    /// Which charge this marks
    pub id: ChargeId,
    /// Sign, selects colour and symbol
    pub polarity: Polarity,
    /// Centre in plot units
    pub position: Vec2,
    /// Radius in plot units
    pub radius: f32,
}

impl ChargeMarker {
    /// `+` or `−`
    #[must_use]
    pub fn symbol(&self) -> char {
        self.polarity.symbol()
    }
}

/// Everything a surface needs for one full redraw
#[derive(Debug, Clone)]
pub struct FieldFrame {
    grid: Arc<SampleGrid>,
    field: VectorField,
    magnitude: FieldData,
    directions: VectorField,
    magnitude_range: (f32, f32),
    markers: [ChargeMarker; 2],
    labels: SessionLabels,
    separation: f32,
    half_extent: f32,
    position_bound: f32,
    display: DisplayConfig,
}

impl FieldFrame {
    /// Derive magnitude, unit directions, markers and labels from a freshly evaluated field
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        grid: Arc<SampleGrid>,
        field: VectorField,
        state: &SessionState,
        coulomb_constant: f32,
        epsilon: f32,
        half_extent: f32,
        position_bound: f32,
        display: DisplayConfig,
    ) -> Self {
        let magnitude = field.magnitude();
        let directions = field.unit_directions(epsilon);
        let magnitude_range = magnitude.min_max().unwrap_or((0.0, 0.0));
        let markers = ChargeId::ALL.map(|id| ChargeMarker {
            id,
            polarity: id.polarity(),
            position: state.charge(id).position(),
            radius: display.marker_radius,
        });

        Self {
            grid,
            field,
            magnitude,
            directions,
            magnitude_range,
            markers,
            labels: state.labels(coulomb_constant),
            separation: state.separation(),
            half_extent,
            position_bound,
            display,
        }
    }

    /// Sample grid the field was evaluated on
    #[must_use]
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// Raw (Ex, Ey)
    #[must_use]
    pub fn field(&self) -> &VectorField {
        &self.field
    }

    /// |E| per grid point
    #[must_use]
    pub fn magnitude(&self) -> &FieldData {
        &self.magnitude
    }

    /// Unit arrows per grid point
    #[must_use]
    pub fn directions(&self) -> &VectorField {
        &self.directions
    }

    /// Smallest and largest finite magnitude
    #[must_use]
    pub fn magnitude_range(&self) -> (f32, f32) {
        self.magnitude_range
    }

    /// Positive marker first
    #[must_use]
    pub fn markers(&self) -> &[ChargeMarker; 2] {
        &self.markers
    }

    /// Marker for one charge
    #[must_use]
    pub fn marker(&self, id: ChargeId) -> &ChargeMarker {
        match id {
            ChargeId::Positive => &self.markers[0],
            ChargeId::Negative => &self.markers[1],
        }
    }

    /// Control panel text
    #[must_use]
    pub fn labels(&self) -> &SessionLabels {
        &self.labels
    }

    /// Distance between the charges
    #[must_use]
    pub fn separation(&self) -> f32 {
        self.separation
    }

    /// Plot limits are `[-half_extent, half_extent]` on both axes
    #[must_use]
    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// Slider range is `[-position_bound, position_bound]`
    #[must_use]
    pub fn position_bound(&self) -> f32 {
        self.position_bound
    }

    /// Rendering hints
    #[must_use]
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Grid cell nearest to a marker centre
    #[must_use]
    pub fn marker_cell(&self, marker: &ChargeMarker) -> (usize, usize) {
        self.grid.nearest_cell(marker.position)
    }

    /// Contour band of the magnitude at `(column, row)`, in `0..contour_levels`
    #[must_use]
    pub fn contour_level(&self, col: usize, row: usize) -> usize {
        let levels = self.display.contour_levels.max(1);
        let t = self.normalized_magnitude(self.magnitude.get(col, row));
        ((t * levels as f32) as usize).min(levels - 1)
    }

    /// Contour band mapped back into `[0, 1]` for colour lookup
    #[must_use]
    pub fn contour_fraction(&self, col: usize, row: usize) -> f32 {
        let levels = self.display.contour_levels.max(1);
        if levels == 1 {
            return 0.0;
        }
        self.contour_level(col, row) as f32 / (levels - 1) as f32
    }

    /// Magnitude mapped into `[0, 1]` on the configured contour scale
    #[must_use]
    pub fn normalized_magnitude(&self, value: f32) -> f32 {
        let (lo, hi) = self.magnitude_range;
        if !value.is_finite() {
            return 1.0;
        }
        let t = match self.display.contour_scale {
            ContourScale::Linear => {
                if hi <= lo {
                    return 0.0;
                }
                (value - lo) / (hi - lo)
            }
            ContourScale::Logarithmic => {
                let floor = (hi * 1e-12).max(f32::MIN_POSITIVE);
                let (lo, hi, v) = (lo.max(floor), hi.max(floor), value.max(floor));
                if hi <= lo {
                    return 0.0;
                }
                (v.ln() - lo.ln()) / (hi.ln() - lo.ln())
            }
        };
        t.clamp(0.0, 1.0)
    }
}
