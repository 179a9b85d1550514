//! Session configuration
//!
//! Defaults reproduce the classroom setup: k = 1, q = 1, a 20x20 grid over
//! [-5, 5]², sliders bounded to [-4.5, 4.5], +q at (-1, 0) and -q at (1, 0).

use crate::core_types::Vec2;
use crate::error::DipoleError;
use crate::render::ContourScale;
use crate::solver::{COULOMB_CONSTANT, DEFAULT_REGULARIZATION};
use serde::{Deserialize, Serialize};

/// Half-width of the square plot domain
pub const DEFAULT_HALF_EXTENT: f32 = 5.0;

/// Sample points per axis
pub const DEFAULT_RESOLUTION: usize = 20;

/// Slider range is `[-bound, bound]` on both axes
pub const DEFAULT_POSITION_BOUND: f32 = 4.5;

/// Filled contour bands
pub const DEFAULT_CONTOUR_LEVELS: usize = 20;

/// Radius of the circular charge markers, in plot units
pub const DEFAULT_MARKER_RADIUS: f32 = 0.2;

/// Physics, grid and slider configuration for an `InteractiveSession`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Coulomb constant k
    pub coulomb_constant: f32,

    /// Absolute charge magnitude q (the dipole is +q / -q)
    pub charge_magnitude: f32,

    /// ε added to squared distances and to squared field norms
    pub regularization: f32,

    /// Plot domain is `[-half_extent, half_extent]²`
    pub half_extent: f32,

    /// Sample points per axis
    pub resolution: usize,

    /// Positions are clamped to `[-position_bound, position_bound]`
    pub position_bound: f32,

    /// Start position of the +q charge
    pub initial_positive: Vec2,

    /// Start position of the -q charge
    pub initial_negative: Vec2,

    /// Rendering hints forwarded to surfaces
    pub display: DisplayConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            coulomb_constant: COULOMB_CONSTANT,
            charge_magnitude: 1.0,
            regularization: DEFAULT_REGULARIZATION,
            half_extent: DEFAULT_HALF_EXTENT,
            resolution: DEFAULT_RESOLUTION,
            position_bound: DEFAULT_POSITION_BOUND,
            initial_positive: Vec2::new(-1.0, 0.0),
            initial_negative: Vec2::new(1.0, 0.0),
            display: DisplayConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Check the parameters the grid and evaluator do not check themselves
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first offending parameter.
    pub fn validate(&self) -> Result<(), DipoleError> {
        if !self.charge_magnitude.is_finite() || self.charge_magnitude <= 0.0 {
            return Err(DipoleError::invalid_config(
                "charge_magnitude",
                format!("must be finite and positive, got {}", self.charge_magnitude),
            ));
        }
        if !self.position_bound.is_finite() || self.position_bound <= 0.0 {
            return Err(DipoleError::invalid_config(
                "position_bound",
                format!("must be finite and positive, got {}", self.position_bound),
            ));
        }
        if self.position_bound > self.half_extent {
            return Err(DipoleError::invalid_config(
                "position_bound",
                format!(
                    "{} exceeds the plot half extent {}",
                    self.position_bound, self.half_extent
                ),
            ));
        }
        for (parameter, p) in [
            ("initial_positive", self.initial_positive),
            ("initial_negative", self.initial_negative),
        ] {
            if !p.iter().all(|c| c.is_finite() && c.abs() <= self.position_bound) {
                return Err(DipoleError::invalid_config(
                    parameter,
                    format!(
                        "({}, {}) lies outside ±{}",
                        p.x, p.y, self.position_bound
                    ),
                ));
            }
        }
        self.display.validate()
    }
}

/// Rendering hints carried in every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of filled contour bands
    pub contour_levels: usize,

    /// How magnitudes are split into bands
    pub contour_scale: ContourScale,

    /// Radius of the charge markers in plot units
    pub marker_radius: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            contour_levels: DEFAULT_CONTOUR_LEVELS,
            contour_scale: ContourScale::Linear,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl DisplayConfig {
    /// # Errors
    ///
    /// `InvalidConfig` for zero contour levels or a negative/non-finite marker radius.
    pub fn validate(&self) -> Result<(), DipoleError> {
        if self.contour_levels == 0 {
            return Err(DipoleError::invalid_config(
                "contour_levels",
                "must be at least 1",
            ));
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(DipoleError::invalid_config(
                "marker_radius",
                format!("must be finite and non-negative, got {}", self.marker_radius),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bound_must_fit_inside_domain() {
        let cfg = SessionConfig {
            position_bound: 6.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(DipoleError::InvalidConfig {
                parameter: "position_bound",
                ..
            })
        ));
    }

    #[test]
    fn test_initial_positions_must_be_in_range() {
        let cfg = SessionConfig {
            initial_negative: Vec2::new(4.6, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(DipoleError::InvalidConfig {
                parameter: "initial_negative",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_non_positive_magnitude() {
        let cfg = SessionConfig {
            charge_magnitude: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_contour_levels_rejected() {
        let cfg = SessionConfig {
            display: DisplayConfig {
                contour_levels: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
