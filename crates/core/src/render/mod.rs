//! Rendering surface abstraction
//!
//! The session hands every recomputed `FieldFrame` to a `RenderSurface`.
//! Surfaces clear and redraw everything they show from that one frame:
//! a filled magnitude heat map, a direction-arrow overlay, two polarity
//! markers, and the text labels.
//!
//! The windowed and terminal front ends implement their own surfaces;
//! `TextSurface` is the headless one used for inspection and tests.

pub mod colormap;
mod frame;
pub mod text;

pub use colormap::{plasma, viridis, Rgb};
pub use frame::{ChargeMarker, FieldFrame};
pub use text::TextSurface;

use crate::core_types::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

/// Anything that can redraw itself from a `FieldFrame`
pub trait RenderSurface {
    /// Failure reported by the surface (`Infallible` for in-memory surfaces)
    type Error;

    /// Clear and redraw everything from `frame`
    ///
    /// # Errors
    ///
    /// Whatever the underlying drawing target reports.
    fn present(&mut self, frame: &FieldFrame) -> Result<(), Self::Error>;
}

/// How the magnitude range is split into contour bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContourScale {
    /// Equal-width bands between the minimum and maximum magnitude
    #[default]
    Linear,
    /// Equal-width bands in log space; keeps the far field visible next to
    /// the near-charge peaks
    Logarithmic,
}

/// Compass arrow for a direction vector, `·` for a vanishing one
///
/// +y points up, matching the plot orientation.
#[must_use]
pub fn arrow_glyph(direction: Vec2) -> char {
    const GLYPHS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];
    if direction.norm_squared() < 1e-12 {
        return '·';
    }
    let sector = (direction.y.atan2(direction.x) / FRAC_PI_4).round() as i32;
    GLYPHS[sector.rem_euclid(8) as usize]
}
