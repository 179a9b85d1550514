//! Vector type alias for 2D positions and field vectors.

use nalgebra::Vector2;

/// 2D vector type for charge positions, sample points and field values.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used throughout
/// the crate for positions in the plot plane and for (Ex, Ey) samples.
pub type Vec2 = Vector2<f32>;
