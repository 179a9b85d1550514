//! Perceptual colour maps for magnitude shading
//!
//! Piecewise-linear approximations of viridis (heat map) and plasma (arrows)
//! through five anchor colours each.

use serde::{Deserialize, Serialize};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// Construct from components
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

const VIRIDIS: [Rgb; 5] = [
    Rgb::new(68, 1, 84),
    Rgb::new(59, 82, 139),
    Rgb::new(33, 145, 140),
    Rgb::new(94, 201, 98),
    Rgb::new(253, 231, 37),
];

const PLASMA: [Rgb; 5] = [
    Rgb::new(13, 8, 135),
    Rgb::new(126, 3, 168),
    Rgb::new(204, 71, 120),
    Rgb::new(248, 149, 64),
    Rgb::new(240, 249, 33),
];

/// Viridis colour for `t` in `[0, 1]` (clamped; NaN maps to 0)
#[must_use]
pub fn viridis(t: f32) -> Rgb {
    sample(&VIRIDIS, t)
}

/// Plasma colour for `t` in `[0, 1]` (clamped; NaN maps to 0)
#[must_use]
pub fn plasma(t: f32) -> Rgb {
    sample(&PLASMA, t)
}

fn sample(stops: &[Rgb; 5], t: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (stops.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let f = scaled - i as f32;
    let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * f).round() as u8;
    let (a, b) = (stops[i], stops[i + 1]);
    Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_hit_anchor_colours() {
        assert_eq!(viridis(0.0), VIRIDIS[0]);
        assert_eq!(viridis(1.0), VIRIDIS[4]);
        assert_eq!(plasma(0.5), PLASMA[2]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(viridis(-3.0), VIRIDIS[0]);
        assert_eq!(viridis(7.0), VIRIDIS[4]);
        assert_eq!(plasma(f32::NAN), PLASMA[0]);
    }

    #[test]
    fn test_interpolates_between_anchors() {
        let mid = viridis(0.125);
        assert_eq!(mid, Rgb::new(64, 42, 112));
    }
}
