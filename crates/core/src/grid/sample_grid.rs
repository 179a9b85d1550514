//! Immutable lattice of field evaluation points
//!
//! The grid is built once per session, the same way a `linspace` + `meshgrid`
//! pair is: both axes include their endpoints, row `r` holds `y_r` and
//! column `c` holds `x_c`. Coordinates are stored as two equal-shaped
//! `FieldData` matrices so the evaluator can consume arbitrary lattices.

use crate::core_types::Vec2;
use crate::error::DipoleError;
use crate::solver::FieldData;

/// Rectangular lattice of sample points
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    xs: FieldData,
    ys: FieldData,
}

impl SampleGrid {
    /// Build a `resolution` x `resolution` lattice over `[-half_extent, half_extent]²`
    ///
    /// The axis values are mirrored exactly about zero, so `x_c == -x_(n-1-c)`
    /// holds bit for bit.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `resolution < 2` or `half_extent` is not finite and positive.
    pub fn square(half_extent: f32, resolution: usize) -> Result<Self, DipoleError> {
        if resolution < 2 {
            return Err(DipoleError::invalid_config(
                "resolution",
                format!("must be at least 2, got {resolution}"),
            ));
        }
        if !half_extent.is_finite() || half_extent <= 0.0 {
            return Err(DipoleError::invalid_config(
                "half_extent",
                format!("must be finite and positive, got {half_extent}"),
            ));
        }

        let axis = symmetric_linspace(half_extent, resolution);
        let xs = FieldData::from_fn(resolution, resolution, |c, _| axis[c]);
        let ys = FieldData::from_fn(resolution, resolution, |_, r| axis[r]);
        Ok(Self { xs, ys })
    }

    /// Wrap caller-supplied coordinate matrices
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the matrices differ in shape or are empty.
    pub fn from_coordinates(xs: FieldData, ys: FieldData) -> Result<Self, DipoleError> {
        if !xs.same_shape(&ys) {
            return Err(DipoleError::invalid_input(format!(
                "coordinate matrices differ in shape: x is {}x{}, y is {}x{}",
                xs.width, xs.height, ys.width, ys.height
            )));
        }
        if xs.is_empty() {
            return Err(DipoleError::invalid_input("sample grid has no points"));
        }
        if xs.len() != xs.width * xs.height || ys.len() != ys.width * ys.height {
            return Err(DipoleError::invalid_input(
                "coordinate data length does not match the declared dimensions",
            ));
        }
        Ok(Self { xs, ys })
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.xs.width
    }

    /// Number of rows
    #[must_use]
    pub fn height(&self) -> usize {
        self.xs.height
    }

    /// X coordinate matrix
    #[must_use]
    pub fn xs(&self) -> &FieldData {
        &self.xs
    }

    /// Y coordinate matrix
    #[must_use]
    pub fn ys(&self) -> &FieldData {
        &self.ys
    }

    /// Sample point at `(column, row)`
    #[must_use]
    pub fn point(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(self.xs.get(col, row), self.ys.get(col, row))
    }

    /// Iterate over `(column, row, point)` in row-major order
    pub fn points(&self) -> impl Iterator<Item = (usize, usize, Vec2)> + '_ {
        let width = self.width();
        self.xs
            .data
            .iter()
            .zip(&self.ys.data)
            .enumerate()
            .map(move |(i, (&x, &y))| (i % width, i / width, Vec2::new(x, y)))
    }

    /// Grid cell closest to `p` (Euclidean), ties resolved in row-major order
    #[must_use]
    pub fn nearest_cell(&self, p: Vec2) -> (usize, usize) {
        let mut best = (0, 0);
        let mut best_d2 = f32::INFINITY;
        for (col, row, q) in self.points() {
            let d2 = (q - p).norm_squared();
            if d2 < best_d2 {
                best_d2 = d2;
                best = (col, row);
            }
        }
        best
    }

    /// Axis-aligned bounding box as `(min, max)` corners
    #[must_use]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let (x0, x1) = self.xs.min_max().unwrap_or((0.0, 0.0));
        let (y0, y1) = self.ys.min_max().unwrap_or((0.0, 0.0));
        (Vec2::new(x0, y0), Vec2::new(x1, y1))
    }
}

/// `n` evenly spaced values from `-h` to `h`, mirrored exactly about zero
fn symmetric_linspace(h: f32, n: usize) -> Vec<f32> {
    let step = 2.0 * h / (n - 1) as f32;
    let mut axis = vec![0.0; n];
    for i in 0..n / 2 {
        let v = -h + step * i as f32;
        axis[i] = v;
        axis[n - 1 - i] = -v;
    }
    axis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_grid_matches_linspace() {
        let grid = SampleGrid::square(5.0, 20).unwrap();
        assert_eq!((grid.width(), grid.height()), (20, 20));
        assert_eq!(grid.point(0, 0), Vec2::new(-5.0, -5.0));
        assert_eq!(grid.point(19, 19), Vec2::new(5.0, 5.0));
        let step = 10.0 / 19.0;
        assert!((grid.point(1, 0).x - (-5.0 + step)).abs() < 1e-5);
        // meshgrid layout: x varies along columns, y along rows
        assert_eq!(grid.point(3, 7).x, grid.point(3, 0).x);
        assert_eq!(grid.point(3, 7).y, grid.point(0, 7).y);
    }

    #[test]
    fn test_axis_is_mirror_symmetric() {
        for n in [2, 5, 20, 21] {
            let axis = symmetric_linspace(5.0, n);
            for i in 0..n {
                assert_eq!(axis[i], -axis[n - 1 - i], "n={n}, i={i}");
            }
        }
        assert_eq!(symmetric_linspace(5.0, 5)[2], 0.0);
    }

    #[test]
    fn test_rejects_degenerate_configuration() {
        assert!(matches!(
            SampleGrid::square(5.0, 1),
            Err(DipoleError::InvalidConfig {
                parameter: "resolution",
                ..
            })
        ));
        assert!(SampleGrid::square(0.0, 20).is_err());
        assert!(SampleGrid::square(f32::NAN, 20).is_err());
    }

    #[test]
    fn test_from_coordinates_rejects_mismatched_shapes() {
        let err = SampleGrid::from_coordinates(FieldData::new(3, 4), FieldData::new(4, 3))
            .unwrap_err();
        assert!(matches!(err, DipoleError::InvalidInput { .. }));
        assert!(SampleGrid::from_coordinates(FieldData::new(0, 0), FieldData::new(0, 0)).is_err());
    }

    #[test]
    fn test_nearest_cell() {
        let grid = SampleGrid::square(1.0, 3).unwrap();
        assert_eq!(grid.nearest_cell(Vec2::new(0.1, -0.9)), (1, 0));
        assert_eq!(grid.nearest_cell(Vec2::new(5.0, 5.0)), (2, 2));
    }

    #[test]
    fn test_points_cover_grid_in_row_major_order() {
        let grid = SampleGrid::square(1.0, 3).unwrap();
        let pts: Vec<_> = grid.points().collect();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[4], (1, 1, Vec2::new(0.0, 0.0)));
        assert_eq!(pts[5].0, 2);
        assert_eq!(pts[5].1, 1);
    }
}
