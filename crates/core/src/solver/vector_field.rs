//! Two-component field sampled on the grid

use super::FieldData;
use crate::core_types::Vec2;

/// (Ex, Ey) samples, one pair per grid point
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    /// X component, row-major
    pub ex: FieldData,
    /// Y component, row-major
    pub ey: FieldData,
}

impl VectorField {
    /// Zero field with the given dimensions
    #[must_use]
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            ex: FieldData::new(width, height),
            ey: FieldData::new(width, height),
        }
    }

    /// Number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.ex.width
    }

    /// Number of rows
    #[must_use]
    pub fn height(&self) -> usize {
        self.ex.height
    }

    /// Field vector at `(column, row)`
    #[must_use]
    pub fn at(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(self.ex.get(col, row), self.ey.get(col, row))
    }

    /// Euclidean norm at every point
    #[must_use]
    pub fn magnitude(&self) -> FieldData {
        FieldData {
            data: self
                .ex
                .data
                .iter()
                .zip(&self.ey.data)
                .map(|(&x, &y)| (x * x + y * y).sqrt())
                .collect(),
            width: self.ex.width,
            height: self.ex.height,
        }
    }

    /// Unit-length direction at every point
    ///
    /// Divides by `sqrt(Ex² + Ey² + epsilon)`, so a vanishing field maps to a
    /// (near) zero vector instead of NaN. Same stability policy as the
    /// evaluator's distance regularization.
    #[must_use]
    pub fn unit_directions(&self, epsilon: f32) -> VectorField {
        let (ex, ey) = self
            .ex
            .data
            .iter()
            .zip(&self.ey.data)
            .map(|(&x, &y)| {
                let norm = (x * x + y * y + epsilon).sqrt();
                (x / norm, y / norm)
            })
            .unzip();
        VectorField {
            ex: FieldData {
                data: ex,
                width: self.ex.width,
                height: self.ex.height,
            },
            ey: FieldData {
                data: ey,
                width: self.ey.width,
                height: self.ey.height,
            },
        }
    }

    /// Elementwise sum of two fields of the same shape
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ
    #[must_use]
    pub fn superpose(&self, other: &VectorField) -> VectorField {
        assert!(
            self.ex.same_shape(&other.ex),
            "Vector fields differ in shape"
        );
        let sum = |a: &FieldData, b: &FieldData| FieldData {
            data: a.data.iter().zip(&b.data).map(|(x, y)| x + y).collect(),
            width: a.width,
            height: a.height,
        };
        VectorField {
            ex: sum(&self.ex, &other.ex),
            ey: sum(&self.ey, &other.ey),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field_from(pairs: &[(f32, f32)], width: usize) -> VectorField {
        let height = pairs.len() / width;
        VectorField {
            ex: FieldData::from_fn(width, height, |c, r| pairs[r * width + c].0),
            ey: FieldData::from_fn(width, height, |c, r| pairs[r * width + c].1),
        }
    }

    #[test]
    fn test_magnitude_is_euclidean_norm() {
        let f = field_from(&[(3.0, 4.0), (0.0, -2.0)], 2);
        assert_eq!(f.magnitude().data, vec![5.0, 2.0]);
    }

    #[test]
    fn test_unit_directions() {
        let f = field_from(&[(3.0, 4.0), (0.0, 0.0)], 2);
        let u = f.unit_directions(1e-10);
        assert_relative_eq!(u.at(0, 0).x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(u.at(0, 0).y, 0.8, epsilon = 1e-6);
        // Zero field stays finite
        assert_eq!(u.at(1, 0), Vec2::zeros());
    }

    #[test]
    fn test_superpose_is_elementwise() {
        let a = field_from(&[(1.0, 2.0), (3.0, 4.0)], 1);
        let b = field_from(&[(0.5, -2.0), (1.0, 1.0)], 1);
        let s = a.superpose(&b);
        assert_eq!(s.at(0, 0), Vec2::new(1.5, 0.0));
        assert_eq!(s.at(0, 1), Vec2::new(4.0, 5.0));
    }
}
