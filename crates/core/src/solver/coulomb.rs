//! Coulomb superposition over a sample grid
//!
//! Each charge contributes
//!
//! ```text
//! E_i(p) = k · q_i · (p − p_i) / (|p − p_i|² + ε)^(3/2)
//! ```
//!
//! and the field at a point is the vector sum over all charges.
//!
//! # Regularization
//!
//! ε is added to the squared distance before the root and cube so the
//! evaluation never divides by zero. This is a numerical policy, not
//! physics: within a few `√ε` of a charge the returned value is bounded by
//! roughly `k·|q|/ε` instead of diverging, and a sample point that sits
//! exactly on a charge receives a zero contribution from it.

use super::{FieldData, VectorField};
use crate::core_types::{Charge, Vec2};
use crate::error::DipoleError;
use crate::grid::SampleGrid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Illustrative Coulomb constant (N·m²/C² scaled to 1)
pub const COULOMB_CONSTANT: f32 = 1.0;

/// Default squared-distance regularization
pub const DEFAULT_REGULARIZATION: f32 = 1e-10;

/// Field evaluator for point charges under Coulomb's law
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SolverParams")]
pub struct CoulombSolver {
    k: f32,
    epsilon: f32,
}

/// Unchecked wire form; deserialization goes through `CoulombSolver::new`
#[derive(Deserialize)]
struct SolverParams {
    k: f32,
    epsilon: f32,
}

impl TryFrom<SolverParams> for CoulombSolver {
    type Error = DipoleError;

    fn try_from(params: SolverParams) -> Result<Self, DipoleError> {
        Self::new(params.k, params.epsilon)
    }
}

impl Default for CoulombSolver {
    fn default() -> Self {
        Self {
            k: COULOMB_CONSTANT,
            epsilon: DEFAULT_REGULARIZATION,
        }
    }
}

impl CoulombSolver {
    /// Create an evaluator with Coulomb constant `k` and regularization `epsilon`
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `k` is not finite, or `epsilon` is not finite and positive.
    pub fn new(k: f32, epsilon: f32) -> Result<Self, DipoleError> {
        if !k.is_finite() {
            return Err(DipoleError::invalid_config(
                "coulomb_constant",
                format!("must be finite, got {k}"),
            ));
        }
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(DipoleError::invalid_config(
                "regularization",
                format!("must be finite and positive, got {epsilon}"),
            ));
        }
        Ok(Self { k, epsilon })
    }

    /// Coulomb constant
    #[must_use]
    pub fn k(&self) -> f32 {
        self.k
    }

    /// Squared-distance regularization
    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Upper bound on the contribution of a single charge of magnitude `q`
    ///
    /// `k·|q| / √ε³`. The true maximum of `r / (r² + ε)^(3/2)` is smaller.
    #[must_use]
    pub fn magnitude_bound(&self, q: f32) -> f32 {
        self.k.abs() * q.abs() / self.epsilon.sqrt().powi(3)
    }

    /// Field at a single point
    #[must_use]
    pub fn field_at(&self, point: Vec2, charges: &[Charge]) -> Vec2 {
        let mut e = Vec2::zeros();
        for charge in charges {
            let d = point - charge.position();
            let r2 = d.norm_squared() + self.epsilon;
            let r = r2.sqrt();
            e += d * (self.k * charge.magnitude() / (r2 * r));
        }
        e
    }

    /// Field at every grid point
    ///
    /// Rows are evaluated in parallel; every point is independent so the
    /// result matches `field_at` exactly.
    #[must_use]
    pub fn evaluate(&self, grid: &SampleGrid, charges: &[Charge]) -> VectorField {
        let width = grid.width();
        let mut field = VectorField::zeros(width, grid.height());
        let xs = grid.xs().as_slice();
        let ys = grid.ys().as_slice();

        field
            .ex
            .data
            .par_chunks_mut(width)
            .zip(field.ey.data.par_chunks_mut(width))
            .enumerate()
            .for_each(|(row, (ex_row, ey_row))| {
                let base = row * width;
                for (col, (ex, ey)) in ex_row.iter_mut().zip(ey_row.iter_mut()).enumerate() {
                    let p = Vec2::new(xs[base + col], ys[base + col]);
                    let e = self.field_at(p, charges);
                    *ex = e.x;
                    *ey = e.y;
                }
            });

        field
    }

    /// Field over raw coordinate matrices
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `xs` and `ys` differ in shape or are empty.
    pub fn evaluate_arrays(
        &self,
        xs: &FieldData,
        ys: &FieldData,
        charges: &[Charge],
    ) -> Result<VectorField, DipoleError> {
        let grid = SampleGrid::from_coordinates(xs.clone(), ys.clone())?;
        Ok(self.evaluate(&grid, charges))
    }
}
