//! Field evaluation
//!
//! `CoulombSolver` is the field evaluator: a pure function of the sample grid
//! and the charge list. `FieldData` and `VectorField` hold its inputs and
//! outputs as row-major matrices.
//!
//! # Example
//!
//! ```rust
//! use dipole_core::solver::CoulombSolver;
//! use dipole_core::{Charge, SampleGrid, Vec2};
//!
//! let grid = SampleGrid::square(5.0, 20).unwrap();
//! let charges = [
//!     Charge::new(1.0, Vec2::new(-1.0, 0.0)),
//!     Charge::new(-1.0, Vec2::new(1.0, 0.0)),
//! ];
//! let field = CoulombSolver::default().evaluate(&grid, &charges);
//! assert_eq!(field.width(), 20);
//! ```

pub mod coulomb;
mod fields;
pub mod profiler;
mod vector_field;

// Re-exports
pub use coulomb::{CoulombSolver, COULOMB_CONSTANT, DEFAULT_REGULARIZATION};
pub use fields::FieldData;
pub use profiler::{FrameTimer, ProfilerScope};
pub use vector_field::VectorField;
