//! Dipole Field Core Library
//!
//! Electrostatic field of a two-charge dipole on a fixed square grid, with an
//! interactive session that moves the charges and redraws after every change.
//!
//! ## Layout
//!
//! - `solver`: Coulomb superposition over a sample grid (rayon across rows)
//! - `grid`: the fixed sampling lattice
//! - `session`: two-charge state, clamped position updates, recompute-and-render
//! - `render`: the frame handed to surfaces, colour maps, a headless text surface
//!
//! ## Example
//!
//! ```rust
//! use dipole_core::{Axis, ChargeId, InteractiveSession, SessionConfig, TextSurface};
//!
//! let mut session = InteractiveSession::new(SessionConfig::default(), TextSurface::new())?;
//! session
//!     .set_position(ChargeId::Negative, Axis::X, 0.0)
//!     .unwrap_or_else(|never| match never {});
//! assert_eq!(session.state().separation(), 1.0);
//! # Ok::<(), dipole_core::DipoleError>(())
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Sampling and evaluation
pub mod grid;
pub mod solver;

// Interaction and output
pub mod render;
pub mod session;

// Re-export core types
pub use core_types::{Axis, Charge, ChargeId, Polarity, Vec2};
pub use error::DipoleError;

// Re-export evaluation types
pub use grid::SampleGrid;
pub use solver::{CoulombSolver, FieldData, VectorField};

// Re-export session and rendering types
pub use render::{ChargeMarker, ContourScale, FieldFrame, RenderSurface, TextSurface};
pub use session::{DisplayConfig, InteractiveSession, SessionConfig, SessionLabels, SessionState};
