//! Core types: vectors and point charges

pub mod charge;
pub mod vec2;

pub use charge::{Axis, Charge, ChargeId, Polarity};
pub use vec2::Vec2;
