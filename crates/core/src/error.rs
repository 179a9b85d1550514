//! Error type for field evaluation and session construction
//!
//! Only programmer errors live here: mismatched evaluation inputs and invalid
//! configuration. Slider input is clamped and never produces an error.

use std::fmt;

/// Errors raised by the field evaluator, the sample grid and session setup
#[derive(Debug, Clone, PartialEq)]
pub enum DipoleError {
    /// Evaluation inputs are malformed (mismatched coordinate matrix shapes, empty grid)
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },
    /// A configuration parameter is outside its valid range
    InvalidConfig {
        /// Name of the offending parameter (e.g. `"resolution"`)
        parameter: &'static str,
        /// Description of the constraint that was violated
        message: String,
    },
}

impl DipoleError {
    /// Create an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an `InvalidConfig` error for a named parameter
    pub fn invalid_config(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter,
            message: message.into(),
        }
    }
}

impl fmt::Display for DipoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DipoleError::InvalidInput { message } => write!(f, "InvalidInput: {message}"),
            DipoleError::InvalidConfig { parameter, message } => {
                write!(f, "Invalid configuration parameter {parameter}: {message}")
            }
        }
    }
}

impl std::error::Error for DipoleError {}
