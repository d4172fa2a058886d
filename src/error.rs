//! Error type for cloth operations.
//!
//! Only configuration and lifecycle mistakes are reported. Numerical
//! degeneracies inside a step are guarded where they occur and never surface
//! here.

use std::fmt;

use crate::types::Float;

#[derive(Clone, Debug, PartialEq)]
pub enum ClothError {
    /// A configuration value was rejected before anything was allocated
    InvalidConfiguration {
        /// Which value was wrong and why
        reason: &'static str,
    },
    /// The cloth was stepped before `initialize` succeeded
    Uninitialized,
    /// Negative or non-finite time step
    InvalidTimeStep { dt: Float },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid cloth configuration: {reason}")
            }
            Self::Uninitialized => write!(f, "cloth has not been initialized"),
            Self::InvalidTimeStep { dt } => write!(f, "invalid time step: {dt}"),
        }
    }
}

impl std::error::Error for ClothError {}
