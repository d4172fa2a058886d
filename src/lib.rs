#![allow(non_snake_case)]

use types::Float;
pub extern crate nalgebra as na;

pub mod builders;
pub mod cloth;
pub mod energy;
pub mod error;
pub mod integrators;
pub mod plot;
pub mod types;
pub mod util;

// Wasm bindings
pub mod interface;

pub const GRAVITY: Float = 9.81;

/// Floor for spring lengths, so a collapsed spring never divides by zero
pub const EPSILON: Float = 1e-6;

/// Components below this are treated as zero when normalizing directions
pub const ZERO_TOLERANCE: Float = 1e-4;
