//! Password scoring stages
//!
//! Each stage computes one factor of the final score.

pub mod entropy;
pub mod pattern;

pub use entropy::{calculate_entropy, pool_size};
pub use pattern::penalty_multiplier;
