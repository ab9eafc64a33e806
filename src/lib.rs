//! Onboarding and password strength core for the ANES client
//!
//! Two independent pieces:
//!
//! - the onboarding sequencer, which derives the goal-dependent wizard steps,
//!   validates each step and assembles the submission payload;
//! - the password strength scorer, a pure entropy-based pipeline with a
//!   common-password blocklist and an externally supplied breach flag.
//!
//! # Features
//!
//! - `async` (default): debounced evaluation with cancellation, soft-failing
//!   breach lookup and the file-backed session store
//! - `tracing`: Enables logging via tracing crate
//! - `http`: reqwest clients for the onboarding API and the breach range API
//!
//! # Environment Variables
//!
//! See [`config`]. `ANES_BLOCKLIST_PATH` adds an extra blocklist file to the
//! built-in list.
//!
//! # Example
//!
//! ```rust
//! use anes_core::evaluate_password_strength;
//! use anes_core::onboarding::{NextOutcome, Sequencer};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let evaluation = evaluate_password_strength(&password, false);
//! println!("Score: {} ({})", evaluation.score, evaluation.level);
//!
//! let mut wizard = Sequencer::new();
//! wizard.update(|a| a.name = "Dana".to_string());
//! assert!(matches!(wizard.go_next(), NextOutcome::Rejected(_)));
//! assert_eq!(wizard.error_for("gender"), Some("Please select your gender"));
//! ```

pub mod api;
pub mod blocklist;
pub mod breach;
pub mod config;
pub mod onboarding;
pub mod session;
pub mod strength;

mod evaluator;
mod sections;

#[cfg(test)]
mod test_env;

pub use blocklist::{default_blocklist, Blocklist, BlocklistError};
pub use evaluator::{compute_score, evaluate_password_strength, PasswordScorer};
pub use sections::{calculate_entropy, penalty_multiplier, pool_size};
pub use strength::{PasswordStrengthResult, StrengthLevel};

#[cfg(feature = "async")]
pub use evaluator::{evaluate_password_strength_tx, EVALUATION_DEBOUNCE};
