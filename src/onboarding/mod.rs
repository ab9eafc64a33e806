//! Onboarding wizard
//!
//! The step list depends on the user's goal, each step validates its own
//! fields before the wizard advances, and the final step turns the collected
//! answers into a submission payload.

pub mod answers;
pub mod flow;
pub mod payload;
pub mod sequencer;
pub mod steps;
pub mod validation;

pub use answers::{
    ChipSelection, ExperienceLevel, Gender, Goal, MuscleGroup, OnboardingAnswers,
    TrainingLocation, NONE_SENTINEL,
};
pub use flow::{FlowStatus, OnboardingFlow};
pub use payload::{
    ApiEnvelope, OnboardingRequest, OnboardingResponse, PayloadError, PlanSummary,
    DIET_PREFERENCES,
};
pub use sequencer::{BackOutcome, NextOutcome, Sequencer};
pub use steps::{derive_steps, StepId, TOTAL_VISUAL_STEPS};
pub use validation::{validate_step, StepError};
