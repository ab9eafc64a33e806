//! Per-step validation.
//!
//! Each step checks only its own fields and reports at most one error per
//! field. Validation never touches the network.

use serde::{Deserialize, Serialize};

use super::answers::{Goal, OnboardingAnswers};
use super::steps::StepId;

pub const MIN_AGE: u32 = 13;
pub const MAX_AGE: u32 = 99;
pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MAX_HEIGHT_CM: f64 = 220.0;
pub const MIN_WEIGHT_KG: f64 = 30.0;
pub const MAX_WEIGHT_KG: f64 = 200.0;
pub const MAX_NAME_LEN: usize = 255;
pub const MIN_TRAINING_DAYS: u32 = 2;
pub const MAX_TRAINING_DAYS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepError {
    pub field: String,
    pub message: String,
}

impl StepError {
    pub(crate) fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validates the fields owned by `step`.
pub fn validate_step(step: StepId, answers: &OnboardingAnswers) -> Vec<StepError> {
    let mut errors = Vec::new();

    match step {
        StepId::Basics => {
            let name = answers.name.trim();
            if name.is_empty() {
                errors.push(StepError::new("name", "Name is required"));
            } else if name.chars().count() > MAX_NAME_LEN {
                errors.push(StepError::new(
                    "name",
                    format!("Name must be at most {MAX_NAME_LEN} characters"),
                ));
            }
            if answers.gender.is_none() {
                errors.push(StepError::new("gender", "Please select your gender"));
            }
        }

        StepId::Stats => {
            if !answers.age.is_some_and(|age| (MIN_AGE..=MAX_AGE).contains(&age)) {
                errors.push(StepError::new(
                    "age",
                    format!("Age must be between {MIN_AGE} and {MAX_AGE}"),
                ));
            }
            if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&answers.height_cm) {
                errors.push(StepError::new("heightCm", "Height must be between 100 and 220 cm"));
            }
            if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&answers.weight_kg) {
                errors.push(StepError::new("weightKg", "Weight must be between 30 and 200 kg"));
            }
        }

        StepId::Goal => {
            if answers.goal.is_none() {
                errors.push(StepError::new("goal", "Please select a fitness goal"));
            }
        }

        StepId::TargetWeight => match answers.target_weight_kg {
            Some(target) if (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&target) => {
                if answers.goal == Some(Goal::WeightLoss) && target >= answers.weight_kg {
                    errors.push(StepError::new(
                        "targetWeightKg",
                        "Target weight must be less than current weight for weight loss",
                    ));
                } else if answers.goal == Some(Goal::WeightGain) && target <= answers.weight_kg {
                    errors.push(StepError::new(
                        "targetWeightKg",
                        "Target weight must be greater than current weight for weight gain",
                    ));
                }
            }
            _ => errors.push(StepError::new("targetWeightKg", "Please set a valid target weight")),
        },

        StepId::FocusArea => {
            if answers.target_muscle_groups.is_empty() {
                errors.push(StepError::new(
                    "targetMuscleGroups",
                    "Select at least one muscle group",
                ));
            }
        }

        StepId::Experience => {
            if answers.experience_level.is_none() {
                errors.push(StepError::new(
                    "experienceLevel",
                    "Please select your experience level",
                ));
            }
        }

        StepId::Injuries => {
            if answers.injuries.is_empty() {
                errors.push(StepError::new(
                    "injuries",
                    "Please select at least one option or None",
                ));
            }
        }

        StepId::Allergies => {
            if answers.allergies.is_empty() {
                errors.push(StepError::new(
                    "allergies",
                    "Please select at least one option or None",
                ));
            }
        }

        StepId::Availability => {
            match answers.training_days_per_week {
                None | Some(0) => errors.push(StepError::new(
                    "trainingDaysPerWeek",
                    "Please select training days per week",
                )),
                Some(days) if !(MIN_TRAINING_DAYS..=MAX_TRAINING_DAYS).contains(&days) => {
                    errors.push(StepError::new(
                        "trainingDaysPerWeek",
                        format!(
                            "Training days must be between {MIN_TRAINING_DAYS} and {MAX_TRAINING_DAYS}"
                        ),
                    ))
                }
                Some(_) => {}
            }
            if answers.training_location.is_none() {
                errors.push(StepError::new(
                    "trainingLocation",
                    "Please select training location",
                ));
            }
        }
    }

    errors
}
