//! Submission payload and the backend's response shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::answers::{
    ExperienceLevel, Gender, Goal, MuscleGroup, OnboardingAnswers, TrainingLocation, NONE_SENTINEL,
};

/// Chips on the allergies step that are really diet preferences.
pub const DIET_PREFERENCES: [&str; 5] = ["Keto", "Vegan", "Vegetarian", "Low Carb", "No Preference"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Missing required answer: {0}")]
    MissingField(&'static str),
}

/// Body of `POST /api/v1/onboarding/complete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Goal,
    pub target_weight_kg: Option<f64>,
    pub target_muscle_groups: Option<Vec<MuscleGroup>>,
    pub experience_level: ExperienceLevel,
    /// Injuries without the "None" sentinel
    pub injuries: Vec<String>,
    /// Allergies without diet preferences or the sentinel
    pub allergies: Vec<String>,
    pub diet_preferences: Vec<String>,
    pub training_days_per_week: u32,
    pub training_location: TrainingLocation,
    pub equipment: Vec<String>,
}

impl TryFrom<&OnboardingAnswers> for OnboardingRequest {
    type Error = PayloadError;

    fn try_from(answers: &OnboardingAnswers) -> Result<Self, Self::Error> {
        let goal = answers.goal.ok_or(PayloadError::MissingField("goal"))?;

        let (diet_preferences, allergies): (Vec<String>, Vec<String>) = answers
            .allergies
            .real_entries()
            .map(str::to_string)
            .partition(|a| DIET_PREFERENCES.contains(&a.as_str()));

        let injuries = answers
            .injuries
            .real_entries()
            .map(str::to_string)
            .collect();

        let equipment = if answers.equipment.is_empty() {
            vec![NONE_SENTINEL.to_string()]
        } else {
            answers.equipment.entries().to_vec()
        };

        Ok(Self {
            name: answers.name.trim().to_string(),
            gender: answers.gender.ok_or(PayloadError::MissingField("gender"))?,
            age: answers.age.ok_or(PayloadError::MissingField("age"))?,
            height_cm: answers.height_cm,
            weight_kg: answers.weight_kg,
            goal,
            target_weight_kg: if goal.needs_target_weight() {
                answers.target_weight_kg
            } else {
                None
            },
            target_muscle_groups: goal
                .needs_muscle_groups()
                .then(|| answers.target_muscle_groups.iter().copied().collect()),
            experience_level: answers
                .experience_level
                .ok_or(PayloadError::MissingField("experienceLevel"))?,
            injuries,
            allergies,
            diet_preferences,
            training_days_per_week: answers
                .training_days_per_week
                .ok_or(PayloadError::MissingField("trainingDaysPerWeek"))?,
            training_location: answers
                .training_location
                .ok_or(PayloadError::MissingField("trainingLocation"))?,
            equipment,
        })
    }
}

/// Computed plan returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_target: f64,
    pub plan_summary: PlanSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub program_name: String,
    pub duration_weeks: u32,
    pub days_per_week: u32,
    pub focus_areas: Vec<String>,
}

/// Envelope every backend response is wrapped in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}
