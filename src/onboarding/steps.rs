//! Wizard step identifiers and the goal-dependent step sequence.

use serde::{Deserialize, Serialize};

use super::answers::Goal;

/// The wizard always reports "Step K of 7", whatever branch is active.
pub const TOTAL_VISUAL_STEPS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepId {
    Basics,
    Stats,
    Goal,
    TargetWeight,
    FocusArea,
    Experience,
    Injuries,
    Allergies,
    Availability,
}

impl StepId {
    /// Every step the wizard can show, in display order.
    pub const ALL: [StepId; 9] = [
        StepId::Basics,
        StepId::Stats,
        StepId::Goal,
        StepId::TargetWeight,
        StepId::FocusArea,
        StepId::Experience,
        StepId::Injuries,
        StepId::Allergies,
        StepId::Availability,
    ];

    /// User-facing step number, 1 through 7.
    ///
    /// The goal sub-steps share the goal's number.
    pub fn visual_number(self) -> u8 {
        match self {
            StepId::Basics => 1,
            StepId::Stats => 2,
            StepId::Goal | StepId::TargetWeight | StepId::FocusArea => 3,
            StepId::Experience => 4,
            StepId::Injuries => 5,
            StepId::Allergies => 6,
            StepId::Availability => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Basics => "basics",
            StepId::Stats => "stats",
            StepId::Goal => "goal",
            StepId::TargetWeight => "targetWeight",
            StepId::FocusArea => "focusArea",
            StepId::Experience => "experience",
            StepId::Injuries => "injuries",
            StepId::Allergies => "allergies",
            StepId::Availability => "availability",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered steps for the given goal.
///
/// Weight goals get `targetWeight`, muscle gain gets `focusArea`, anything
/// else gets neither.
pub fn derive_steps(goal: Option<Goal>) -> Vec<StepId> {
    let mut steps = vec![StepId::Basics, StepId::Stats, StepId::Goal];

    match goal {
        Some(g) if g.needs_target_weight() => steps.push(StepId::TargetWeight),
        Some(g) if g.needs_muscle_groups() => steps.push(StepId::FocusArea),
        _ => {}
    }

    steps.extend([
        StepId::Experience,
        StepId::Injuries,
        StepId::Allergies,
        StepId::Availability,
    ]);
    steps
}
