//! Onboarding sequencer - pure wizard state machine.
//!
//! The current position is kept as a [`StepId`] and resolved against a
//! freshly derived step list on every query, so editing the goal never moves
//! the user to an unrelated step.

use serde::{Deserialize, Serialize};

use super::answers::OnboardingAnswers;
use super::payload::OnboardingRequest;
use super::steps::{derive_steps, StepId, TOTAL_VISUAL_STEPS};
use super::validation::{validate_step, StepError};

/// Result of pressing "Next".
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    /// Moved to the given step.
    Advanced(StepId),
    /// Stayed put (or jumped back to the first invalid step) with errors.
    Rejected(Vec<StepError>),
    /// Final step passed; hand this payload to the submission collaborator.
    Submit(OnboardingRequest),
}

/// Result of pressing "Back".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(StepId),
    /// Already on the first step; the host should leave the wizard.
    Exit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequencer {
    answers: OnboardingAnswers,
    current: StepId,
    #[serde(skip)]
    errors: Vec<StepError>,
    #[serde(skip)]
    server_error: Option<String>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Self::with_answers(OnboardingAnswers::default())
    }

    /// Starts at the first step with pre-filled answers.
    pub fn with_answers(answers: OnboardingAnswers) -> Self {
        Self {
            answers,
            current: StepId::Basics,
            errors: Vec::new(),
            server_error: None,
        }
    }

    pub fn answers(&self) -> &OnboardingAnswers {
        &self.answers
    }

    pub fn into_answers(self) -> OnboardingAnswers {
        self.answers
    }

    /// Applies an edit to the answers. Step errors are cleared.
    pub fn update<F: FnOnce(&mut OnboardingAnswers)>(&mut self, edit: F) {
        edit(&mut self.answers);
        self.errors.clear();
    }

    /// Step list for the answers as they are now.
    pub fn steps(&self) -> Vec<StepId> {
        derive_steps(self.answers.goal)
    }

    /// The step being shown.
    ///
    /// A goal sub-step that no longer belongs to the sequence resolves to the
    /// goal step itself.
    pub fn current_step(&self) -> StepId {
        if self.steps().contains(&self.current) {
            self.current
        } else {
            StepId::Goal
        }
    }

    /// Zero-based position of the current step in [`Sequencer::steps`].
    pub fn position(&self) -> usize {
        let current = self.current_step();
        self.steps()
            .iter()
            .position(|s| *s == current)
            .unwrap_or_default()
    }

    pub fn visual_step_number(&self) -> u8 {
        self.current_step().visual_number()
    }

    pub fn total_visual_steps(&self) -> u8 {
        TOTAL_VISUAL_STEPS
    }

    pub fn is_first_step(&self) -> bool {
        self.position() == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.position() + 1 == self.steps().len()
    }

    pub fn errors(&self) -> &[StepError] {
        &self.errors
    }

    /// First error reported for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }

    /// Records a failed submission. The wizard stays where it is.
    pub fn record_submission_failure(&mut self, message: impl Into<String>) {
        self.server_error = Some(message.into());
    }

    pub fn go_next(&mut self) -> NextOutcome {
        let step = self.current_step();
        self.current = step;

        let errors = validate_step(step, &self.answers);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return NextOutcome::Rejected(errors);
        }
        self.errors.clear();

        let steps = self.steps();
        let position = self.position();
        if let Some(next) = steps.get(position + 1) {
            self.current = *next;
            return NextOutcome::Advanced(*next);
        }

        self.server_error = None;

        // earlier answers may have been edited (or restored) since they passed
        for step in steps {
            let errors = validate_step(step, &self.answers);
            if !errors.is_empty() {
                self.current = step;
                self.errors = errors.clone();
                return NextOutcome::Rejected(errors);
            }
        }

        match OnboardingRequest::try_from(&self.answers) {
            Ok(request) => NextOutcome::Submit(request),
            Err(e) => {
                let errors = vec![StepError::new(self.current.as_str(), e.to_string())];
                self.errors = errors.clone();
                NextOutcome::Rejected(errors)
            }
        }
    }

    pub fn go_back(&mut self) -> BackOutcome {
        self.errors.clear();

        let position = self.position();
        if position == 0 {
            return BackOutcome::Exit;
        }

        let previous = self.steps()[position - 1];
        self.current = previous;
        BackOutcome::Moved(previous)
    }

    /// Serializes answers and position. Errors are not part of a snapshot.
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn restore(snapshot: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(snapshot)
    }
}
