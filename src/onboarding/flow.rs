//! Async driver that connects the sequencer to the submission API.

use std::sync::Arc;

use crate::api::OnboardingApi;
use crate::session::Session;

use super::answers::OnboardingAnswers;
use super::payload::OnboardingResponse;
use super::sequencer::{BackOutcome, NextOutcome, Sequencer};
use super::steps::StepId;
use super::validation::StepError;

/// What the host should render after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowStatus {
    Moved(StepId),
    Invalid(Vec<StepError>),
    /// Submission accepted; the wizard has been reset.
    Completed(OnboardingResponse),
    /// Submission failed; the wizard stays on the final step.
    Failed(String),
    /// Back was pressed on the first step.
    Exit,
}

pub struct OnboardingFlow {
    sequencer: Sequencer,
    api: Arc<dyn OnboardingApi>,
}

impl OnboardingFlow {
    pub fn new(api: Arc<dyn OnboardingApi>) -> Self {
        Self::with_sequencer(Sequencer::new(), api)
    }

    /// Resumes a wizard, e.g. one restored from [`Sequencer::restore`].
    pub fn with_sequencer(sequencer: Sequencer, api: Arc<dyn OnboardingApi>) -> Self {
        Self { sequencer, api }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn update<F: FnOnce(&mut OnboardingAnswers)>(&mut self, edit: F) {
        self.sequencer.update(edit);
    }

    /// Validates and advances, submitting on the final step.
    ///
    /// `&mut self` keeps at most one submission in flight per wizard.
    pub async fn next(&mut self, session: &mut Session) -> FlowStatus {
        let request = match self.sequencer.go_next() {
            NextOutcome::Advanced(step) => return FlowStatus::Moved(step),
            NextOutcome::Rejected(errors) => return FlowStatus::Invalid(errors),
            NextOutcome::Submit(request) => request,
        };

        match self.api.submit(&request).await {
            Ok(response) => {
                #[cfg(feature = "tracing")]
                tracing::info!("Onboarding submitted: calorie target {}", response.calorie_target);

                self.sequencer = Sequencer::new();
                // the server already holds the result; a stale local flag is refreshed on next sign-in
                if let Err(_e) = session.mark_onboarding_complete().await {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Failed to persist onboarding flag: {}", _e);
                }
                FlowStatus::Completed(response)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Onboarding submission failed: {}", e);

                let message = e.user_message();
                self.sequencer.record_submission_failure(message.clone());
                FlowStatus::Failed(message)
            }
        }
    }

    pub fn back(&mut self) -> FlowStatus {
        match self.sequencer.go_back() {
            BackOutcome::Moved(step) => FlowStatus::Moved(step),
            BackOutcome::Exit => FlowStatus::Exit,
        }
    }
}
