use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ScoredProperty, StudentProfile};

/// Errors raised by the reply wizard
#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("event {event} is not valid while {stage}")]
    InvalidTransition {
        stage: WizardStage,
        event: &'static str,
    },
}

/// Stage names, as reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    SelectingInput,
    Scoring,
    Reviewing,
    Done,
    Failed,
}

impl std::fmt::Display for WizardStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WizardStage::SelectingInput => "selecting_input",
            WizardStage::Scoring => "scoring",
            WizardStage::Reviewing => "reviewing",
            WizardStage::Done => "done",
            WizardStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A generated reply awaiting review
#[derive(Debug, Clone)]
pub struct ReplyDraft {
    pub matches: Vec<ScoredProperty>,
    pub content: String,
}

#[derive(Debug, Clone)]
pub enum WizardState {
    SelectingInput,
    Scoring { profile: StudentProfile },
    Reviewing { profile: StudentProfile, draft: ReplyDraft },
    Done { draft: ReplyDraft },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// Profile submitted from the form
    Submit(StudentProfile),
    /// Matches and content are ready
    Scored(ReplyDraft),
    /// Reply accepted (copied or sent)
    Accept,
    Fail(String),
    /// Back to an empty form
    Reset,
}

impl WizardEvent {
    fn name(&self) -> &'static str {
        match self {
            WizardEvent::Submit(_) => "submit",
            WizardEvent::Scored(_) => "scored",
            WizardEvent::Accept => "accept",
            WizardEvent::Fail(_) => "fail",
            WizardEvent::Reset => "reset",
        }
    }
}

impl WizardState {
    pub fn stage(&self) -> WizardStage {
        match self {
            WizardState::SelectingInput => WizardStage::SelectingInput,
            WizardState::Scoring { .. } => WizardStage::Scoring,
            WizardState::Reviewing { .. } => WizardStage::Reviewing,
            WizardState::Done { .. } => WizardStage::Done,
            WizardState::Failed { .. } => WizardStage::Failed,
        }
    }

    /// Apply an event, returning the next state
    ///
    /// Transitions:
    /// - SelectingInput --submit--> Scoring
    /// - Scoring --scored--> Reviewing
    /// - Scoring --fail--> Failed
    /// - Reviewing --submit--> Scoring (regenerate)
    /// - Reviewing --accept--> Done
    /// - Failed --submit--> Scoring (retry)
    /// - any --reset--> SelectingInput
    pub fn apply(self, event: WizardEvent) -> Result<WizardState, (WizardState, WizardError)> {
        match (self, event) {
            (_, WizardEvent::Reset) => Ok(WizardState::SelectingInput),
            (
                WizardState::SelectingInput
                | WizardState::Reviewing { .. }
                | WizardState::Failed { .. },
                WizardEvent::Submit(profile),
            ) => Ok(WizardState::Scoring { profile }),
            (WizardState::Scoring { profile }, WizardEvent::Scored(draft)) => {
                Ok(WizardState::Reviewing { profile, draft })
            }
            (WizardState::Scoring { .. }, WizardEvent::Fail(reason)) => {
                Ok(WizardState::Failed { reason })
            }
            (WizardState::Reviewing { draft, .. }, WizardEvent::Accept) => {
                Ok(WizardState::Done { draft })
            }
            (state, event) => {
                let err = WizardError::InvalidTransition {
                    stage: state.stage(),
                    event: event.name(),
                };
                Err((state, err))
            }
        }
    }
}

/// Holds the current state and rejects impossible transitions
#[derive(Debug)]
pub struct ReplyWizard {
    state: WizardState,
}

impl ReplyWizard {
    pub fn new() -> Self {
        Self {
            state: WizardState::SelectingInput,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn stage(&self) -> WizardStage {
        self.state.stage()
    }

    /// Apply an event; on error the state is left unchanged
    pub fn handle(&mut self, event: WizardEvent) -> Result<WizardStage, WizardError> {
        let current = std::mem::replace(&mut self.state, WizardState::SelectingInput);
        match current.apply(event) {
            Ok(next) => {
                self.state = next;
                Ok(self.state.stage())
            }
            Err((unchanged, err)) => {
                self.state = unchanged;
                Err(err)
            }
        }
    }

    /// Draft under review, if any
    pub fn draft(&self) -> Option<&ReplyDraft> {
        match &self.state {
            WizardState::Reviewing { draft, .. } | WizardState::Done { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn into_draft(self) -> Option<ReplyDraft> {
        match self.state {
            WizardState::Reviewing { draft, .. } | WizardState::Done { draft } => Some(draft),
            _ => None,
        }
    }
}

impl Default for ReplyWizard {
    fn default() -> Self {
        Self::new()
    }
}
