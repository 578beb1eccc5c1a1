//! Wizard state and its reducer.
//!
//! `WizardState` is a value; every change goes through `reduce`, which
//! consumes the old state and returns the new one.

use crate::entity::MemberDraft;
use crate::error::Error;

use super::steps::WizardStep;

/// Normalized, display-only error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
}

impl From<&Error> for ErrorInfo {
    fn from(err: &Error) -> Self {
        Self {
            message: err.user_message(),
        }
    }
}

/// State transitions of the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Step derived from navigation or picked on the progress indicator.
    GoToStep(WizardStep),
    /// The member collector published a new list.
    MembersChanged(Vec<MemberDraft>),
    SubmitStarted,
    SubmitFailed(ErrorInfo),
    /// A precondition failed before anything was sent.
    Rejected(ErrorInfo),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub member_drafts: Vec<MemberDraft>,
    pub is_submitting: bool,
    pub last_error: Option<ErrorInfo>,
}

impl WizardState {
    pub fn new(current_step: WizardStep, member_drafts: Vec<MemberDraft>) -> Self {
        Self {
            current_step,
            member_drafts,
            is_submitting: false,
            last_error: None,
        }
    }

    pub fn reduce(self, action: WizardAction) -> Self {
        match action {
            WizardAction::GoToStep(step) => Self {
                current_step: step,
                ..self
            },
            // Edits are frozen while a submission is in flight.
            WizardAction::MembersChanged(_) if self.is_submitting => self,
            WizardAction::MembersChanged(member_drafts) => Self {
                member_drafts,
                ..self
            },
            WizardAction::SubmitStarted => Self {
                is_submitting: true,
                last_error: None,
                ..self
            },
            WizardAction::SubmitFailed(error) => Self {
                is_submitting: false,
                last_error: Some(error),
                ..self
            },
            WizardAction::Rejected(error) => Self {
                last_error: Some(error),
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(msg: &str) -> ErrorInfo {
        ErrorInfo {
            message: msg.into(),
        }
    }

    #[test]
    fn default_state() {
        let state = WizardState::default();
        assert_eq!(state.current_step, WizardStep::Welcome);
        assert!(state.member_drafts.is_empty());
        assert!(!state.is_submitting);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn submit_started_clears_previous_error() {
        let state = WizardState::default()
            .reduce(WizardAction::SubmitFailed(error("boom")))
            .reduce(WizardAction::SubmitStarted);
        assert!(state.is_submitting);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn submit_failed_restores_editing() {
        let state = WizardState::new(WizardStep::Administrators, vec![MemberDraft::admin(1, "Jo")])
            .reduce(WizardAction::SubmitStarted)
            .reduce(WizardAction::SubmitFailed(error("boom")));
        assert!(!state.is_submitting);
        assert_eq!(state.last_error, Some(error("boom")));
        assert_eq!(state.current_step, WizardStep::Administrators);
        assert_eq!(state.member_drafts.len(), 1);
    }

    #[test]
    fn members_frozen_while_submitting() {
        let state = WizardState::default()
            .reduce(WizardAction::SubmitStarted)
            .reduce(WizardAction::MembersChanged(vec![MemberDraft::admin(1, "Jo")]));
        assert!(state.member_drafts.is_empty());
    }

    #[test]
    fn rejected_keeps_submitting_flag() {
        let state = WizardState::default().reduce(WizardAction::Rejected(error("nope")));
        assert!(!state.is_submitting);
        assert_eq!(state.last_error.unwrap().message, "nope");
    }
}
