//! Onboarding wizard for a freshly created entity: step controller, member
//! collector and admin submission.
//!
//! Entity creation and admin invitation are two separate remote calls.
//! If the admin call fails after the entity was created, the entity stays
//! created with only its original admins; nothing here compensates for that.
//! The user can retry from the administrators step.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::api::{CollectiveApi, CollectiveMembers, MemberInput};
use crate::entity::{CreatedEntity, MemberDraft, Role};
use crate::error::{Error, NavigationError, WizardError};
use crate::navigation::{Navigator, RouteParams, routes};

use super::collector::{MemberCollector, Viewer};
use super::state::{ErrorInfo, WizardAction, WizardState};
use super::steps::{StepController, WizardStep};

/// What the current step shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepContent {
    Welcome { collective: CreatedEntity },
    Administrators { members: Vec<MemberDraft>, editable: bool },
    Contact { slug: String },
}

/// Render model for the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView {
    pub step: WizardStep,
    pub slug: String,
    pub content: StepContent,
    /// Nav buttons show a spinner while submitting.
    pub loading: bool,
    pub error: Option<String>,
}

/// Drives the onboarding wizard of one created entity.
pub struct OnboardingWizard {
    collective: CreatedEntity,
    api: Arc<dyn CollectiveApi>,
    navigator: Arc<dyn Navigator>,
    collector: MemberCollector,
    steps: StepController,
    state: WizardState,
}

impl OnboardingWizard {
    /// Mount the wizard for `collective`, deriving the step from `token`.
    pub fn mount(
        collective: CreatedEntity,
        viewer: Option<Viewer>,
        token: Option<&str>,
        api: Arc<dyn CollectiveApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (steps, step) = StepController::mount(token);
        let collector = MemberCollector::new(viewer);
        let state = WizardState::new(step, collector.seed());
        info!(collective_id = collective.id, step = %step, "Onboarding wizard mounted");
        Self {
            collective,
            api,
            navigator,
            collector,
            steps,
            state,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn collective(&self) -> &CreatedEntity {
        &self.collective
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    fn dispatch(&mut self, action: WizardAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// React to a change of the route's step token.
    pub fn on_navigation_change(&mut self, token: Option<&str>) {
        if let Some(step) = self.steps.on_token_change(token) {
            self.dispatch(WizardAction::GoToStep(step));
        }
    }

    /// Jump to a step picked on the progress indicator.
    pub fn select_step(&mut self, index: usize) -> Result<(), WizardError> {
        let step = WizardStep::from_index(index).ok_or(WizardError::InvalidStep(index))?;
        self.dispatch(WizardAction::GoToStep(step));
        Ok(())
    }

    // ── Member drafts ───────────────────────────────────────────────

    /// Replace the member drafts with the list the collector published.
    pub fn set_members(&mut self, members: Vec<MemberDraft>) {
        self.dispatch(WizardAction::MembersChanged(members));
    }

    fn publish(&mut self, members: Option<Vec<MemberDraft>>) -> bool {
        match members {
            Some(members) if !self.state.is_submitting => {
                self.set_members(members);
                true
            }
            _ => false,
        }
    }

    pub fn add_admin(&mut self, candidate: MemberDraft) -> bool {
        let members = self.collector.add(&self.state.member_drafts, candidate);
        self.publish(members)
    }

    pub fn remove_admin(&mut self, index: usize) -> bool {
        let members = self.collector.remove(&self.state.member_drafts, index);
        self.publish(members)
    }

    pub fn set_admin_role(&mut self, index: usize, role: Role) -> bool {
        let members = self.collector.set_role(&self.state.member_drafts, index, role);
        self.publish(members)
    }

    // ── Admin submission ────────────────────────────────────────────

    /// Check preconditions, mark the wizard as submitting, and reduce the
    /// drafts to the mutation's member shape.
    pub fn begin_admin_submission(&mut self) -> Result<Vec<MemberInput>, WizardError> {
        if self.state.is_submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if !self.collective.entity_type.spec().accepts_admins {
            return Err(WizardError::AdminsNotSupported {
                entity_type: self.collective.entity_type.to_string(),
            });
        }
        if self.state.current_step != WizardStep::Administrators {
            return Err(WizardError::NotOnAdministratorsStep);
        }

        self.dispatch(WizardAction::SubmitStarted);
        Ok(self.state.member_drafts.iter().map(MemberInput::from).collect())
    }

    /// Submit the member drafts as the entity's admins, then go to its
    /// member management page.
    ///
    /// Never returns an error: failures land in `state().last_error` and
    /// the wizard stays on the current step.
    pub async fn submit_admins(&mut self) -> Option<CollectiveMembers> {
        let members = match self.begin_admin_submission() {
            Ok(members) => members,
            Err(WizardError::SubmissionInProgress) => {
                warn!(collective_id = self.collective.id, "Admin submission already in flight");
                return None;
            }
            Err(e) => {
                let err = Error::from(e);
                warn!(collective_id = self.collective.id, error = %err, "Admin submission rejected");
                self.dispatch(WizardAction::Rejected(ErrorInfo::from(&err)));
                return None;
            }
        };

        info!(
            collective_id = self.collective.id,
            members = members.len(),
            "Submitting administrators"
        );

        match self.send_admins(&members).await {
            Ok(result) => {
                info!(collective_id = self.collective.id, admins = result.members.len(), "Administrators saved");
                Some(result)
            }
            Err(e) => {
                error!(collective_id = self.collective.id, error = %e, "Administrator submission failed");
                self.dispatch(WizardAction::SubmitFailed(ErrorInfo::from(&e)));
                None
            }
        }
    }

    async fn send_admins(&self, members: &[MemberInput]) -> Result<CollectiveMembers, Error> {
        let result = self
            .api
            .edit_core_contributors(self.collective.id, members)
            .await?;
        // The call only counts as done once the viewer query is fresh.
        self.api.refetch_logged_in_user().await?;
        self.navigator.navigate(
            routes::EDIT_COLLECTIVE,
            &RouteParams::new(&self.collective.slug, Some(routes::MEMBERS_SECTION)),
        )?;
        Ok(result)
    }

    // ── Nav buttons ─────────────────────────────────────────────────

    fn go_to(&mut self, step: WizardStep) -> Result<(), NavigationError> {
        self.navigator.navigate(
            routes::COLLECTIVE_ONBOARDING,
            &RouteParams::new(&self.collective.slug, step.token()),
        )?;
        self.dispatch(WizardAction::GoToStep(step));
        Ok(())
    }

    /// "Next": advance one step; on the administrators step this submits.
    pub async fn next(&mut self) -> Result<(), NavigationError> {
        let current = self.state.current_step;
        if current == WizardStep::Administrators {
            self.submit_admins().await;
            return Ok(());
        }
        match current.next() {
            Some(step) => self.go_to(step),
            // Past the last step the wizard hands off to the entity page.
            None => self.navigator.navigate(
                routes::COLLECTIVE,
                &RouteParams::new(&self.collective.slug, None),
            ),
        }
    }

    /// "Back": return to the previous step, if any.
    pub fn back(&mut self) -> Result<(), NavigationError> {
        if self.state.is_submitting {
            return Ok(());
        }
        match self.state.current_step.previous() {
            Some(step) => self.go_to(step),
            None => Ok(()),
        }
    }

    pub fn view(&self) -> WizardView {
        let content = match self.state.current_step {
            WizardStep::Welcome => StepContent::Welcome {
                collective: self.collective.clone(),
            },
            WizardStep::Administrators => StepContent::Administrators {
                members: self.state.member_drafts.clone(),
                editable: !self.state.is_submitting,
            },
            WizardStep::Contact => StepContent::Contact {
                slug: self.collective.slug.clone(),
            },
        };
        WizardView {
            step: self.state.current_step,
            slug: self.collective.slug.clone(),
            content,
            loading: self.state.is_submitting,
            error: self.state.last_error.as_ref().map(|e| e.message.clone()),
        }
    }
}
