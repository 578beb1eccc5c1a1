//! Onboarding wizard shown after an entity is created.
//!
//! Three steps: welcome, administrators, contact. The step follows the
//! route's step token, can be picked on the progress indicator, and the
//! administrators step submits the collected member drafts as admins.

pub mod collector;
pub mod orchestrator;
pub mod state;
pub mod steps;

pub use collector::{MemberCollector, Viewer};
pub use orchestrator::{OnboardingWizard, StepContent, WizardView};
pub use state::{ErrorInfo, WizardAction, WizardState};
pub use steps::{StepController, WizardStep, derive_step};
