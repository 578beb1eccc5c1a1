//! Wizard steps and the mapping from the navigation step token.

use serde::{Deserialize, Serialize};

/// The steps of the onboarding wizard, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Welcome,
    Administrators,
    Contact,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [Self::Welcome, Self::Administrators, Self::Contact];

    pub fn index(&self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::Administrators => 1,
            Self::Contact => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Token carried by the route for this step. The welcome step has none.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::Welcome => None,
            Self::Administrators => Some("administrators"),
            Self::Contact => Some("contact"),
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Administrators => "administrators",
            Self::Contact => "contact",
        };
        write!(f, "{s}")
    }
}

/// Map a route step token to a step. Unknown tokens fall back to welcome.
pub fn derive_step(token: Option<&str>) -> WizardStep {
    match token {
        Some("administrators") => WizardStep::Administrators,
        Some("contact") => WizardStep::Contact,
        _ => WizardStep::Welcome,
    }
}

/// Tracks the last seen step token so the step is only re-derived when
/// the token itself changes.
#[derive(Debug, Clone, Default)]
pub struct StepController {
    token: Option<String>,
}

impl StepController {
    /// Record the token present at mount and derive the initial step.
    pub fn mount(token: Option<&str>) -> (Self, WizardStep) {
        let controller = Self {
            token: token.map(String::from),
        };
        (controller, derive_step(token))
    }

    /// Returns the newly derived step if the token changed, `None` otherwise.
    pub fn on_token_change(&mut self, token: Option<&str>) -> Option<WizardStep> {
        if self.token.as_deref() == token {
            return None;
        }
        self.token = token.map(String::from);
        Some(derive_step(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_step_mapping() {
        assert_eq!(derive_step(None), WizardStep::Welcome);
        assert_eq!(derive_step(Some("administrators")), WizardStep::Administrators);
        assert_eq!(derive_step(Some("contact")), WizardStep::Contact);
        assert_eq!(derive_step(Some("garbage")), WizardStep::Welcome);
        assert_eq!(derive_step(Some("")), WizardStep::Welcome);
    }

    #[test]
    fn token_round_trips_through_derive() {
        for step in WizardStep::ALL {
            assert_eq!(derive_step(step.token()), step);
        }
    }

    #[test]
    fn index_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(3), None);
    }

    #[test]
    fn next_and_previous_walk_the_steps() {
        use WizardStep::*;
        assert_eq!(Welcome.next(), Some(Administrators));
        assert_eq!(Administrators.next(), Some(Contact));
        assert_eq!(Contact.next(), None);
        assert_eq!(Welcome.previous(), None);
        assert_eq!(Contact.previous(), Some(Administrators));
    }

    #[test]
    fn display_matches_serde() {
        for step in WizardStep::ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json);
        }
    }

    #[test]
    fn controller_only_reacts_to_changed_tokens() {
        let (mut controller, step) = StepController::mount(Some("administrators"));
        assert_eq!(step, WizardStep::Administrators);
        assert_eq!(controller.on_token_change(Some("administrators")), None);
        assert_eq!(
            controller.on_token_change(Some("contact")),
            Some(WizardStep::Contact)
        );
        assert_eq!(controller.on_token_change(None), Some(WizardStep::Welcome));
        assert_eq!(controller.on_token_change(None), None);
    }
}
