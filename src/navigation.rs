//! Navigation capability.
//!
//! Routing is external; the wizard only asks a `Navigator` to push a named
//! route with a slug and an optional section.

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

/// Route names the onboarding flow navigates to.
pub mod routes {
    /// Collective settings page; `section` picks the tab.
    pub const EDIT_COLLECTIVE: &str = "editCollective";
    /// Onboarding wizard; `section` carries the step token.
    pub const COLLECTIVE_ONBOARDING: &str = "collectiveOnboarding";
    /// Public page of a collective.
    pub const COLLECTIVE: &str = "collective";

    pub const MEMBERS_SECTION: &str = "members";
}

/// Parameters of a route push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl RouteParams {
    pub fn new(slug: impl Into<String>, section: Option<&str>) -> Self {
        Self {
            slug: slug.into(),
            section: section.map(String::from),
        }
    }
}

/// Pushes routes on behalf of the wizard.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str, params: &RouteParams) -> Result<(), NavigationError>;
}
