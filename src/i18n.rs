//! Message catalogue and the `translate` capability.
//!
//! String lookup itself is external: the core only names the message it
//! needs and lets a `Translator` resolve it. `DefaultTranslator` returns the
//! built-in English text.

use std::collections::HashMap;

/// A translatable message: stable id plus English fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub id: &'static str,
    pub default: &'static str,
}

impl MessageKey {
    const fn new(id: &'static str, default: &'static str) -> Self {
        Self { id, default }
    }
}

/// Message ids used by the onboarding forms and wizard.
pub mod messages {
    use super::MessageKey;

    pub const CREATE_COLLECTIVE: MessageKey =
        MessageKey::new("Collective.CreateNew", "Create new Collective");
    pub const INVITE_USER: MessageKey = MessageKey::new("User.InviteNew", "Invite new user");
    pub const CREATE_EVENT: MessageKey = MessageKey::new("Event.CreateNew", "Create new event");
    pub const CREATE_ORGANIZATION: MessageKey =
        MessageKey::new("Organization.CreateNew", "Create new Organization");

    pub const EMAIL: MessageKey = MessageKey::new("EditUserEmailForm.title", "Email address");
    pub const ADMIN_EMAIL: MessageKey =
        MessageKey::new("NewOrganization.Admin.Email", "Admin email address");
    pub const ADMIN_NAME: MessageKey = MessageKey::new("NewOrganization.Admin.Name", "Admin name");
    pub const NAME: MessageKey = MessageKey::new("Fields.name", "Name");
    pub const ORGANIZATION_NAME: MessageKey =
        MessageKey::new("Organization.Name", "Organization name");
    pub const FULL_NAME: MessageKey = MessageKey::new("User.FullName", "Full name");
    pub const WEBSITE: MessageKey = MessageKey::new("Fields.website", "Website");
    pub const CANCEL: MessageKey = MessageKey::new("actions.cancel", "Cancel");
    pub const SAVE: MessageKey = MessageKey::new("save", "Save");

    pub const INVALID_EMAIL: MessageKey =
        MessageKey::new("error.email.invalid", "Invalid email address");
    pub const INVALID_NAME: MessageKey = MessageKey::new("error.name.invalid", "Name is required");
}

/// Resolves a message to display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &MessageKey) -> String;
}

/// Returns each message's built-in English text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, key: &MessageKey) -> String {
        key.default.to_string()
    }
}

/// Translator backed by an id → text table, falling back to the default text.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(id.into(), text.into());
        self
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &MessageKey) -> String {
        self.entries
            .get(key.id)
            .cloned()
            .unwrap_or_else(|| key.default.to_string())
    }
}
