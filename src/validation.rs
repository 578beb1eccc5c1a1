//! Field-level validation of entity drafts.
//!
//! Pure functions: the same draft and type always yield the same errors.
//! The form re-runs validation on every edit.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::entity::{EntityDraft, EntityType};
use crate::i18n::{Translator, messages};

/// Field paths errors are keyed by.
pub mod paths {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const WEBSITE: &str = "website";
    pub const ADMIN_EMAIL: &str = "members[0].member.email";
    pub const ADMIN_NAME: &str = "members[0].member.name";
}

/// local-part "@" domain with at least one dot, no whitespace anywhere.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Mapping from field path to a displayable message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Errors on other paths are left untouched.
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.errors.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Errors under `members[index].`, keyed by the remaining sub-path.
    pub fn member_errors(&self, index: usize) -> BTreeMap<&str, &str> {
        let prefix = format!("members[{index}].");
        self.errors
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|rest| (rest, v.as_str())))
            .collect()
    }
}

/// Validate a draft for the given entity type.
pub fn validate(draft: &EntityDraft, entity_type: EntityType, t: &dyn Translator) -> ValidationErrors {
    (entity_type.spec().validate)(draft, t)
}

/// Rules for types that collect a top-level contact email.
pub(crate) fn validate_contact(draft: &EntityDraft, t: &dyn Translator) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if !is_valid_email(&draft.email) {
        errors.insert(paths::EMAIL, t.translate(&messages::INVALID_EMAIL));
    }
    require_name(draft, &mut errors, t);
    errors
}

/// Rules for organizations: the first admin needs an email and a name.
pub(crate) fn validate_organization(draft: &EntityDraft, t: &dyn Translator) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let admin = draft.first_member();

    if !admin.is_some_and(|m| is_valid_email(&m.email)) {
        errors.insert(paths::ADMIN_EMAIL, t.translate(&messages::INVALID_EMAIL));
    }
    if admin.is_none_or(|m| m.name.is_empty()) {
        errors.insert(paths::ADMIN_NAME, t.translate(&messages::INVALID_NAME));
    }
    require_name(draft, &mut errors, t);
    errors
}

fn require_name(draft: &EntityDraft, errors: &mut ValidationErrors, t: &dyn Translator) {
    if draft.name.is_empty() {
        errors.insert(paths::NAME, t.translate(&messages::INVALID_NAME));
    }
}
