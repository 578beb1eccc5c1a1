//! Per-type dispatch table.
//!
//! Everything that varies by `EntityType` (fields rendered, validator,
//! request builder, mutation, labels) lives in one `KindSpec` entry, so
//! supporting a new type means adding one entry here.

use crate::api::types::{CollectiveInput, CreateRequest, UserInput};
use crate::i18n::{MessageKey, Translator, messages};
use crate::validation::{self, ValidationErrors, paths};

use super::model::{EntityDraft, EntityType, Role};

/// Remote mutation used to create an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateUser,
    CreateCollective,
}

/// Input widget flavour for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
}

/// A form field a type can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    AdminEmail,
    AdminName,
    Name,
    Website,
}

impl FieldKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Email => paths::EMAIL,
            Self::AdminEmail => paths::ADMIN_EMAIL,
            Self::AdminName => paths::ADMIN_NAME,
            Self::Name => paths::NAME,
            Self::Website => paths::WEBSITE,
        }
    }

    pub fn input(&self) -> InputKind {
        match self {
            Self::Email | Self::AdminEmail => InputKind::Email,
            _ => InputKind::Text,
        }
    }

    /// Read this field's current value from a draft.
    pub fn value<'a>(&self, draft: &'a EntityDraft) -> &'a str {
        match self {
            Self::Email => &draft.email,
            Self::AdminEmail => draft.first_member().map_or("", |m| m.email.as_str()),
            Self::AdminName => draft.first_member().map_or("", |m| m.name.as_str()),
            Self::Name => &draft.name,
            Self::Website => &draft.website,
        }
    }

    /// Write a new value for this field into a draft.
    pub fn set(&self, draft: &mut EntityDraft, value: String) {
        match self {
            Self::Email => draft.email = value,
            Self::AdminEmail => draft.first_member_mut().email = value,
            Self::AdminName => draft.first_member_mut().name = value,
            Self::Name => draft.name = value,
            Self::Website => draft.website = value,
        }
    }
}

/// Everything type-dependent about creating one kind of entity.
pub struct KindSpec {
    pub entity_type: EntityType,
    pub title: MessageKey,
    /// Fields in render order.
    pub fields: &'static [FieldKind],
    pub name_label: MessageKey,
    pub name_placeholder: &'static str,
    pub mutation: Mutation,
    /// Whether the created entity can hold administrators.
    pub accepts_admins: bool,
    pub validate: fn(&EntityDraft, &dyn Translator) -> ValidationErrors,
    pub build_request: fn(&mut EntityDraft, EntityType) -> CreateRequest,
}

impl KindSpec {
    pub fn label(&self, field: FieldKind) -> MessageKey {
        match field {
            FieldKind::Email => messages::EMAIL,
            FieldKind::AdminEmail => messages::ADMIN_EMAIL,
            FieldKind::AdminName => messages::ADMIN_NAME,
            FieldKind::Name => self.name_label,
            FieldKind::Website => messages::WEBSITE,
        }
    }

    pub fn placeholder(&self, field: FieldKind) -> &'static str {
        match field {
            FieldKind::Email | FieldKind::AdminEmail => "i.e. john-smith@youremail.com",
            FieldKind::AdminName => "i.e. John Doe, Frank Zappa",
            FieldKind::Name => self.name_placeholder,
            FieldKind::Website => "i.e. opencollective.com",
        }
    }

    pub fn has_field(&self, field: FieldKind) -> bool {
        self.fields.contains(&field)
    }
}

static INDIVIDUAL: KindSpec = KindSpec {
    entity_type: EntityType::Individual,
    title: messages::INVITE_USER,
    fields: &[FieldKind::Email, FieldKind::Name],
    name_label: messages::FULL_NAME,
    name_placeholder: "i.e. John Doe, Frank Zappa",
    mutation: Mutation::CreateUser,
    accepts_admins: false,
    validate: validation::validate_contact,
    build_request: user_request,
};

static COLLECTIVE: KindSpec = KindSpec {
    entity_type: EntityType::Collective,
    title: messages::CREATE_COLLECTIVE,
    fields: &[FieldKind::Name, FieldKind::Website],
    name_label: messages::NAME,
    name_placeholder: "i.e. Webpack, Babel",
    mutation: Mutation::CreateCollective,
    accepts_admins: true,
    validate: validation::validate_contact,
    build_request: collective_request,
};

static EVENT: KindSpec = KindSpec {
    entity_type: EntityType::Event,
    title: messages::CREATE_EVENT,
    fields: &[FieldKind::Name, FieldKind::Website],
    name_label: messages::NAME,
    name_placeholder: "i.e. AirBnb, TripleByte",
    mutation: Mutation::CreateCollective,
    accepts_admins: false,
    validate: validation::validate_contact,
    build_request: collective_request,
};

static ORGANIZATION: KindSpec = KindSpec {
    entity_type: EntityType::Organization,
    title: messages::CREATE_ORGANIZATION,
    fields: &[
        FieldKind::AdminEmail,
        FieldKind::AdminName,
        FieldKind::Name,
        FieldKind::Website,
    ],
    name_label: messages::ORGANIZATION_NAME,
    name_placeholder: "i.e. AirBnb, TripleByte",
    mutation: Mutation::CreateCollective,
    accepts_admins: true,
    validate: validation::validate_organization,
    build_request: organization_request,
};

impl EntityType {
    /// Dispatch-table entry for this type.
    pub fn spec(&self) -> &'static KindSpec {
        match self {
            Self::Individual => &INDIVIDUAL,
            Self::Collective => &COLLECTIVE,
            Self::Event => &EVENT,
            Self::Organization => &ORGANIZATION,
        }
    }
}

fn user_request(draft: &mut EntityDraft, _entity_type: EntityType) -> CreateRequest {
    CreateRequest::User(UserInput {
        name: draft.name.clone(),
        email: draft.email.clone(),
    })
}

fn collective_request(draft: &mut EntityDraft, entity_type: EntityType) -> CreateRequest {
    CreateRequest::Collective(CollectiveInput {
        name: draft.name.clone(),
        entity_type,
        website: draft.website.clone(),
        members: None,
    })
}

/// Every listed member becomes an admin before the request is built.
fn organization_request(draft: &mut EntityDraft, entity_type: EntityType) -> CreateRequest {
    for member in &mut draft.members {
        member.role = Some(Role::Admin);
    }
    CreateRequest::Collective(CollectiveInput {
        name: draft.name.clone(),
        entity_type,
        website: draft.website.clone(),
        members: Some(draft.members.clone()),
    })
}
