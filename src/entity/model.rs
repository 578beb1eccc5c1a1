//! Entity drafts and created-entity records.

use serde::{Deserialize, Serialize};

/// The kind of account being created.
///
/// Serialized with its display name; the upper-case API spellings
/// (`USER`, `ORGANIZATION`, ...) are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(alias = "USER", alias = "INDIVIDUAL")]
    Individual,
    #[serde(alias = "COLLECTIVE")]
    Collective,
    #[serde(alias = "EVENT")]
    Event,
    #[serde(alias = "ORGANIZATION")]
    Organization,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        Self::Individual,
        Self::Collective,
        Self::Event,
        Self::Organization,
    ];
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Individual => "Individual",
            Self::Collective => "Collective",
            Self::Event => "Event",
            Self::Organization => "Organization",
        };
        write!(f, "{s}")
    }
}

/// Membership role of a person within a collective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Admin,
    Member,
    Host,
    Backer,
    Follower,
}

/// The person side of a membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A proposed administrator (or other member) of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    /// Existing membership id, when editing one that already exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unset until submission; Organization drafts are forced to `Admin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub member: MemberRef,
}

impl MemberDraft {
    /// An administrator backed by an existing account.
    pub fn admin(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Some(Role::Admin),
            member: MemberRef {
                id: Some(id),
                name: name.into(),
                email: String::new(),
            },
        }
    }

    /// An administrator invited by email who has no account yet.
    pub fn invite(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Some(Role::Admin),
            member: MemberRef {
                id: None,
                name: name.into(),
                email: email.into(),
            },
        }
    }
}

/// In-memory, unsaved entity being edited in the draft form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDraft {
    pub name: String,
    /// Contact email; only collected for individuals.
    pub email: String,
    pub website: String,
    /// Organization admins. Always holds at least one entry while editing.
    pub members: Vec<MemberDraft>,
}

impl Default for EntityDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            website: String::new(),
            members: vec![MemberDraft::default()],
        }
    }
}

impl EntityDraft {
    pub fn first_member(&self) -> Option<&MemberRef> {
        self.members.first().map(|m| &m.member)
    }

    /// Mutable access to the first member, recreating it if the list was emptied.
    pub fn first_member_mut(&mut self) -> &mut MemberRef {
        if self.members.is_empty() {
            self.members.push(MemberDraft::default());
        }
        &mut self.members[0].member
    }
}

/// Summary of an account returned by the create mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEntity {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A created user; the account profile lives under `collective`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: i64,
    pub collective: CreatedEntity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_has_one_blank_member() {
        let draft = EntityDraft::default();
        assert_eq!(draft.members.len(), 1);
        assert_eq!(draft.first_member(), Some(&MemberRef::default()));
        assert!(draft.name.is_empty());
    }

    #[test]
    fn first_member_mut_restores_empty_list() {
        let mut draft = EntityDraft {
            members: vec![],
            ..Default::default()
        };
        draft.first_member_mut().name = "Jo".into();
        assert_eq!(draft.members.len(), 1);
        assert_eq!(draft.members[0].member.name, "Jo");
    }

    #[test]
    fn entity_type_accepts_api_spellings() {
        let t: EntityType = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(t, EntityType::Individual);
        let t: EntityType = serde_json::from_str("\"ORGANIZATION\"").unwrap();
        assert_eq!(t, EntityType::Organization);
        assert_eq!(
            serde_json::to_string(&EntityType::Organization).unwrap(),
            "\"Organization\""
        );
    }

    #[test]
    fn display_matches_serde() {
        for t in EntityType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(format!("\"{t}\""), json);
        }
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(Role::default(), Role::Admin);
    }

    #[test]
    fn blank_member_omits_unset_ids_and_role() {
        let json = serde_json::to_value(MemberDraft::default()).unwrap();
        assert_eq!(json, serde_json::json!({"member": {"name": "", "email": ""}}));
    }

    #[test]
    fn created_user_parses_nested_collective() {
        let json = serde_json::json!({
            "id": 12,
            "collective": {
                "id": 340,
                "name": "Jo",
                "slug": "jo",
                "type": "USER",
                "imageUrl": "https://img/jo.png",
                "email": "jo@acme.com"
            }
        });
        let user: CreatedUser = serde_json::from_value(json).unwrap();
        assert_eq!(user.collective.id, 340);
        assert_eq!(user.collective.entity_type, EntityType::Individual);
        assert_eq!(user.collective.email.as_deref(), Some("jo@acme.com"));
    }
}
