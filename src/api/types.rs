//! Request and response shapes of the remote mutations.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityType, MemberDraft, Role};

/// Variables for `createUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

/// Variables for `createCollective`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectiveInput {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub website: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberDraft>>,
}

/// A type-specific create request. The variant selects the mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequest {
    User(UserInput),
    Collective(CollectiveInput),
}

impl CreateRequest {
    /// Name of the mutation this request is sent with.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::User(_) => "createUser",
            Self::Collective(_) => "createCollective",
        }
    }

    /// Mutation variables, keyed the way the API expects them.
    pub fn variables(&self) -> serde_json::Value {
        match self {
            Self::User(user) => serde_json::json!({ "user": user }),
            Self::Collective(collective) => serde_json::json!({ "collective": collective }),
        }
    }
}

/// Person reference sent when editing core contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAccountInput {
    pub id: Option<i64>,
    pub name: String,
}

/// One membership entry for `editCoreContributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInput {
    pub id: Option<i64>,
    pub role: Role,
    pub member: MemberAccountInput,
}

impl From<&MemberDraft> for MemberInput {
    fn from(draft: &MemberDraft) -> Self {
        Self {
            id: draft.id,
            role: draft.role.unwrap_or_default(),
            member: MemberAccountInput {
                id: draft.member.id,
                name: draft.member.name.clone(),
            },
        }
    }
}

/// Membership as returned by `editCoreContributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: i64,
    pub role: Role,
    pub member: MemberAccountRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAccountRecord {
    pub id: i64,
    pub name: String,
}

/// Collective with its refreshed admin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectiveMembers {
    pub id: i64,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MemberRef;

    #[test]
    fn user_request_variables() {
        let req = CreateRequest::User(UserInput {
            name: "Jo".into(),
            email: "jo@acme.com".into(),
        });
        assert_eq!(req.operation(), "createUser");
        assert_eq!(
            req.variables(),
            serde_json::json!({"user": {"name": "Jo", "email": "jo@acme.com"}})
        );
    }

    #[test]
    fn collective_request_omits_absent_members() {
        let req = CreateRequest::Collective(CollectiveInput {
            name: "Webpack".into(),
            entity_type: EntityType::Collective,
            website: "webpack.js.org".into(),
            members: None,
        });
        assert_eq!(req.operation(), "createCollective");
        assert_eq!(
            req.variables(),
            serde_json::json!({"collective": {
                "name": "Webpack",
                "type": "Collective",
                "website": "webpack.js.org"
            }})
        );
    }

    #[test]
    fn member_input_drops_email_and_defaults_role() {
        let draft = MemberDraft {
            id: Some(5),
            role: None,
            member: MemberRef {
                id: Some(9),
                name: "Jo".into(),
                email: "jo@acme.com".into(),
            },
        };
        let input = MemberInput::from(&draft);
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({"id": 5, "role": "ADMIN", "member": {"id": 9, "name": "Jo"}})
        );
    }
}
