//! GraphQL-over-HTTP implementation of `CollectiveApi`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::entity::{CreatedEntity, CreatedUser};
use crate::error::ApiError;

use super::CollectiveApi;
use super::types::{CollectiveInput, CollectiveMembers, CreateRequest, MemberInput, UserInput};

const CREATE_COLLECTIVE: &str = r#"
mutation CreateCollective($collective: CollectiveInputType!, $imageHeight: Int) {
  createCollective(collective: $collective) {
    id
    name
    slug
    type
    imageUrl(height: $imageHeight)
  }
}"#;

const CREATE_USER: &str = r#"
mutation CreateUser($user: UserInputType!, $imageHeight: Int) {
  createUser(user: $user, throwIfExists: false, sendSignInLink: false) {
    user {
      id
      collective {
        id
        name
        slug
        type
        imageUrl(height: $imageHeight)
        ... on User {
          email
        }
      }
    }
  }
}"#;

const EDIT_CORE_CONTRIBUTORS: &str = r#"
mutation EditCollectiveMembers($collectiveId: Int!, $members: [MemberInputType!]!) {
  editCoreContributors(collectiveId: $collectiveId, members: $members) {
    id
    members(roles: ["ADMIN"]) {
      id
      role
      member {
        id
        name
      }
    }
  }
}"#;

const LOGGED_IN_USER: &str = r#"
query LoggedInUser {
  LoggedInUser {
    id
    username
    collective {
      id
      name
      slug
      type
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CreateUserPayload {
    user: CreatedUser,
}

/// HTTP client for the collectives GraphQL API.
pub struct GraphqlClient {
    endpoint: String,
    api_key: Option<SecretString>,
    image_height: u32,
    client: reqwest::Client,
}

impl GraphqlClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed {
                operation: "client".into(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            image_height: config.image_height,
            client,
        })
    }

    fn with_image_height(&self, mut variables: serde_json::Value) -> serde_json::Value {
        if let Some(vars) = variables.as_object_mut() {
            vars.insert("imageHeight".into(), self.image_height.into());
        }
        variables
    }

    /// Run a document and return `data.<field>` decoded as `T`.
    async fn execute<T: DeserializeOwned>(
        &self,
        field: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        debug!(operation = field, endpoint = %self.endpoint, "Sending GraphQL request");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query, "variables": variables }));
        if let Some(key) = &self.api_key {
            request = request.header("Api-Key", key.expose_secret());
        }

        let response = request.send().await.map_err(|e| ApiError::RequestFailed {
            operation: field.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::RequestFailed {
            operation: field.to_string(),
            reason: e.to_string(),
        })?;

        // GraphQL servers report errors in the body even on 4xx/5xx.
        let parsed = serde_json::from_str::<GraphqlResponse>(&body);
        if let Ok(resp) = &parsed
            && !resp.errors.is_empty()
        {
            return Err(ApiError::Graphql {
                operation: field.to_string(),
                messages: resp.errors.iter().map(|e| e.message.clone()).collect(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                operation: field.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let data = parsed?
            .data
            .and_then(|mut d| d.get_mut(field).map(serde_json::Value::take))
            .filter(|v| !v.is_null())
            .ok_or_else(|| ApiError::InvalidResponse {
                operation: field.to_string(),
                reason: format!("missing data.{field}"),
            })?;

        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl CollectiveApi for GraphqlClient {
    async fn create_user(&self, user: &UserInput) -> Result<CreatedUser, ApiError> {
        let request = CreateRequest::User(user.clone());
        let payload: CreateUserPayload = self
            .execute(
                request.operation(),
                CREATE_USER,
                self.with_image_height(request.variables()),
            )
            .await?;
        Ok(payload.user)
    }

    async fn create_collective(
        &self,
        collective: &CollectiveInput,
    ) -> Result<CreatedEntity, ApiError> {
        let request = CreateRequest::Collective(collective.clone());
        self.execute(
            request.operation(),
            CREATE_COLLECTIVE,
            self.with_image_height(request.variables()),
        )
        .await
    }

    async fn edit_core_contributors(
        &self,
        collective_id: i64,
        members: &[MemberInput],
    ) -> Result<CollectiveMembers, ApiError> {
        self.execute(
            "editCoreContributors",
            EDIT_CORE_CONTRIBUTORS,
            serde_json::json!({ "collectiveId": collective_id, "members": members }),
        )
        .await
    }

    async fn refetch_logged_in_user(&self) -> Result<(), ApiError> {
        let _viewer: serde_json::Value = self
            .execute("LoggedInUser", LOGGED_IN_USER, serde_json::json!({}))
            .await?;
        Ok(())
    }
}
