//! Integration tests for the GraphQL transport.
//!
//! Each test spins up an Axum server on a random port that replays canned
//! responses, and points a real `GraphqlClient` at it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use collective_onboarding::api::{CollectiveApi, CollectiveInput, GraphqlClient, MemberInput, UserInput};
use collective_onboarding::config::ApiConfig;
use collective_onboarding::entity::{EntityType, MemberDraft, Role};
use collective_onboarding::error::ApiError;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeServer {
    responses: Mutex<VecDeque<(StatusCode, Value)>>,
    requests: Mutex<Vec<(Option<String>, Value)>>,
}

async fn graphql(
    State(server): State<Arc<FakeServer>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let api_key = headers
        .get("Api-Key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    server.requests.lock().unwrap().push((api_key, body));
    let (status, response) = server
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, json!({})));
    (status, Json(response))
}

/// Start a fake GraphQL server replaying `responses`, return (client, server).
async fn start_server(
    responses: Vec<(StatusCode, Value)>,
    api_key: Option<&str>,
) -> (GraphqlClient, Arc<FakeServer>) {
    let server = Arc::new(FakeServer {
        responses: Mutex::new(responses.into()),
        ..Default::default()
    });
    let app = Router::new()
        .route("/graphql", post(graphql))
        .with_state(Arc::clone(&server));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ApiConfig {
        endpoint: format!("http://127.0.0.1:{port}/graphql"),
        api_key: api_key.map(|k| secrecy::SecretString::from(k.to_string())),
        timeout: Duration::from_secs(2),
        ..Default::default()
    };
    (GraphqlClient::new(&config).unwrap(), server)
}

#[tokio::test]
async fn create_collective_sends_variables_and_parses_entity() {
    timeout(TEST_TIMEOUT, async {
        let (client, server) = start_server(
            vec![(
                StatusCode::OK,
                json!({"data": {"createCollective": {
                    "id": 42, "name": "Acme", "slug": "acme",
                    "type": "ORGANIZATION", "imageUrl": "https://img/acme.png"
                }}}),
            )],
            Some("secret-key"),
        )
        .await;

        let input = CollectiveInput {
            name: "Acme".into(),
            entity_type: EntityType::Organization,
            website: "acme.com".into(),
            members: Some(vec![MemberDraft {
                role: Some(Role::Admin),
                ..MemberDraft::invite("Jo", "jo@acme.com")
            }]),
        };
        let entity = client.create_collective(&input).await.unwrap();
        assert_eq!(entity.id, 42);
        assert_eq!(entity.entity_type, EntityType::Organization);
        assert_eq!(entity.image_url.as_deref(), Some("https://img/acme.png"));

        let requests = server.requests.lock().unwrap();
        let (api_key, body) = &requests[0];
        assert_eq!(api_key.as_deref(), Some("secret-key"));
        assert!(body["query"].as_str().unwrap().contains("createCollective"));
        assert_eq!(body["variables"]["imageHeight"], 64);
        assert_eq!(
            body["variables"]["collective"],
            json!({
                "name": "Acme",
                "type": "Organization",
                "website": "acme.com",
                "members": [{"role": "ADMIN", "member": {"name": "Jo", "email": "jo@acme.com"}}]
            })
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn create_user_unwraps_user_payload() {
    timeout(TEST_TIMEOUT, async {
        let (client, server) = start_server(
            vec![(
                StatusCode::OK,
                json!({"data": {"createUser": {"user": {
                    "id": 7,
                    "collective": {"id": 70, "name": "Jo", "slug": "jo", "type": "USER", "email": "jo@acme.com"}
                }}}}),
            )],
            None,
        )
        .await;

        let user = client
            .create_user(&UserInput {
                name: "Jo".into(),
                email: "jo@acme.com".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.collective.id, 70);

        let requests = server.requests.lock().unwrap();
        assert_eq!(requests[0].0, None);
        assert_eq!(
            requests[0].1["variables"]["user"],
            json!({"name": "Jo", "email": "jo@acme.com"})
        );
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn graphql_errors_become_api_errors() {
    timeout(TEST_TIMEOUT, async {
        let (client, _server) = start_server(
            vec![(
                StatusCode::BAD_REQUEST,
                json!({"errors": [{"message": "You need to be logged in to edit members"}]}),
            )],
            None,
        )
        .await;

        let err = client
            .edit_core_contributors(42, &[MemberInput::from(&MemberDraft::admin(1, "Me"))])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Graphql { .. }));
        assert_eq!(err.user_message(), "You need to be logged in to edit members");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn http_failure_without_errors_is_request_failure() {
    timeout(TEST_TIMEOUT, async {
        let (client, _server) = start_server(vec![(StatusCode::BAD_GATEWAY, json!({}))], None).await;
        let err = client.refetch_logged_in_user().await.unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { .. }));
        assert!(err.user_message().contains("502"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn missing_data_is_invalid_response() {
    timeout(TEST_TIMEOUT, async {
        let (client, _server) =
            start_server(vec![(StatusCode::OK, json!({"data": {"createCollective": null}}))], None).await;
        let input = CollectiveInput {
            name: "Webpack".into(),
            entity_type: EntityType::Collective,
            website: String::new(),
            members: None,
        };
        let err = client.create_collective(&input).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn malformed_success_body_keeps_decode_error() {
    timeout(TEST_TIMEOUT, async {
        let (client, _server) =
            start_server(vec![(StatusCode::OK, json!(["not", "an", "envelope"]))], None).await;
        let err = client.refetch_logged_in_user().await.unwrap_err();
        assert!(matches!(err, ApiError::Json(_)), "got {err:?}");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn edit_core_contributors_then_refetch() {
    timeout(TEST_TIMEOUT, async {
        let (client, server) = start_server(
            vec![
                (
                    StatusCode::OK,
                    json!({"data": {"editCoreContributors": {
                        "id": 42,
                        "members": [{"id": 900, "role": "ADMIN", "member": {"id": 1, "name": "Me"}}]
                    }}}),
                ),
                (
                    StatusCode::OK,
                    json!({"data": {"LoggedInUser": {"id": 3, "username": "me"}}}),
                ),
            ],
            None,
        )
        .await;

        let result = client
            .edit_core_contributors(42, &[MemberInput::from(&MemberDraft::admin(1, "Me"))])
            .await
            .unwrap();
        assert_eq!(result.members[0].role, Role::Admin);
        client.refetch_logged_in_user().await.unwrap();

        let requests = server.requests.lock().unwrap();
        assert_eq!(requests[0].1["variables"]["collectiveId"], 42);
        assert_eq!(
            requests[0].1["variables"]["members"],
            json!([{"id": null, "role": "ADMIN", "member": {"id": 1, "name": "Me"}}])
        );
        assert!(requests[1].1["query"].as_str().unwrap().contains("LoggedInUser"));
    })
    .await
    .expect("test timed out");
}
