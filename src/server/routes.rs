//! HTTP route handlers for the conversation API and the page shell.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conversations::{Conversation, ConversationId, StoreError};

use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route(
            "/conversations",
            get(list_conversations)
                .post(create_conversation)
                .layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/conversations/{id}",
            get(get_conversation).delete(delete_conversation),
        )
        .with_state(state)
}

/// Error returned by API handlers, rendered as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidId(_) => StatusCode::BAD_REQUEST,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Serve the page shell.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.render_document())
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "canvas-agent",
        "version": env!("CARGO_PKG_VERSION"),
        "conversations": state.store.len(),
    }))
}

/// Create conversation request.
#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    /// Optional title.
    #[serde(default)]
    pub title: Option<String>,
}

impl CreateConversationRequest {
    /// Parse a request body leniently.
    ///
    /// An empty or malformed body yields the default request.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        let value = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => value,
            Ok(other) => {
                debug!("Ignoring non-object create body: {other}");
                return Self::default();
            }
            Err(e) => {
                debug!("Ignoring unparsable create body: {e}");
                return Self::default();
            }
        };

        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!("Ignoring invalid create body: {e}");
            Self::default()
        })
    }
}

/// Create conversation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationResponse {
    /// ID of the new conversation.
    pub conversation_id: ConversationId,
    /// The full record.
    pub conversation: Conversation,
}

/// Handle conversation creation.
async fn create_conversation(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Json<CreateConversationResponse> {
    let request = CreateConversationRequest::from_body(&body);
    let conversation = state.store.create(request.title.as_deref());

    info!("Created conversation: {}", conversation.id);
    Json(CreateConversationResponse {
        conversation_id: conversation.id.clone(),
        conversation,
    })
}

/// List conversations response.
#[derive(Debug, Serialize)]
pub struct ListConversationsResponse {
    /// Conversations, most recently updated first.
    pub conversations: Vec<Conversation>,
}

/// Handle conversation listing.
async fn list_conversations(State(state): State<Arc<AppState>>) -> Json<ListConversationsResponse> {
    Json(ListConversationsResponse {
        conversations: state.store.list(),
    })
}

/// Single conversation response.
#[derive(Debug, Serialize)]
pub struct GetConversationResponse {
    /// The requested record.
    pub conversation: Conversation,
}

/// Fetch one conversation.
async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<GetConversationResponse>, ApiError> {
    let id = ConversationId::parse(&raw_id).map_err(StoreError::from)?;
    let conversation = state.store.get(&id)?;
    Ok(Json(GetConversationResponse { conversation }))
}

/// Delete one conversation.
async fn delete_conversation(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ConversationId::parse(&raw_id).map_err(StoreError::from)?;
    state.store.delete(&id)?;

    info!("Deleted conversation: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
