//! Messaging HTTP Handlers
//!
//! - `GET /messages?limit=N` - messages visible to the `User` header, newest first
//! - `POST /messages` - send a message as the `User` header

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::messaging::board::MessageBoard;
use crate::backend::middleware::RequestUser;
use crate::shared::validation::parse_limit;
use crate::shared::{Message, SendMessageRequest};

/// Query string of `GET /messages`
///
/// `limit` stays a string so a non-numeric value becomes a validation error.
#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesParams {
    pub limit: Option<String>,
}

/// Handle `GET /messages`
pub async fn get_messages(
    State(board): State<MessageBoard>,
    RequestUser(user): RequestUser,
    params: Result<Query<ListMessagesParams>, QueryRejection>,
) -> Result<Json<Vec<Message>>, BackendError> {
    let Query(params) = params?;
    let limit = params.limit.as_deref().map(parse_limit).transpose()?;
    Ok(Json(board.list_visible(&user, limit).await?))
}

/// Handle `POST /messages`
///
/// # Example Request
///
/// ```http
/// POST /messages HTTP/1.1
/// User: Ana
/// Content-Type: application/json
///
/// {"to":"Todos","text":"oi","type":"message"}
/// ```
///
/// # Returns
///
/// * `201 Created` with the stored message
/// * `422 Unprocessable Entity` on invalid input or an unknown sender
pub async fn post_message(
    State(board): State<MessageBoard>,
    RequestUser(user): RequestUser,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), BackendError> {
    let Json(request) = payload?;
    let message = board.send(&user, request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
