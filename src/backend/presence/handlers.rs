/**
 * Presence HTTP Handlers
 *
 * - `GET /participants` - everyone in the room
 * - `POST /participants` - join the room
 * - `POST /status` - heartbeat for the participant named in the `User` header
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::RequestUser;
use crate::backend::presence::tracker::PresenceTracker;
use crate::shared::{JoinRequest, Participant};

/// Handle `GET /participants`
pub async fn list_participants(
    State(tracker): State<PresenceTracker>,
) -> Result<Json<Vec<Participant>>, BackendError> {
    Ok(Json(tracker.list_participants().await?))
}

/// Handle `POST /participants`
///
/// # Example Request
///
/// ```http
/// POST /participants HTTP/1.1
/// Content-Type: application/json
///
/// {"name":"Ana"}
/// ```
///
/// # Returns
///
/// * `201 Created` with the new participant
/// * `409 Conflict` if the name is taken
/// * `422 Unprocessable Entity` if the name is missing or empty
pub async fn join_participant(
    State(tracker): State<PresenceTracker>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Participant>), BackendError> {
    let Json(request) = payload?;
    let participant = tracker.join(&request.name).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// Handle `POST /status`
///
/// # Returns
///
/// * `200 OK` if the participant is present
/// * `404 Not Found` otherwise
pub async fn post_status(
    State(tracker): State<PresenceTracker>,
    RequestUser(user): RequestUser,
) -> Result<StatusCode, BackendError> {
    tracker.heartbeat(&user).await?;
    Ok(StatusCode::OK)
}
