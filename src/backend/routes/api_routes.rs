/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Participants
 * - `GET /participants` - List participants
 * - `POST /participants` - Join the room
 * - `POST /status` - Heartbeat (requires `User` header)
 *
 * ## Messages
 * - `GET /messages` - Messages visible to the caller (requires `User` header)
 * - `POST /messages` - Send a message (requires `User` header)
 */

use axum::routing::{get, post};
use axum::Router;

use crate::backend::messaging::handlers::{get_messages, post_message};
use crate::backend::presence::handlers::{join_participant, list_participants, post_status};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Presence endpoints
        .route("/participants", get(list_participants).post(join_participant))
        .route("/status", post(post_status))
        // Message endpoints
        .route("/messages", get(get_messages).post(post_message))
}
