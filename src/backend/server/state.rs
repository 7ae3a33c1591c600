/**
 * Application State Management
 *
 * `AppState` is the state handed to the axum router. It holds the two
 * services built over the shared store; each implements `FromRef` so that
 * handlers extract only the one they use.
 *
 * # Example
 *
 * ```rust
 * use batepapo::backend::presence::PresenceTracker;
 * use axum::extract::State;
 *
 * async fn handler(State(tracker): State<PresenceTracker>) {
 *     let _ = tracker.list_participants().await;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::messaging::board::MessageBoard;
use crate::backend::presence::clock::Clock;
use crate::backend::presence::tracker::PresenceTracker;
use crate::backend::store::ChatStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Participants and their heartbeats
    pub presence: PresenceTracker,

    /// The message log, filtered per reader
    pub messages: MessageBoard,
}

impl AppState {
    /// Build both services over one store and one clock
    pub fn new(store: Arc<dyn ChatStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            presence: PresenceTracker::new(store.clone(), clock.clone()),
            messages: MessageBoard::new(store, clock),
        }
    }
}

impl FromRef<AppState> for PresenceTracker {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

impl FromRef<AppState> for MessageBoard {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.messages.clone()
    }
}
