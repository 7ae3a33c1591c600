//! Backend Module
//!
//! All server-side code: the store, the presence tracker and its reaper,
//! the message board, and the axum HTTP surface over them.
//!
//! # Architecture
//!
//! - **`store`** - `ChatStore` trait with in-memory and SQLite backends
//! - **`presence`** - Join, heartbeat, inactivity reaping
//! - **`messaging`** - Message visibility and sending
//! - **`middleware`** - `User` header extraction
//! - **`routes`** - Router assembly
//! - **`server`** - Configuration, state and initialization
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── store/          - Document store
//! ├── presence/       - Participants and the reaper
//! ├── messaging/      - Message log
//! ├── middleware/     - Request identity
//! ├── routes/         - Route configuration
//! ├── server/         - Server initialization and state
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share one `Arc<dyn ChatStore>` through `AppState`. The services
//! keep no copies of store data, so the reaper and the request handlers
//! always see the same participants and messages.

/// Document store
pub mod store;

/// Presence tracking and reaping
pub mod presence;

/// Message log
pub mod messaging;

/// Middleware for request processing
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use messaging::MessageBoard;
pub use presence::{PresenceTracker, Reaper};
pub use server::{create_app, ServerConfig};
