//! Batepapo - Chat Room Backend
//!
//! A single shared chat room over HTTP. Participants join by name, keep
//! themselves present with heartbeats, and read the messages addressed to
//! them or to everyone ("Todos"). Participants that stop sending heartbeats
//! are reaped on a fixed schedule and a departure message is posted for each.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and input validation
//! - **`backend`** - Store, presence, messaging and the axum server
//!
//! # Usage
//!
//! ```rust,no_run
//! use batepapo::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let reaper = app.reaper.spawn();
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app.router).await?;
//! reaper.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Consistency
//!
//! Operations are not transactional across collections. Joining checks for
//! the name and then inserts; sending checks the sender and then inserts.
//! The store's unique key on participant names turns a lost join race into
//! a conflict. Reaping deletes with a condition on `last_status`, so a
//! heartbeat that lands after the scan keeps its participant in the room.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
