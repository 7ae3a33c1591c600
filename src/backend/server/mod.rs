//! Server Module
//!
//! Initialization and configuration of the axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading and store selection
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Store**: SQLite when `DATABASE_URL` is set, in-memory otherwise
//! 3. **State Creation**: presence tracker and message board over the store
//! 4. **Router Creation**: routes, CORS and request tracing
//! 5. **Background Tasks**: the reaper, started by the binary

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_app, create_app, App};
pub use state::AppState;
