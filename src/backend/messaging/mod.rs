//! Messaging Module
//!
//! - **`board`** - `MessageBoard`: the visibility filter and message sending
//! - **`handlers`** - `GET/POST /messages`

pub mod board;
pub mod handlers;

pub use board::MessageBoard;
