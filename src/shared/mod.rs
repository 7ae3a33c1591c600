//! Shared Module
//!
//! This module contains the types that travel over the wire between the
//! chat room server and its clients. They are plain data: the backend owns
//! every rule about who may see or send what.
//!
//! # Overview
//!
//! - **`message`** - Chat messages, their kinds and the request body for sending
//! - **`participant`** - Room participants and the join request body
//! - **`validation`** - Input normalisation shared by every endpoint
//! - **`error`** - Validation error type

/// Message data structures
pub mod message;

/// Participant data structures
pub mod participant;

/// Input validation helpers
pub mod validation;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use message::{Message, MessageKind, SendMessageRequest, BROADCAST};
pub use participant::{JoinRequest, Participant};
pub use error::SharedError;
