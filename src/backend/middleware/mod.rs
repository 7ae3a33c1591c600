//! Middleware Module
//!
//! Request processing shared by the HTTP handlers.
//!
//! - **`user`** - `RequestUser`, the participant name carried in the `User` header

pub mod user;

pub use user::{RequestUser, USER_HEADER};
