//! Error handling for the Murmur backend.
//!
//! [`Error<C>`] pairs an API-facing [`ErrorCategory`](ApiErrorCategory)
//! with an [`error_stack::Report`] holding the full diagnostic chain. The
//! context type `C` names the operation that failed, so signatures read
//! as `Result<User, Error<InsertUserError>>`.
//!
//! At the handler boundary the report is logged and the error collapses
//! into the wire [`ApiError`].

mod error;
mod fmt;

pub mod ext;

pub use self::error::{Error, NoContext};
pub use murmur_api_types::{Error as ApiError, ErrorCategory as ApiErrorCategory};

pub type Result<T, C = NoContext> = std::result::Result<T, Error<C>>;
