//! Error types for the model crate.
//!
//! Only input validation lives here. Remote failures belong to the client
//! crates that talk to the remote services.

use thiserror::Error;

/// Errors raised while validating user input before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The search text was empty or contained only whitespace
    #[error("Please enter a movie title to search.")]
    EmptyQuery,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, InputError>;
