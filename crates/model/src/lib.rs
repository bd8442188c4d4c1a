//! # Model Crate
//!
//! Plain data shared by every other crate in the workspace.
//!
//! ## Main Components
//!
//! - **types**: catalog records (MovieSummary, MovieDetails, SuggestionSet, ...)
//! - **query**: SearchQuery, the only way search text reaches a client
//! - **view**: ViewState, the single thing the presentation layer renders
//! - **error**: InputError for locally rejected input
//!
//! ## Example Usage
//!
//! ```ignore
//! use model::{SearchQuery, ViewState};
//!
//! let query = SearchQuery::parse("  Inception ")?;
//! assert_eq!(query.as_str(), "Inception");
//!
//! let state = ViewState::default();
//! assert!(state.current_details().is_none());
//! ```

// Public modules
pub mod error;
pub mod query;
pub mod types;
pub mod view;

// Re-export commonly used types for convenience
pub use error::{InputError, Result};
pub use query::SearchQuery;
pub use types::{
    // Type aliases
    MovieId,
    // Records
    CastMember,
    DownloadLink,
    MovieDetails,
    MovieSummary,
    Screenshot,
    SuggestionSet,
    TrailerReference,
    // Constants
    CAST_PLACEHOLDER_IMAGE,
};
pub use view::{Backdrop, ViewState, DEFAULT_BACKDROP};
