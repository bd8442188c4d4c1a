//! Orchestrator crate for the reel-search movie browser.
//!
//! This crate owns the view state and coordinates the catalog, suggestion
//! and trailer services behind it. It also loads the runtime settings that
//! point those services at their endpoints.

pub mod config;
pub mod orchestrator;
pub mod services;

pub use config::Settings;
pub use orchestrator::{
    Outcome, ViewOrchestrator, DETAILS_FAILED_MESSAGE, NO_RESULTS_MESSAGE, SEARCH_FAILED_MESSAGE,
    SUGGESTIONS_FAILED_MESSAGE,
};
pub use services::{CatalogService, SuggestionService, TrailerService};
