//! The view model handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::types::{MovieDetails, MovieSummary, SuggestionSet, TrailerReference};

/// Background colour used whenever no movie is on screen
pub const DEFAULT_BACKDROP: &str = "rgb(36, 36, 36)";

/// What the presentation layer should show right now.
///
/// Exactly one variant is active. Transitions replace the whole value, so a
/// renderer never sees a mix of old details and new results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Home,
    SearchResults {
        results: Vec<MovieSummary>,
    },
    Error {
        message: String,
    },
    Detail {
        details: Box<MovieDetails>,
        suggestions: SuggestionSet,
        trailer: Option<TrailerReference>,
    },
}

impl ViewState {
    pub fn error(message: impl Into<String>) -> Self {
        ViewState::Error {
            message: message.into(),
        }
    }

    /// The movie currently on screen, if any
    pub fn current_details(&self) -> Option<&MovieDetails> {
        match self {
            ViewState::Detail { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Background the presentation layer should paint for this state
    pub fn backdrop(&self) -> Backdrop<'_> {
        match self.current_details() {
            Some(details) if !details.background_image_url.is_empty() => {
                Backdrop::Image(&details.background_image_url)
            }
            _ => Backdrop::Default,
        }
    }

    /// Short name of the active variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ViewState::Home => "home",
            ViewState::SearchResults { .. } => "search_results",
            ViewState::Error { .. } => "error",
            ViewState::Detail { .. } => "detail",
        }
    }
}

/// Projection of a [`ViewState`] onto the page background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop<'a> {
    /// Plain [`DEFAULT_BACKDROP`] colour
    Default,
    /// Cover-fit, blurred background image of the selected movie
    Image(&'a str),
}
