//! # View-State Orchestrator
//!
//! This module drives what the presentation layer shows:
//! 1. Validate search input locally
//! 2. Search the catalog and publish results
//! 3. On selection, fetch details, then suggestions and trailer in parallel
//! 4. Commit exactly one `ViewState` per call, or nothing if superseded
//!
//! ## Ordering
//!
//! Every call takes a token from a shared epoch counter before it does
//! anything else. A result is committed only while its token is still the
//! newest one; otherwise it is dropped on the floor. The check and the write
//! happen inside the same `watch` lock, so an older call can never commit
//! after a newer call has finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use model::{MovieId, SearchQuery, ViewState};
use trailer::TrailerLocator;
use yts_client::{CatalogClient, CatalogError, SuggestionsClient};

use crate::config::Settings;
use crate::services::{CatalogService, SuggestionService, TrailerService};

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while fetching search results.";
pub const DETAILS_FAILED_MESSAGE: &str = "Error fetching movie details.";
pub const SUGGESTIONS_FAILED_MESSAGE: &str =
    "An error occurred while fetching details and suggestions.";

/// What happened to the state when an operation returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation's result is now the current state
    Committed,
    /// A newer operation started first; this result was discarded
    Superseded,
    /// The operation is not valid from the current state; nothing changed
    Ignored,
}

/// Owns the current [`ViewState`] and the clients that feed it
#[derive(Clone)]
pub struct ViewOrchestrator {
    catalog: Arc<dyn CatalogService>,
    suggestions: Arc<dyn SuggestionService>,
    trailers: Arc<dyn TrailerService>,
    epoch: Arc<AtomicU64>,
    state: Arc<watch::Sender<ViewState>>,
}

impl ViewOrchestrator {
    /// Create an orchestrator in the `Home` state
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        suggestions: Arc<dyn SuggestionService>,
        trailers: Arc<dyn TrailerService>,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::Home);
        Self {
            catalog,
            suggestions,
            trailers,
            epoch: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Build the real HTTP clients from `settings`.
    ///
    /// All three share one connection pool and the configured timeout.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = settings.http_client()?;

        let catalog = CatalogClient::new(http.clone(), &settings.catalog.base_url);
        let suggestions = SuggestionsClient::new(http.clone(), &settings.catalog.base_url);
        let trailers = TrailerLocator::new(
            http,
            &settings.trailer.base_url,
            settings.trailer.api_key.clone(),
        )
        .with_embed_base_url(&settings.trailer.embed_base_url);

        if !trailers.is_enabled() {
            info!("No trailer API key configured, trailer lookups are disabled");
        }
        info!("Catalog at {}", catalog.base_url());

        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(suggestions),
            Arc::new(trailers),
        ))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every committed transition
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Search the catalog for `text`.
    ///
    /// Blank text is rejected without touching the network. Otherwise any
    /// detail view is cleared before the request goes out, and the result
    /// (or error) is committed when it arrives.
    #[instrument(skip(self))]
    pub async fn submit_search(&self, text: &str) -> Outcome {
        let token = self.begin();

        let query = match SearchQuery::parse(text) {
            Ok(query) => query,
            Err(e) => {
                debug!("Rejected search input: {}", e);
                return self.commit(token, ViewState::error(e.to_string()));
            }
        };

        self.clear_detail(token);

        let next = match self.catalog.search(&query).await {
            Ok(results) if results.is_empty() => ViewState::error(NO_RESULTS_MESSAGE),
            Ok(results) => {
                info!("Search for '{}' returned {} movies", query, results.len());
                ViewState::SearchResults { results }
            }
            Err(CatalogError::NoResults) => ViewState::error(NO_RESULTS_MESSAGE),
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                ViewState::error(SEARCH_FAILED_MESSAGE)
            }
        };

        self.commit(token, next)
    }

    /// Open the detail view for `movie_id`.
    ///
    /// Valid from `SearchResults` and `Detail` (re-selection from the
    /// suggestion list). Details are fetched first; only when they succeed
    /// are suggestions and the trailer requested, concurrently. The detail
    /// view needs both details and suggestions; the trailer is optional.
    #[instrument(skip(self))]
    pub async fn select_movie(&self, movie_id: MovieId) -> Outcome {
        let selectable = matches!(
            &*self.state.borrow(),
            ViewState::SearchResults { .. } | ViewState::Detail { .. }
        );
        if !selectable {
            warn!(
                "Ignoring selection of movie {} from {} view",
                movie_id,
                self.state.borrow().kind()
            );
            return Outcome::Ignored;
        }

        let token = self.begin();

        let details = match self.catalog.get_details(movie_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Details for movie {} failed: {}", movie_id, e);
                return self.commit(token, ViewState::error(DETAILS_FAILED_MESSAGE));
            }
        };

        if self.is_stale(token) {
            debug!("Selection of movie {} superseded before suggestions", movie_id);
            return Outcome::Superseded;
        }

        let (suggestions, trailer) = tokio::join!(
            self.suggestions.get_suggestions(movie_id),
            self.trailers.find_trailer(&details.title, details.year),
        );

        let next = match suggestions {
            Ok(suggestions) => {
                info!(
                    "Loaded '{}' with {} suggestions, trailer: {}",
                    details.title,
                    suggestions.len(),
                    if trailer.is_some() { "yes" } else { "no" }
                );
                ViewState::Detail {
                    details: Box::new(details),
                    suggestions,
                    trailer,
                }
            }
            Err(e) => {
                warn!("Suggestions for movie {} failed: {}", movie_id, e);
                ViewState::error(SUGGESTIONS_FAILED_MESSAGE)
            }
        };

        self.commit(token, next)
    }

    /// Go back to `Home` from anywhere, discarding anything in flight
    pub fn reset(&self) -> Outcome {
        let token = self.begin();
        self.commit(token, ViewState::Home)
    }

    /// Take a fresh token; every earlier token becomes stale
    fn begin(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, token: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) != token
    }

    /// Replace the state with `next` if `token` is still the newest
    fn commit(&self, token: u64, next: ViewState) -> Outcome {
        let kind = next.kind();
        let committed = self.state.send_if_modified(|current| {
            if self.is_stale(token) {
                return false;
            }
            *current = next;
            true
        });

        if committed {
            info!("View is now {}", kind);
            Outcome::Committed
        } else {
            debug!("Discarded stale {} result (token {})", kind, token);
            Outcome::Superseded
        }
    }

    /// Drop a detail view (and with it the backdrop) ahead of a new search
    fn clear_detail(&self, token: u64) {
        self.state.send_if_modified(|current| {
            if self.is_stale(token) || !matches!(current, ViewState::Detail { .. }) {
                return false;
            }
            *current = ViewState::Home;
            true
        });
    }
}

impl std::fmt::Debug for ViewOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewOrchestrator")
            .field("epoch", &self.epoch.load(Ordering::SeqCst))
            .field("state", &self.state.borrow().kind())
            .finish()
    }
}
