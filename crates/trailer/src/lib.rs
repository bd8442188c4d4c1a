//! # Trailer Crate
//!
//! Best-effort trailer lookup against the YouTube Data API.
//!
//! ## Behaviour
//! [`TrailerLocator::find_trailer`] searches for
//! `"<title> <year> official trailer"` and turns the first video hit into an
//! embeddable URL. It never returns an error: a missing credential, a network
//! failure, an exhausted quota or an empty result all come back as `None`.
//! Trailers are decoration on the detail view and must not hold it hostage.
//!
//! ## Example Usage
//!
//! ```ignore
//! use trailer::TrailerLocator;
//!
//! let locator = TrailerLocator::new(http, "https://www.googleapis.com/youtube/v3", Some(key));
//! if let Some(trailer) = locator.find_trailer("Inception", 2010).await {
//!     println!("{}", trailer.embed_url);
//! }
//! ```

pub mod locator;

pub use locator::{TrailerError, TrailerLocator, DEFAULT_EMBED_BASE_URL, SEARCH_QUALIFIER};
