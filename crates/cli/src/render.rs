//! Terminal rendering of a [`ViewState`].
//!
//! Everything is written into a `String` so the output can be checked
//! without a terminal.

use std::fmt::{self, Write};

use colored::Colorize;
use model::{
    Backdrop, MovieDetails, MovieSummary, SuggestionSet, TrailerReference, ViewState,
    DEFAULT_BACKDROP,
};

pub fn render(state: &ViewState) -> String {
    let mut out = String::new();
    write_state(&mut out, state).ok();
    out
}

fn write_state(out: &mut impl Write, state: &ViewState) -> fmt::Result {
    let backdrop = match state.backdrop() {
        Backdrop::Default => DEFAULT_BACKDROP,
        Backdrop::Image(url) => url,
    };
    writeln!(out, "{}", format!("[backdrop {}]", backdrop).dimmed())?;

    match state {
        ViewState::Home => writeln!(out, "{}", "Search for a movie to get started.".bold().blue()),
        ViewState::SearchResults { results } => write_results(out, results),
        ViewState::Error { message } => writeln!(out, "{} {}", "✗".red(), message.red()),
        ViewState::Detail {
            details,
            suggestions,
            trailer,
        } => write_detail(out, details, suggestions, trailer.as_ref()),
    }
}

fn write_results(out: &mut impl Write, results: &[MovieSummary]) -> fmt::Result {
    writeln!(out, "{}", "Search results:".bold().blue())?;
    for (rank, movie) in results.iter().enumerate() {
        writeln!(
            out,
            "{}. {} {}",
            (rank + 1).to_string().green(),
            movie.display_title(),
            format!("[id {}]", movie.id).dimmed()
        )?;
    }
    Ok(())
}

fn write_detail(
    out: &mut impl Write,
    details: &MovieDetails,
    suggestions: &SuggestionSet,
    trailer: Option<&TrailerReference>,
) -> fmt::Result {
    writeln!(out, "{}", format!("{} ({})", details.title, details.year).bold().blue())?;
    writeln!(out, "{}", details.genre_line())?;

    let certification = if details.mpa_rating.is_empty() {
        "Not Rated"
    } else {
        details.mpa_rating.as_str()
    };
    writeln!(
        out,
        "{} | IMDb {:.1} | {} min",
        certification.yellow(),
        details.rating,
        details.runtime_minutes
    )?;
    writeln!(out, "Poster: {}", details.poster_image_url)?;

    // Cast
    writeln!(out, "\n{}", "Cast".bold())?;
    if details.cast.is_empty() {
        writeln!(out, "  No Cast Data Available")?;
    }
    for member in &details.cast {
        writeln!(
            out,
            "{}{} {}",
            "• ".green(),
            member.name,
            format!("({})", member.image_or_placeholder()).dimmed()
        )?;
    }

    // Similar movies
    writeln!(out, "\n{}", "Similar Movies".bold())?;
    if suggestions.is_empty() {
        writeln!(out, "  None")?;
    }
    for movie in &suggestions.movies {
        writeln!(
            out,
            "{}{} {}",
            "• ".cyan(),
            movie.display_title(),
            format!("[id {}]", movie.id).dimmed()
        )?;
    }

    // Downloads
    writeln!(out, "\n{}", "Downloads".bold())?;
    if details.download_links.is_empty() {
        writeln!(out, "  None")?;
    }
    for link in &details.download_links {
        writeln!(out, "{}{}: {}", "• ".cyan(), link.label, link.url)?;
    }

    writeln!(out, "\n{}", "Plot".bold())?;
    writeln!(out, "{}", details.full_description)?;

    let screenshots: Vec<&str> = details
        .visible_screenshots()
        .filter_map(|shot| shot.full_url.as_deref())
        .collect();
    if !screenshots.is_empty() {
        writeln!(out, "\n{}", "Screenshots".bold())?;
        for url in screenshots {
            writeln!(out, "{}{}", "• ".cyan(), url)?;
        }
    }

    writeln!(out, "\n{}", "Trailer".bold())?;
    match trailer {
        Some(trailer) => writeln!(out, "{}", trailer.embed_url.underline()),
        None => writeln!(out, "Trailer not found"),
    }
}
