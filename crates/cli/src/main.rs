use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use model::{MovieId, ViewState};
use orchestrator::{Outcome, Settings, ViewOrchestrator};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

mod render;

/// reel-search - browse the YTS movie catalog from the terminal
#[derive(Parser)]
#[command(name = "reel-search")]
#[command(about = "Search movies, read details, find similar titles and trailers", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./reel-search.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    Search {
        /// Movie title to search for
        #[arg(long)]
        title: String,

        /// Open the n-th result (1-based) after searching
        #[arg(long)]
        open: Option<usize>,
    },

    /// Interactive session: search, open, home, quit
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let orchestrator = ViewOrchestrator::from_settings(&settings)?;

    match cli.command {
        Commands::Search { title, open } => handle_search(&orchestrator, &title, open).await?,
        Commands::Browse => handle_browse(&orchestrator).await?,
    }

    Ok(())
}

/// Handle the 'search' command
async fn handle_search(
    orchestrator: &ViewOrchestrator,
    title: &str,
    open: Option<usize>,
) -> Result<()> {
    orchestrator.submit_search(title).await;
    let state = orchestrator.state();
    print!("{}", render::render(&state));

    let Some(rank) = open else {
        return Ok(());
    };

    let ViewState::SearchResults { results } = &state else {
        return Ok(());
    };
    let movie = rank
        .checked_sub(1)
        .and_then(|index| results.get(index))
        .ok_or_else(|| anyhow!("No result number {} (got {} results)", rank, results.len()))?;

    orchestrator.select_movie(movie.id).await;
    print!("\n{}", render::render(&orchestrator.state()));
    Ok(())
}

/// Handle the 'browse' command
async fn handle_browse(orchestrator: &ViewOrchestrator) -> Result<()> {
    print!("{}", render::render(&orchestrator.state()));
    println!(
        "{}",
        "Commands: search <title> | open <id> | home | quit".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        let line = line.trim();
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        let outcome = match command {
            "" => continue,
            "quit" | "exit" => break,
            "home" => orchestrator.reset(),
            "search" => orchestrator.submit_search(argument).await,
            "open" => match argument.trim().parse::<MovieId>() {
                Ok(movie_id) => orchestrator.select_movie(movie_id).await,
                Err(_) => {
                    println!("{}", "Usage: open <movie id>".yellow());
                    continue;
                }
            },
            other => {
                println!("{} {}", "Unknown command:".yellow(), other);
                continue;
            }
        };

        if outcome == Outcome::Ignored {
            println!("{}", "Search first, then open a movie from the results.".yellow());
            continue;
        }
        print!("{}", render::render(&orchestrator.state()));
    }

    Ok(())
}
