//! Memory-match session runner (default binary).
//!
//! Bootstraps content, starts or resumes a session from the page URL, applies
//! any matches given on the command line, and prints the board and the
//! shareable address. Per-tab progress and the history log live as JSON files
//! in the state directory, so consecutive runs behave like page reloads.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use memory_match::core::Board;
use memory_match::persist::FileStore;
use memory_match::session::{AppConfig, Collaborators, GameSession, StartOptions, SystemClock};
use memory_match::types::{format_difficulty, format_time, Difficulty};

#[derive(Parser)]
#[command(name = "memory-match")]
#[command(about = "Deterministic memory-match boards with resumable sessions")]
struct Args {
    /// Page address to resume from (overrides MEMORY_MATCH_PAGE_URL)
    #[arg(long)]
    url: Option<String>,

    /// Difficulty for a new session: easy, medium, hard or expert
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Explicit seed for a new session
    #[arg(long)]
    seed: Option<String>,

    /// Record a matched pair key (counts as one move); repeatable
    #[arg(long = "match", value_name = "PAIR_KEY")]
    matches: Vec<String>,

    /// End the session and append it to the history log
    #[arg(long)]
    end: bool,

    /// Print the history log
    #[arg(long)]
    history: bool,
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(raw).ok_or_else(|| format!("unknown difficulty {raw:?}"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(url) = args.url {
        config.page_url = url;
    }
    let page = config.page()?;
    let source = config.content.build_source()?;

    let mut session = GameSession::new(Collaborators {
        tab_store: Box::new(FileStore::new(config.tab_store_path())),
        durable_store: Box::new(FileStore::new(config.durable_store_path())),
        location: Box::new(page.clone()),
        clock: Box::new(SystemClock::new()),
    });
    tracing::debug!(page = %page.href(), catalog = %config.content.catalog, "bootstrapping");
    session.load_data(source.as_ref()).await;

    if args.end {
        session.end();
        println!("session ended");
        println!("url: {}", page.href());
    } else {
        let fresh = args.difficulty.is_some() || args.seed.is_some();
        if fresh || !session.state().is_started {
            session.start(StartOptions {
                difficulty: args.difficulty,
                seed: args.seed,
            });
        }

        for key in &args.matches {
            session.increment_move_count();
            session.update_matched_tiles(&[key.as_str()]);
        }
        session.stop_timer();

        print_session(&session);
        println!("url: {}", page.href());
    }

    if args.history {
        print_history(&session);
    }
    Ok(())
}

fn print_session(session: &GameSession) {
    let state = session.state();
    println!(
        "{} | moves {} | time {}",
        state.difficulty.label(),
        state.move_count,
        format_time(state.elapsed_secs)
    );
    if let Some(token) = session.share_token() {
        println!("token: {token}");
    }
    println!(
        "media: {} loaded, {} failed",
        session.media().loaded_count(),
        session.media().failed_ids().count()
    );
    if let Some(board) = session.board() {
        print_board(board);
    }
}

fn print_board(board: &Board) {
    for row in 0..board.rows() {
        let cells: Vec<String> = (0..board.cols())
            .filter_map(|col| board.tile(row, col))
            .map(|tile| {
                let mark = if tile.is_matched { '*' } else { ' ' };
                format!("{mark}{:<24}", tile.pair_key())
            })
            .collect();
        println!("{}", cells.join(" "));
    }
    if board.is_complete() {
        println!("all pairs matched");
    }
}

fn print_history(session: &GameSession) {
    let entries = session.history();
    if entries.is_empty() {
        println!("no finished sessions");
        return;
    }
    for entry in entries {
        println!(
            "{:<8} moves {:>4}  time {}  at {}",
            format_difficulty(entry.difficulty.as_str()),
            entry.move_count,
            format_time(entry.elapsed_time),
            entry.timestamp
        );
    }
}
