//! Terminal score sheet.
//!
//! Each invocation applies one action to the game saved in the data
//! directory and prints the result.

mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scorecard_core::{
    coerce_score, ActiveGame, FileStore, GameStateManager, ManagerConfig, RankStrategy,
    SystemClock, MAX_PLAYERS, MIN_PLAYERS,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Keep score for a five-round card game, last round counts double")]
struct Args {
    /// Directory holding the saved game and history
    #[arg(long, env = "SCORECARD_DATA_DIR", default_value = ".scorecard")]
    data_dir: PathBuf,

    /// Match players back by name and total when ranking, like older
    /// score sheets did
    #[arg(long)]
    legacy_ranking: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game with the given number of players
    New {
        #[arg(value_parser = player_count())]
        count: u8,
    },
    /// Set a player's name (players are numbered from 1)
    Name {
        #[arg(value_parser = player_number())]
        player: u8,
        name: String,
    },
    /// Record a score; anything that is not a number counts as 0
    Score {
        #[arg(value_parser = player_number())]
        player: u8,
        round: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Move the current round marker
    Round { round: usize },
    /// Print the score sheet
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Archive the current game and start over
    Reset,
    /// Print past games
    History {
        #[arg(long)]
        json: bool,
    },
    /// Delete all past games
    ClearHistory,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetView<'a> {
    selection_in_progress: bool,
    game: &'a ActiveGame,
}

type Manager = GameStateManager<FileStore, SystemClock>;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn player_count() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(MIN_PLAYERS as i64..=MAX_PLAYERS as i64)
}

/// Players are numbered from 1 on the command line.
fn player_number() -> clap::builder::RangedI64ValueParser<u8> {
    clap::value_parser!(u8).range(1..=MAX_PLAYERS as i64)
}

fn player_index(player: u8) -> usize {
    usize::from(player) - 1
}

fn print_sheet(manager: &Manager) {
    if manager.selection_in_progress() {
        println!(
            "No game in progress. Start one with `scorecard new <{}-{}>`.",
            MIN_PLAYERS, MAX_PLAYERS
        );
    } else {
        println!(
            "{}",
            render::score_table(manager.active_game(), &manager.standings())
        );
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&args.data_dir)?;
    let config = ManagerConfig {
        rank_strategy: if args.legacy_ranking {
            RankStrategy::NameAndTotal
        } else {
            RankStrategy::Position
        },
    };
    let mut manager = GameStateManager::load_with(store, SystemClock, config)?;
    debug!(data_dir = %args.data_dir.display(), "loaded score sheet");

    match args.command {
        Command::New { count } => {
            manager.select_player_count(count as usize)?;
            print_sheet(&manager);
        }
        Command::Name { player, name } => {
            manager.update_player_name(player_index(player), name)?;
            print_sheet(&manager);
        }
        Command::Score {
            player,
            round,
            value,
        } => {
            manager.update_score(player_index(player), round, coerce_score(&value))?;
            print_sheet(&manager);
        }
        Command::Round { round } => {
            manager.set_current_round(round)?;
            print_sheet(&manager);
        }
        Command::Show { json } => {
            if json {
                let view = SheetView {
                    selection_in_progress: manager.selection_in_progress(),
                    game: manager.active_game(),
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_sheet(&manager);
            }
        }
        Command::Reset => match manager.reset_game()? {
            Some(record) => println!("Archived game from {}.", record.date),
            None => println!("Nothing to archive."),
        },
        Command::History { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(manager.history())?);
            } else {
                println!("{}", render::history_list(manager.history()));
            }
        }
        Command::ClearHistory => {
            manager.clear_history()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
