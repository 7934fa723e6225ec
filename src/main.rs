use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use pawnstorm::console::Console;
use pawnstorm::piece::Color;
use pawnstorm::search::{SearchOptions, DEFAULT_DEPTH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Play from the console
    Play {
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u8).range(1..=6))]
        depth: u8,

        /// Seed for reproducible engine moves
        #[arg(long)]
        seed: Option<u64>,

        /// Let the engine play this side, answering every move
        #[arg(long, value_enum)]
        engine_plays: Option<Side>,
    },
    /// Count the leaves of the legal move tree
    Perft {
        depth: u32,
        /// Starting position, the standard one when omitted
        fen: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    White,
    Black,
}
impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    println!("pawnstorm v{}, by {}", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_AUTHORS"));

    match args.command {
        Some(Mode::Perft { depth, fen }) => pawnstorm::perft(depth, fen.as_deref())?,
        Some(Mode::Play {
            depth,
            seed,
            engine_plays,
        }) => {
            let mut options = SearchOptions::default();
            options.set_depth(depth).set_seed(seed);
            Console::new(&options, engine_plays.map(Color::from))?.run()
        }
        None => Console::new(&SearchOptions::default(), None)?.run(),
    }
    Ok(())
}
