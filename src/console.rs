use std::collections::BTreeMap;
use std::fmt::{Display, Error, Formatter};

use log::{info, warn};
use regex::Regex;
use rustyline::config::Configurer;
use rustyline::Editor;

use crate::error::{CommandError, GameError};
use crate::evaluation::Evaluation;
use crate::game::{Game, Selection};
use crate::piece::Color;
use crate::r#move::Move;
use crate::search::{Search, SearchFramework, SearchOptions};
use crate::square::{self, file_of, rank_of};

const DEPTH: &str = "Depth";
const SEED: &str = "Seed";
const AUTO_REPLY: &str = "AutoReply";

/// Text front end to a `Game`, reading commands from a line editor.
/// Engine moves are searched on a background thread, during which
/// the position cannot be changed.
pub struct Console {
    game: Game,
    search_framework: SearchFramework,
    options: BTreeMap<&'static str, ConsoleOption>,
    engine_side: Option<Color>,
    args_regex: Regex,
}

impl Console {
    /// `engine_side` is the color the engine opens the game for, if any.
    /// Setting it also turns on automatic replies.
    pub fn new(search_options: &SearchOptions, engine_side: Option<Color>) -> Result<Console, regex::Error> {
        let options = BTreeMap::from([
            (
                DEPTH,
                ConsoleOption::Spin {
                    name: DEPTH,
                    value: i64::from(search_options.depth),
                    default: i64::from(search_options.depth),
                    min: 1,
                    max: 6,
                },
            ),
            (
                SEED,
                ConsoleOption::Spin {
                    name: SEED,
                    value: search_options.seed.map_or(0, |s| s as i64),
                    default: 0,
                    min: 0,
                    max: i64::MAX,
                },
            ),
            (
                AUTO_REPLY,
                ConsoleOption::Check {
                    name: AUTO_REPLY,
                    value: engine_side.is_some(),
                    default: false,
                },
            ),
        ]);
        Ok(Console {
            game: Game::new(),
            search_framework: SearchFramework::new(),
            options,
            engine_side,
            args_regex: Regex::new(r#"(".*?"|[^"\s]+)"#)?,
        })
    }

    pub fn run(&mut self) {
        let mut editor = Editor::<()>::new();
        editor.set_auto_add_history(true);
        editor.set_check_cursor_position(true);

        println!("{}", self.game.board());
        if self.engine_side == Some(self.game.current_player()) {
            if let Err(e) = self.start_engine() {
                warn!("{}", e)
            }
        }

        while let Ok(line) = editor.readline("pawnstorm> ") {
            if let Some(search) = self.search_framework.probe_search() {
                self.play_search_result(search);
            }
            match self.handle_command(&line) {
                Ok(ConsoleOkCode::ShouldQuit) => break,
                Ok(ConsoleOkCode::OkCommand) => (),
                Err(e) => warn!("{}", e),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> Result<ConsoleOkCode, CommandError> {
        let words = self
            .args_regex
            .find_iter(line)
            .map(|m| m.as_str())
            .collect::<Vec<_>>();
        let mut args = words.into_iter();
        let cmd = match args.next() {
            Some(c) => c,
            None => return Ok(ConsoleOkCode::OkCommand),
        };
        match cmd {
            "new" => {
                self.ensure_idle()?;
                self.game.new_game();
                println!("{}", self.game.board());
            }
            "show" => {
                println!("{}", self.game.board());
                println!("{}", self.game.outcome());
            }
            "fen" => {
                let fen = args.map(|a| a.trim_matches('"')).collect::<Vec<_>>().join(" ");
                if fen.is_empty() {
                    println!("{}", self.game.board().fen());
                } else {
                    self.ensure_idle()?;
                    self.game.load_fen(&fen)?;
                    println!("{}", self.game.board());
                }
            }
            "moves" => {
                let moves = self.game.legal_moves();
                println!("{} moves: {}", moves.len(), moves);
            }
            "move" => {
                self.ensure_idle()?;
                let arg = args.next().ok_or(CommandError::MissingArg("<move>"))?;
                let mv = Move::parse(arg).ok_or_else(|| CommandError::BadMove(arg.to_string()))?;
                self.game.apply_move(mv)?;
                self.after_human_move()?;
            }
            "select" => {
                self.ensure_idle()?;
                let arg = args.next().ok_or(CommandError::MissingArg("<square>"))?;
                let sq = square::parse_square(arg)
                    .ok_or_else(|| CommandError::BadSquare(arg.to_string()))?;
                match self.game.select(rank_of(sq), file_of(sq)) {
                    Selection::Selected(sq) => {
                        let targets = self
                            .game
                            .legal_moves()
                            .from_square(sq)
                            .map(|m| m.to_string())
                            .collect::<Vec<_>>();
                        println!("selected {}: {}", arg, targets.join(" "));
                    }
                    Selection::Moved(_) => self.after_human_move()?,
                    Selection::Rejected => println!("selection cleared"),
                }
            }
            "undo" => {
                self.ensure_idle()?;
                if !self.game.undo() {
                    return Err(GameError::NothingToUndo.into());
                }
                println!("{}", self.game.board());
            }
            "go" => return self.start_engine(),
            "wait" => match self.search_framework.wait_search() {
                Some(search) => self.play_search_result(search),
                None => println!("no search running"),
            },
            "eval" => println!("{}", EvaluationReport(Evaluation::evaluate(self.game.board()))),
            "perft" => {
                let depth = args
                    .next()
                    .ok_or(CommandError::MissingArg("<depth>"))?
                    .parse::<u32>()
                    .map_err(|_| CommandError::BadCommand(line.trim().to_string()))?;
                let mut board = self.game.board().clone();
                crate::print_perft(&mut board, depth);
            }
            "setoption" => {
                let option_name = if let Some("name") = args.next() {
                    args.next().ok_or(CommandError::MissingArg("<name>"))?
                } else {
                    return Err(CommandError::MissingArg("name <name>"));
                };
                let option_value = match args.nth(1) {
                    Some(v) => v,
                    None => return Err(CommandError::MissingArg("value <value>")),
                };
                let option = self
                    .options
                    .get_mut(option_name)
                    .ok_or_else(|| CommandError::UnknownOption(option_name.to_string()))?;
                option.set_value(option_value);
                info!("{}", option.current());
            }
            "options" => self
                .options
                .values()
                .for_each(|o| println!("option {} value {}", o, o.current_value())),
            "quit" => return Ok(ConsoleOkCode::ShouldQuit),
            _ => return Err(CommandError::BadCommand(String::from(cmd))),
        }

        Ok(ConsoleOkCode::OkCommand)
    }

    fn ensure_idle(&self) -> Result<(), CommandError> {
        if self.search_framework.is_searching() {
            Err(CommandError::Busy)
        } else {
            Ok(())
        }
    }

    fn after_human_move(&mut self) -> Result<(), CommandError> {
        println!("{}", self.game.board());
        if self.game.is_game_over() {
            println!("{}", self.game.outcome());
        } else if self.auto_reply() {
            self.start_engine()?;
        }
        Ok(())
    }

    fn start_engine(&mut self) -> Result<ConsoleOkCode, CommandError> {
        if self.game.is_game_over() {
            println!("{}", self.game.outcome());
            return Ok(ConsoleOkCode::OkCommand);
        }
        self.search_framework
            .run_search(self.game.board(), &self.search_options())?;
        println!("thinking...");
        Ok(ConsoleOkCode::OkCommand)
    }

    fn play_search_result(&mut self, search: Search) {
        println!("info {}", search);
        let Some(mv) = search.best_move else {
            println!("{}", self.game.outcome());
            return;
        };
        match self.game.apply_move(mv) {
            Ok(()) => {
                println!("bestmove {}", mv);
                println!("{}", self.game.board());
                if self.game.is_game_over() {
                    println!("{}", self.game.outcome());
                }
            }
            Err(e) => warn!("engine move {} not played: {}", mv, e),
        }
    }

    /// The search settings currently held by the option table
    pub fn search_options(&self) -> SearchOptions {
        let mut options = SearchOptions::default();
        if let Some(ConsoleOption::Spin { value, .. }) = self.options.get(DEPTH) {
            options.set_depth(*value as u8);
        }
        if let Some(ConsoleOption::Spin { value, .. }) = self.options.get(SEED) {
            options.set_seed(if *value == 0 { None } else { Some(*value as u64) });
        }
        options
    }

    fn auto_reply(&self) -> bool {
        matches!(
            self.options.get(AUTO_REPLY),
            Some(ConsoleOption::Check { value: true, .. })
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConsoleOkCode {
    OkCommand,
    ShouldQuit,
}

/// A runtime setting of the console, changed through `setoption`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOption {
    Check {
        name: &'static str,
        value: bool,
        default: bool,
    },
    Spin {
        name: &'static str,
        value: i64,
        default: i64,
        min: i64,
        max: i64,
    },
}
impl ConsoleOption {
    /// Unparsable values are ignored, numbers are clamped to the allowed range
    pub fn set_value(&mut self, v: &str) {
        match self {
            Self::Check { value, .. } => *value = v.parse::<bool>().unwrap_or(*value),
            Self::Spin {
                value, min, max, ..
            } => {
                let parsed = v.parse::<i64>().unwrap_or(*value);
                *value = parsed.clamp(*min, *max)
            }
        }
    }

    fn current_value(&self) -> String {
        match self {
            Self::Check { value, .. } => value.to_string(),
            Self::Spin { value, .. } => value.to_string(),
        }
    }

    fn current(&self) -> String {
        match self {
            Self::Check { name, .. } | Self::Spin { name, .. } => {
                format!("{} set to {}", name, self.current_value())
            }
        }
    }
}
impl Display for ConsoleOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Self::Check { name, default, .. } => {
                write!(f, "name {} type check default {}", name, default)
            }
            Self::Spin {
                name,
                default,
                min,
                max,
                ..
            } => write!(
                f,
                "name {} type spin default {} min {} max {}",
                name, default, min, max
            ),
        }
    }
}

struct EvaluationReport(Evaluation);
impl Display for EvaluationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let e = &self.0;
        writeln!(f, "material       {:>6}", e.material)?;
        writeln!(f, "positional     {:>6}", e.positional)?;
        writeln!(f, "pawn structure {:>6}", e.pawn_structure)?;
        writeln!(f, "mobility       {:>6}", e.mobility)?;
        writeln!(f, "king safety    {:>6}", e.king_safety)?;
        write!(f, "total          {:>6} ({})", e.score, e.outcome)
    }
}
