//! Terminal front end: play a game on stdin/stdout with long-algebraic input.
//!
//! Run with:
//! `cargo run -- [--config app.json] [--vs-random | --uci /path/to/engine] [--color black] [--fen "<fen>"]`
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (for example `RUST_LOG=chess_rules=debug`).

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chess_rules::engines::engine_random::RandomEngine;
use chess_rules::engines::engine_trait::{Engine, GoParams};
use chess_rules::engines::uci_engine::UciEngine;
use chess_rules::game_state::chess_rules::RulesConfig;
use chess_rules::game_state::chess_types::{Color, EndReason, PieceKind};
use chess_rules::game_state::game_state::{Activation, GameState};
use chess_rules::session::chess_session::{AiSession, ChessSession, LocalSession};
use chess_rules::utils::long_algebraic::{format_long_algebraic, parse_long_algebraic, MoveText};

const OPPONENT_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum OpponentConfig {
    #[default]
    Local,
    Random,
    Uci {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct AppConfig {
    rules: RulesConfig,
    go: GoParams,
    opponent: OpponentConfig,
    human_color: Color,
    start_fen: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            go: GoParams::default(),
            opponent: OpponentConfig::Local,
            human_color: Color::White,
            start_fen: None,
        }
    }
}

impl AppConfig {
    /// Optional JSON file first, then command-line flags on top.
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, Box<dyn Error>> {
        let mut config = AppConfig::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    let text = fs::read_to_string(&path)?;
                    config = serde_json::from_str(&text)?;
                    info!(%path, "loaded configuration");
                }
                "--vs-random" => config.opponent = OpponentConfig::Random,
                "--uci" => {
                    let path = args.next().ok_or("--uci needs an engine path")?;
                    config.opponent = OpponentConfig::Uci { path: path.into() };
                }
                "--color" => {
                    config.human_color = match args.next().as_deref() {
                        Some("white") => Color::White,
                        Some("black") => Color::Black,
                        _ => return Err("--color expects white or black".into()),
                    };
                }
                "--fen" => {
                    config.start_fen = Some(args.next().ok_or("--fen needs a position")?);
                }
                other => return Err(format!("unknown argument: {other}").into()),
            }
        }
        Ok(config)
    }
}

fn build_session(config: &AppConfig) -> Result<Box<dyn ChessSession>, Box<dyn Error>> {
    let game = match &config.start_fen {
        Some(fen) => GameState::from_fen_with_config(fen, config.rules)?,
        None => GameState::with_config(config.rules),
    };

    let engine: Box<dyn Engine> = match &config.opponent {
        OpponentConfig::Local => return Ok(Box::new(LocalSession::new(game))),
        OpponentConfig::Random => Box::new(RandomEngine::new()),
        OpponentConfig::Uci { path } => {
            let mut engine = UciEngine::spawn(path)?;
            engine.new_game()?;
            Box::new(engine)
        }
    };
    info!(opponent = engine.name(), human = ?config.human_color, "starting game against engine");
    Ok(Box::new(AiSession::new(
        game,
        config.human_color,
        engine,
        config.go.clone(),
    )))
}

fn drive_opponent(session: &mut dyn ChessSession) {
    while !session.game().is_game_over() && !session.is_local_turn() && !session.is_stalled() {
        session.update();
        thread::sleep(OPPONENT_POLL);
    }
}

fn describe_outcome(game: &GameState) -> Option<String> {
    let outcome = game.outcome()?;
    Some(match (outcome.reason, outcome.winner) {
        (EndReason::Checkmate, Some(winner)) => format!("Checkmate. {winner:?} wins."),
        (EndReason::Draw(reason), _) => format!("Draw: {reason:?}."),
        (reason, _) => format!("Game over: {reason:?}."),
    })
}

fn print_status(game: &GameState, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{game}")?;
    if let Some(text) = describe_outcome(game) {
        writeln!(out, "{text}")?;
    } else if game.pending_promotion().is_some() {
        writeln!(out, "Choose a promotion: promote queen|rook|bishop|knight")?;
    } else if game.in_check(game.current_turn()) {
        writeln!(out, "Check.")?;
    }
    Ok(())
}

fn print_legal_moves(game: &GameState, out: &mut impl Write) -> io::Result<()> {
    let names: Vec<String> = game
        .all_legal_moves()
        .into_iter()
        .filter_map(|mv| {
            format_long_algebraic(&MoveText {
                from: mv.from,
                to: mv.to,
                promotion: None,
            })
            .ok()
        })
        .collect();
    writeln!(out, "{}", names.join(" "))
}

/// Returns false when the input loop should stop.
fn handle_line(session: &mut dyn ChessSession, line: &str, out: &mut impl Write) -> io::Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };

    match command {
        "quit" | "exit" => return Ok(false),
        "help" => writeln!(
            out,
            "commands: <move> (e2e4, e7e8q) | promote <kind> | moves | board | fen | quit"
        )?,
        "board" => print_status(session.game(), out)?,
        "fen" => writeln!(out, "{}", session.game().position_string())?,
        "moves" => print_legal_moves(session.game(), out)?,
        "promote" => {
            let kind = PieceKind::from_promotion_name(parts.next().unwrap_or("queen"));
            if session.resolve_promotion(kind) {
                drive_opponent(session);
                print_status(session.game(), out)?;
            } else {
                writeln!(out, "No promotion is pending.")?;
            }
        }
        text => match parse_long_algebraic(text) {
            Err(err) => writeln!(out, "{err}")?,
            Ok(mv) => {
                let activation = match session.handle_square(mv.from) {
                    Activation::Selected => session.handle_square(mv.to),
                    other => other,
                };
                match activation {
                    Activation::PromotionPending => {
                        if let Some(kind) = mv.promotion {
                            session.resolve_promotion(kind);
                        }
                    }
                    Activation::Moved => {}
                    _ => {
                        writeln!(out, "Illegal move: {text}")?;
                        return Ok(true);
                    }
                }
                drive_opponent(session);
                print_status(session.game(), out)?;
            }
        },
    }
    Ok(true)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_args(std::env::args().skip(1))?;
    let mut session = build_session(&config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    drive_opponent(session.as_mut());
    print_status(session.game(), &mut stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if !handle_line(session.as_mut(), line.trim(), &mut stdout)? {
            break;
        }
        if session.is_stalled() {
            warn!("opponent stopped responding");
            writeln!(stdout, "The opponent stopped responding.")?;
            break;
        }
        stdout.flush()?;
    }

    Ok(())
}
