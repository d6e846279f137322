//! Game state, round rules, and the match loop

pub mod controller;
pub mod game_loop;
pub mod heuristic_controller;
pub mod input;
pub mod interactive_controller;
pub mod logger;
pub mod rules;
pub mod scripted_controller;
pub mod state;

pub use controller::{GameStateView, PlayerAction, PlayerController};
pub use game_loop::{GameLoop, MatchEndReason, MatchResult, VerbosityLevel};
pub use heuristic_controller::HeuristicController;
pub use input::{LineReader, ScriptedReader, StdinReader};
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, LogGuard, OutputFormat, OutputMode};
pub use rules::{resolve_doubt, resolve_exact, ChallengeKind, ChallengeOutcome, Verdict};
pub use scripted_controller::ScriptedController;
pub use state::{GameState, RoundState};
