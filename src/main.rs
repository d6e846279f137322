//! Perudo - Main Binary
//!
//! Console Liar's Dice with human and bot seats

use clap::{Parser, Subcommand};
use perudo_rs::{
    bonus::{BonusKind, BonusWallet, MemoryBonusStore},
    core::{AccountId, Player},
    game::{
        GameLoop, GameState, HeuristicController, InteractiveController, PlayerController,
        VerbosityLevel,
    },
    sim::run_sim,
    PerudoError, Result,
};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "perudo")]
#[command(about = "Perudo - Liar's Dice Console Game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive match with human and bot seats
    Play {
        /// Number of human seats (1-4)
        #[arg(long, default_value_t = 1)]
        humans: usize,

        /// Number of bot seats (0-5)
        #[arg(long, default_value_t = 2)]
        bots: usize,

        /// Human name(s), comma separated; missing names get defaults
        #[arg(long, value_name = "NAMES")]
        names: Option<String>,

        /// Dice per player at match start
        #[arg(long, default_value_t = 5)]
        dice: usize,

        /// Set random seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,

        /// Reroll bonuses granted to each human for this session
        #[arg(long, default_value_t = 1)]
        rerolls: u32,

        /// Peek bonuses granted to each human for this session
        #[arg(long, default_value_t = 1)]
        peeks: u32,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Run bot-only matches in parallel and collect statistics
    Sim {
        /// Number of matches to run
        #[arg(long, short = 'm', default_value_t = 1000)]
        matches: usize,

        /// Number of bot seats per match
        #[arg(long, default_value_t = 3)]
        bots: usize,

        /// Dice per player at match start
        #[arg(long, default_value_t = 5)]
        dice: usize,

        /// Master seed; each match derives its own from it
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Round cap per match
        #[arg(long, default_value_t = 1000)]
        max_rounds: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            humans,
            bots,
            names,
            dice,
            seed,
            rerolls,
            peeks,
            verbosity,
        } => run_play(humans, bots, names, dice, seed, rerolls, peeks, verbosity.into())?,
        Commands::Sim {
            matches,
            bots,
            dice,
            seed,
            max_rounds,
        } => run_sim(matches, bots, dice, seed, max_rounds)?,
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_play(
    humans: usize,
    bots: usize,
    names: Option<String>,
    dice: usize,
    seed: Option<u64>,
    rerolls: u32,
    peeks: u32,
    verbosity: VerbosityLevel,
) -> Result<()> {
    if !(1..=4).contains(&humans) {
        return Err(PerudoError::InvalidAction(
            "Play mode takes 1 to 4 human seats".to_string(),
        ));
    }
    if bots > 5 {
        return Err(PerudoError::InvalidAction(
            "Play mode takes at most 5 bots".to_string(),
        ));
    }
    if humans + bots < 2 {
        return Err(PerudoError::InvalidAction(
            "Match requires at least 2 seats".to_string(),
        ));
    }

    let human_names = parse_names(names, humans);

    // Session inventory: each human's account is granted the same counts
    // the wallet starts with, so wallet and store agree at the table.
    let mut store = MemoryBonusStore::new();
    let mut players = Vec::with_capacity(humans + bots);
    for name in &human_names {
        let account = AccountId::new(name.to_lowercase());
        store.grant(account.clone(), BonusKind::Reroll, rerolls);
        store.grant(account.clone(), BonusKind::Peek, peeks);
        players.push(Player::new_human(
            name.clone(),
            BonusWallet::new(account, rerolls, peeks),
            dice,
        ));
    }
    for i in 1..=bots {
        players.push(Player::new_bot(format!("Bot{}", i), dice));
    }

    let mut game = GameState::new(players);
    game.seed_rng(seed.unwrap_or_else(rand::random));

    let mut controllers: Vec<Box<dyn PlayerController>> = Vec::with_capacity(humans + bots);
    for _ in 0..humans {
        controllers.push(Box::new(InteractiveController::stdin()));
    }
    for _ in 0..bots {
        controllers.push(Box::new(HeuristicController::new()));
    }

    let mut game_loop = GameLoop::new(&mut game, &mut store).with_verbosity(verbosity);
    game_loop.run_match(&mut controllers)?;

    Ok(())
}

/// Split the --names list, padding with defaults when too few are given
fn parse_names(names: Option<String>, humans: usize) -> Vec<String> {
    let mut given: Vec<String> = names
        .map(|s| {
            s.split(',')
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect()
        })
        .unwrap_or_default();
    given.truncate(humans);
    for i in given.len()..humans {
        if i == 0 {
            given.push("You".to_string());
        } else {
            given.push(format!("You{}", i + 1));
        }
    }
    given
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_pads_with_defaults() {
        assert_eq!(parse_names(None, 2), vec!["You", "You2"]);
        assert_eq!(parse_names(Some("Ana".to_string()), 2), vec!["Ana", "You2"]);
    }

    #[test]
    fn test_parse_names_trims_and_truncates() {
        assert_eq!(
            parse_names(Some(" Ana , Ben , Cho ".to_string()), 2),
            vec!["Ana", "Ben"]
        );
    }

    #[test]
    fn test_verbosity_arg_accepts_names_and_numbers() {
        assert!(matches!(
            "verbose".parse::<VerbosityArg>(),
            Ok(VerbosityArg(VerbosityLevel::Verbose))
        ));
        assert!(matches!(
            "0".parse::<VerbosityArg>(),
            Ok(VerbosityArg(VerbosityLevel::Silent))
        ));
        assert!("loud".parse::<VerbosityArg>().is_err());
    }
}
