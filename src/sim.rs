//! Batch simulation mode
//!
//! Plays many bot-only matches and collects win statistics. Matches are
//! executed concurrently using rayon; each match gets its own state and a
//! seed derived from the master seed, so a batch is reproducible.

use crate::bonus::MemoryBonusStore;
use crate::core::Player;
use crate::game::{GameLoop, GameState, HeuristicController, PlayerController, VerbosityLevel};
use crate::{PerudoError, Result};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Statistics collected during a simulation batch
#[derive(Debug, Default)]
struct SimStats {
    wins_by_seat: Vec<usize>,
    unfinished: usize,
    total_rounds: u64,
}

/// Run simulation mode - play multiple matches in parallel and collect statistics
pub fn run_sim(matches: usize, bots: usize, dice: usize, seed: u64, max_rounds: u32) -> Result<()> {
    println!("=== Perudo Simulation Mode ===\n");

    if bots < 2 {
        return Err(PerudoError::InvalidAction(
            "Simulation requires at least 2 bots".to_string(),
        ));
    }

    println!("Running {matches} matches with {bots} bots ({dice} dice each)");
    println!("Using master seed: {seed}\n");

    // Statistics tracking (thread-safe)
    let stats = Arc::new(Mutex::new(SimStats {
        wins_by_seat: vec![0; bots],
        ..SimStats::default()
    }));
    let matches_completed = Arc::new(Mutex::new(0usize));
    let start_time = Instant::now();

    // Use rayon to run matches in parallel
    (0..matches).into_par_iter().for_each(|match_idx| {
        let completed = {
            let mut count = matches_completed.lock().unwrap();
            *count += 1;
            *count
        };

        // Each match gets an independent state seeded off the master seed
        let match_seed = seed.wrapping_add((match_idx as u64).wrapping_mul(0x9E3779B97F4A7C15));

        let match_result = {
            let players: Vec<Player> = (1..=bots)
                .map(|i| Player::new_bot(format!("Bot{}", i), dice))
                .collect();
            let mut game = GameState::new(players);
            game.seed_rng(match_seed);

            let mut store = MemoryBonusStore::new();
            let mut controllers: Vec<Box<dyn PlayerController>> = (0..bots)
                .map(|_| Box::new(HeuristicController::new()) as Box<dyn PlayerController>)
                .collect();

            // Run match silently
            let mut game_loop = GameLoop::new(&mut game, &mut store)
                .with_max_rounds(max_rounds)
                .with_verbosity(VerbosityLevel::Silent);
            game_loop.run_match(&mut controllers)
        };

        // Update statistics
        match match_result {
            Ok(result) => {
                let mut stats = stats.lock().unwrap();
                stats.total_rounds += u64::from(result.rounds_played);
                match result.winner {
                    Some(seat) => stats.wins_by_seat[seat] += 1,
                    None => stats.unfinished += 1,
                }
            }
            Err(e) => {
                eprintln!("Warning: Match {} failed: {}", match_idx, e);
            }
        }

        // Print progress every 100 matches
        if completed % 100 == 0 {
            println!("Completed {} matches", completed);
        }
    });

    let final_count = *matches_completed.lock().unwrap();
    let elapsed = start_time.elapsed();

    println!("\n=== Simulation Complete ===");
    println!("Total matches played: {}", final_count);
    println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "Matches per second: {:.2}\n",
        final_count as f64 / elapsed.as_secs_f64()
    );

    // Display statistics
    let stats = stats.lock().unwrap();
    let decided: usize = stats.wins_by_seat.iter().sum();
    let total = decided + stats.unfinished;

    println!("=== Seat Statistics ===");
    if total > 0 {
        for (seat, wins) in stats.wins_by_seat.iter().enumerate() {
            println!(
                "Bot{} wins: {} ({:.1}%)",
                seat + 1,
                wins,
                100.0 * *wins as f64 / total as f64
            );
        }
        if stats.unfinished > 0 {
            println!(
                "Unfinished (round limit): {} ({:.1}%)",
                stats.unfinished,
                100.0 * stats.unfinished as f64 / total as f64
            );
        }
        println!(
            "Average rounds per match: {:.1}",
            stats.total_rounds as f64 / total as f64
        );
    }

    Ok(())
}
