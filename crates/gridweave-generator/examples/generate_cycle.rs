//! Example demonstrating color-cycle puzzle generation.
//!
//! Generates one puzzle for the chosen level and prints the scrambled board,
//! the verified solution, and the seed. With `--samples` the example
//! generates many puzzles in parallel and keeps the one with the longest
//! solution, which is a cheap proxy for difficulty.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_cycle -- --level 3
//! ```
//!
//! Reproduce a specific instance:
//!
//! ```sh
//! cargo run --example generate_cycle -- --level 3 --seed <64-hex-digits>
//! ```
//!
//! Sample for a hard instance:
//!
//! ```sh
//! cargo run --example generate_cycle -- --level 5 --samples 1000
//! ```

use std::process;

use clap::Parser;
use gridweave_generator::{CYCLE_LEVELS, CycleGenerator, GeneratedCyclePuzzle, PuzzleSeed};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Level index (0-based) into the built-in level table.
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    level: usize,

    /// Seed as 64 hex digits; random when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<PuzzleSeed>,

    /// Generate this many candidates and keep the longest-solution one.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    samples: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.level >= CYCLE_LEVELS.len() {
        eprintln!(
            "--level must be below {} (got {}).",
            CYCLE_LEVELS.len(),
            args.level
        );
        process::exit(2);
    }
    if args.samples == 0 {
        eprintln!("--samples must be at least 1.");
        process::exit(2);
    }

    let generator = CycleGenerator::for_level(args.level);

    let puzzle = if let Some(seed) = args.seed {
        generator.generate_with_seed(seed)
    } else if args.samples == 1 {
        generator.generate()
    } else {
        (0..args.samples)
            .into_par_iter()
            .map(|_| generator.generate())
            .max_by_key(|puzzle| puzzle.solution.len())
            .expect("samples is at least 1")
    };

    print_puzzle(&puzzle);
}

fn print_puzzle(puzzle: &GeneratedCyclePuzzle) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();
    println!("Board (target {}):", puzzle.target);
    for line in puzzle.board.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("Solution ({} clicks):", puzzle.solution.len());
    let clicks: Vec<String> = puzzle
        .solution
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("  {}", clicks.join(" "));
}
