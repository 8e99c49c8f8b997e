//! A 5x5 Go engine: PUCT-guided MCTS backed by an exhaustive endgame solver.
//!
//! ## Usage
//!
//! - `go5x5-engine` / `go5x5-engine demo` - play a short self-contained game
//! - `go5x5-engine gtp` - start the GTP server for GUI integration

use clap::{Parser, Subcommand};

use go5x5_engine::board::{str_coord, GameState};
use go5x5_engine::gtp::GtpEngine;
use go5x5_engine::inference::UniformPriorEngine;
use go5x5_engine::search;

#[derive(Parser)]
#[command(name = "go5x5-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play a short self-contained game against itself and print the result
    Demo,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new();
            engine.run();
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() {
    println!("go5x5-engine: 5x5 Go, PUCT MCTS + exhaustive solver\n");

    let mut state = GameState::new();
    let engine = UniformPriorEngine;
    let mut consecutive_passes = 0;

    while !state.terminal && consecutive_passes < 2 {
        let mv = search::fixed_move(&state, &engine);
        println!("{:?} plays {}", state.side_to_move, str_coord(mv));
        consecutive_passes = if mv.is_pass() { consecutive_passes + 1 } else { 0 };
        state.play(mv).expect("search only returns legal moves");
    }

    println!("\n{state}");
    match state.judge_winner() {
        go5x5_engine::board::Player::Black => println!("Black wins."),
        go5x5_engine::board::Player::White => println!("White wins."),
    }
}
