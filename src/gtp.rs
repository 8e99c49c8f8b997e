//! Go Text Protocol (GTP) front-end.
//!
//! A thin driver over the core engine (`board`, `mcts`, `search`): this
//! module owns no game logic of its own, only command parsing and response
//! framing.

use std::io::{self, BufRead, Write};

use crate::board::{parse_coord, str_coord, GameState, Player, Point};
use crate::constants::{KOMI, N};
use crate::inference::UniformPriorEngine;
use crate::search;

const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "p-nmove",
    "p-winner",
    "p-bwr",
    "version",
];

/// GTP engine state: the game in progress, plus the last move chosen so
/// `p-bwr` can report an estimate without re-searching.
pub struct GtpEngine {
    state: GameState,
    engine: UniformPriorEngine,
    last_black_win_rate: f32,
}

impl GtpEngine {
    pub fn new() -> GtpEngine {
        GtpEngine {
            state: GameState::new(),
            engine: UniformPriorEngine,
            last_black_win_rate: 0.5,
        }
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };

            let line = preprocess(&line);
            if line.is_empty() {
                continue;
            }

            let (id, command_line) = Self::parse_id(&line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            let (success, message) = self.execute(&command, args);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n").unwrap();
            stdout.flush().unwrap();

            if command == "quit" {
                break;
            }
        }
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let mut chars = trimmed.char_indices();

        if let Some((_, c)) = chars.next() {
            if c.is_ascii_digit() {
                let end = chars
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(i, _)| i)
                    .unwrap_or(trimmed.len());

                if let Ok(id) = trimmed[..end].parse::<u32>() {
                    return (Some(id), trimmed[end..].trim());
                }
            }
        }

        (None, trimmed)
    }

    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "5*5special".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => match args.first().and_then(|a| a.parse::<usize>().ok()) {
                Some(size) if size == N => (true, String::new()),
                Some(size) => (
                    false,
                    format!("unacceptable size, only {N} is supported (got {size})"),
                ),
                None => (false, "invalid size".to_string()),
            },

            "clear_board" => {
                self.state = GameState::new();
                (true, String::new())
            }

            "komi" => match args.first().and_then(|a| a.parse::<f32>().ok()) {
                Some(k) if (k - KOMI).abs() < 1e-6 => (true, String::new()),
                Some(k) => (
                    false,
                    format!("unacceptable komi, only {KOMI} is supported (got {k})"),
                ),
                None => (false, "invalid komi".to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let requested_color = match args[0].to_lowercase().as_str() {
                    "b" | "black" => Player::Black,
                    "w" | "white" => Player::White,
                    _ => return (false, "invalid color".to_string()),
                };
                if requested_color != self.state.side_to_move {
                    return (false, "not this color's turn".to_string());
                }
                let Some(point) = parse_coord(args[1]) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.state.play(point) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let requested_color = match args[0].to_lowercase().as_str() {
                    "b" | "black" => Player::Black,
                    "w" | "white" => Player::White,
                    _ => return (false, "invalid color".to_string()),
                };
                if requested_color != self.state.side_to_move {
                    return (false, "not this color's turn".to_string());
                }
                if self.state.terminal {
                    return (false, "game is over".to_string());
                }

                let (chosen, black_win_rate) = search::evaluate_move(
                    &self.state,
                    &self.engine,
                    search::DEFAULT_TIME_LIMIT,
                );
                self.last_black_win_rate = black_win_rate;
                self.state
                    .play(chosen)
                    .expect("search only returns legal moves");
                (true, str_coord(chosen))
            }

            "p-nmove" => (true, self.state.move_count.to_string()),

            "p-winner" => {
                if !self.state.terminal {
                    return (false, "game is not over".to_string());
                }
                let winner = match self.state.judge_winner() {
                    Player::Black => "black",
                    Player::White => "white",
                };
                (true, winner.to_string())
            }

            "p-bwr" => (true, format!("{:.4}", self.last_black_win_rate)),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

impl Default for GtpEngine {
    fn default() -> GtpEngine {
        GtpEngine::new()
    }
}

/// Drop control characters except HT/LF, turn remaining tabs into spaces,
/// and truncate at the first `#`.
fn preprocess(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c == '#' {
            break;
        }
        if c == '\t' {
            out.push(' ');
        } else if c == '\n' || !c.is_control() {
            out.push(c);
        }
    }
    out.trim().to_string()
}
