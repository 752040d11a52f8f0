//! Random self-play CLI.
//!
//! Plays random matches against the rules engine and writes one JSON record
//! per match.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of matches to play (default: 10)
//!   --players N      Seats per match (default: 3)
//!   --planets N      Planets per galaxy (default: 12)
//!   --final-round N  Round at which a match ends (default: 3)
//!   --max-actions N  Abandon a match after N actions (default: 2000)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use orbital::selfplay::{self, SelfPlayConfig};

fn parse_arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            error!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbital=info,selfplay=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse_arg(&args, i, "--games");
            }
            "--players" => {
                i += 1;
                config.players = parse_arg(&args, i, "--players");
            }
            "--planets" => {
                i += 1;
                config.map.planet_count = parse_arg(&args, i, "--planets");
            }
            "--final-round" => {
                i += 1;
                config.rules.final_round = parse_arg(&args, i, "--final-round");
            }
            "--max-actions" => {
                i += 1;
                config.max_actions = parse_arg(&args, i, "--max-actions");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_arg(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                error!("unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        info!(
            "Self-play: {} games, {} players, {} planets, final round {}, {} threads",
            config.num_games,
            config.players,
            config.map.planet_count,
            config.rules.final_round,
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        let summary = selfplay::summarize(&games);
        info!(
            "Completed {} games in {:.1}s: {} finished, {} stalled, {} hit the action limit",
            summary.games,
            elapsed.as_secs_f64(),
            summary.finished,
            summary.stalled,
            summary.action_limit
        );
        info!(
            "Avg actions/game: {:.1}, avg points/seat: {:.2}",
            summary.avg_actions, summary.avg_points
        );
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            selfplay::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    match (written, output_path) {
        (Err(e), _) => {
            error!("failed to write output: {}", e);
            process::exit(1);
        }
        (Ok(()), Some(path)) if !config.quiet => info!("Wrote {} games to {}", games.len(), path),
        _ => {}
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of matches to play (default: 10)");
    eprintln!("  --players N      Seats per match (default: 3)");
    eprintln!("  --planets N      Planets per galaxy (default: 12)");
    eprintln!("  --final-round N  Round at which a match ends (default: 3)");
    eprintln!("  --max-actions N  Abandon a match after N actions (default: 2000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
