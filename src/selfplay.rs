//! Random self-play.
//!
//! Plays whole matches on generated galaxies, choosing uniformly among every
//! seat's legal actions at each step, until the end condition is reached, no
//! seat can act, or an action limit trips. This exercises the resolver over
//! long random action sequences and produces one `GameRecord` per match.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::board::{generate_game, MapConfig, MapError, Phase, Resources, ALL_STRUCTURES};
use crate::config::Rules;
use crate::movegen::all_legal_actions;
use crate::resolve::{is_end_condition, resolve_action};

/// Errors that stop a self-play run before any match is played.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("invalid galaxy: {0}")]
    Map(#[from] MapError),

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a self-play run.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_games: usize,
    /// Seats per match.
    pub players: usize,
    pub rules: Rules,
    pub map: MapConfig,
    /// Actions after which a match is abandoned.
    pub max_actions: usize,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 3,
            rules: Rules::default(),
            map: MapConfig::default(),
            max_actions: 2000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// How a match stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The final round was reached.
    Finished,
    /// No seat had a legal action left.
    Stalled,
    /// `max_actions` was reached first.
    ActionLimit,
}

/// Summary of one self-play match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub outcome: Outcome,
    pub final_round: u32,
    pub final_phase: Phase,
    /// Accepted actions, including turn ends.
    pub actions: usize,
    pub points: Vec<u32>,
    pub resources: Vec<Resources>,
    /// Structures built per seat, all kinds together.
    pub structures_built: Vec<u32>,
}

fn seeded_rng(seed: u64, offset: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(offset as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single match and returns its record.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, MapError> {
    let players = (0..config.players).map(|i| format!("p{}", i)).collect();
    let mut game = generate_game(players, config.rules, &config.map, rng)?;
    let mut actions = 0;

    let outcome = loop {
        if is_end_condition(&game) {
            break Outcome::Finished;
        }
        if actions >= config.max_actions {
            break Outcome::ActionLimit;
        }
        let legal = all_legal_actions(&game);
        let Some(action) = legal.choose(rng) else {
            break Outcome::Stalled;
        };
        let envelope = resolve_action(action, &mut game);
        if envelope.is_illegal() {
            warn!(game_id, ?action, reason = envelope.reason(), "generated action was rejected");
            break Outcome::Stalled;
        }
        actions += 1;
    };

    let structures_built = (0..game.player_count())
        .map(|p| {
            ALL_STRUCTURES
                .iter()
                .map(|&kind| game.built(p, kind))
                .sum()
        })
        .collect();

    Ok(GameRecord {
        game_id,
        outcome,
        final_round: game.round,
        final_phase: game.phase,
        actions,
        points: game.points.iter().map(|p| p.total()).collect(),
        resources: game.resources.clone(),
        structures_built,
    })
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    info!(
        "Game {}/{}: {:?} at round {} after {} actions ({:.1}s)",
        n,
        config.num_games,
        game.outcome,
        game.final_round,
        game.actions,
        started.elapsed().as_secs_f64(),
    );
}

/// Plays `num_games` matches and collects their records in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    Ok(games)
}

/// Plays `num_games` matches, handing each record to `on_game` as it finishes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    config.map.validate(config.players)?;
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game);
        Ok(())
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = seeded_rng(config.seed, 0);
    for i in 0..config.num_games {
        let started = Instant::now();
        match play_game(config, i, &mut rng) {
            Ok(game) => {
                report(config, i + 1, &game, started);
                on_game(game);
            }
            Err(e) => warn!(game_id = i, error = %e, "match setup failed"),
        }
    }
}

fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = seeded_rng(config.seed, i);
                        let started = Instant::now();
                        match play_game(config, i, &mut rng) {
                            Ok(game) => {
                                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                                report(config, n, &game, started);
                                let _ = tx.send(game);
                            }
                            Err(e) => warn!(game_id = i, error = %e, "match setup failed"),
                        }
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
    Ok(())
}

/// Writes one JSON object per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate statistics over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub finished: usize,
    pub stalled: usize,
    pub action_limit: usize,
    pub avg_actions: f64,
    pub avg_points: f64,
}

/// Computes run statistics.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut total_actions = 0usize;
    let mut total_points = 0u64;
    let mut seats = 0usize;

    for game in games {
        match game.outcome {
            Outcome::Finished => summary.finished += 1,
            Outcome::Stalled => summary.stalled += 1,
            Outcome::ActionLimit => summary.action_limit += 1,
        }
        total_actions += game.actions;
        total_points += game.points.iter().map(|&p| u64::from(p)).sum::<u64>();
        seats += game.points.len();
    }

    summary.avg_actions = total_actions as f64 / games.len().max(1) as f64;
    summary.avg_points = total_points as f64 / seats.max(1) as f64;
    summary
}
