#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use glam::Vec2;
use hype_type_core::{Arena, Command, Event, SessionMode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Distance outside the arena edge at which enemies appear by default.
pub const DEFAULT_EDGE_MARGIN: f32 = 5.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
    edge_margin: f32,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }

    /// Overrides how far outside the arena enemies appear.
    #[must_use]
    pub const fn with_edge_margin(mut self, edge_margin: f32) -> Self {
        self.edge_margin = edge_margin;
        self
    }
}

/// Arena edge an enemy enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

const EDGES: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

/// Pure system that deterministically emits spawn commands while a run is live.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    edge_margin: f32,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            edge_margin: config.edge_margin,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and emits one spawn command per elapsed interval.
    pub fn handle(
        &mut self,
        events: &[Event],
        mode: SessionMode,
        arena: &Arena,
        out: &mut Vec<Command>,
    ) {
        if mode != SessionMode::Running {
            self.accumulator = Duration::ZERO;
            return;
        }

        if self.spawn_interval.is_zero() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let spawn_attempts = self.resolve_spawn_attempts();

        for _ in 0..spawn_attempts {
            let position = self.edge_position(arena);
            out.push(Command::SpawnEnemy { position });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        if self.spawn_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.spawn_interval {
            self.accumulator -= self.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn edge_position(&mut self, arena: &Arena) -> Vec2 {
        let edge = EDGES[self.rng.gen_range(0..EDGES.len())];
        let along: f32 = self.rng.gen();
        let margin = self.edge_margin;
        match edge {
            Edge::Top => Vec2::new(along * arena.width(), -margin),
            Edge::Right => Vec2::new(arena.width() + margin, along * arena.height()),
            Edge::Bottom => Vec2::new(along * arena.width(), arena.height() + margin),
            Edge::Left => Vec2::new(-margin, along * arena.height()),
        }
    }
}
