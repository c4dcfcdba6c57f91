use std::time::Duration;

use serde::Deserialize;

/// Session seed used when no seed is configured.
pub const DEFAULT_SEED: u64 = 0x6879_7065_7479_7065;

/// Tunable constants for a play session.
///
/// Every field has a default, so partial TOML documents deserialize.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Arena width in world units.
    pub arena_width: f32,
    /// Arena height in world units.
    pub arena_height: f32,
    /// Collision radius of the player.
    pub player_radius: f32,
    /// Player health at the start of a run.
    pub player_max_hp: f32,
    /// Collision radius of every enemy.
    pub enemy_radius: f32,
    /// Enemy health before wave scaling.
    pub enemy_base_hp: f32,
    /// Distance an unslowed enemy covers per simulation step.
    pub enemy_speed: f32,
    /// Damage an enemy deals when it reaches the player.
    pub contact_damage: f32,
    /// Collision radius of every bullet.
    pub bullet_radius: f32,
    /// Simulation steps per second.
    pub frame_rate: u32,
    /// Milliseconds between enemy spawns.
    pub spawn_interval_ms: u64,
    /// Kills required to clear a wave.
    pub kills_per_wave: u32,
    /// Seed every random stream of the session derives from.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            player_radius: 15.0,
            player_max_hp: 100.0,
            enemy_radius: 5.0,
            enemy_base_hp: 30.0,
            enemy_speed: 0.25,
            contact_damage: 10.0,
            bullet_radius: 5.0,
            frame_rate: 60,
            spawn_interval_ms: 2000,
            kills_per_wave: 10,
            seed: DEFAULT_SEED,
        }
    }
}

impl SessionConfig {
    /// Replaces the session seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Duration of one simulation step.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Time between enemy spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

/// Fixed-step clock: real time accrues until a whole frame is available.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedStep {
    interval: Duration,
    accumulator: Duration,
    elapsed: Duration,
}

impl FixedStep {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    /// Simulated time covered by the steps taken so far.
    pub(crate) const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Accrues `dt` and reports whether one step is due.
    ///
    /// At most one step runs per call; the remainder modulo the interval is
    /// carried into the next call.
    pub(crate) fn accrue(&mut self, dt: Duration) -> bool {
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.interval.is_zero() || self.accumulator < self.interval {
            return false;
        }

        let interval = self.interval.as_nanos();
        let remainder = self.accumulator.as_nanos() % interval;
        self.accumulator = Duration::from_nanos(u64::try_from(remainder).unwrap_or_default());
        self.elapsed = self.elapsed.saturating_add(self.interval);
        true
    }
}
