#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Kill-count driven wave progression.

use hype_type_core::DifficultyTier;

/// Kills required per wave when a run does not override it.
pub const DEFAULT_KILLS_PER_WAVE: u32 = 10;

/// Upgrade points granted for every wave cleared.
pub const WAVE_REWARD_POINTS: u32 = 2;

/// Signal raised when the wave counter advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveAdvance {
    /// Wave that just started.
    pub wave: u32,
    /// Upgrade points owed to the player.
    pub reward_points: u32,
}

/// Wave counters for a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveController {
    current_wave: u32,
    kills_this_wave: u32,
    kills_to_advance: u32,
}

impl Default for WaveController {
    fn default() -> Self {
        Self {
            current_wave: 1,
            kills_this_wave: 0,
            kills_to_advance: DEFAULT_KILLS_PER_WAVE,
        }
    }
}

impl WaveController {
    /// Resets the counters for a new run. Zero values fall back to wave one
    /// and the default kill quota.
    pub fn init(&mut self, start_wave: u32, kills_to_advance: u32) {
        self.current_wave = start_wave.max(1);
        self.kills_this_wave = 0;
        self.kills_to_advance = if kills_to_advance == 0 {
            DEFAULT_KILLS_PER_WAVE
        } else {
            kills_to_advance
        };
    }

    /// Wave currently in progress.
    #[must_use]
    pub const fn current_wave(&self) -> u32 {
        self.current_wave
    }

    /// Kills counted toward the current wave.
    #[must_use]
    pub const fn kills_this_wave(&self) -> u32 {
        self.kills_this_wave
    }

    /// Kills needed to clear a wave.
    #[must_use]
    pub const fn kills_to_advance(&self) -> u32 {
        self.kills_to_advance
    }

    /// Counts a kill and advances the wave once the quota is met.
    pub fn on_enemy_defeated(&mut self) -> Option<WaveAdvance> {
        self.kills_this_wave += 1;
        if self.kills_this_wave < self.kills_to_advance {
            return None;
        }

        self.current_wave += 1;
        self.kills_this_wave = 0;
        tracing::debug!(wave = self.current_wave, "wave advanced");
        Some(WaveAdvance {
            wave: self.current_wave,
            reward_points: WAVE_REWARD_POINTS,
        })
    }

    /// Enemy health for the current wave: one extra point every two waves.
    #[must_use]
    pub fn enemy_hp_for_wave(&self, base_hp: f32) -> f32 {
        let extra = ((self.current_wave - 1) / 2) as f32;
        (base_hp + extra).max(1.0)
    }

    /// Difficulty tiers unlocked at the current wave; one more every two waves.
    #[must_use]
    pub fn allowed_difficulties(&self) -> Vec<DifficultyTier> {
        let unlocked = ((self.current_wave as usize + 1) / 2).min(DifficultyTier::ALL.len());
        DifficultyTier::ALL[..unlocked].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_normalises_zero_inputs() {
        let mut wave = WaveController::default();
        wave.init(0, 0);
        assert_eq!(wave.current_wave(), 1);
        assert_eq!(wave.kills_to_advance(), DEFAULT_KILLS_PER_WAVE);
    }

    #[test]
    fn health_creeps_up_every_two_waves() {
        let mut wave = WaveController::default();
        let expected = [(1, 30.0), (2, 30.0), (3, 31.0), (4, 31.0), (5, 32.0)];
        for (start, hp) in expected {
            wave.init(start, 10);
            assert!((wave.enemy_hp_for_wave(30.0) - hp).abs() < f32::EPSILON);
        }
        wave.init(1, 10);
        assert!((wave.enemy_hp_for_wave(-5.0) - 1.0).abs() < f32::EPSILON);
    }
}
