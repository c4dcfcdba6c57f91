#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player weapon: base and multiplier stat tables, resolved snapshots and
//! burst scheduling into a tick-driven [`ShotQueue`].

mod queue;
mod stats;

use std::time::Duration;

use glam::Vec2;
use hype_type_core::{EffectOp, Palette, StatusOnHit, TuningError};
use hype_type_system_projectile::Homing;

pub use queue::{ScheduledShot, ShotQueue};
pub use stats::{WeaponStat, WeaponStats};

use stats::{whole, SCALED_STATS};

/// Stat tables of the player's weapon.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponSystem {
    base: [f32; SCALED_STATS],
    mul: [f32; SCALED_STATS],
    homing_enabled: bool,
    status_on_hit: Vec<StatusOnHit>,
}

impl Default for WeaponSystem {
    fn default() -> Self {
        Self {
            base: WeaponStat::SCALED.map(WeaponStat::default_base),
            mul: [1.0; SCALED_STATS],
            homing_enabled: false,
            status_on_hit: Vec::new(),
        }
    }
}

impl WeaponSystem {
    /// Base value of the stat at `path`.
    pub fn base(&self, path: &str) -> Result<f32, TuningError> {
        let stat: WeaponStat = path.parse()?;
        Ok(match stat.slot() {
            Some(slot) => self.base[slot],
            None => f32::from(u8::from(self.homing_enabled)),
        })
    }

    /// Multiplier of the stat at `path`.
    pub fn mul(&self, path: &str) -> Result<f32, TuningError> {
        let stat: WeaponStat = path.parse()?;
        stat.slot()
            .map(|slot| self.mul[slot])
            .ok_or_else(|| TuningError::NoMultiplier(stat.path().to_owned()))
    }

    /// Overwrites the base value of the stat at `path`.
    pub fn set_base(&mut self, path: &str, value: f32) -> Result<(), TuningError> {
        let stat: WeaponStat = path.parse()?;
        match stat.slot() {
            Some(slot) => self.base[slot] = value,
            None => self.homing_enabled = value != 0.0,
        }
        tracing::debug!(stat = %stat, value, "weapon base updated");
        Ok(())
    }

    /// Overwrites the multiplier of the stat at `path`.
    pub fn set_mul(&mut self, path: &str, value: f32) -> Result<(), TuningError> {
        let stat: WeaponStat = path.parse()?;
        let slot = stat
            .slot()
            .ok_or_else(|| TuningError::NoMultiplier(stat.path().to_owned()))?;
        self.mul[slot] = value;
        tracing::debug!(stat = %stat, value, "weapon multiplier updated");
        Ok(())
    }

    /// Applies an upgrade: `add` raises the base, `mul` scales the multiplier.
    pub fn apply_effect(&mut self, target: &str, op: EffectOp, value: f32) -> Result<(), TuningError> {
        match op {
            EffectOp::Add => {
                let current = self.base(target)?;
                self.set_base(target, current + value)
            }
            EffectOp::Mul => {
                let current = self.mul(target)?;
                self.set_mul(target, current * value)
            }
        }
    }

    /// Adds a status applied by every bullet fired from now on.
    pub fn push_status_on_hit(&mut self, entry: StatusOnHit) {
        self.status_on_hit.push(entry);
    }

    /// Resolves the effective stats.
    #[must_use]
    pub fn stats(&self) -> WeaponStats {
        let value = |stat: WeaponStat| {
            let slot = stat.slot().unwrap_or_default();
            self.base[slot] * self.mul[slot]
        };
        WeaponStats {
            bullet_damage: value(WeaponStat::BulletDamage),
            fire_cooldown_ms: value(WeaponStat::FireCooldownMs),
            burst_count: value(WeaponStat::BurstCount).round().max(1.0) as u32,
            shot_delay_ms: value(WeaponStat::ShotDelayMs),
            bullet_speed: value(WeaponStat::BulletSpeed),
            spread_deg: value(WeaponStat::SpreadDeg),
            life_time_ms: value(WeaponStat::LifeTimeMs),
            pierce_count: whole(value(WeaponStat::PierceCount)),
            chain_count: whole(value(WeaponStat::ChainCount)),
            chain_range: value(WeaponStat::ChainRange).max(0.0),
            split_count: whole(value(WeaponStat::SplitCount)),
            split_angle_deg: value(WeaponStat::SplitAngleDeg),
            aoe_radius: value(WeaponStat::AoeRadius).max(0.0),
            homing: Homing {
                enabled: self.homing_enabled,
                turn_rate_deg_per_sec: value(WeaponStat::HomingTurnRate),
            },
            ricochet_count: whole(value(WeaponStat::RicochetCount)),
            status_on_hit: self.status_on_hit.clone(),
        }
    }

    /// Schedules a burst aimed at `target`, returning the number of shots queued.
    ///
    /// The aim is taken once; shot `i` is due `i * shotDelayMs` after `now`.
    /// Delays too large for a [`Duration`] saturate instead of failing.
    pub fn fire_at_target(
        &mut self,
        player: Vec2,
        target: Vec2,
        now: Duration,
        palette: &Palette,
        queue: &mut ShotQueue,
    ) -> u32 {
        let stats = self.stats();
        let offset = target - player;
        let base_angle = offset.y.atan2(offset.x);
        let step = Duration::try_from_secs_f64(f64::from(stats.shot_delay_ms.max(0.0)) / 1000.0)
            .unwrap_or(Duration::MAX);

        for index in 0..stats.burst_count {
            let due = now.saturating_add(step.saturating_mul(index));
            queue.push(ScheduledShot::new(
                due,
                player,
                base_angle,
                palette,
                stats.clone(),
            ));
        }

        tracing::debug!(shots = stats.burst_count, angle = base_angle, "burst scheduled");
        stats.burst_count
    }
}
