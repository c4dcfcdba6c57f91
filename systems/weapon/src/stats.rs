use std::{fmt, str::FromStr};

use hype_type_core::{StatusOnHit, TuningError};
use hype_type_system_projectile::Homing;

/// Tunable weapon stat addressed by a dotted path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeaponStat {
    /// `bulletDamage`
    BulletDamage,
    /// `fireCooldownMs`
    FireCooldownMs,
    /// `burstCount`
    BurstCount,
    /// `shotDelayMs`
    ShotDelayMs,
    /// `bulletSpeed`
    BulletSpeed,
    /// `spreadDeg`
    SpreadDeg,
    /// `lifeTimeMs`
    LifeTimeMs,
    /// `pierceCount`
    PierceCount,
    /// `chainCount`
    ChainCount,
    /// `chainRange`
    ChainRange,
    /// `splitCount`
    SplitCount,
    /// `splitAngleDeg`
    SplitAngleDeg,
    /// `aoeRadius`
    AoeRadius,
    /// `homing.turnRateDegPerSec`
    HomingTurnRate,
    /// `ricochetCount`
    RicochetCount,
    /// `homing.enabled`; base only, non-zero enables homing.
    HomingEnabled,
}

pub(crate) const SCALED_STATS: usize = 15;

impl WeaponStat {
    /// Stats that carry both a base and a multiplier, in table order.
    pub const SCALED: [WeaponStat; SCALED_STATS] = [
        Self::BulletDamage,
        Self::FireCooldownMs,
        Self::BurstCount,
        Self::ShotDelayMs,
        Self::BulletSpeed,
        Self::SpreadDeg,
        Self::LifeTimeMs,
        Self::PierceCount,
        Self::ChainCount,
        Self::ChainRange,
        Self::SplitCount,
        Self::SplitAngleDeg,
        Self::AoeRadius,
        Self::HomingTurnRate,
        Self::RicochetCount,
    ];

    /// Canonical dotted path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::BulletDamage => "bulletDamage",
            Self::FireCooldownMs => "fireCooldownMs",
            Self::BurstCount => "burstCount",
            Self::ShotDelayMs => "shotDelayMs",
            Self::BulletSpeed => "bulletSpeed",
            Self::SpreadDeg => "spreadDeg",
            Self::LifeTimeMs => "lifeTimeMs",
            Self::PierceCount => "pierceCount",
            Self::ChainCount => "chainCount",
            Self::ChainRange => "chainRange",
            Self::SplitCount => "splitCount",
            Self::SplitAngleDeg => "splitAngleDeg",
            Self::AoeRadius => "aoeRadius",
            Self::HomingTurnRate => "homing.turnRateDegPerSec",
            Self::RicochetCount => "ricochetCount",
            Self::HomingEnabled => "homing.enabled",
        }
    }

    /// Stock base value.
    #[must_use]
    pub const fn default_base(self) -> f32 {
        match self {
            Self::BulletDamage => 10.0,
            Self::FireCooldownMs => 250.0,
            Self::BurstCount => 3.0,
            Self::ShotDelayMs => 100.0,
            Self::BulletSpeed => 10.0,
            Self::LifeTimeMs => 2000.0,
            Self::ChainRange => 120.0,
            Self::SplitAngleDeg => 30.0,
            Self::SpreadDeg
            | Self::PierceCount
            | Self::ChainCount
            | Self::SplitCount
            | Self::AoeRadius
            | Self::HomingTurnRate
            | Self::RicochetCount
            | Self::HomingEnabled => 0.0,
        }
    }

    pub(crate) fn slot(self) -> Option<usize> {
        Self::SCALED.iter().position(|stat| *stat == self)
    }
}

impl fmt::Display for WeaponStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for WeaponStat {
    type Err = TuningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let path = trimmed.strip_prefix("weapon.").unwrap_or(trimmed);
        if path == "homing_turnRateDegPerSec" {
            return Ok(Self::HomingTurnRate);
        }
        Self::SCALED
            .into_iter()
            .chain([Self::HomingEnabled])
            .find(|stat| stat.path() == path)
            .ok_or_else(|| TuningError::UnknownStat(value.to_owned()))
    }
}

/// Resolved weapon snapshot used when a burst is scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaponStats {
    /// Damage per bullet.
    pub bullet_damage: f32,
    /// Minimum milliseconds between bursts.
    pub fire_cooldown_ms: f32,
    /// Shots per burst; at least one.
    pub burst_count: u32,
    /// Milliseconds between shots of a burst.
    pub shot_delay_ms: f32,
    /// Distance a bullet covers per step.
    pub bullet_speed: f32,
    /// Full spread cone in degrees.
    pub spread_deg: f32,
    /// Bullet lifetime in milliseconds.
    pub life_time_ms: f32,
    /// Enemies a bullet passes through.
    pub pierce_count: u32,
    /// Chain hops per bullet.
    pub chain_count: u32,
    /// Maximum chain hop distance.
    pub chain_range: f32,
    /// Children spawned when a bullet is consumed.
    pub split_count: u32,
    /// Angle between split children in degrees.
    pub split_angle_deg: f32,
    /// Splash radius.
    pub aoe_radius: f32,
    /// Homing parameters.
    pub homing: Homing,
    /// Wall bounces per bullet.
    pub ricochet_count: u32,
    /// Statuses attempted on hit.
    pub status_on_hit: Vec<StatusOnHit>,
}

pub(crate) fn whole(value: f32) -> u32 {
    value.floor().max(0.0) as u32
}
