//! Status effect descriptors shared by the weapon, upgrade and world crates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of status effects an enemy can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Damage over time that ignores movement.
    Burn,
    /// Slow with growing damage over time that can promote into a freeze.
    Chill,
    /// Full movement stop that suppresses burn and chill ticks.
    Freeze,
    /// Linear decay of the maximum health toward a floor.
    Bleed,
}

impl StatusKind {
    /// Every status kind in canonical order.
    pub const ALL: [StatusKind; 4] = [Self::Burn, Self::Chill, Self::Freeze, Self::Bleed];

    /// Lowercase name used in tuning paths and catalogs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Burn => "burn",
            Self::Chill => "chill",
            Self::Freeze => "freeze",
            Self::Bleed => "bleed",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatusKind {
    type Err = UnknownStatusKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "burn" => Ok(Self::Burn),
            "chill" => Ok(Self::Chill),
            "freeze" => Ok(Self::Freeze),
            "bleed" => Ok(Self::Bleed),
            _ => Err(UnknownStatusKind(value.to_owned())),
        }
    }
}

/// Raised when a status effect name does not match any known kind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown status effect type '{0}'")]
pub struct UnknownStatusKind(pub String);

/// Optional overrides for a burn application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnOptions {
    /// Seconds the burn lasts.
    pub duration_sec: Option<f32>,
    /// Health lost per second while burning.
    pub dps: Option<f32>,
}

/// Optional overrides for a chill application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChillOptions {
    /// Seconds the chill lasts.
    pub duration_sec: Option<f32>,
    /// Movement multiplier in `0.0..=1.0`; lower is slower.
    pub slow_factor: Option<f32>,
    /// Damage per second at the moment the chill lands.
    pub base_dps: Option<f32>,
    /// Additional damage per second gained for every second chilled.
    pub dps_growth_per_sec: Option<f32>,
    /// Chilled seconds required before the chill promotes into a freeze.
    pub freeze_threshold_sec: Option<f32>,
    /// Seconds the promoted freeze lasts.
    pub freeze_duration_sec: Option<f32>,
}

/// Optional overrides for a freeze application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeOptions {
    /// Seconds the freeze lasts.
    pub duration_sec: Option<f32>,
}

/// Optional overrides for a bleed application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BleedOptions {
    /// Seconds the bleed lasts.
    pub duration_sec: Option<f32>,
    /// Fraction of the base maximum health removed from the ceiling per second.
    pub percent_per_sec: Option<f32>,
    /// Fraction of the base maximum health below which the ceiling never drops.
    pub min_ratio: Option<f32>,
}

/// Status application request; unset fields fall back to the tuning tables.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StatusOptions {
    /// Burn request.
    Burn(BurnOptions),
    /// Chill request.
    Chill(ChillOptions),
    /// Freeze request.
    Freeze(FreezeOptions),
    /// Bleed request.
    Bleed(BleedOptions),
}

impl StatusOptions {
    /// Creates a request for the provided kind with every field defaulted.
    #[must_use]
    pub fn defaults_for(kind: StatusKind) -> Self {
        match kind {
            StatusKind::Burn => Self::Burn(BurnOptions::default()),
            StatusKind::Chill => Self::Chill(ChillOptions::default()),
            StatusKind::Freeze => Self::Freeze(FreezeOptions::default()),
            StatusKind::Bleed => Self::Bleed(BleedOptions::default()),
        }
    }

    /// Kind of status described by the request.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        match self {
            Self::Burn(_) => StatusKind::Burn,
            Self::Chill(_) => StatusKind::Chill,
            Self::Freeze(_) => StatusKind::Freeze,
            Self::Bleed(_) => StatusKind::Bleed,
        }
    }
}

/// Status effect a bullet attempts to apply when it hits an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusOnHit {
    /// Status request applied on a successful proc.
    #[serde(flatten)]
    pub status: StatusOptions,
    /// Probability in `0.0..=1.0` that a hit applies the status.
    #[serde(rename = "procChance", default = "always")]
    pub proc_chance: f32,
}

impl StatusOnHit {
    /// Creates an entry that applies the status on every hit.
    #[must_use]
    pub const fn always(status: StatusOptions) -> Self {
        Self {
            status,
            proc_chance: 1.0,
        }
    }

    /// Creates an entry that applies the status with the given probability.
    #[must_use]
    pub fn with_chance(status: StatusOptions, proc_chance: f32) -> Self {
        Self {
            status,
            proc_chance: proc_chance.clamp(0.0, 1.0),
        }
    }
}

fn always() -> f32 {
    1.0
}
