#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hype Type engine.
//!
//! Adapters submit [`Command`] values describing desired mutations, the
//! world executes them through its `apply` entry point and broadcasts
//! [`Event`] values describing what happened. Systems consume those events
//! together with immutable snapshots and answer with new command batches.

use std::{collections::BTreeMap, fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

mod status;
mod upgrades;

pub use status::{
    BleedOptions, BurnOptions, ChillOptions, FreezeOptions, StatusKind, StatusOnHit,
    StatusOptions, UnknownStatusKind,
};
pub use upgrades::{
    EffectOp, Requirement, TuningTable, UpgradeCatalog, UpgradeEffect, UpgradeNode,
    UpgradeNodeId, UpgradeTree,
};

/// Lifecycle state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// No run has started yet.
    Idle,
    /// A run is in progress and the clock advances.
    Running,
    /// A run is suspended; ticks and keystrokes are ignored.
    Paused,
    /// The player was defeated; the run is over.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resizes the playable arena.
    ConfigureArena {
        /// Width of the arena in world units.
        width: f32,
        /// Height of the arena in world units.
        height: f32,
    },
    /// Resets the session and starts a new run.
    StartRun {
        /// Words available to enemies, grouped by difficulty.
        words: WordLibrary,
        /// Wave the run starts at; values below one are raised to one.
        start_wave: u32,
    },
    /// Suspends or resumes a running session.
    SetPaused {
        /// Whether the session should be paused.
        paused: bool,
    },
    /// Feeds elapsed real time into the fixed-step clock.
    Tick {
        /// Real time elapsed since the previous tick.
        dt: Duration,
    },
    /// Delivers a single keystroke to the typing resolver.
    KeyPressed {
        /// Character produced by the key.
        key: char,
    },
    /// Creates an enemy at the provided position.
    SpawnEnemy {
        /// Spawn location in world units.
        position: Vec2,
    },
    /// Applies a status effect to an enemy.
    ApplyStatus {
        /// Enemy receiving the status.
        enemy: EnemyId,
        /// Status request; unset fields use the tuning tables.
        status: StatusOptions,
    },
    /// Applies a status effect named by text with default options.
    ApplyNamedStatus {
        /// Enemy receiving the status.
        enemy: EnemyId,
        /// Status name such as `burn`.
        name: String,
    },
    /// Applies an upgrade effect directly to the weapon or status tuning.
    ApplyUpgradeEffect {
        /// Effect to apply.
        effect: UpgradeEffect,
    },
    /// Replaces the upgrade catalog offered to the player.
    LoadUpgradeCatalog {
        /// Catalog to install.
        catalog: UpgradeCatalog,
    },
    /// Attempts to purchase a node from the loaded catalog.
    PurchaseUpgrade {
        /// Node to purchase.
        node: UpgradeNodeId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that one fixed simulation step ran.
    TimeAdvanced {
        /// Simulated time covered by the step.
        dt: Duration,
    },
    /// Announces that the session entered a new mode.
    ModeChanged {
        /// Mode that became active.
        mode: SessionMode,
    },
    /// Confirms the arena dimensions.
    ArenaConfigured {
        /// Arena now in effect.
        arena: Arena,
    },
    /// Confirms that a run started.
    RunStarted {
        /// Wave the run starts at.
        wave: u32,
        /// Number of words in the active pool.
        words: usize,
    },
    /// Reports that a run could not start.
    RunRejected {
        /// Reason the run was rejected.
        reason: StartError,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Spawn location.
        position: Vec2,
        /// Word the enemy carries.
        word: String,
        /// Starting health.
        hp: f32,
    },
    /// Reports that a keystroke changed an enemy's matched prefix.
    TypingProgressed {
        /// Enemy whose prefix changed.
        enemy: EnemyId,
        /// Number of matched leading characters after the keystroke.
        typed: usize,
    },
    /// Reports that a word was completed and its enemy targeted.
    WordCompleted {
        /// Enemy chosen as the weapon target.
        enemy: EnemyId,
        /// Word that was completed.
        word: String,
        /// Fresh word assigned to the enemy.
        replacement: String,
    },
    /// Reports that a burst was scheduled.
    ShotsQueued {
        /// Enemy the burst aims at.
        target: EnemyId,
        /// Number of shots in the burst.
        count: u32,
    },
    /// Confirms that a bullet entered the arena.
    BulletFired {
        /// Identifier assigned to the bullet.
        bullet: BulletId,
        /// Launch position.
        position: Vec2,
        /// Launch velocity in world units per step.
        velocity: Vec2,
        /// Bullet color.
        color: Rgb,
    },
    /// Reports that a bullet bounced off an arena wall.
    BulletRicocheted {
        /// Bouncing bullet.
        bullet: BulletId,
        /// Position after the bounce.
        position: Vec2,
    },
    /// Reports that a bullet left play.
    BulletExpired {
        /// Expired bullet.
        bullet: BulletId,
        /// Reason the bullet was removed.
        reason: ExpiryReason,
    },
    /// Reports bullet damage dealt to an enemy.
    EnemyHit {
        /// Enemy that was hit.
        enemy: EnemyId,
        /// Bullet responsible for the hit.
        bullet: BulletId,
        /// Enemy position at the moment of the hit.
        position: Vec2,
        /// Damage dealt.
        damage: f32,
    },
    /// Confirms that a status effect landed on an enemy.
    StatusApplied {
        /// Affected enemy.
        enemy: EnemyId,
        /// Kind of status applied.
        kind: StatusKind,
    },
    /// Reports that a status request named an unknown status.
    StatusRejected {
        /// Enemy the request targeted.
        enemy: EnemyId,
        /// Name that failed to parse.
        name: String,
    },
    /// Reports that a chill grew into a freeze.
    EnemyFrozen {
        /// Frozen enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy was destroyed.
    EnemyDefeated {
        /// Defeated enemy.
        enemy: EnemyId,
        /// Position at the moment of defeat.
        position: Vec2,
        /// Word the enemy carried.
        word: String,
        /// What destroyed the enemy.
        cause: DefeatCause,
    },
    /// Reports that an enemy reached the player.
    PlayerDamaged {
        /// Enemy that made contact; it is removed without kill credit.
        enemy: EnemyId,
        /// Damage dealt to the player.
        damage: f32,
        /// Player health after the contact.
        hp: f32,
    },
    /// Announces that the wave counter advanced.
    WaveAdvanced {
        /// New wave number.
        wave: u32,
        /// Difficulty tiers unlocked at the new wave.
        difficulties: Vec<DifficultyTier>,
    },
    /// Reports upgrade points granted to the player.
    PointsAwarded {
        /// Points granted.
        points: u32,
        /// Balance after the award.
        balance: u32,
    },
    /// Confirms that an upgrade catalog was installed.
    UpgradeCatalogLoaded {
        /// Number of purchasable nodes.
        nodes: usize,
    },
    /// Confirms that an upgrade node was purchased.
    UpgradeAcquired {
        /// Purchased node.
        node: UpgradeNodeId,
        /// Balance after the purchase.
        balance: u32,
    },
    /// Reports that an upgrade purchase was refused.
    UpgradeRejected {
        /// Node that was requested.
        node: UpgradeNodeId,
        /// Reason the purchase failed.
        reason: PurchaseError,
    },
    /// Reports that an upgrade effect could not be applied.
    EffectRejected {
        /// Reason the effect failed.
        reason: TuningError,
    },
    /// Announces that the run ended with the player's defeat.
    RunEnded {
        /// Wave reached.
        wave: u32,
        /// Enemies defeated during the run.
        kills: u32,
    },
}

/// What destroyed an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefeatCause {
    /// Bullet damage, including splash.
    Bullet,
    /// Burn or chill damage over time.
    DamageOverTime,
    /// Bleed shrank the health ceiling to its floor.
    Bleed,
}

/// Reasons a bullet leaves play without being consumed by a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpiryReason {
    /// The bullet outlived its lifetime.
    Lifetime,
    /// The bullet left the arena.
    OutOfBounds,
    /// The bullet bounced once more than its ricochet budget allows.
    RicochetsExhausted,
    /// The bullet struck an enemy with no pierce left.
    Consumed,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Byte RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a color from byte components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Colors assigned to gameplay entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Color of freshly fired bullets.
    pub bullet: Rgb,
    /// Color a bullet takes after its first successful ricochet.
    pub ricochet: Rgb,
    /// Enemy body color, also used for defeat fragments.
    pub enemy: Rgb,
}

impl Palette {
    /// Stock palette.
    pub const STANDARD: Palette = Palette {
        bullet: Rgb::from_rgb(0xa9, 0xa9, 0xa9),
        ricochet: Rgb::from_rgb(0xff, 0xd7, 0x00),
        enemy: Rgb::from_rgb(0xa2, 0x56, 0x5f),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Health triple carried by every enemy.
///
/// `hp` may drift above `max_hp` while bleed shrinks the ceiling; readers
/// clamp with [`Vitals::clamped_hp`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vitals {
    /// Current health.
    pub hp: f32,
    /// Current health ceiling.
    pub max_hp: f32,
    /// Health ceiling at creation; anchors bleed and freeze thresholds.
    pub base_max_hp: f32,
}

impl Vitals {
    /// Creates vitals at full health.
    #[must_use]
    pub const fn full(max_hp: f32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            base_max_hp: max_hp,
        }
    }

    /// Subtracts damage from the current health.
    pub fn damage(&mut self, amount: f32) {
        self.hp -= amount;
    }

    /// Health clamped into `0.0..=max_hp`.
    #[must_use]
    pub fn clamped_hp(&self) -> f32 {
        self.hp.clamp(0.0, self.max_hp.max(0.0))
    }

    /// Reports whether health reached zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Rectangular playable area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    /// Creates an arena of the provided size; negative sizes collapse to zero.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Width in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Center point, where the player stands.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Reports whether the point lies inside the closed rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Word difficulty tiers in unlock order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    /// Short, common words.
    Easy,
    /// Everyday words.
    Medium,
    /// Long words.
    Hard,
    /// Rare or very long words.
    Expert,
}

impl DifficultyTier {
    /// Every tier in unlock order.
    pub const ALL: [DifficultyTier; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Lowercase name used by word list files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Words for a single language grouped by difficulty tier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordLibrary {
    tiers: BTreeMap<DifficultyTier, Vec<String>>,
}

impl WordLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`WordLibrary::insert`].
    #[must_use]
    pub fn with_tier<I, S>(mut self, tier: DifficultyTier, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(tier, words);
        self
    }

    /// Appends words to a tier; blank entries are dropped and words are lowercased.
    pub fn insert<I, S>(&mut self, tier: DifficultyTier, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bucket = self.tiers.entry(tier).or_default();
        bucket.extend(
            words
                .into_iter()
                .map(|word| word.into().trim().to_lowercase())
                .filter(|word| !word.is_empty()),
        );
    }

    /// Words of the provided tiers concatenated in tier order.
    #[must_use]
    pub fn words_for(&self, tiers: &[DifficultyTier]) -> Vec<String> {
        let mut ordered = tiers.to_vec();
        ordered.sort();
        ordered.dedup();
        ordered
            .into_iter()
            .filter_map(|tier| self.tiers.get(&tier))
            .flat_map(|words| words.iter().cloned())
            .collect()
    }

    /// Number of words across every tier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Reports whether the library holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derives an independent RNG seed for a named stream from the session seed.
#[must_use]
pub fn derive_stream_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Reasons a run fails to start.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StartError {
    /// The word library has no words for the tiers unlocked at the start wave.
    #[error("no words available for difficulties unlocked at wave {wave}")]
    NoWords {
        /// Wave the run attempted to start at.
        wave: u32,
    },
}

/// Reasons an upgrade purchase is refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The node is not part of the loaded catalog.
    #[error("unknown upgrade '{0}'")]
    UnknownNode(UpgradeNodeId),
    /// The node was purchased before.
    #[error("upgrade '{0}' is already owned")]
    AlreadyOwned(UpgradeNodeId),
    /// The node's prerequisites are not met.
    #[error("upgrade '{0}' is locked")]
    Locked(UpgradeNodeId),
    /// The balance does not cover the node's cost.
    #[error("upgrade costs {cost} but only {balance} points are available")]
    InsufficientPoints {
        /// Cost of the node.
        cost: u32,
        /// Points available.
        balance: u32,
    },
}

/// Reasons a tuning write is refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TuningError {
    /// The weapon stat path is unknown.
    #[error("unknown weapon stat '{0}'")]
    UnknownStat(String),
    /// The stat has no multiplier.
    #[error("weapon stat '{0}' has no multiplier")]
    NoMultiplier(String),
    /// The status path does not name a status kind.
    #[error(transparent)]
    UnknownStatusKind(#[from] UnknownStatusKind),
    /// The status path names a field the status does not have.
    #[error("unknown status field '{0}'")]
    UnknownStatusField(String),
}
