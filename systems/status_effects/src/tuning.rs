//! Global base and multiplier tables consulted when a status lands.

use hype_type_core::{EffectOp, StatusKind, TuningError, TuningTable};

/// Tunable parameter of a status effect, addressed as `<status>.<field>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusParam {
    /// `burn.durationSec`
    BurnDuration,
    /// `burn.dps`
    BurnDps,
    /// `chill.durationSec`
    ChillDuration,
    /// `chill.slowFactor`
    ChillSlowFactor,
    /// `chill.baseDps`
    ChillBaseDps,
    /// `chill.dpsGrowthPerSec`
    ChillDpsGrowth,
    /// `chill.freezeThresholdBaseSec`
    ChillFreezeThresholdBase,
    /// `chill.freezeThresholdPerHp`
    ChillFreezeThresholdPerHp,
    /// `chill.freezeDurationSec`
    ChillFreezeDuration,
    /// `freeze.durationSec`
    FreezeDuration,
    /// `bleed.durationSec`
    BleedDuration,
    /// `bleed.percentPerSec`
    BleedPercentPerSec,
    /// `bleed.minRatio`
    BleedMinRatio,
}

const PARAM_COUNT: usize = 13;

impl StatusParam {
    /// Every parameter in table order.
    pub const ALL: [StatusParam; PARAM_COUNT] = [
        Self::BurnDuration,
        Self::BurnDps,
        Self::ChillDuration,
        Self::ChillSlowFactor,
        Self::ChillBaseDps,
        Self::ChillDpsGrowth,
        Self::ChillFreezeThresholdBase,
        Self::ChillFreezeThresholdPerHp,
        Self::ChillFreezeDuration,
        Self::FreezeDuration,
        Self::BleedDuration,
        Self::BleedPercentPerSec,
        Self::BleedMinRatio,
    ];

    /// Status the parameter belongs to.
    #[must_use]
    pub const fn kind(self) -> StatusKind {
        match self {
            Self::BurnDuration | Self::BurnDps => StatusKind::Burn,
            Self::ChillDuration
            | Self::ChillSlowFactor
            | Self::ChillBaseDps
            | Self::ChillDpsGrowth
            | Self::ChillFreezeThresholdBase
            | Self::ChillFreezeThresholdPerHp
            | Self::ChillFreezeDuration => StatusKind::Chill,
            Self::FreezeDuration => StatusKind::Freeze,
            Self::BleedDuration | Self::BleedPercentPerSec | Self::BleedMinRatio => {
                StatusKind::Bleed
            }
        }
    }

    /// Field name within the status.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::BurnDuration
            | Self::ChillDuration
            | Self::FreezeDuration
            | Self::BleedDuration => "durationSec",
            Self::BurnDps => "dps",
            Self::ChillSlowFactor => "slowFactor",
            Self::ChillBaseDps => "baseDps",
            Self::ChillDpsGrowth => "dpsGrowthPerSec",
            Self::ChillFreezeThresholdBase => "freezeThresholdBaseSec",
            Self::ChillFreezeThresholdPerHp => "freezeThresholdPerHp",
            Self::ChillFreezeDuration => "freezeDurationSec",
            Self::BleedPercentPerSec => "percentPerSec",
            Self::BleedMinRatio => "minRatio",
        }
    }

    /// Stock base value.
    #[must_use]
    pub const fn default_base(self) -> f32 {
        match self {
            Self::BurnDuration => 3.0,
            Self::BurnDps => 4.0,
            Self::ChillDuration => 4.0,
            Self::ChillSlowFactor => 0.5,
            Self::ChillBaseDps => 1.0,
            Self::ChillDpsGrowth => 0.5,
            Self::ChillFreezeThresholdBase => 1.5,
            Self::ChillFreezeThresholdPerHp => 0.5,
            Self::ChillFreezeDuration => 1.5,
            Self::FreezeDuration => 5.0,
            Self::BleedDuration => 6.0,
            Self::BleedPercentPerSec => 0.05,
            Self::BleedMinRatio => 0.1,
        }
    }

    /// Parses a `<status>.<field>` path.
    pub fn parse(path: &str) -> Result<Self, TuningError> {
        let (kind, field) = path
            .trim()
            .split_once('.')
            .ok_or_else(|| TuningError::UnknownStatusField(path.to_owned()))?;
        let kind: StatusKind = kind.parse()?;
        Self::ALL
            .into_iter()
            .find(|param| param.kind() == kind && param.field() == field)
            .ok_or_else(|| TuningError::UnknownStatusField(path.to_owned()))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Base and multiplier table shared by every enemy in a session.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusTuning {
    base: [f32; PARAM_COUNT],
    mul: [f32; PARAM_COUNT],
}

impl Default for StatusTuning {
    fn default() -> Self {
        Self {
            base: StatusParam::ALL.map(StatusParam::default_base),
            mul: [1.0; PARAM_COUNT],
        }
    }
}

impl StatusTuning {
    /// Current base value of a parameter.
    #[must_use]
    pub fn base(&self, param: StatusParam) -> f32 {
        self.base[param.index()]
    }

    /// Current multiplier of a parameter.
    #[must_use]
    pub fn mul(&self, param: StatusParam) -> f32 {
        self.mul[param.index()]
    }

    /// Resolves a parameter: the explicit value, else the base, times the multiplier.
    #[must_use]
    pub fn value(&self, param: StatusParam, explicit: Option<f32>) -> f32 {
        explicit.unwrap_or_else(|| self.base(param)) * self.mul(param)
    }

    /// Overwrites the base value addressed by `path`.
    pub fn set_base(&mut self, path: &str, value: f32) -> Result<(), TuningError> {
        let param = StatusParam::parse(path)?;
        self.base[param.index()] = value;
        Ok(())
    }

    /// Overwrites the multiplier addressed by `path`.
    pub fn set_mul(&mut self, path: &str, value: f32) -> Result<(), TuningError> {
        let param = StatusParam::parse(path)?;
        self.mul[param.index()] = value;
        Ok(())
    }

    /// Applies an upgrade operation to one table entry.
    pub fn apply_effect(
        &mut self,
        table: TuningTable,
        path: &str,
        op: EffectOp,
        value: f32,
    ) -> Result<(), TuningError> {
        let param = StatusParam::parse(path)?;
        let slot = match table {
            TuningTable::Base => &mut self.base[param.index()],
            TuningTable::Multiplier => &mut self.mul[param.index()],
        };
        *slot = op.apply(*slot, value);
        Ok(())
    }

    /// Chilled seconds before an enemy with the given base health freezes.
    #[must_use]
    pub fn freeze_threshold_sec(&self, base_max_hp: f32) -> f32 {
        let base = self.value(StatusParam::ChillFreezeThresholdBase, None);
        let per_hp = self.value(StatusParam::ChillFreezeThresholdPerHp, None);
        (base + per_hp * base_max_hp).max(0.0)
    }
}
