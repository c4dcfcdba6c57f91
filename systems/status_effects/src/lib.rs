#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-enemy status effect engine.
//!
//! Each enemy owns a [`StatusState`] holding at most one burn, chill, freeze
//! and bleed. Requests merge into the active instances so that the strongest
//! or longest value per field wins, and [`StatusState::update`] advances the
//! timers in the fixed order freeze, burn, chill, bleed.

mod tuning;

use hype_type_core::{StatusKind, StatusOptions, Vitals};

pub use tuning::{StatusParam, StatusTuning};

const BLEED_FLOOR_EPSILON: f32 = 1e-6;

/// Active burn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burn {
    /// Seconds left.
    pub remaining: f32,
    /// Health lost per second.
    pub dps: f32,
}

/// Active chill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chill {
    /// Seconds left.
    pub remaining: f32,
    /// Seconds spent chilled so far.
    pub elapsed: f32,
    /// Movement multiplier in `0.0..=1.0`.
    pub slow_factor: f32,
    /// Damage per second at zero elapsed time.
    pub base_dps: f32,
    /// Damage per second gained per chilled second.
    pub dps_growth_per_sec: f32,
    /// Whether the chill may promote into a freeze.
    pub can_freeze: bool,
    /// Chilled seconds needed for the promotion.
    pub freeze_threshold_sec: f32,
    /// Seconds the promoted freeze lasts.
    pub freeze_duration_sec: f32,
}

/// Active freeze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Freeze {
    /// Seconds left.
    pub remaining: f32,
}

/// Active bleed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bleed {
    /// Seconds left.
    pub remaining: f32,
    /// Fraction of the base health ceiling lost per second.
    pub percent_per_sec: f32,
    /// Fraction of the base health ceiling the ceiling never drops below.
    pub min_ratio: f32,
}

/// Outcome of advancing a [`StatusState`] by one step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusTick {
    /// Whether a freeze is active after the step.
    pub freeze_active: bool,
    /// Whether bleed collapsed the health ceiling to its floor.
    pub bleed_kill: bool,
    /// Burn and chill damage dealt during the step.
    pub dot_damage: f32,
    /// Whether the chill promoted into a freeze during the step.
    pub promoted_to_freeze: bool,
}

/// Status effects carried by a single enemy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusState {
    burn: Option<Burn>,
    chill: Option<Chill>,
    freeze: Option<Freeze>,
    bleed: Option<Bleed>,
}

impl StatusState {
    /// Active burn, if any.
    #[must_use]
    pub fn burn(&self) -> Option<&Burn> {
        self.burn.as_ref()
    }

    /// Active chill, if any.
    #[must_use]
    pub fn chill(&self) -> Option<&Chill> {
        self.chill.as_ref()
    }

    /// Active freeze, if any.
    #[must_use]
    pub fn freeze(&self) -> Option<&Freeze> {
        self.freeze.as_ref()
    }

    /// Active bleed, if any.
    #[must_use]
    pub fn bleed(&self) -> Option<&Bleed> {
        self.bleed.as_ref()
    }

    /// Kinds currently active, in canonical order.
    #[must_use]
    pub fn active_kinds(&self) -> Vec<StatusKind> {
        StatusKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                StatusKind::Burn => self.burn.is_some(),
                StatusKind::Chill => self.chill.is_some(),
                StatusKind::Freeze => self.freeze.is_some(),
                StatusKind::Bleed => self.bleed.is_some(),
            })
            .collect()
    }

    /// Movement multiplier implied by the active statuses.
    #[must_use]
    pub fn speed_factor(&self) -> f32 {
        if self.freeze.is_some() {
            0.0
        } else if let Some(chill) = &self.chill {
            chill.slow_factor
        } else {
            1.0
        }
    }

    /// Merges a status request into the active effects.
    ///
    /// Returns `false` when the request was absorbed without effect, which
    /// only happens for a chill landing on a frozen enemy.
    pub fn apply(
        &mut self,
        request: &StatusOptions,
        vitals: &Vitals,
        tuning: &StatusTuning,
    ) -> bool {
        match request {
            StatusOptions::Burn(options) => {
                let duration = tuning.value(StatusParam::BurnDuration, options.duration_sec);
                let dps = tuning.value(StatusParam::BurnDps, options.dps);
                match &mut self.burn {
                    Some(burn) => {
                        burn.remaining = burn.remaining.max(duration);
                        burn.dps = burn.dps.max(dps);
                    }
                    None => {
                        self.burn = Some(Burn {
                            remaining: duration,
                            dps,
                        });
                    }
                }
            }
            StatusOptions::Chill(options) => {
                if self.freeze.is_some() {
                    tracing::trace!("chill absorbed by active freeze");
                    return false;
                }
                let duration = tuning.value(StatusParam::ChillDuration, options.duration_sec);
                let slow_factor = tuning
                    .value(StatusParam::ChillSlowFactor, options.slow_factor)
                    .clamp(0.0, 1.0);
                let base_dps = tuning.value(StatusParam::ChillBaseDps, options.base_dps);
                let dps_growth_per_sec =
                    tuning.value(StatusParam::ChillDpsGrowth, options.dps_growth_per_sec);
                let freeze_threshold_sec = options
                    .freeze_threshold_sec
                    .unwrap_or_else(|| tuning.freeze_threshold_sec(vitals.base_max_hp));
                let freeze_duration_sec =
                    tuning.value(StatusParam::ChillFreezeDuration, options.freeze_duration_sec);
                let can_freeze = duration >= freeze_threshold_sec;
                match &mut self.chill {
                    Some(chill) => {
                        chill.remaining = chill.remaining.max(duration);
                        chill.slow_factor = chill.slow_factor.min(slow_factor);
                        chill.base_dps = chill.base_dps.max(base_dps);
                        chill.dps_growth_per_sec = chill.dps_growth_per_sec.max(dps_growth_per_sec);
                        chill.freeze_threshold_sec =
                            chill.freeze_threshold_sec.max(freeze_threshold_sec);
                        chill.can_freeze |= can_freeze;
                        chill.freeze_duration_sec =
                            chill.freeze_duration_sec.max(freeze_duration_sec);
                    }
                    None => {
                        self.chill = Some(Chill {
                            remaining: duration,
                            elapsed: 0.0,
                            slow_factor,
                            base_dps,
                            dps_growth_per_sec,
                            can_freeze,
                            freeze_threshold_sec,
                            freeze_duration_sec,
                        });
                    }
                }
            }
            StatusOptions::Freeze(options) => {
                let duration = tuning.value(StatusParam::FreezeDuration, options.duration_sec);
                self.freeze = Some(Freeze {
                    remaining: duration,
                });
                self.chill = None;
            }
            StatusOptions::Bleed(options) => {
                let duration = tuning.value(StatusParam::BleedDuration, options.duration_sec);
                let percent_per_sec =
                    tuning.value(StatusParam::BleedPercentPerSec, options.percent_per_sec);
                let min_ratio = tuning
                    .value(StatusParam::BleedMinRatio, options.min_ratio)
                    .clamp(0.0, 1.0);
                match &mut self.bleed {
                    Some(bleed) => {
                        bleed.remaining = bleed.remaining.max(duration);
                        bleed.percent_per_sec = bleed.percent_per_sec.max(percent_per_sec);
                        bleed.min_ratio = bleed.min_ratio.min(min_ratio);
                    }
                    None => {
                        self.bleed = Some(Bleed {
                            remaining: duration,
                            percent_per_sec,
                            min_ratio,
                        });
                    }
                }
            }
        }
        true
    }

    /// Advances every active effect by `dt_sec` seconds.
    pub fn update(&mut self, vitals: &mut Vitals, dt_sec: f32) -> StatusTick {
        let mut tick = StatusTick::default();

        if let Some(freeze) = &mut self.freeze {
            freeze.remaining -= dt_sec;
            if freeze.remaining <= 0.0 {
                self.freeze = None;
            }
        }

        if self.freeze.is_none() {
            if let Some(burn) = &mut self.burn {
                let damage = burn.dps * dt_sec;
                tick.dot_damage += damage;
                vitals.damage(damage);
                burn.remaining -= dt_sec;
                if burn.remaining <= 0.0 {
                    self.burn = None;
                }
            }
        }

        if self.freeze.is_none() {
            if let Some(chill) = &mut self.chill {
                let damage = (chill.base_dps + chill.elapsed * chill.dps_growth_per_sec) * dt_sec;
                tick.dot_damage += damage;
                vitals.damage(damage);
                chill.elapsed += dt_sec;
                chill.remaining -= dt_sec;
                if chill.can_freeze && chill.elapsed >= chill.freeze_threshold_sec {
                    self.freeze = Some(Freeze {
                        remaining: chill.freeze_duration_sec,
                    });
                    self.chill = None;
                    tick.promoted_to_freeze = true;
                } else if chill.remaining <= 0.0 {
                    self.chill = None;
                }
            }
        }

        if let Some(bleed) = &mut self.bleed {
            let decay = bleed.percent_per_sec * vitals.base_max_hp * dt_sec;
            let floor = vitals.base_max_hp * bleed.min_ratio;
            vitals.max_hp = floor.max(vitals.max_hp - decay);
            if vitals.hp > vitals.max_hp {
                vitals.hp = vitals.max_hp;
            }
            bleed.remaining -= dt_sec;
            if vitals.max_hp <= floor + BLEED_FLOOR_EPSILON {
                tick.bleed_kill = true;
            }
            if bleed.remaining <= 0.0 {
                self.bleed = None;
            }
        }

        tick.freeze_active = self.freeze.is_some();
        tick
    }
}
