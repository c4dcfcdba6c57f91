use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use hype_type_core::{Palette, Rgb};
use hype_type_system_projectile::Bullet;
use rand::Rng;

use crate::WeaponStats;

/// Shot waiting for its release time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledShot {
    /// Session time the shot is released at.
    pub due: Duration,
    origin: Vec2,
    base_angle: f32,
    color: Rgb,
    ricochet_color: Rgb,
    stats: WeaponStats,
}

impl ScheduledShot {
    pub(crate) fn new(
        due: Duration,
        origin: Vec2,
        base_angle: f32,
        palette: &Palette,
        stats: WeaponStats,
    ) -> Self {
        Self {
            due,
            origin,
            base_angle,
            color: palette.bullet,
            ricochet_color: palette.ricochet,
            stats,
        }
    }

    /// Builds the bullet, drawing the spread now.
    pub fn release<R: Rng + ?Sized>(&self, rng: &mut R) -> Bullet {
        let stats = &self.stats;
        let spread = if stats.spread_deg != 0.0 {
            rng.gen::<f32>() * stats.spread_deg - stats.spread_deg / 2.0
        } else {
            0.0
        };
        let theta = self.base_angle + spread.to_radians();
        let velocity = Vec2::from_angle(theta) * stats.bullet_speed;

        let mut bullet = Bullet::new(self.origin, velocity, stats.bullet_damage, self.color);
        bullet.ricochet_color = self.ricochet_color;
        bullet.life_time_ms = stats.life_time_ms;
        bullet.pierce_count = stats.pierce_count;
        bullet.chain_count = stats.chain_count;
        bullet.chain_range = stats.chain_range;
        bullet.split_count = stats.split_count;
        bullet.split_angle_deg = stats.split_angle_deg;
        bullet.aoe_radius = stats.aoe_radius;
        bullet.homing = stats.homing;
        bullet.ricochet_count = i32::try_from(stats.ricochet_count).unwrap_or(i32::MAX);
        bullet.status_on_hit = stats.status_on_hit.clone();
        bullet
    }
}

/// Pending shots ordered by release time, then by scheduling order.
#[derive(Clone, Debug, Default)]
pub struct ShotQueue {
    pending: BTreeMap<(Duration, u64), ScheduledShot>,
    next_sequence: u64,
}

impl ShotQueue {
    /// Adds a shot to the queue.
    pub fn push(&mut self, shot: ScheduledShot) {
        let key = (shot.due, self.next_sequence);
        self.next_sequence += 1;
        let _ = self.pending.insert(key, shot);
    }

    /// Moves every shot due at or before `now` into `out`, earliest first.
    pub fn drain_due(&mut self, now: Duration, out: &mut Vec<ScheduledShot>) {
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > now {
                break;
            }
            out.push(entry.remove());
        }
    }

    /// Number of pending shots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Reports whether no shot is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending shot.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
