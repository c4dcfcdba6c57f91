#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bullet behaviour: straight-line motion, wall ricochet, lifetime, circle
//! collision and the helpers used for homing, pierce, chain and split.

use std::time::Duration;

use glam::Vec2;
use hype_type_core::{EnemyId, Palette, Rgb, StatusOnHit};

/// Homing parameters copied from the weapon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Homing {
    /// Whether the bullet steers toward enemies.
    pub enabled: bool,
    /// Maximum turn rate in degrees per second.
    pub turn_rate_deg_per_sec: f32,
}

/// Result of a bullet striking an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// The bullet is used up and must be removed.
    Consumed,
    /// The bullet spent one pierce and keeps flying.
    Pierced,
}

/// Projectile in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Current position.
    pub position: Vec2,
    /// Displacement applied every step.
    pub velocity: Vec2,
    /// Damage dealt per hit.
    pub damage: f32,
    /// Current color.
    pub color: Rgb,
    /// Color taken after a successful ricochet.
    pub ricochet_color: Rgb,
    /// Lifetime in milliseconds.
    pub life_time_ms: f32,
    /// Enemies the bullet may pass through before it is consumed.
    pub pierce_count: u32,
    /// Remaining hops to nearby enemies after a hit.
    pub chain_count: u32,
    /// Maximum hop distance.
    pub chain_range: f32,
    /// Children spawned when the bullet is consumed.
    pub split_count: u32,
    /// Angle between split children in degrees.
    pub split_angle_deg: f32,
    /// Splash radius around the struck enemy.
    pub aoe_radius: f32,
    /// Homing parameters.
    pub homing: Homing,
    /// Remaining wall bounces; negative once the budget is exhausted.
    pub ricochet_count: i32,
    /// Statuses attempted on every hit.
    pub status_on_hit: Vec<StatusOnHit>,
    created_at: Option<Duration>,
    struck: Vec<EnemyId>,
}

impl Bullet {
    /// Creates a bullet with the stock extended properties.
    #[must_use]
    pub fn new(position: Vec2, velocity: Vec2, damage: f32, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            damage,
            color,
            ricochet_color: Palette::STANDARD.ricochet,
            life_time_ms: 2000.0,
            pierce_count: 0,
            chain_count: 0,
            chain_range: 120.0,
            split_count: 0,
            split_angle_deg: 30.0,
            aoe_radius: 0.0,
            homing: Homing::default(),
            ricochet_count: 0,
            status_on_hit: Vec::new(),
            created_at: None,
            struck: Vec::new(),
        }
    }

    /// Moves the bullet by its velocity.
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Clamps the bullet into the arena and reflects every offending axis.
    ///
    /// Each reflection spends one ricochet. Returns whether any reflection
    /// happened while budget remained.
    pub fn check_wall_collision_and_ricochet(&mut self, width: f32, height: f32) -> bool {
        let mut bounced = false;

        if self.position.x <= 0.0 {
            self.position.x = 0.0;
            self.velocity.x = self.velocity.x.abs();
            bounced |= self.handle_ricochet();
        } else if self.position.x >= width {
            self.position.x = width;
            self.velocity.x = -self.velocity.x.abs();
            bounced |= self.handle_ricochet();
        }

        if self.position.y <= 0.0 {
            self.position.y = 0.0;
            self.velocity.y = self.velocity.y.abs();
            bounced |= self.handle_ricochet();
        } else if self.position.y >= height {
            self.position.y = height;
            self.velocity.y = -self.velocity.y.abs();
            bounced |= self.handle_ricochet();
        }

        bounced
    }

    /// Spends one ricochet. The count keeps falling past zero so that an
    /// exhausted bullet still renders its last bounce before removal.
    pub fn handle_ricochet(&mut self) -> bool {
        let had_budget = self.ricochet_count > 0;
        self.ricochet_count -= 1;
        if had_budget {
            self.color = self.ricochet_color;
        }
        had_budget
    }

    /// Reports whether the ricochet budget is exhausted.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.ricochet_count < 0
    }

    /// Reports whether the lifetime elapsed; the first call records the creation time.
    pub fn check_lifetime(&mut self, now: Duration) -> bool {
        let created_at = *self.created_at.get_or_insert(now);
        let age_ms = now.saturating_sub(created_at).as_secs_f64() * 1000.0;
        age_ms >= f64::from(self.life_time_ms)
    }

    /// Strict circle overlap test against an enemy.
    #[must_use]
    pub fn check_enemy_collision(&self, point: Vec2, bullet_radius: f32, enemy_radius: f32) -> bool {
        self.position.distance(point) < bullet_radius + enemy_radius
    }

    /// Reports whether the bullet lies outside the closed arena rectangle.
    #[must_use]
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.position.x < 0.0
            || self.position.x > width
            || self.position.y < 0.0
            || self.position.y > height
    }

    /// Rotates the velocity toward `target` by at most `max_turn_rad`.
    pub fn steer_towards(&mut self, target: Vec2, max_turn_rad: f32) {
        let desired = target - self.position;
        if desired.length_squared() <= f32::EPSILON || self.velocity.length_squared() <= f32::EPSILON
        {
            return;
        }
        let angle = self.velocity.angle_between(desired);
        let turn = angle.clamp(-max_turn_rad.abs(), max_turn_rad.abs());
        self.velocity = Vec2::from_angle(turn).rotate(self.velocity);
    }

    /// Reports whether the bullet already struck the enemy.
    #[must_use]
    pub fn has_struck(&self, enemy: EnemyId) -> bool {
        self.struck.contains(&enemy)
    }

    /// Records a hit on `enemy`, spending a pierce when one is left.
    pub fn register_hit(&mut self, enemy: EnemyId) -> HitOutcome {
        self.struck.push(enemy);
        if self.pierce_count > 0 {
            self.pierce_count -= 1;
            HitOutcome::Pierced
        } else {
            HitOutcome::Consumed
        }
    }

    /// Children fanned around the current heading, `angle_deg` apart.
    #[must_use]
    pub fn split(&self, count: u32, angle_deg: f32) -> Vec<Bullet> {
        let heading = self.velocity;
        let center = count.saturating_sub(1) as f32 / 2.0;
        (0..count)
            .map(|index| {
                let offset = (index as f32 - center) * angle_deg.to_radians();
                let mut child = self.offspring();
                child.velocity = Vec2::from_angle(offset).rotate(heading);
                child.chain_count = 0;
                child
            })
            .collect()
    }

    /// Child launched from `from` toward `towards` at the same speed.
    #[must_use]
    pub fn redirected(&self, from: Vec2, towards: Vec2) -> Bullet {
        let speed = self.velocity.length();
        let direction = (towards - from).try_normalize().unwrap_or(Vec2::X);
        let mut child = self.offspring();
        child.position = from;
        child.velocity = direction * speed;
        child.chain_count = self.chain_count.saturating_sub(1);
        child
    }

    fn offspring(&self) -> Bullet {
        let mut child = self.clone();
        child.split_count = 0;
        child.pierce_count = 0;
        child.created_at = None;
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet_at(x: f32, y: f32, vx: f32, vy: f32) -> Bullet {
        Bullet::new(Vec2::new(x, y), Vec2::new(vx, vy), 10.0, Palette::STANDARD.bullet)
    }

    #[test]
    fn corner_contact_reflects_both_axes() {
        let mut bullet = bullet_at(-1.0, 601.0, -3.0, 4.0);
        bullet.ricochet_count = 2;
        assert!(bullet.check_wall_collision_and_ricochet(800.0, 600.0));
        assert_eq!(bullet.position, Vec2::new(0.0, 600.0));
        assert_eq!(bullet.velocity, Vec2::new(3.0, -4.0));
        assert_eq!(bullet.ricochet_count, 0);
        assert!(!bullet.is_spent());
    }

    #[test]
    fn ricochet_turns_bullet_gold() {
        let mut bullet = bullet_at(805.0, 10.0, 5.0, 0.0);
        bullet.ricochet_count = 1;
        assert!(bullet.check_wall_collision_and_ricochet(800.0, 600.0));
        assert_eq!(bullet.color, Palette::STANDARD.ricochet);
    }

    #[test]
    fn lifetime_starts_on_first_check() {
        let mut bullet = bullet_at(10.0, 10.0, 1.0, 0.0);
        bullet.life_time_ms = 100.0;
        assert!(!bullet.check_lifetime(Duration::from_millis(500)));
        assert!(!bullet.check_lifetime(Duration::from_millis(599)));
        assert!(bullet.check_lifetime(Duration::from_millis(600)));
    }

    #[test]
    fn steering_is_limited_by_turn_rate() {
        let mut bullet = bullet_at(0.0, 0.0, 10.0, 0.0);
        bullet.steer_towards(Vec2::new(0.0, 100.0), 0.1);
        let turned = Vec2::X.angle_between(bullet.velocity);
        assert!((turned - 0.1).abs() < 1e-4);
        assert!((bullet.velocity.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn split_children_fan_around_heading() {
        let mut bullet = bullet_at(0.0, 0.0, 10.0, 0.0);
        bullet.split_count = 3;
        bullet.pierce_count = 2;
        let children = bullet.split(3, 30.0);
        assert_eq!(children.len(), 3);
        let middle = &children[1];
        assert!((middle.velocity - Vec2::new(10.0, 0.0)).length() < 1e-4);
        assert!(children.iter().all(|child| child.split_count == 0));
        assert!(children.iter().all(|child| child.pierce_count == 0));
        let spread = children[0].velocity.angle_between(children[2].velocity);
        assert!((spread.abs() - 60f32.to_radians()).abs() < 1e-4);
    }
}
