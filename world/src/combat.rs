//! Bullet release, flight, hit resolution and expiry.

use glam::Vec2;
use hype_type_core::{BulletId, DefeatCause, Event, ExpiryReason};
use hype_type_system_projectile::{Bullet, HitOutcome};
use rand::Rng;

use crate::{enemy::Enemy, World};

/// Bullet in flight together with its identifier.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: BulletId,
    pub(crate) bullet: Bullet,
}

impl World {
    pub(crate) fn launch(&mut self, bullet: Bullet, out_events: &mut Vec<Event>) {
        let id = BulletId::new(self.next_bullet);
        self.next_bullet += 1;
        out_events.push(Event::BulletFired {
            bullet: id,
            position: bullet.position,
            velocity: bullet.velocity,
            color: bullet.color,
        });
        self.projectiles.push(Projectile { id, bullet });
    }

    pub(crate) fn release_shots(&mut self, out_events: &mut Vec<Event>) {
        let mut due = Vec::new();
        self.shots.drain_due(self.clock.elapsed(), &mut due);
        for shot in due {
            let bullet = shot.release(&mut self.rng.weapon);
            self.launch(bullet, out_events);
        }
    }

    /// Steers and moves every bullet. Bullets that start the step outside
    /// the arena leave play instead.
    pub(crate) fn move_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let (width, height) = (self.arena.width(), self.arena.height());
        let dt_sec = self.clock.interval().as_secs_f32();
        let enemies = &self.enemies;

        self.projectiles.retain_mut(|projectile| {
            let bullet = &mut projectile.bullet;
            if bullet.is_out_of_bounds(width, height) {
                out_events.push(Event::BulletExpired {
                    bullet: projectile.id,
                    reason: ExpiryReason::OutOfBounds,
                });
                return false;
            }

            if bullet.homing.enabled {
                let target = nearest_enemy(enemies, bullet.position, |enemy| {
                    !bullet.has_struck(enemy.id)
                });
                if let Some(target) = target {
                    let max_turn = bullet.homing.turn_rate_deg_per_sec.to_radians() * dt_sec;
                    bullet.steer_towards(target.position, max_turn);
                }
            }
            bullet.advance();
            true
        });
    }

    /// Resolves bullet and enemy overlaps, then removes the defeated.
    ///
    /// Returns the chain and split children of consumed bullets; they join
    /// play after the expiry pass.
    pub(crate) fn resolve_hits(&mut self, out_events: &mut Vec<Event>) -> Vec<Bullet> {
        let bullet_radius = self.config.bullet_radius;
        let enemy_radius = self.config.enemy_radius;
        let mut offspring = Vec::new();

        let mut index = 0;
        while index < self.projectiles.len() {
            let mut consumed = false;
            for target in 0..self.enemies.len() {
                let enemy = &self.enemies[target];
                let bullet = &self.projectiles[index].bullet;
                if enemy.vitals.is_depleted()
                    || bullet.has_struck(enemy.id)
                    || !bullet.check_enemy_collision(enemy.position, bullet_radius, enemy_radius)
                {
                    continue;
                }

                let struck = enemy.id;
                self.strike(index, target, out_events);
                if self.projectiles[index].bullet.register_hit(struck) == HitOutcome::Consumed {
                    offspring.extend(self.offspring(index, target));
                    consumed = true;
                    break;
                }
            }

            if consumed {
                let projectile = self.projectiles.remove(index);
                out_events.push(Event::BulletExpired {
                    bullet: projectile.id,
                    reason: ExpiryReason::Consumed,
                });
            } else {
                index += 1;
            }
        }

        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].vitals.is_depleted() {
                self.defeat(index, DefeatCause::Bullet, out_events);
            } else {
                index += 1;
            }
        }

        offspring
    }

    /// Runs wall ricochets and lifetimes.
    pub(crate) fn expire_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let (width, height) = (self.arena.width(), self.arena.height());
        let now = self.clock.elapsed();

        self.projectiles.retain_mut(|projectile| {
            let bullet = &mut projectile.bullet;
            if bullet.check_wall_collision_and_ricochet(width, height) {
                out_events.push(Event::BulletRicocheted {
                    bullet: projectile.id,
                    position: bullet.position,
                });
            }

            let reason = if bullet.is_spent() {
                Some(ExpiryReason::RicochetsExhausted)
            } else if bullet.check_lifetime(now) {
                Some(ExpiryReason::Lifetime)
            } else {
                None
            };
            match reason {
                Some(reason) => {
                    out_events.push(Event::BulletExpired {
                        bullet: projectile.id,
                        reason,
                    });
                    false
                }
                None => true,
            }
        });
    }

    /// Damages the struck enemy and everything in splash range, then rolls
    /// the bullet's status procs against the struck enemy.
    fn strike(&mut self, projectile: usize, target: usize, out_events: &mut Vec<Event>) {
        let Projectile { id, bullet } = &self.projectiles[projectile];
        let bullet_id = *id;
        let damage = bullet.damage;
        let splash = bullet.aoe_radius;
        let procs = bullet.status_on_hit.clone();
        let center = self.enemies[target].position;

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            let in_splash = splash > 0.0
                && !enemy.vitals.is_depleted()
                && enemy.position.distance(center) <= splash;
            if index != target && !in_splash {
                continue;
            }
            enemy.vitals.damage(damage);
            out_events.push(Event::EnemyHit {
                enemy: enemy.id,
                bullet: bullet_id,
                position: enemy.position,
                damage,
            });
        }

        for entry in &procs {
            let lands = entry.proc_chance >= 1.0
                || (entry.proc_chance > 0.0 && self.rng.procs.gen::<f32>() < entry.proc_chance);
            if lands {
                self.apply_status_at(target, &entry.status, out_events);
            }
        }
    }

    fn offspring(&self, projectile: usize, target: usize) -> Vec<Bullet> {
        let bullet = &self.projectiles[projectile].bullet;
        let origin = self.enemies[target].position;
        let mut children = Vec::new();

        if bullet.chain_count > 0 {
            let next = nearest_enemy(&self.enemies, origin, |enemy| {
                !bullet.has_struck(enemy.id)
                    && !enemy.vitals.is_depleted()
                    && enemy.position.distance(origin) <= bullet.chain_range
            });
            if let Some(next) = next {
                tracing::trace!(from = self.enemies[target].id.get(), to = next.id.get(), "chain");
                children.push(bullet.redirected(origin, next.position));
            }
        }

        if bullet.split_count > 0 {
            children.extend(bullet.split(bullet.split_count, bullet.split_angle_deg));
        }

        children
    }
}

/// Nearest enemy accepted by `filter`; ties go to the lowest identifier.
fn nearest_enemy<'a>(
    enemies: &'a [Enemy],
    point: Vec2,
    filter: impl Fn(&Enemy) -> bool,
) -> Option<&'a Enemy> {
    enemies
        .iter()
        .filter(|enemy| filter(enemy))
        .min_by(|left, right| {
            left.position
                .distance_squared(point)
                .total_cmp(&right.position.distance_squared(point))
                .then_with(|| left.id.cmp(&right.id))
        })
}
