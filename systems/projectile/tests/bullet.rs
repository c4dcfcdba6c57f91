use glam::Vec2;
use hype_type_core::{EnemyId, Palette};
use hype_type_system_projectile::{Bullet, HitOutcome};

const WIDTH: f32 = 100.0;
const HEIGHT: f32 = 100.0;

fn fly_until_wall(bullet: &mut Bullet) -> bool {
    for _ in 0..1_000 {
        bullet.advance();
        if bullet.position.x <= 0.0 || bullet.position.x >= WIDTH {
            return bullet.check_wall_collision_and_ricochet(WIDTH, HEIGHT);
        }
    }
    panic!("bullet never reached a wall");
}

#[test]
fn single_ricochet_budget_dies_on_second_wall_contact() {
    let mut bullet = Bullet::new(
        Vec2::new(50.0, 50.0),
        Vec2::new(7.0, 0.0),
        10.0,
        Palette::STANDARD.bullet,
    );
    bullet.ricochet_count = 1;

    assert!(fly_until_wall(&mut bullet), "first contact bounces");
    assert_eq!(bullet.ricochet_count, 0);
    assert!(!bullet.is_spent());
    assert!(bullet.velocity.x < 0.0);

    assert!(!fly_until_wall(&mut bullet), "second contact has no budget");
    assert!(bullet.velocity.x > 0.0, "the last bounce is still reflected");
    assert!(bullet.is_spent());
}

#[test]
fn bullet_without_budget_is_spent_on_first_contact() {
    let mut bullet = Bullet::new(
        Vec2::new(50.0, 50.0),
        Vec2::new(-9.0, 0.0),
        10.0,
        Palette::STANDARD.bullet,
    );

    assert!(!fly_until_wall(&mut bullet));
    assert!(bullet.is_spent());
    assert_eq!(bullet.color, Palette::STANDARD.bullet);
}

#[test]
fn enemy_collision_is_strict_overlap() {
    let bullet = Bullet::new(Vec2::ZERO, Vec2::X, 10.0, Palette::STANDARD.bullet);
    assert!(bullet.check_enemy_collision(Vec2::new(9.9, 0.0), 5.0, 5.0));
    assert!(!bullet.check_enemy_collision(Vec2::new(10.0, 0.0), 5.0, 5.0));
}

#[test]
fn piercing_bullet_spends_one_pierce_per_enemy() {
    let mut bullet = Bullet::new(Vec2::ZERO, Vec2::X, 10.0, Palette::STANDARD.bullet);
    bullet.pierce_count = 1;

    assert_eq!(bullet.register_hit(EnemyId::new(1)), HitOutcome::Pierced);
    assert!(bullet.has_struck(EnemyId::new(1)));
    assert!(!bullet.has_struck(EnemyId::new(2)));
    assert_eq!(bullet.register_hit(EnemyId::new(2)), HitOutcome::Consumed);
}

#[test]
fn chained_child_heads_for_the_next_enemy() {
    let mut bullet = Bullet::new(
        Vec2::new(10.0, 10.0),
        Vec2::new(6.0, 8.0),
        10.0,
        Palette::STANDARD.bullet,
    );
    bullet.chain_count = 2;
    let _ = bullet.register_hit(EnemyId::new(4));

    let child = bullet.redirected(Vec2::new(20.0, 20.0), Vec2::new(20.0, 70.0));
    assert_eq!(child.position, Vec2::new(20.0, 20.0));
    assert!((child.velocity - Vec2::new(0.0, 10.0)).length() < 1e-4);
    assert_eq!(child.chain_count, 1);
    assert!(child.has_struck(EnemyId::new(4)), "child remembers struck enemies");
}

#[test]
fn bounds_are_closed() {
    let mut bullet = Bullet::new(Vec2::new(WIDTH, 0.0), Vec2::ZERO, 1.0, Palette::STANDARD.bullet);
    assert!(!bullet.is_out_of_bounds(WIDTH, HEIGHT));
    bullet.position.x += 0.5;
    assert!(bullet.is_out_of_bounds(WIDTH, HEIGHT));
}
