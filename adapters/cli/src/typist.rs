//! Scripted player that types at a fixed cadence.

use glam::Vec2;
use hype_type_world::query::EnemySnapshot;

/// Types the next letter of the enemy nearest to the player.
#[derive(Clone, Debug)]
pub(crate) struct ScriptedTypist {
    frames_per_key: u32,
    countdown: u32,
}

impl ScriptedTypist {
    /// Typist pressing `keys_per_second` keys at `frame_rate` frames per second.
    pub(crate) fn new(keys_per_second: u32, frame_rate: u32) -> Self {
        let frames_per_key = (frame_rate / keys_per_second.max(1)).max(1);
        Self {
            frames_per_key,
            countdown: frames_per_key,
        }
    }

    /// Key pressed this frame, if any.
    pub(crate) fn next_key(&mut self, player: Vec2, enemies: &[EnemySnapshot]) -> Option<char> {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return None;
        }

        let target = enemies
            .iter()
            .filter(|enemy| !enemy.display_word.is_empty())
            .min_by(|left, right| {
                left.position
                    .distance_squared(player)
                    .total_cmp(&right.position.distance_squared(player))
                    .then_with(|| left.id.cmp(&right.id))
            })?;
        self.countdown = self.frames_per_key;
        target.display_word.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hype_type_core::EnemyId;

    fn enemy(id: u32, x: f32, word: &str, typed: usize) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: Vec2::new(x, 0.0),
            word: word.to_owned(),
            typed,
            display_word: word.chars().skip(typed).collect(),
            hp: 30.0,
            max_hp: 30.0,
            base_max_hp: 30.0,
            statuses: Vec::new(),
            speed_factor: 1.0,
        }
    }

    #[test]
    fn types_the_nearest_enemy_continuing_its_progress() {
        let mut typist = ScriptedTypist::new(60, 60);
        let enemies = [enemy(1, 200.0, "far", 0), enemy(2, 50.0, "near", 2)];

        assert_eq!(typist.next_key(Vec2::ZERO, &enemies), Some('a'));
    }

    #[test]
    fn waits_between_keys() {
        let mut typist = ScriptedTypist::new(20, 60);
        let enemies = [enemy(1, 10.0, "cat", 0)];

        let keys: Vec<_> = (0..6)
            .map(|_| typist.next_key(Vec2::ZERO, &enemies))
            .collect();
        assert_eq!(keys, [None, None, Some('c'), None, None, Some('c')]);
    }

    #[test]
    fn idles_without_targets() {
        let mut typist = ScriptedTypist::new(60, 60);
        assert_eq!(typist.next_key(Vec2::ZERO, &[]), None);
        assert_eq!(
            typist.next_key(Vec2::ZERO, &[enemy(4, 1.0, "ox", 0)]),
            Some('o')
        );
    }
}
