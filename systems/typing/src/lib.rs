#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keystroke resolution across every live enemy.
//!
//! Each enemy tracks how many leading characters of its word were matched.
//! A keystroke advances every enemy whose next character matches and fully
//! resets the rest. When words complete, only the completed enemy nearest
//! to the player is rewarded; everyone else starts over.

mod pool;

use glam::Vec2;
use hype_type_core::EnemyId;
use rand::Rng;

pub use pool::WordPool;

/// Lowercases ASCII letters and rejects every other key.
#[must_use]
pub fn normalize_key(key: char) -> Option<char> {
    key.is_ascii_alphabetic().then(|| key.to_ascii_lowercase())
}

/// Enemy state the resolver reads and rewrites.
pub trait TypingTarget {
    /// Identifier used for tie-breaks and reporting.
    fn id(&self) -> EnemyId;
    /// Current position.
    fn position(&self) -> Vec2;
    /// Word the enemy carries.
    fn word(&self) -> &str;
    /// Count of matched leading characters.
    fn typed(&self) -> usize;
    /// Overwrites the matched count.
    fn set_typed(&mut self, typed: usize);
    /// Assigns a fresh word.
    fn replace_word(&mut self, word: String);
}

/// Completed word that selected a weapon target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordCompletion {
    /// Enemy chosen as the target.
    pub enemy: EnemyId,
    /// Word that was completed.
    pub word: String,
    /// Word the enemy carries from now on.
    pub replacement: String,
}

/// Stateless resolver with a reusable scratch buffer.
#[derive(Debug, Default)]
pub struct TypingResolver {
    completed: Vec<usize>,
}

impl TypingResolver {
    /// Runs one keystroke across `targets`.
    ///
    /// Keys that are not letters leave every target untouched and return
    /// `None`.
    pub fn handle<T, R>(
        &mut self,
        key: char,
        targets: &mut [T],
        player: Vec2,
        pool: &mut WordPool,
        rng: &mut R,
    ) -> Option<WordCompletion>
    where
        T: TypingTarget,
        R: Rng + ?Sized,
    {
        let Some(key) = normalize_key(key) else {
            tracing::trace!(?key, "ignored non-letter key");
            return None;
        };

        self.completed.clear();
        for (index, target) in targets.iter_mut().enumerate() {
            let expected = target
                .word()
                .chars()
                .nth(target.typed())
                .map(|expected| expected.to_ascii_lowercase());
            if expected == Some(key) {
                target.set_typed(target.typed() + 1);
                if target.typed() >= target.word().chars().count() {
                    self.completed.push(index);
                }
            } else {
                target.set_typed(0);
            }
        }

        let nearest = self
            .completed
            .iter()
            .copied()
            .min_by(|&left, &right| {
                let left_target = &targets[left];
                let right_target = &targets[right];
                let left_distance = left_target.position().distance_squared(player);
                let right_distance = right_target.position().distance_squared(player);
                left_distance
                    .total_cmp(&right_distance)
                    .then_with(|| left_target.id().cmp(&right_target.id()))
            })?;

        for (index, target) in targets.iter_mut().enumerate() {
            if index != nearest {
                target.set_typed(0);
            }
        }

        let target = &mut targets[nearest];
        let word = target.word().to_owned();
        let replacement = pool.draw(rng).unwrap_or_else(|| word.clone());
        target.replace_word(replacement.clone());
        target.set_typed(0);
        tracing::debug!(enemy = target.id().get(), %word, %replacement, "word completed");

        Some(WordCompletion {
            enemy: target.id(),
            word,
            replacement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_normalise_to_lowercase_letters() {
        assert_eq!(normalize_key('Q'), Some('q'));
        assert_eq!(normalize_key('z'), Some('z'));
        assert_eq!(normalize_key('\u{8}'), None);
        assert_eq!(normalize_key('3'), None);
        assert_eq!(normalize_key('é'), None);
    }
}
