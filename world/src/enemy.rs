use glam::Vec2;
use hype_type_core::{EnemyId, Vitals};
use hype_type_system_status_effects::StatusState;
use hype_type_system_typing::TypingTarget;

/// Enemy advancing on the player.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) position: Vec2,
    pub(crate) word: String,
    pub(crate) typed: usize,
    pub(crate) vitals: Vitals,
    pub(crate) status: StatusState,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, position: Vec2, word: String, hp: f32) -> Self {
        Self {
            id,
            position,
            word,
            typed: 0,
            vitals: Vitals::full(hp),
            status: StatusState::default(),
        }
    }

    /// Untyped remainder of the word.
    pub(crate) fn display_word(&self) -> String {
        self.word.chars().skip(self.typed).collect()
    }

    /// Moves toward `target` by `distance`, never overshooting it.
    pub(crate) fn step_towards(&mut self, target: Vec2, distance: f32) {
        let offset = target - self.position;
        let length = offset.length();
        if length <= distance {
            self.position = target;
        } else if length > 0.0 {
            self.position += offset / length * distance;
        }
    }
}

impl TypingTarget for Enemy {
    fn id(&self) -> EnemyId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn word(&self) -> &str {
        &self.word
    }

    fn typed(&self) -> usize {
        self.typed
    }

    fn set_typed(&mut self, typed: usize) {
        self.typed = typed;
    }

    fn replace_word(&mut self, word: String) {
        self.word = word;
    }
}
