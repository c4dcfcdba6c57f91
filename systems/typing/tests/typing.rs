use glam::Vec2;
use hype_type_core::EnemyId;
use hype_type_system_typing::{TypingResolver, TypingTarget, WordPool};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug)]
struct Dummy {
    id: EnemyId,
    position: Vec2,
    word: String,
    typed: usize,
}

impl Dummy {
    fn new(id: u32, position: Vec2, word: &str) -> Self {
        Self {
            id: EnemyId::new(id),
            position,
            word: word.to_owned(),
            typed: 0,
        }
    }

    fn display_word(&self) -> &str {
        &self.word[self.typed..]
    }
}

impl TypingTarget for Dummy {
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

fn type_text(
    resolver: &mut TypingResolver,
    text: &str,
    targets: &mut [Dummy],
    pool: &mut WordPool,
    rng: &mut ChaCha8Rng,
) -> Vec<hype_type_system_typing::WordCompletion> {
    text.chars()
        .filter_map(|key| resolver.handle(key, targets, Vec2::ZERO, pool, rng))
        .collect()
}

#[test]
fn mismatch_resets_progress_fully() {
    let mut resolver = TypingResolver::default();
    let mut pool = WordPool::new(vec!["zebra".to_owned()]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut targets = vec![Dummy::new(1, Vec2::new(30.0, 0.0), "cat")];

    let completions = type_text(&mut resolver, "ca", &mut targets, &mut pool, &mut rng);
    assert!(completions.is_empty());
    assert_eq!(targets[0].typed, 2);
    assert_eq!(targets[0].display_word(), "t");

    let completions = type_text(&mut resolver, "x", &mut targets, &mut pool, &mut rng);
    assert!(completions.is_empty());
    assert_eq!(targets[0].typed, 0);
    assert_eq!(targets[0].display_word(), "cat");
}

#[test]
fn nearest_completed_enemy_wins_and_others_reset() {
    let mut resolver = TypingResolver::default();
    let mut pool = WordPool::new(vec!["owl".to_owned()]);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut targets = vec![
        Dummy::new(1, Vec2::new(120.0, 0.0), "cat"),
        Dummy::new(2, Vec2::new(0.0, 50.0), "cat"),
        Dummy::new(3, Vec2::new(10.0, 0.0), "cab"),
    ];

    let completions = type_text(&mut resolver, "cat", &mut targets, &mut pool, &mut rng);

    assert_eq!(completions.len(), 1);
    let completion = &completions[0];
    assert_eq!(completion.enemy, EnemyId::new(2));
    assert_eq!(completion.word, "cat");
    assert_eq!(completion.replacement, "owl");
    assert_eq!(targets[1].word, "owl");
    assert!(targets.iter().all(|target| target.typed == 0));
    assert_eq!(targets[0].word, "cat", "farther enemy keeps its word");
}

#[test]
fn equidistant_completions_prefer_lowest_id() {
    let mut resolver = TypingResolver::default();
    let mut pool = WordPool::new(vec!["owl".to_owned()]);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut targets = vec![
        Dummy::new(9, Vec2::new(0.0, 40.0), "go"),
        Dummy::new(4, Vec2::new(40.0, 0.0), "go"),
    ];

    let completions = type_text(&mut resolver, "go", &mut targets, &mut pool, &mut rng);

    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].enemy, EnemyId::new(4));
}

#[test]
fn progress_is_tracked_per_enemy() {
    let mut resolver = TypingResolver::default();
    let mut pool = WordPool::new(vec!["owl".to_owned()]);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut targets = vec![
        Dummy::new(1, Vec2::new(10.0, 0.0), "bat"),
        Dummy::new(2, Vec2::new(20.0, 0.0), "ball"),
    ];

    let completions = type_text(&mut resolver, "bal", &mut targets, &mut pool, &mut rng);
    assert!(completions.is_empty());
    assert_eq!(targets[0].typed, 0);
    assert_eq!(targets[1].typed, 3);

    let completions = type_text(&mut resolver, "L", &mut targets, &mut pool, &mut rng);
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].enemy, EnemyId::new(2));
}

#[test]
fn non_letters_leave_progress_untouched() {
    let mut resolver = TypingResolver::default();
    let mut pool = WordPool::new(vec!["owl".to_owned()]);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut targets = vec![Dummy::new(1, Vec2::new(10.0, 0.0), "cat")];

    let completions = type_text(&mut resolver, "c\u{8}1 ", &mut targets, &mut pool, &mut rng);
    assert!(completions.is_empty());
    assert_eq!(targets[0].typed, 1);
}
