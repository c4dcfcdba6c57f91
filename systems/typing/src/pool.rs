use rand::Rng;

/// Word source drawing without replacement from the active list.
///
/// Drawn words stay reserved until released or until every word of the
/// list has been handed out, at which point the reservations reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
    used: Vec<String>,
}

impl WordPool {
    /// Creates a pool over the provided list.
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            used: Vec::new(),
        }
    }

    /// Draws a random unreserved word, refilling once every word is in use.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }

        let mut available: Vec<&String> = self
            .words
            .iter()
            .filter(|word| !self.used.contains(word))
            .collect();
        if available.is_empty() {
            tracing::trace!(words = self.words.len(), "word pool refilled");
            self.used.clear();
            available = self.words.iter().collect();
        }

        let word = available[rng.gen_range(0..available.len())].clone();
        self.used.push(word.clone());
        Some(word)
    }

    /// Returns a word to the pool.
    pub fn release(&mut self, word: &str) {
        self.used.retain(|used| used != word);
    }

    /// Swaps the active list while keeping existing reservations.
    pub fn replace_words(&mut self, words: Vec<String>) {
        self.words = words;
    }

    /// Active word list.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of reserved words.
    #[must_use]
    pub fn reserved(&self) -> usize {
        self.used.len()
    }
}
