//! Word list loading.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use hype_type_core::{DifficultyTier, WordLibrary};
use serde::Deserialize;

/// Language served by the built-in list.
pub(crate) const BUILT_IN_LANGUAGE: &str = "english";

/// Words used when no list file is supplied.
const BUILT_IN: [(DifficultyTier, &[&str]); 4] = [
    (DifficultyTier::Easy, &["cat", "dog", "sun", "run", "fun"]),
    (
        DifficultyTier::Medium,
        &["apple", "banana", "orange", "grape"],
    ),
    (
        DifficultyTier::Hard,
        &["strawberry", "pineapple", "chocolate"],
    ),
    (
        DifficultyTier::Expert,
        &["extraordinary", "magnificent", "sophisticated"],
    ),
];

#[derive(Debug, Deserialize)]
struct WordListFile {
    #[serde(default)]
    languages: BTreeMap<String, LanguageEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageEntry {
    #[serde(default)]
    difficulty_levels: BTreeMap<String, DifficultyEntry>,
}

/// Either inline words or a newline separated file next to the list.
#[derive(Debug, Default, Deserialize)]
struct DifficultyEntry {
    #[serde(default)]
    words: Vec<String>,
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Built-in English library.
pub(crate) fn built_in() -> WordLibrary {
    BUILT_IN
        .iter()
        .fold(WordLibrary::new(), |library, (tier, words)| {
            library.with_tier(*tier, words.iter().copied())
        })
}

/// Loads `language` from the list at `path`, or the built-in list.
pub(crate) fn load(path: Option<&Path>, language: &str) -> Result<WordLibrary> {
    let Some(path) = path else {
        if language != BUILT_IN_LANGUAGE {
            bail!("no built-in words for language {language:?}; pass --words");
        }
        return Ok(built_in());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read word list {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse(&text, language, base)
        .with_context(|| format!("invalid word list {}", path.display()))
}

fn parse(text: &str, language: &str, base: &Path) -> Result<WordLibrary> {
    let file: WordListFile = serde_json::from_str(text)?;
    let Some(entry) = file.languages.get(language) else {
        bail!("language {language:?} is not defined");
    };

    let mut library = WordLibrary::new();
    for (name, difficulty) in &entry.difficulty_levels {
        let Some(tier) = DifficultyTier::ALL
            .into_iter()
            .find(|tier| tier.name() == name.as_str())
        else {
            tracing::warn!(difficulty = %name, "skipping unknown difficulty");
            continue;
        };

        let mut words = difficulty.words.clone();
        if let Some(relative) = &difficulty.path {
            let file = base.join(relative);
            let contents = fs::read_to_string(&file)
                .with_context(|| format!("failed to read words from {}", file.display()))?;
            words.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|word| !word.is_empty())
                    .map(str::to_owned),
            );
        }
        library.insert(tier, words);
    }

    if library.is_empty() {
        bail!("language {language:?} has no words");
    }
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"{
        "languages": {
            "english": {
                "difficultyLevels": {
                    "easy": { "words": ["ant", "bee"] },
                    "legendary": { "words": ["xylophone"] },
                    "hard": { "words": ["elephant"] }
                }
            },
            "silent": { "difficultyLevels": {} }
        }
    }"#;

    #[test]
    fn parses_tiers_of_the_selected_language() {
        let library = parse(LIST, "english", Path::new(".")).expect("valid list");

        assert_eq!(library.words_for(&[DifficultyTier::Easy]), ["ant", "bee"]);
        assert_eq!(library.words_for(&[DifficultyTier::Hard]), ["elephant"]);
        assert!(library.words_for(&[DifficultyTier::Medium]).is_empty());
    }

    #[test]
    fn missing_or_empty_language_is_an_error() {
        let missing = parse(LIST, "klingon", Path::new(".")).expect_err("unknown language");
        assert!(missing.to_string().contains("not defined"));

        let empty = parse(LIST, "silent", Path::new(".")).expect_err("no words");
        assert!(empty.to_string().contains("no words"));
    }

    #[test]
    fn built_in_list_serves_only_english() {
        assert!(load(None, BUILT_IN_LANGUAGE).is_ok());
        assert!(load(None, "japanese").is_err());
    }

    #[test]
    fn built_in_list_covers_every_tier() {
        let library = built_in();
        for tier in DifficultyTier::ALL {
            assert!(!library.words_for(&[tier]).is_empty(), "{tier:?} is empty");
        }
    }
}
