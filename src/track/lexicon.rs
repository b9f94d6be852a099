use std::collections::HashMap;
use std::path::Path;

use crate::error::TrackError;

/// Pronunciation lexicon in CMUdict layout: `WORD  PH1 PH2 ...` per line.
///
/// Lines starting with `;;;` are comments. Alternate pronunciations
/// (`WORD(2)`) are skipped, the first entry for a word wins.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<String>>,
}

impl Lexicon {
    pub fn parse(data: &str) -> Self {
        let mut entries = HashMap::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            if word.ends_with(')') && word.contains('(') {
                continue;
            }
            let phonemes: Vec<String> = fields.map(str::to_string).collect();
            if phonemes.is_empty() {
                continue;
            }
            entries.entry(word.to_uppercase()).or_insert(phonemes);
        }
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, TrackError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| TrackError::io("read lexicon", e))?;
        let lexicon = Self::parse(&data);
        tracing::info!(path = %path.display(), words = lexicon.len(), "lexicon loaded");
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }
}

/// Phonemes for `text`, word by word.
///
/// Words are looked up uppercased with punctuation removed; words missing from
/// the lexicon are spelled one letter per symbol. Text without a single
/// letter or digit maps to `[silence_symbol]`.
pub fn lexicon_phonemes(
    lexicon: &Lexicon,
    text: &str,
    strip_stress: bool,
    silence_symbol: &str,
) -> Vec<String> {
    let mut phonemes = Vec::new();
    for raw_word in text.split_whitespace() {
        let word: String = raw_word
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'')
            .flat_map(char::to_uppercase)
            .collect();
        if !word.chars().any(char::is_alphanumeric) {
            continue;
        }

        match lexicon.lookup(&word) {
            Some(entry) => phonemes.extend(entry.iter().map(|p| {
                if strip_stress {
                    p.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
                } else {
                    p.clone()
                }
            })),
            None => {
                tracing::debug!(
                    word = word.as_str(),
                    "lexicon: out-of-vocabulary word spelled out"
                );
                phonemes.extend(
                    word.chars()
                        .filter(|c| c.is_alphanumeric())
                        .map(|c| c.to_string()),
                );
            }
        }
    }

    if phonemes.is_empty() {
        phonemes.push(silence_symbol.to_string());
    }
    phonemes
}
