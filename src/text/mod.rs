//! Text processing module for acento
//!
//! Provides Spanish text normalization, regional phonetic rewriting and the
//! slang lexicon used for region detection.

pub mod lexicon;
pub mod normalizer;
pub mod numbers;
pub mod phonetics;
pub mod region;

pub use lexicon::{Detection, SlangEntry, SlangLexicon, SlangMarker, UsageClass};
pub use normalizer::TextNormalizer;
pub use phonetics::{PhoneticRule, PhoneticRuleEngine};
pub use region::{RegionSelection, RegionTag};

/// A word of a text with its character span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Character offset of the first letter
    pub start: usize,
    /// Character offset one past the last letter
    pub end: usize,
}

impl Word {
    /// Lowercased, accent-folded form for dictionary lookups
    pub fn key(&self) -> String {
        strip_accents(&self.text.to_lowercase())
    }
}

/// Split text into words (runs of letters), with character offsets
pub fn words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (i, ch) in text.chars().enumerate() {
        if ch.is_alphabetic() {
            if current.is_empty() {
                start = i;
            }
            current.push(ch);
        } else if !current.is_empty() {
            words.push(Word {
                text: std::mem::take(&mut current),
                start,
                end: i,
            });
        }
    }

    if !current.is_empty() {
        let end = start + current.chars().count();
        words.push(Word {
            text: current,
            start,
            end,
        });
    }

    words
}

/// Remove acute accents and diaeresis, keeping ñ
pub fn strip_accents(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}

/// Check whether text is empty or whitespace only
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Number of characters (not bytes) in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_offsets() {
        let w = words("¿Cómo estás, Ana?");
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].text, "Cómo");
        assert_eq!(w[0].start, 1);
        assert_eq!(w[0].end, 5);
        assert_eq!(w[2].text, "Ana");
        assert_eq!(w[2].end, 16);
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("Dónde está el niño pingüino"), "Donde esta el niño pinguino");
    }

    #[test]
    fn test_word_key() {
        let w = words("CÓMO");
        assert_eq!(w[0].key(), "como");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" a "));
    }
}
