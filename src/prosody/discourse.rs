//! Discourse-level intonation
//!
//! Splits a text into intonational phrases, groups them into declination
//! units by lexical topic continuity and assigns each phrase a nuclear tone
//! and an F0 contour inside the profile's pitch range.

use super::profile::{ProsodicProfile, VoiceType};
use crate::text;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;

/// Pitch movement on the nucleus of a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NuclearTone {
    /// Final fall, closes new information
    Descending,
    /// Level or half-rise, announces more to come
    Suspensive,
    /// Rise on known material
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscourseRole {
    Foreground,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum F0Level {
    High,
    Mid,
    Low,
}

impl F0Level {
    /// Frequency of this level inside `(lo, hi)`
    pub fn hz(&self, (lo, hi): (f32, f32)) -> f32 {
        match self {
            F0Level::High => hi,
            F0Level::Mid => (lo + hi) / 2.0,
            F0Level::Low => lo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntonationalPhrase {
    pub text: String,
    /// Character range in the analysed text
    pub span: Range<usize>,
    pub nuclear_tone: NuclearTone,
    pub discourse_role: DiscourseRole,
    pub f0_start: F0Level,
    pub f0_end: F0Level,
    pub f0_start_hz: f32,
    pub f0_end_hz: f32,
    /// Index of the declination unit the phrase belongs to
    pub unit: usize,
}

/// Run of phrases over which pitch trends from the top to the bottom of the range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclinationUnit {
    pub index: usize,
    /// Indices into [`DiscourseAnalysis::phrases`]
    pub phrases: Range<usize>,
    pub f0_start_hz: f32,
    pub f0_end_hz: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscourseAnalysis {
    pub phrases: Vec<IntonationalPhrase>,
    pub declination_units: Vec<DeclinationUnit>,
}

/// Function words ignored when comparing topics (accent-folded)
const STOPWORDS: &[&str] = &[
    "para", "como", "pero", "esta", "este", "esto", "estos", "estas", "esos", "esas", "porque",
    "aunque", "cuando", "donde", "entre", "sobre", "desde", "hasta", "todo", "todos", "toda",
    "todas", "otro", "otra", "otros", "otras", "mismo", "misma", "tambien", "habia", "tiene",
    "tienen", "sino", "mientras", "entonces", "ellos", "ellas", "nosotros", "ustedes", "usted",
    "nuestro", "nuestra", "algo", "nada", "cada", "aqui", "alli", "despues", "antes", "siempre",
    "nunca", "ahora", "solo", "bien", "estar", "estaba", "fueron", "sido", "hacer", "puede",
    "pueden", "estan", "estas", "hace", "muchos", "mucho", "mucha", "muchas", "poco", "sean",
    "eran", "pues", "luego", "segun", "contra", "unos", "unas", "algun", "alguna", "ningun",
    "ninguna", "cual", "cuales", "quien", "quienes",
];

/// Words that mark a phrase as leading into more material
const CONTINUATION_WORDS: &[&str] = &[
    "que", "porque", "aunque", "cuando", "si", "mientras", "y", "e", "pero", "pues", "como",
    "donde", "sino", "ni", "o", "u",
];

const MIN_CONTENT_WORD_CHARS: usize = 4;

/// Phrases a new sentence is compared against when looking for a topic shift
const TOPIC_WINDOW: usize = 2;

#[derive(Debug, Clone)]
struct RawPhrase {
    span: Range<usize>,
    text: String,
    sentence_final: bool,
    paragraph_before: bool,
}

/// Assigns discourse intonation using one regional profile
#[derive(Debug, Clone)]
pub struct DiscourseProsodyAnalyzer {
    profile: &'static ProsodicProfile,
}

impl DiscourseProsodyAnalyzer {
    pub fn new(profile: &'static ProsodicProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'static ProsodicProfile {
        self.profile
    }

    pub fn analyze(&self, text: &str, voice: VoiceType) -> DiscourseAnalysis {
        let range = self.profile.f0_range(voice);
        let raw = split_phrases(text);
        let content: Vec<HashSet<String>> = raw.iter().map(|p| content_words(&p.text)).collect();

        let mut units_of = Vec::with_capacity(raw.len());
        let mut unit = 0usize;
        let mut unit_start = 0usize;
        let mut phrases = Vec::with_capacity(raw.len());

        for (i, phrase) in raw.iter().enumerate() {
            if i > 0 {
                let sentence_start = raw[i - 1].sentence_final;
                let topic_shift = sentence_start && {
                    let window = i.saturating_sub(TOPIC_WINDOW)..i;
                    window.into_iter().all(|j| content[j].is_disjoint(&content[i]))
                };
                if phrase.paragraph_before || topic_shift {
                    unit += 1;
                    unit_start = i;
                }
            }
            units_of.push(unit);

            let given = (unit_start..i).any(|j| !content[j].is_disjoint(&content[i]));
            let leads_on = text::words(&phrase.text)
                .first()
                .map_or(false, |w| CONTINUATION_WORDS.contains(&w.key().as_str()));
            let continuation = !phrase.sentence_final || leads_on;

            let (role, tone) = match (continuation || given, given) {
                (false, _) => (DiscourseRole::Foreground, NuclearTone::Descending),
                (true, true) => (DiscourseRole::Background, NuclearTone::Ascending),
                (true, false) => (DiscourseRole::Background, NuclearTone::Suspensive),
            };

            phrases.push(IntonationalPhrase {
                text: phrase.text.clone(),
                span: phrase.span.clone(),
                nuclear_tone: tone,
                discourse_role: role,
                f0_start: F0Level::Mid,
                f0_end: F0Level::Mid,
                f0_start_hz: F0Level::Mid.hz(range),
                f0_end_hz: F0Level::Mid.hz(range),
                unit,
            });
        }

        let mut declination_units: Vec<DeclinationUnit> = Vec::new();
        for (i, &u) in units_of.iter().enumerate() {
            match declination_units.last_mut() {
                Some(last) if last.index == u => last.phrases.end = i + 1,
                _ => declination_units.push(DeclinationUnit {
                    index: u,
                    phrases: i..i + 1,
                    f0_start_hz: F0Level::High.hz(range),
                    f0_end_hz: F0Level::Low.hz(range),
                }),
            }
        }

        for unit in &declination_units {
            let first = &mut phrases[unit.phrases.start];
            first.f0_start = F0Level::High;
            first.f0_start_hz = F0Level::High.hz(range);
            let last = &mut phrases[unit.phrases.end - 1];
            last.f0_end = F0Level::Low;
            last.f0_end_hz = F0Level::Low.hz(range);
        }

        log::debug!(
            "discourse analysis: {} phrases in {} declination units",
            phrases.len(),
            declination_units.len()
        );

        DiscourseAnalysis {
            phrases,
            declination_units,
        }
    }
}

/// Accent-folded content words of a phrase
fn content_words(phrase: &str) -> HashSet<String> {
    text::words(phrase)
        .into_iter()
        .map(|w| w.key())
        .filter(|k| k.chars().count() >= MIN_CONTENT_WORD_CHARS && !STOPWORDS.contains(&k.as_str()))
        .collect()
}

fn split_phrases(text: &str) -> Vec<RawPhrase> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut phrases = Vec::new();
    let mut start: Option<usize> = None;
    let mut paragraph_pending = false;
    let mut i = 0;

    let mut close = |start: usize, end: usize, sentence_final: bool, paragraph_before: bool| {
        let mut end = end;
        while end > start && chars[end - 1].is_whitespace() {
            end -= 1;
        }
        if end > start {
            phrases.push(RawPhrase {
                span: start..end,
                text: chars[start..end].iter().collect(),
                sentence_final,
                paragraph_before,
            });
        }
    };

    while i < n {
        let ch = chars[i];

        if ch == '\n' {
            let blank_line = chars[i + 1..]
                .iter()
                .take_while(|c| c.is_whitespace())
                .any(|&c| c == '\n');
            if blank_line {
                if let Some(s) = start.take() {
                    close(s, i, true, paragraph_pending);
                }
                paragraph_pending = true;
                while i < n && chars[i].is_whitespace() {
                    i += 1;
                }
                continue;
            }
        }

        if start.is_none() && !ch.is_whitespace() {
            start = Some(i);
        }

        let between_digits = i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).map_or(false, |c| c.is_ascii_digit());

        if matches!(ch, ',' | ';' | ':' | '.' | '!' | '?') && !between_digits {
            let mut last = i;
            while last + 1 < n && matches!(chars[last + 1], '.' | '!' | '?') {
                last += 1;
            }
            let terminal = chars[i..=last].iter().any(|&c| matches!(c, '.' | '!' | '?'));
            if let Some(s) = start.take() {
                close(s, last + 1, terminal, paragraph_pending);
                paragraph_pending = false;
            }
            i = last + 1;
            continue;
        }

        i += 1;
    }

    if let Some(s) = start {
        close(s, n, true, paragraph_pending);
    }

    // The last phrase of a text is always sentence-final
    if let Some(last) = phrases.last_mut() {
        last.sentence_final = true;
    }
    phrases
}
