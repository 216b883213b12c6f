//! Sentence- and clause-level prosody markers
//!
//! Finds questions, exclamations, emphasised words and punctuation pauses in
//! a text and reports them as [`ProsodyMarker`]s whose positions are
//! character offsets into that text.

use crate::text::{self, Word};
use serde::Serialize;

/// Kind of prosodic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Yes/no question, final rise
    QuestionRise,
    /// Wh-question, final fall
    QuestionFall,
    ExclamationLow,
    ExclamationMedium,
    ExclamationHigh,
    Emphasis,
    PauseShort,
    PauseMedium,
    PauseLong,
    PauseParagraph,
    Breath,
}

impl MarkerKind {
    /// Render hint inserted into the marked text
    pub fn glyph(&self) -> &'static str {
        match self {
            MarkerKind::QuestionRise => "[↗]",
            MarkerKind::QuestionFall => "[↘]",
            MarkerKind::ExclamationLow => "[!]",
            MarkerKind::ExclamationMedium => "[!!]",
            MarkerKind::ExclamationHigh => "[!!!]",
            MarkerKind::Emphasis => "[*]",
            MarkerKind::PauseShort => "[|]",
            MarkerKind::PauseMedium => "[||]",
            MarkerKind::PauseLong => "[‖]",
            MarkerKind::PauseParagraph => "[¶]",
            MarkerKind::Breath => "[br]",
        }
    }

    pub fn is_pause(&self) -> bool {
        matches!(
            self,
            MarkerKind::PauseShort
                | MarkerKind::PauseMedium
                | MarkerKind::PauseLong
                | MarkerKind::PauseParagraph
        )
    }

    pub fn is_question(&self) -> bool {
        matches!(self, MarkerKind::QuestionRise | MarkerKind::QuestionFall)
    }

    pub fn is_exclamation(&self) -> bool {
        matches!(
            self,
            MarkerKind::ExclamationLow | MarkerKind::ExclamationMedium | MarkerKind::ExclamationHigh
        )
    }
}

/// Strength of an exclamation or emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

/// One prosodic event in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProsodyMarker {
    pub kind: MarkerKind,
    /// Character offset into the analysed text
    pub position: usize,
    pub intensity: Option<Intensity>,
}

impl ProsodyMarker {
    fn new(kind: MarkerKind, position: usize) -> Self {
        Self {
            kind,
            position,
            intensity: None,
        }
    }

    fn with_intensity(kind: MarkerKind, position: usize, intensity: Intensity) -> Self {
        Self {
            kind,
            position,
            intensity: Some(intensity),
        }
    }
}

/// Result of utterance-level analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtteranceAnalysis {
    /// Markers ordered by position
    pub markers: Vec<ProsodyMarker>,
    /// Input text with render-hint glyphs after each triggering span
    pub marked_text: String,
    pub sentence_count: usize,
    /// Character offsets where the speaker must breathe (paragraph breaks)
    pub breath_points: Vec<usize>,
    /// Character offsets of emphasised words
    pub stress_points: Vec<usize>,
}

impl UtteranceAnalysis {
    pub fn has_question(&self) -> bool {
        self.markers.iter().any(|m| m.kind.is_question())
    }

    pub fn has_exclamation(&self) -> bool {
        self.markers.iter().any(|m| m.kind.is_exclamation())
    }

    /// Markers of one kind
    pub fn markers_of(&self, kind: MarkerKind) -> impl Iterator<Item = &ProsodyMarker> {
        self.markers.iter().filter(move |m| m.kind == kind)
    }
}

const INTERROGATIVES: &[&str] = &[
    "que", "quien", "quienes", "cual", "cuales", "como", "donde", "adonde", "cuando", "cuanto",
    "cuanta", "cuantos", "cuantas",
];

/// Prepositions that may precede an interrogative ("¿De dónde…?")
const QUESTION_PREPOSITIONS: &[&str] = &[
    "a", "de", "desde", "hasta", "por", "para", "con", "en", "sin", "sobre", "hacia",
];

const INTENSIFIERS: &[&str] = &[
    "muy",
    "tan",
    "tanto",
    "demasiado",
    "super",
    "re",
    "sumamente",
    "realmente",
    "extremadamente",
    "bastante",
];

const HIGH_INTENSITY_WORDS: &[&str] = &[
    "increible",
    "maravilloso",
    "maravillosa",
    "fantastico",
    "fantastica",
    "horrible",
    "espectacular",
    "impresionante",
    "terrible",
    "socorro",
    "auxilio",
    "brutal",
];

const LOW_INTENSITY_WORDS: &[&str] = &["bueno", "vale", "bien", "ah", "oh", "vaya", "ok", "pues"];

/// A sentence found by segmentation, in char offsets
#[derive(Debug, Clone)]
struct Sentence {
    start: usize,
    /// One past the last char
    end: usize,
    /// Inclusive char range of the closing punctuation run
    terminal: Option<(usize, usize)>,
    /// Char offset of the paragraph break following the sentence
    paragraph_after: Option<usize>,
}

/// A `¿…?` or `¡…!` clause
#[derive(Debug, Clone)]
struct Clause {
    start: usize,
    /// Inclusive range of the closing run, if the clause is closed
    close: Option<(usize, usize)>,
    end: usize,
    question: bool,
}

/// Detects utterance-level prosodic events
#[derive(Debug, Clone, Copy, Default)]
pub struct UtteranceProsodyAnalyzer;

impl UtteranceProsodyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyse `text`
    pub fn analyze(&self, text: &str) -> UtteranceAnalysis {
        let chars: Vec<char> = text.chars().collect();
        let words = text::words(text);
        let sentences = segment(&chars);

        let mut markers = Vec::new();
        // (insert before char index, glyph)
        let mut glyphs: Vec<(usize, &'static str)> = Vec::new();
        let mut breath_points = Vec::new();
        let mut stress_points = Vec::new();

        for sentence in &sentences {
            for clause in clauses(&chars, sentence) {
                let clause_words: Vec<&Word> = words
                    .iter()
                    .filter(|w| w.start >= clause.start && w.end <= clause.end)
                    .collect();
                let marker = if clause.question {
                    classify_question(&clause, &clause_words)
                } else {
                    classify_exclamation(&chars, &clause, &clause_words)
                };
                let glyph_at = clause.close.map_or(clause.end, |(_, last)| last + 1);
                glyphs.push((glyph_at, marker.kind.glyph()));
                markers.push(marker);
            }

            if let Some(br) = sentence.paragraph_after {
                markers.push(ProsodyMarker::new(MarkerKind::PauseParagraph, br));
                markers.push(ProsodyMarker::new(MarkerKind::Breath, br));
                glyphs.push((br, MarkerKind::PauseParagraph.glyph()));
                glyphs.push((br, MarkerKind::Breath.glyph()));
                breath_points.push(br);
            } else if let Some((_, last)) = sentence.terminal {
                if has_text_after(&chars, last + 1) {
                    markers.push(ProsodyMarker::new(MarkerKind::PauseLong, last));
                    glyphs.push((last + 1, MarkerKind::PauseLong.glyph()));
                }
            }
        }

        for (i, &ch) in chars.iter().enumerate() {
            let kind = match ch {
                ',' => MarkerKind::PauseShort,
                ';' | ':' => MarkerKind::PauseMedium,
                _ => continue,
            };
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).map_or(false, |c| c.is_ascii_digit());
            if between_digits || !has_text_after(&chars, i + 1) {
                continue;
            }
            markers.push(ProsodyMarker::new(kind, i));
            glyphs.push((i + 1, kind.glyph()));
        }

        for pair in words.windows(2) {
            let (intensifier, target) = (&pair[0], &pair[1]);
            let adjacent = chars[intensifier.end..target.start]
                .iter()
                .all(|c| c.is_whitespace());
            if adjacent && INTENSIFIERS.contains(&intensifier.key().as_str()) {
                markers.push(ProsodyMarker::with_intensity(
                    MarkerKind::Emphasis,
                    target.start,
                    Intensity::Medium,
                ));
                glyphs.push((target.end, MarkerKind::Emphasis.glyph()));
                stress_points.push(target.start);
            }
        }

        markers.sort_by_key(|m| m.position);
        stress_points.sort_unstable();
        stress_points.dedup();

        log::debug!(
            "utterance analysis: {} sentences, {} markers",
            sentences.len(),
            markers.len()
        );

        UtteranceAnalysis {
            markers,
            marked_text: render_marked(&chars, glyphs),
            sentence_count: sentences.len(),
            breath_points,
            stress_points,
        }
    }

    /// Number of sentences in `text`
    pub fn count_sentences(&self, text: &str) -> usize {
        let chars: Vec<char> = text.chars().collect();
        segment(&chars).len()
    }
}

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn has_text_after(chars: &[char], from: usize) -> bool {
    chars.iter().skip(from).any(|c| !c.is_whitespace())
}

/// A newline followed (after spaces) by another newline
fn is_paragraph_break(chars: &[char], i: usize) -> bool {
    chars[i] == '\n'
        && chars[i + 1..]
            .iter()
            .take_while(|c| c.is_whitespace())
            .any(|&c| c == '\n')
}

fn segment(chars: &[char]) -> Vec<Sentence> {
    let n = chars.len();
    let mut sentences: Vec<Sentence> = Vec::new();
    let mut start: Option<usize> = None;
    let mut i = 0;

    while i < n {
        let ch = chars[i];

        if ch == '\n' && is_paragraph_break(chars, i) {
            if let Some(s) = start.take() {
                sentences.push(Sentence {
                    start: s,
                    end: trim_end(chars, s, i),
                    terminal: None,
                    paragraph_after: Some(i),
                });
            } else if let Some(last) = sentences.last_mut() {
                last.paragraph_after.get_or_insert(i);
            }
            while i < n && chars[i].is_whitespace() {
                i += 1;
            }
            continue;
        }

        if start.is_none() && !ch.is_whitespace() {
            start = Some(i);
        }

        let decimal_point = ch == '.'
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).map_or(false, |c| c.is_ascii_digit());

        if is_terminal(ch) && !decimal_point {
            let mut last = i;
            while last + 1 < n && is_terminal(chars[last + 1]) {
                last += 1;
            }
            let s = start.take().unwrap_or(i);
            sentences.push(Sentence {
                start: s,
                end: last + 1,
                terminal: Some((i, last)),
                paragraph_after: None,
            });
            i = last + 1;
            continue;
        }

        i += 1;
    }

    if let Some(s) = start {
        sentences.push(Sentence {
            start: s,
            end: trim_end(chars, s, n),
            terminal: None,
            paragraph_after: None,
        });
    }

    sentences
}

fn trim_end(chars: &[char], start: usize, end: usize) -> usize {
    let mut end = end;
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    end
}

fn clauses(chars: &[char], sentence: &Sentence) -> Vec<Clause> {
    let mut found = Vec::new();
    let mut k = sentence.start;

    while k < sentence.end {
        let question = match chars[k] {
            '¿' => true,
            '¡' => false,
            _ => {
                k += 1;
                continue;
            }
        };
        let closer = if question { '?' } else { '!' };
        let close_at = (k + 1..sentence.end).find(|&m| chars[m] == closer);
        match close_at {
            Some(m) => {
                let mut last = m;
                while last + 1 < sentence.end && matches!(chars[last + 1], '?' | '!') {
                    last += 1;
                }
                found.push(Clause {
                    start: k,
                    close: Some((m, last)),
                    end: last + 1,
                    question,
                });
                k = last + 1;
            }
            None => {
                found.push(Clause {
                    start: k,
                    close: None,
                    end: sentence.end,
                    question,
                });
                k = sentence.end;
            }
        }
    }

    // Questions and exclamations written without the opening sign
    if found.is_empty() {
        if let Some((first, last)) = sentence.terminal {
            let run = &chars[first..=last];
            let question = run.contains(&'?');
            if question || run.contains(&'!') {
                found.push(Clause {
                    start: sentence.start,
                    close: Some((first, last)),
                    end: last + 1,
                    question,
                });
            }
        }
    }

    found
}

fn classify_question(clause: &Clause, words: &[&Word]) -> ProsodyMarker {
    let keys: Vec<String> = words.iter().take(2).map(|w| w.key()).collect();
    let lead = match keys.first() {
        Some(first) if QUESTION_PREPOSITIONS.contains(&first.as_str()) => keys.get(1),
        other => other,
    };
    let wh_question = lead.map_or(false, |w| INTERROGATIVES.contains(&w.as_str()));
    let kind = if wh_question {
        MarkerKind::QuestionFall
    } else {
        MarkerKind::QuestionRise
    };
    ProsodyMarker::new(kind, clause.start)
}

fn classify_exclamation(chars: &[char], clause: &Clause, words: &[&Word]) -> ProsodyMarker {
    let repeated = clause.close.map_or(false, |(first, last)| {
        chars[first..=last].iter().filter(|&&c| c == '!').count() >= 2
    });
    let shouted = words.iter().any(|w| {
        w.text.chars().count() >= 3 && w.text.chars().all(|c| !c.is_lowercase())
    });
    let keys: Vec<String> = words.iter().map(|w| w.key()).collect();
    let high_word = keys.iter().any(|k| HIGH_INTENSITY_WORDS.contains(&k.as_str()));
    let low_word = keys.iter().any(|k| LOW_INTENSITY_WORDS.contains(&k.as_str()));

    let (kind, intensity) = if repeated || shouted || high_word {
        (MarkerKind::ExclamationHigh, Intensity::High)
    } else if low_word {
        (MarkerKind::ExclamationLow, Intensity::Low)
    } else {
        (MarkerKind::ExclamationMedium, Intensity::Medium)
    };
    ProsodyMarker::with_intensity(kind, clause.start, intensity)
}

fn render_marked(chars: &[char], mut glyphs: Vec<(usize, &'static str)>) -> String {
    glyphs.sort_by_key(|(at, _)| *at);
    let mut out = String::with_capacity(chars.len() + glyphs.len() * 4);
    let mut pending = glyphs.into_iter().peekable();

    for (i, &ch) in chars.iter().enumerate() {
        while let Some((_, glyph)) = pending.next_if(|(at, _)| *at <= i) {
            out.push_str(glyph);
        }
        out.push(ch);
    }
    for (_, glyph) in pending {
        out.push_str(glyph);
    }
    out
}
