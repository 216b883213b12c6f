//! Regional slang lexicon and region detection
//!
//! Terms are matched as whole words (or whole multi-word phrases) against
//! the lowercased text. Detection counts hits per region into a fixed array
//! indexed by [`RegionTag::index`].

use super::region::RegionTag;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Register of a slang term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageClass {
    /// Everyday informal speech
    Colloquial,
    /// Friendly or affectionate
    Affectionate,
    /// Coarse; fine among friends, rude elsewhere
    Vulgar,
    /// Exclamation or discourse particle
    Interjection,
    /// Term of address for a person
    Address,
}

/// One lexicon entry
#[derive(Debug, Clone)]
pub struct SlangEntry {
    pub term: &'static str,
    pub meaning: &'static str,
    pub usage: UsageClass,
    pub region: RegionTag,
    matcher: Regex,
}

impl SlangEntry {
    fn new(region: RegionTag, term: &'static str, meaning: &'static str, usage: UsageClass) -> Self {
        let pattern = format!(r"\b{}\b", regex::escape(term));
        Self {
            term,
            meaning,
            usage,
            region,
            matcher: Regex::new(&pattern).unwrap(),
        }
    }

    /// Byte offsets of every whole-word occurrence in lowercased `text`
    pub fn find_in(&self, lowered: &str) -> Vec<usize> {
        self.matcher.find_iter(lowered).map(|m| m.start()).collect()
    }
}

/// Slang term found in a text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlangMarker {
    /// Surface form as written in the original text
    pub term: String,
    pub meaning: &'static str,
    pub usage: UsageClass,
    /// Character offset into the original text
    pub position: usize,
}

/// Outcome of region detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub region: RegionTag,
    pub confidence: f32,
    /// Total lexicon hits across all regions
    pub total_matches: usize,
}

/// Number of winning hits at which confidence saturates
const SATURATION_MATCHES: f32 = 3.0;

lazy_static! {
    static ref LEXICON: HashMap<RegionTag, Vec<SlangEntry>> = build_lexicon();
}

fn build_lexicon() -> HashMap<RegionTag, Vec<SlangEntry>> {
    use RegionTag::*;
    use UsageClass::*;

    let table: [(RegionTag, &[(&'static str, &'static str, UsageClass)]); 6] = [
        (
            Rioplatense,
            &[
                ("che", "hey; term of address", Interjection),
                ("boludo", "dude; idiot", Vulgar),
                ("boluda", "dude; idiot", Vulgar),
                ("vos", "you (voseo)", Address),
                ("querés", "you want (voseo)", Colloquial),
                ("tenés", "you have (voseo)", Colloquial),
                ("sos", "you are (voseo)", Colloquial),
                ("mate", "mate infusion", Colloquial),
                ("mates", "mate infusions", Colloquial),
                ("pibe", "kid, young man", Colloquial),
                ("mina", "woman", Colloquial),
                ("laburo", "work, job", Colloquial),
                ("bondi", "bus", Colloquial),
                ("quilombo", "mess, chaos", Colloquial),
                ("guita", "money", Colloquial),
                ("copado", "cool, nice", Colloquial),
                ("posta", "for real", Interjection),
            ],
        ),
        (
            Colombian,
            &[
                ("parce", "buddy", Affectionate),
                ("parcero", "buddy", Affectionate),
                ("bacano", "cool", Colloquial),
                ("chimba", "awesome", Vulgar),
                ("berraco", "tough; angry", Colloquial),
                ("guayabo", "hangover", Colloquial),
                ("tinto", "black coffee", Colloquial),
                ("qué pena", "sorry, excuse me", Interjection),
                ("camello", "work, job", Colloquial),
                ("sumercé", "you (respectful)", Address),
            ],
        ),
        (
            Mexican,
            &[
                ("güey", "dude", Address),
                ("wey", "dude", Address),
                ("chido", "cool", Colloquial),
                ("neta", "truth; really", Interjection),
                ("chamba", "work, job", Colloquial),
                ("órale", "wow; come on", Interjection),
                ("ándale", "hurry up; right", Interjection),
                ("chavo", "kid, young man", Colloquial),
                ("cuate", "friend", Affectionate),
                ("no manches", "no way", Interjection),
                ("padrísimo", "great", Colloquial),
            ],
        ),
        (
            Chilean,
            &[
                ("po", "well (emphatic particle)", Interjection),
                ("cachai", "you get it?", Interjection),
                ("weón", "dude; idiot", Vulgar),
                ("huevón", "dude; idiot", Vulgar),
                ("fome", "boring", Colloquial),
                ("pololo", "boyfriend", Affectionate),
                ("polola", "girlfriend", Affectionate),
                ("luca", "a thousand pesos", Colloquial),
                ("al tiro", "right away", Colloquial),
                ("la raja", "awesome", Vulgar),
                ("copete", "alcoholic drink", Colloquial),
            ],
        ),
        (
            Caribbean,
            &[
                ("chévere", "great, cool", Colloquial),
                ("asere", "buddy", Address),
                ("guagua", "bus", Colloquial),
                ("jeva", "girlfriend", Affectionate),
                ("vaina", "thing, stuff", Colloquial),
                ("pana", "buddy", Affectionate),
                ("chamo", "kid, buddy", Address),
                ("qué lo que", "what's up", Interjection),
                ("bochinche", "gossip; party", Colloquial),
                ("tíguere", "streetwise guy", Address),
            ],
        ),
        (
            Andean,
            &[
                ("achachay", "how cold!", Interjection),
                ("arrarray", "ouch, it burns!", Interjection),
                ("ñaño", "brother, close friend", Affectionate),
                ("chuchaqui", "hangover", Colloquial),
                ("jato", "house", Colloquial),
                ("chibolo", "kid", Colloquial),
                ("pucha", "darn", Interjection),
                ("yapa", "a little extra", Colloquial),
                ("taita", "father, elder", Address),
            ],
        ),
    ];

    let mut lexicon: HashMap<RegionTag, Vec<SlangEntry>> = table
        .iter()
        .map(|(region, entries)| {
            let entries = entries
                .iter()
                .map(|&(term, meaning, usage)| SlangEntry::new(*region, term, meaning, usage))
                .collect();
            (*region, entries)
        })
        .collect();
    lexicon.insert(Neutral, Vec::new());
    lexicon
}

/// Read-only view over the process-wide slang tables
#[derive(Debug, Clone, Copy, Default)]
pub struct SlangLexicon;

impl SlangLexicon {
    pub fn new() -> Self {
        Self
    }

    /// Entries registered for `region`
    pub fn entries(&self, region: RegionTag) -> &'static [SlangEntry] {
        LEXICON.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Count lexicon hits per region
    pub fn region_counts(&self, text: &str) -> [usize; RegionTag::COUNT] {
        let lowered = text.to_lowercase();
        let mut counts = [0usize; RegionTag::COUNT];
        for region in RegionTag::DETECTION_PRIORITY {
            counts[region.index()] = self
                .entries(region)
                .iter()
                .map(|entry| entry.find_in(&lowered).len())
                .sum();
        }
        counts
    }

    /// Detect the regional variant of `text` from its slang
    ///
    /// The region with the most hits wins; ties go to the region that comes
    /// first in [`RegionTag::DETECTION_PRIORITY`]. Without any hit the text is
    /// `Neutral` with confidence 0.
    pub fn detect_region(&self, text: &str) -> Detection {
        let counts = self.region_counts(text);
        let total: usize = counts.iter().sum();

        let mut best = RegionTag::Neutral;
        let mut best_count = 0usize;
        for region in RegionTag::DETECTION_PRIORITY {
            let count = counts[region.index()];
            if count > best_count {
                best = region;
                best_count = count;
            }
        }

        if best_count == 0 {
            return Detection {
                region: RegionTag::Neutral,
                confidence: 0.0,
                total_matches: 0,
            };
        }

        let share = best_count as f32 / total as f32;
        let saturation = (best_count as f32 / SATURATION_MATCHES).min(1.0);
        Detection {
            region: best,
            confidence: share * saturation,
            total_matches: total,
        }
    }

    /// Slang of `region` found in `text`, ordered by position
    ///
    /// Positions are character offsets into `text` and terms keep the
    /// surface form written by the user.
    pub fn find_markers(&self, text: &str, region: RegionTag) -> Vec<SlangMarker> {
        // Lowercase char by char, remembering which original char each
        // lowered char came from
        let original_chars: Vec<char> = text.chars().collect();
        let mut lowered = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(original_chars.len());
        for (index, ch) in original_chars.iter().enumerate() {
            for lower in ch.to_lowercase() {
                lowered.push(lower);
                origin.push(index);
            }
        }

        let mut markers: Vec<SlangMarker> = self
            .entries(region)
            .iter()
            .flat_map(|entry| {
                entry.find_in(&lowered).into_iter().map(move |byte| (entry, byte))
            })
            .map(|(entry, byte)| {
                let start = lowered[..byte].chars().count();
                let end = start + entry.term.chars().count();
                let position = origin[start];
                let last = origin[end.min(origin.len()).saturating_sub(1)];
                SlangMarker {
                    term: original_chars[position..=last.max(position)].iter().collect(),
                    meaning: entry.meaning,
                    usage: entry.usage,
                    position,
                }
            })
            .collect();

        markers.sort_by_key(|m| m.position);
        markers
    }
}
