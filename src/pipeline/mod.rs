//! Text-side pipeline orchestration
//!
//! Coordinates regional processing, prosody analysis, parameter selection
//! and chunking ahead of synthesis.

pub mod adaptive;
pub mod enhance;
pub mod regional;

pub use adaptive::{AdaptiveParameterSelector, AdaptiveParameters, BoundaryKind};
pub use enhance::{EnhancedText, EnhancementPipeline, SynthesisChunk};
pub use regional::{ProcessingResult, RegionalTextProcessor};

use crate::text::{char_len, TextNormalizer};

/// Pipeline stage enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    RegionalProcessing,
    UtteranceAnalysis,
    DiscourseAnalysis,
    BreathModelling,
    ParameterSelection,
    Chunking,
}

impl PipelineStage {
    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::RegionalProcessing => "Regional processing",
            PipelineStage::UtteranceAnalysis => "Utterance analysis",
            PipelineStage::DiscourseAnalysis => "Discourse analysis",
            PipelineStage::BreathModelling => "Breath modelling",
            PipelineStage::ParameterSelection => "Parameter selection",
            PipelineStage::Chunking => "Chunking",
        }
    }

    /// Get all stages in order
    pub fn all() -> [PipelineStage; 6] {
        [
            PipelineStage::RegionalProcessing,
            PipelineStage::UtteranceAnalysis,
            PipelineStage::DiscourseAnalysis,
            PipelineStage::BreathModelling,
            PipelineStage::ParameterSelection,
            PipelineStage::Chunking,
        ]
    }
}

/// Split text into synthesis segments of at most `max_chars` characters
///
/// Whole sentences are grouped first. A sentence that is too long on its own
/// is cut at commas, and a clause that is still too long at word boundaries.
/// A single word longer than `max_chars` becomes its own segment.
pub fn segment_text(text: &str, max_chars: usize) -> Vec<String> {
    let normalizer = TextNormalizer::new();
    let mut pieces = Vec::new();

    for sentence in normalizer.split_sentences(text) {
        if char_len(&sentence) <= max_chars {
            pieces.push(sentence);
            continue;
        }
        for clause in sentence.split_inclusive(',') {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }
            if char_len(clause) <= max_chars {
                pieces.push(clause.to_string());
            } else {
                pieces.extend(group(clause.split_whitespace(), max_chars));
            }
        }
    }

    group(pieces.iter().map(String::as_str), max_chars)
}

/// Greedily join pieces with single spaces while they fit in `max_chars`
fn group<'a>(pieces: impl IntoIterator<Item = &'a str>, max_chars: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in pieces {
        let piece_len = char_len(piece);
        if !current.is_empty() && current_len + 1 + piece_len > max_chars {
            segments.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(piece);
        current_len += piece_len;
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
