//! Full text-side enhancement
//!
//! Runs regional processing and every prosody analyzer over one text and
//! cuts the result into synthesis chunks with their own parameters.

use super::adaptive::{AdaptiveParameterSelector, AdaptiveParameters, BoundaryKind};
use super::regional::{ProcessingResult, RegionalTextProcessor};
use super::{segment_text, PipelineStage};
use crate::audio::{AssemblyOptions, AudioChunk};
use crate::prosody::{
    BreathPauseModeler, BreathPlan, DiscourseAnalysis, DiscourseProsodyAnalyzer,
    UtteranceAnalysis, UtteranceProsodyAnalyzer, VoiceType,
};
use crate::text::RegionSelection;
use crate::{Config, Result};
use rayon::prelude::*;
use serde::Serialize;

/// One piece of text to hand to the acoustic model
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisChunk {
    pub text: String,
    /// Seam after this chunk
    pub boundary: BoundaryKind,
    pub parameters: AdaptiveParameters,
}

impl SynthesisChunk {
    /// Pair this chunk's metadata with the audio synthesized for it
    pub fn with_audio(&self, samples: Vec<f32>, sample_rate: u32) -> AudioChunk {
        AudioChunk::new(samples, sample_rate, self.boundary)
    }
}

/// Everything known about a text before synthesis
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedText {
    pub processing: ProcessingResult,
    pub utterance: UtteranceAnalysis,
    pub discourse: DiscourseAnalysis,
    pub breath: BreathPlan,
    /// Parameters for the text as a whole
    pub parameters: AdaptiveParameters,
    pub chunks: Vec<SynthesisChunk>,
}

impl EnhancedText {
    pub fn final_text(&self) -> &str {
        self.processing.final_text()
    }
}

/// Text-side pipeline driven by one [`Config`]
#[derive(Debug, Clone)]
pub struct EnhancementPipeline {
    config: Config,
    processor: RegionalTextProcessor,
    selector: AdaptiveParameterSelector,
    utterance: UtteranceProsodyAnalyzer,
}

impl EnhancementPipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "enhancement pipeline ready (default region {}, voice {})",
            config.synthesis.region,
            config.synthesis.voice
        );
        Ok(Self {
            selector: AdaptiveParameterSelector::new(config.adaptive.clone()),
            processor: RegionalTextProcessor::new(),
            utterance: UtteranceProsodyAnalyzer::new(),
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Options for assembling the audio of this pipeline's chunks
    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions::from(&self.config)
    }

    /// Enhance with the configured region and voice
    pub fn enhance_default(&self, text: &str) -> Result<EnhancedText> {
        self.enhance(text, self.config.synthesis.region, self.config.synthesis.voice)
    }

    pub fn enhance(
        &self,
        text: &str,
        selection: RegionSelection,
        voice: VoiceType,
    ) -> Result<EnhancedText> {
        let preview: String = text.chars().take(50).collect();
        log::info!("Enhancing text: {}", preview);

        let synthesis = &self.config.synthesis;

        log::debug!("{}...", PipelineStage::RegionalProcessing.name());
        let processing = self
            .processor
            .process(text, selection, synthesis.apply_phonetics)?;
        let final_text = processing.final_text();
        let profile = processing.prosodic_profile();

        log::debug!("{}...", PipelineStage::UtteranceAnalysis.name());
        let utterance = self.utterance.analyze(final_text);

        log::debug!("{}...", PipelineStage::DiscourseAnalysis.name());
        let discourse = DiscourseProsodyAnalyzer::new(profile).analyze(final_text, voice);

        log::debug!("{}...", PipelineStage::BreathModelling.name());
        let breath = BreathPauseModeler::new(profile, self.config.breath.clone())
            .model(final_text, processing.prosodic_markers());

        log::debug!("{}...", PipelineStage::ParameterSelection.name());
        let parameters =
            self.selector
                .select(final_text, synthesis.base_steps, synthesis.base_crossfade_s);

        log::debug!("{}...", PipelineStage::Chunking.name());
        let chunks: Vec<SynthesisChunk> = segment_text(final_text, synthesis.max_chunk_chars)
            .into_iter()
            .map(|chunk| {
                let parameters =
                    self.selector
                        .select(&chunk, synthesis.base_steps, synthesis.base_crossfade_s);
                SynthesisChunk {
                    text: chunk,
                    boundary: parameters.boundary,
                    parameters,
                }
            })
            .collect();

        log::info!(
            "Enhanced as {} ({} chunks, {} steps, ~{:.1} s)",
            processing.region(),
            chunks.len(),
            parameters.steps,
            breath.estimated_duration_s
        );

        Ok(EnhancedText {
            processing,
            utterance,
            discourse,
            breath,
            parameters,
            chunks,
        })
    }

    /// Enhance many texts in parallel
    ///
    /// Results keep the input order; one failing text does not stop the rest.
    pub fn enhance_batch<S: AsRef<str> + Sync>(
        &self,
        texts: &[S],
        selection: RegionSelection,
        voice: VoiceType,
    ) -> Vec<Result<EnhancedText>> {
        texts
            .par_iter()
            .map(|text| self.enhance(text.as_ref(), selection, voice))
            .collect()
    }
}
