//! Pipeline Integration Tests for acento
//!
//! These tests drive the public API end to end:
//! text → normalization → region → prosody → parameters → chunks → audio → quality
//!
//! # Test Categories
//!
//! 1. **Text Processing**: normalization, region detection, phonetics
//! 2. **Prosody**: utterance, discourse and breath analysis
//! 3. **Audio**: crossfading, assembly, I/O
//! 4. **Quality Validation**: scoring of clean and damaged audio
//! 5. **Configuration**: saving and loading

use acento::audio::{self, AudioChunk, AudioData, CrossfadeAlgorithm, WavEncoding};
use acento::pipeline::BoundaryKind;
use acento::prosody::{MarkerKind, UtteranceProsodyAnalyzer, VoiceType};
use acento::text::{RegionSelection, RegionTag, SlangLexicon, TextNormalizer};
use acento::{
    AudioQualityAnalyzer, Config, EnhancementPipeline, Error, QualityLevel, RegionalTextProcessor,
    SAMPLE_RATE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Voiced, slightly noisy stand-in for synthesized speech
fn fake_speech(seconds: f32, sample_rate: u32, seed: u32) -> Vec<f32> {
    let len = (seconds * sample_rate as f32) as usize;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    (0..len)
        .map(|i| {
            let noise = rng.gen_range(-0.001f32..0.001);
            let t = i as f32 / sample_rate as f32;
            if (t % 0.5) < 0.4 {
                0.3 * (2.0 * PI * 170.0 * t).sin() + 0.1 * (2.0 * PI * 340.0 * t).sin() + noise
            } else {
                noise
            }
        })
        .collect()
}

// ============================================================================
// Text Processing Integration Tests
// ============================================================================

/// Test: numbers and currency become spoken words
#[test]
fn test_normalize_currency_amount() {
    println!("🔤 Testing normalization:");

    let normalizer = TextNormalizer::new();
    let normalized = normalizer.normalize("Tengo 25 euros");
    println!("   'Tengo 25 euros' → '{}'", normalized);

    assert!(normalized.contains("veinticinco"));
    assert!(normalized.contains("euros"));
    assert_eq!(normalizer.normalize(&normalized), normalized);
}

/// Test: slang picks out the region
#[test]
fn test_detect_rioplatense() {
    println!("🌎 Testing region detection:");

    let detection = SlangLexicon::new().detect_region("Che boludo, ¿vos querés tomar unos mates?");
    println!(
        "   → {} (confidence {:.2}, {} hits)",
        detection.region, detection.confidence, detection.total_matches
    );

    assert_eq!(detection.region, RegionTag::Rioplatense);
    assert!(detection.confidence > 0.0);
}

/// Test: every region processes the same sentence without failing
#[test]
fn test_every_region_processes() {
    println!("🗺️ Testing all regions:");

    let processor = RegionalTextProcessor::new();
    for region in RegionTag::all() {
        let result = processor
            .process("Ya llegamos a las 10:30, ¿verdad?", RegionSelection::Fixed(region), true)
            .unwrap();
        println!("   {:<12} → {}", region.as_str(), result.final_text());

        assert_eq!(result.region(), region);
        assert_eq!(result.detection_confidence(), 1.0);
        assert!(result.normalized_text().contains("diez y media"));
    }
}

/// Test: unknown region names and blank text are rejected
#[test]
fn test_invalid_requests() {
    println!("🚫 Testing invalid requests:");

    let processor = RegionalTextProcessor::new();
    assert!(matches!(
        processor.process_named("Hola", "klingon", true),
        Err(Error::InvalidRegion(_))
    ));
    assert!(matches!(
        processor.process("   ", RegionSelection::Auto, true),
        Err(Error::EmptyInput)
    ));
    println!("   ✅ Both rejected");
}

// ============================================================================
// Prosody Integration Tests
// ============================================================================

/// Test: a yes/no question gets a single rising marker
#[test]
fn test_yes_no_question_rises() {
    println!("❓ Testing question intonation:");

    let analysis = UtteranceProsodyAnalyzer::new().analyze("¿Vienes?");
    println!("   marked: {}", analysis.marked_text);

    assert_eq!(analysis.markers.len(), 1);
    assert_eq!(analysis.markers[0].kind, MarkerKind::QuestionRise);
    assert_eq!(analysis.markers[0].position, 0);
}

/// Test: breath points stay within the hard spacing limit
#[test]
fn test_long_text_breathes() {
    println!("🫁 Testing breath planning:");

    let sentence = "El tren salió temprano de la estación y cruzó el valle despacio, \
                    mientras los pasajeros miraban por la ventana";
    let text = vec![sentence; 8].join(". ") + ".";

    let pipeline = EnhancementPipeline::new(Config::default()).unwrap();
    let enhanced = pipeline
        .enhance(&text, RegionSelection::Fixed(RegionTag::Neutral), VoiceType::Male)
        .unwrap();

    let breath = &enhanced.breath;
    println!(
        "   {} pauses, {} breaths, ~{:.1}s",
        breath.pauses.len(),
        breath.breath_points.len(),
        breath.estimated_duration_s
    );

    assert!(!breath.breath_points.is_empty());
    let mut last_onset = 0.0f32;
    for pause in breath.breaths() {
        assert!(pause.onset_s - last_onset <= 25.0 + 1e-3);
        last_onset = pause.onset_s;
    }
    assert!(breath.estimated_duration_s - last_onset <= 25.0 + 1e-3);
}

/// Test: declination units cover every phrase exactly once
#[test]
fn test_discourse_units_partition_phrases() {
    println!("📉 Testing declination units:");

    let pipeline = EnhancementPipeline::new(Config::default()).unwrap();
    let enhanced = pipeline
        .enhance(
            "Mi hermana vive en Lima. Mi hermana trabaja mucho, pero descansa los domingos.",
            RegionSelection::Auto,
            VoiceType::Female,
        )
        .unwrap();

    let discourse = &enhanced.discourse;
    let mut next = 0;
    for unit in &discourse.declination_units {
        assert_eq!(unit.phrases.start, next);
        assert!(unit.f0_end_hz <= unit.f0_start_hz);
        next = unit.phrases.end;
    }
    assert_eq!(next, discourse.phrases.len());
    println!(
        "   ✅ {} phrases in {} units",
        discourse.phrases.len(),
        discourse.declination_units.len()
    );
}

// ============================================================================
// Audio Integration Tests
// ============================================================================

/// Test: equal-power crossfade of silence keeps silence
#[test]
fn test_crossfade_silent_buffers() {
    println!("🔀 Testing crossfade:");

    let a = vec![0.0f32; 24000];
    let b = vec![0.0f32; 24000];
    let merged = audio::crossfade(&a, &b, 0.5, 24000, CrossfadeAlgorithm::EqualPower);

    println!("   {} + {} → {} samples", a.len(), b.len(), merged.len());
    assert_eq!(merged.len(), 36000);
    assert!(merged.iter().all(|&s| s == 0.0));
}

/// Test: text → chunks → fake synthesis → assembled, scored audio
#[test]
fn test_full_enhance_and_assemble() {
    println!("🎙️ Testing full flow:");

    let mut config = Config::default();
    config.synthesis.max_chunk_chars = 60;
    let pipeline = EnhancementPipeline::new(config).unwrap();

    let text = "Órale, güey, mañana vamos al mercado temprano. \
                ¿Quieres venir con nosotros? Luego comemos unos tacos, qué chido.";
    let enhanced = pipeline.enhance_default(text).unwrap();
    println!(
        "   region {} → {} chunks",
        enhanced.processing.region(),
        enhanced.chunks.len()
    );
    assert_eq!(enhanced.processing.region(), RegionTag::Mexican);
    assert!(enhanced.chunks.len() >= 2);

    // Acoustic model stand-in at a different rate than the output
    let chunks: Vec<AudioChunk> = enhanced
        .chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            let seconds = chunk.text.chars().count() as f32 * 0.06;
            chunk.with_audio(fake_speech(seconds, 22050, i as u32), 22050)
        })
        .collect();

    let options = pipeline.assembly_options();
    let assembled = audio::assemble(&chunks, &options).unwrap();

    println!(
        "   {:.2}s, crossfades {:?}, quality {} ({}/100)",
        assembled.audio.duration(),
        assembled.crossfades_s,
        assembled.quality.level,
        assembled.quality.overall_score
    );

    assert_eq!(assembled.audio.sample_rate, SAMPLE_RATE);
    assert_eq!(assembled.crossfades_s.len(), chunks.len() - 1);
    assert!(assembled.crossfades_s.iter().all(|&c| c > 0.0 && c <= 1.0));
    let peak = assembled.audio.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak <= options.target_peak + 1e-3);
    assert!(assembled.audio.samples[0].abs() < 1e-3);
    assert!(assembled.quality.overall_score <= 100);
}

/// Test: chunks with a zero sample rate are rejected
#[test]
fn test_assemble_rejects_malformed_chunk() {
    println!("🧱 Testing malformed chunks:");

    let chunks = vec![
        AudioChunk::new(vec![0.1; 2400], 24000, BoundaryKind::PunctuationPause),
        AudioChunk::new(vec![0.1; 2400], 0, BoundaryKind::Unspecified),
    ];
    let result = audio::assemble(&chunks, &Default::default());
    assert!(matches!(result, Err(Error::MalformedAudio(_))));
    println!("   ✅ Rejected");
}

/// Test: WAV files written by the crate load back at the same rate
#[test]
fn test_wav_round_trip() {
    println!("💾 Testing audio I/O:");

    let dir = std::env::temp_dir().join("acento_integration");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("speech.wav");

    let original = AudioData::new(fake_speech(1.0, SAMPLE_RATE, 3), SAMPLE_RATE);
    audio::save_audio(&path, &original, WavEncoding::Float32).unwrap();
    let loaded = audio::load_audio(&path, None).unwrap();

    assert_eq!(loaded.sample_rate, SAMPLE_RATE);
    assert_eq!(loaded.samples.len(), original.samples.len());
    println!("   ✅ {} samples", loaded.samples.len());

    let _ = std::fs::remove_file(&path);
}

// ============================================================================
// Quality Validation Integration Tests
// ============================================================================

/// Test: clean audio passes, clipped audio does not
#[test]
fn test_quality_clean_vs_clipped() {
    println!("📊 Testing quality scoring:");

    let analyzer = AudioQualityAnalyzer::new(Default::default());

    let clean = fake_speech(10.0, SAMPLE_RATE, 11);
    let clean_report = analyzer.analyze(&clean, SAMPLE_RATE).unwrap();
    println!(
        "   clean:   {} ({}/100)",
        clean_report.level, clean_report.overall_score
    );

    let mut clipped = clean.clone();
    for i in (0..clipped.len()).step_by(50) {
        clipped[i] = 1.0;
    }
    let clipped_report = analyzer.analyze(&clipped, SAMPLE_RATE).unwrap();
    println!(
        "   clipped: {} ({}/100)",
        clipped_report.level, clipped_report.overall_score
    );

    assert!(clipped_report.clipping_rate >= 0.019);
    assert!(clipped_report.level <= QualityLevel::Poor);
    assert!(clipped_report.overall_score < clean_report.overall_score);
    assert!(!clipped_report.recommendations.is_empty());
}

/// Test: empty and non-finite buffers are malformed
#[test]
fn test_quality_rejects_malformed_audio() {
    let analyzer = AudioQualityAnalyzer::new(Default::default());
    assert!(analyzer.analyze(&[], SAMPLE_RATE).is_err());
    assert!(analyzer.analyze(&[0.0, f32::NAN], SAMPLE_RATE).is_err());
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test: saved configuration loads back with the same values
#[test]
fn test_config_round_trip() {
    println!("⚙️ Testing configuration:");

    let dir = std::env::temp_dir().join("acento_integration");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.yaml");

    let mut config = Config::default();
    config.synthesis.region = RegionSelection::Fixed(RegionTag::Chilean);
    config.crossfade.algorithm = CrossfadeAlgorithm::Linear;
    config.save(&path).unwrap();

    let loaded = Config::load_any(&path).unwrap();
    assert_eq!(loaded.synthesis.region, RegionSelection::Fixed(RegionTag::Chilean));
    assert_eq!(loaded.crossfade.algorithm, CrossfadeAlgorithm::Linear);
    assert_eq!(loaded.adaptive.max_steps, config.adaptive.max_steps);
    println!("   ✅ {}", path.display());

    let _ = std::fs::remove_file(&path);
}
