//! Benchmark for the text-side enhancement pipeline

use acento::prosody::{UtteranceProsodyAnalyzer, VoiceType};
use acento::text::{RegionSelection, RegionTag, SlangLexicon, TextNormalizer};
use acento::{Config, EnhancementPipeline};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SHORT: &str = "Che, ¿vos querés venir mañana a las 10:30? Llevamos el mate.";

fn long_text() -> String {
    let paragraph = "El 12/10/2023 la compañía vendió 1.250 unidades por $3.500, \
                     un 15% más que el año anterior. ¿Cómo lo lograron? \
                     Con trabajo, paciencia y un poco de suerte; nada más.";
    vec![paragraph; 10].join("\n\n")
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TextNormalizer::new();
    let text = long_text();

    c.bench_function("normalize_short", |b| {
        b.iter(|| normalizer.normalize(black_box(SHORT)))
    });
    c.bench_function("normalize_long", |b| {
        b.iter(|| normalizer.normalize(black_box(&text)))
    });
}

fn bench_detection(c: &mut Criterion) {
    let lexicon = SlangLexicon::new();

    c.bench_function("detect_region", |b| {
        b.iter(|| lexicon.detect_region(black_box(SHORT)))
    });
}

fn bench_utterance(c: &mut Criterion) {
    let analyzer = UtteranceProsodyAnalyzer::new();
    let text = long_text();

    c.bench_function("utterance_analysis_long", |b| {
        b.iter(|| analyzer.analyze(black_box(&text)))
    });
}

fn bench_enhance(c: &mut Criterion) {
    let pipeline = EnhancementPipeline::new(Config::default()).unwrap();
    let text = long_text();

    c.bench_function("enhance_short", |b| {
        b.iter(|| {
            pipeline
                .enhance(black_box(SHORT), RegionSelection::Auto, VoiceType::Female)
                .unwrap()
        })
    });
    c.bench_function("enhance_long", |b| {
        b.iter(|| {
            pipeline
                .enhance(
                    black_box(&text),
                    RegionSelection::Fixed(RegionTag::Andean),
                    VoiceType::Male,
                )
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_detection,
    bench_utterance,
    bench_enhance
);
criterion_main!(benches);
