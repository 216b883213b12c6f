//! acento CLI - regional Spanish prosody enhancement
//!
//! Command-line interface for text enhancement, chunk assembly and audio
//! quality checks

use acento::{
    audio::{self, AudioData, CrossfadeAlgorithm, WavEncoding},
    prosody::{ProsodicProfileStore, VoiceType},
    text::{RegionSelection, RegionTag},
    AudioQualityAnalyzer, Config, EnhancementPipeline, Error, Result,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "acento",
    about = "Regional Spanish prosody enhancement for text-to-speech",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance text for synthesis and print the result as JSON
    Process {
        /// Text to process
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// Input text file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Region (auto, neutral, mexican, caribbean, rioplatense, andean, colombian, chilean)
        #[arg(short, long)]
        region: Option<RegionSelection>,

        /// Voice type (female, male)
        #[arg(short, long)]
        voice: Option<VoiceType>,

        /// Skip regional phonetic rewriting
        #[arg(long)]
        no_phonetics: bool,

        /// Configuration file path (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score a WAV file and print the quality report as JSON
    AnalyzeAudio {
        /// Input WAV file
        input: PathBuf,

        /// Minimum passing score
        #[arg(long)]
        min_score: Option<u8>,

        /// Configuration file path (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Crossfade two WAV files into one
    Crossfade {
        /// First WAV file
        first: PathBuf,

        /// Second WAV file
        second: PathBuf,

        /// Output audio file path
        #[arg(short, long, default_value = "output.wav")]
        output: PathBuf,

        /// Crossfade duration in seconds
        #[arg(short, long, default_value = "0.1")]
        duration: f32,

        /// Crossfade curve (equal_power, raised_cosine, linear)
        #[arg(short, long, default_value = "raised_cosine")]
        algorithm: CrossfadeAlgorithm,
    },

    /// Assemble synthesized chunks of a text into one WAV file
    Assemble {
        /// Text the chunks were synthesized from
        #[arg(short, long)]
        text: String,

        /// Chunk WAV files, in order
        #[arg(required = true)]
        chunks: Vec<PathBuf>,

        /// Output audio file path
        #[arg(short, long, default_value = "output.wav")]
        output: PathBuf,

        /// Configuration file path (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List supported regions and their prosodic profiles
    Regions,

    /// Generate default configuration file
    InitConfig {
        /// Output path for config file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            text,
            input,
            region,
            voice,
            no_phonetics,
            config,
            output,
        } => {
            let text = match (text, input) {
                (Some(text), _) => text,
                (None, Some(path)) => read_text(&path)?,
                (None, None) => {
                    return Err(Error::Config("either --text or --input is required".into()))
                }
            };

            let mut cfg = load_config(config.as_deref())?;
            if no_phonetics {
                cfg.synthesis.apply_phonetics = false;
            }
            let region = region.unwrap_or(cfg.synthesis.region);
            let voice = voice.unwrap_or(cfg.synthesis.voice);

            let pipeline = EnhancementPipeline::new(cfg)?;
            let enhanced = pipeline.enhance(&text, region, voice)?;

            log::info!("Region: {}", enhanced.processing.region());
            log::info!("Final text: {}", enhanced.final_text());

            let json = serde_json::to_string_pretty(&enhanced)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✓ Enhancement saved to: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::AnalyzeAudio {
            input,
            min_score,
            config,
        } => {
            let cfg = load_config(config.as_deref())?;
            let threshold = min_score.unwrap_or(cfg.quality.min_score);

            let audio = audio::load_audio(&input, None)?;
            log::info!(
                "Loaded {} ({:.2}s at {} Hz)",
                input.display(),
                audio.duration(),
                audio.sample_rate
            );

            let report = AudioQualityAnalyzer::new(cfg.quality).analyze_audio(&audio)?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if report.passes(threshold) {
                println!("✓ Quality {} ({}/100)", report.level, report.overall_score);
            } else {
                println!(
                    "✗ Quality {} ({}/100, needs {})",
                    report.level, report.overall_score, threshold
                );
            }
        }

        Commands::Crossfade {
            first,
            second,
            output,
            duration,
            algorithm,
        } => {
            let a = audio::load_audio(&first, None)?;
            let b = audio::load_audio(&second, Some(a.sample_rate))?;

            let samples = audio::crossfade(&a.samples, &b.samples, duration, a.sample_rate, algorithm);
            let result = AudioData::new(samples, a.sample_rate);
            audio::save_audio(&output, &result, WavEncoding::default())?;

            log::info!("Duration: {:.2}s ({} crossfade)", result.duration(), algorithm);
            println!("✓ Crossfade complete: {}", output.display());
        }

        Commands::Assemble {
            text,
            chunks,
            output,
            config,
        } => {
            let cfg = load_config(config.as_deref())?;
            let pipeline = EnhancementPipeline::new(cfg)?;
            let enhanced = pipeline.enhance_default(&text)?;

            if enhanced.chunks.len() != chunks.len() {
                return Err(Error::MalformedAudio(format!(
                    "text has {} chunks but {} audio files were given",
                    enhanced.chunks.len(),
                    chunks.len()
                )));
            }

            let loaded = audio::load_audio_batch(&chunks, None)?;
            let audio_chunks: Vec<_> = enhanced
                .chunks
                .iter()
                .zip(loaded)
                .map(|(chunk, data)| chunk.with_audio(data.samples, data.sample_rate))
                .collect();

            let assembled = audio::assemble(&audio_chunks, &pipeline.assembly_options())?;
            audio::save_audio(&output, &assembled.audio, WavEncoding::default())?;

            log::info!("Duration: {:.2}s", assembled.audio.duration());
            log::info!(
                "Quality: {} ({}/100)",
                assembled.quality.level,
                assembled.quality.overall_score
            );
            println!("✓ Assembly complete: {}", output.display());
        }

        Commands::Regions => {
            let store = ProsodicProfileStore::new();
            println!("Supported regions");
            println!("=================");
            for region in RegionTag::all() {
                let profile = store.get(region);
                println!("{:<12} {}", region.as_str(), region.description());
                println!(
                    "{:<12} pace {:.2}, F0 female {:.0}-{:.0} Hz, male {:.0}-{:.0} Hz",
                    "",
                    profile.pace_multiplier,
                    profile.f0_range_female.0,
                    profile.f0_range_female.1,
                    profile.f0_range_male.0,
                    profile.f0_range_male.1
                );
            }
        }

        Commands::InitConfig { output } => {
            log::info!("Creating default configuration...");

            Config::create_default(&output)?;

            println!("✓ Configuration saved to: {}", output.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_any(path),
        None => Ok(Config::default()),
    }
}

fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}
