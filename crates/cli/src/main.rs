use std::path::PathBuf;
use std::process;

use clap::Parser;

use captioner_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use captioner_core::captions::infrastructure::srt_file_writer::SrtFileWriter;
use captioner_core::media::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use captioner_core::pipeline::generate_subtitles_use_case::GenerateSubtitlesUseCase;
use captioner_core::pipeline::pipeline_logger::ConsolePipelineLogger;
use captioner_core::shared::model_resolver;
use captioner_core::shared::model_size::ModelSize;
use captioner_core::shared::subtitle_config::{ConfigError, SubtitleConfig};

/// Transcribe a video or audio file into SRT subtitles using Whisper.
#[derive(Parser, Debug)]
#[command(name = "captioner", version)]
struct Cli {
    /// Input video or audio file (e.g. .mp4, .wav).
    input: PathBuf,

    /// Whisper model: tiny, base, small, medium or large.
    #[arg(short, long, default_value = "small")]
    model: String,

    /// Force a language code (e.g. en, es). Auto-detected if omitted.
    #[arg(short, long)]
    language: Option<String>,

    /// Maximum words per SRT caption.
    #[arg(short = 'w', long, default_value = "10")]
    max_words: usize,

    /// Output .srt file (default: <input>.<model>.srt).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory with pre-downloaded ggml model files, checked before downloading.
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let mut logger = ConsolePipelineLogger::new();
    log::info!("Resolving Whisper model '{}'", config.model);
    let model_path = model_resolver::resolve(
        config.model.file_name(),
        &config.model.download_url(),
        cli.model_dir.as_deref(),
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    log::info!("Loading Whisper model '{}'", config.model);
    let recognizer = WhisperRecognizer::load(&model_path)?;
    logger.info(&format!("Model ready: {}", recognizer.model_path().display()));

    let mut use_case = GenerateSubtitlesUseCase::new(
        Box::new(FfmpegAudioReader),
        Box::new(recognizer),
        Box::new(SrtFileWriter::new()),
        Box::new(logger),
    );
    let report = use_case.run(&cli.input, &config)?;
    log::info!(
        "Done! {} captions from {} segments written to '{}'",
        report.captions,
        report.segments,
        report.output_path.display()
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<SubtitleConfig, ConfigError> {
    if !cli.input.is_file() {
        return Err(ConfigError::InputNotFound(cli.input.clone()));
    }
    let model: ModelSize = cli.model.parse()?;
    SubtitleConfig::new(
        model,
        cli.language.clone(),
        cli.max_words,
        cli.output.clone(),
    )
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
