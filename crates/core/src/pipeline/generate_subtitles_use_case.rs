use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::audio::domain::speech_recognizer::{RecognitionError, SpeechRecognizer};
use crate::captions::domain::caption::render_srt;
use crate::captions::domain::caption_formatter::{CaptionError, CaptionFormatter};
use crate::captions::domain::subtitle_writer::SubtitleWriter;
use crate::media::domain::audio_reader::AudioReader;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::shared::subtitle_config::{ConfigError, SubtitleConfig};

const TOTAL_STAGES: usize = 3;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Caption(#[from] CaptionError),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
    #[error("no audio track found in {}", .0.display())]
    NoAudioTrack(PathBuf),
    #[error("no speech segments detected in {}", .0.display())]
    NoSpeechDetected(PathBuf),
    #[error("failed to write subtitles to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleReport {
    pub segments: usize,
    pub captions: usize,
    pub output_path: PathBuf,
}

/// Decode audio, transcribe it and write the captions as an SRT file.
pub struct GenerateSubtitlesUseCase {
    reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    writer: Box<dyn SubtitleWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl GenerateSubtitlesUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        writer: Box<dyn SubtitleWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            recognizer,
            writer,
            logger,
        }
    }

    pub fn run(
        &mut self,
        input: &Path,
        config: &SubtitleConfig,
    ) -> Result<SubtitleReport, PipelineError> {
        // Reject bad settings before any expensive work
        config.validate()?;
        let formatter = CaptionFormatter::new(config.max_words)?;
        let output_path = config.output_path_for(input);

        // 1. Decode the audio track
        self.logger.stage(
            1,
            TOTAL_STAGES,
            &format!("Decoding audio from '{}'", input.display()),
        );
        let started = Instant::now();
        let audio = self
            .reader
            .read_audio(input, WHISPER_SAMPLE_RATE)?
            .ok_or_else(|| PipelineError::NoAudioTrack(input.to_path_buf()))?;
        self.logger.timing("decode", elapsed_ms(started));

        // 2. Transcribe
        self.logger.stage(
            2,
            TOTAL_STAGES,
            &format!(
                "Transcribing {:.1}s of audio with the {} model",
                audio.duration(),
                config.model
            ),
        );
        let started = Instant::now();
        let segments = self.recognizer.transcribe(&audio, config.language())?;
        self.logger.timing("transcribe", elapsed_ms(started));
        if segments.is_empty() {
            return Err(PipelineError::NoSpeechDetected(input.to_path_buf()));
        }

        // 3. Format and write
        self.logger.stage(
            3,
            TOTAL_STAGES,
            &format!(
                "Converting {} segments into SRT (max {} words each)",
                segments.len(),
                formatter.max_words()
            ),
        );
        let started = Instant::now();
        let captions = formatter.chunk(&segments);
        self.writer
            .write(&output_path, &render_srt(&captions))
            .map_err(|source| PipelineError::Write {
                path: output_path.clone(),
                source,
            })?;
        self.logger.timing("format", elapsed_ms(started));

        self.logger.info(&format!(
            "Wrote {} captions to '{}'",
            captions.len(),
            output_path.display()
        ));
        self.logger.summary();

        Ok(SubtitleReport {
            segments: segments.len(),
            captions: captions.len(),
            output_path,
        })
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
