use std::fmt;
use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::pcm_audio::PcmAudio;
use crate::audio::domain::speech_recognizer::{RecognitionError, SpeechRecognizer};
use crate::captions::domain::speech_segment::SpeechSegment;
use crate::shared::constants::WHISPER_SAMPLE_RATE;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// The model is loaded once in [`WhisperRecognizer::load`] and reused for
/// every call to `transcribe`.
pub struct WhisperRecognizer {
    model_path: PathBuf,
    context: WhisperContext,
}

impl WhisperRecognizer {
    pub fn load(model_path: &Path) -> Result<Self, RecognitionError> {
        let model_load = |reason: String| RecognitionError::ModelLoad {
            path: model_path.to_path_buf(),
            reason,
        };

        if !model_path.exists() {
            return Err(model_load("model file not found".to_string()));
        }
        let path_str = model_path
            .to_str()
            .ok_or_else(|| model_load("path is not valid UTF-8".to_string()))?;

        let context =
            WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
                .map_err(|e| model_load(e.to_string()))?;

        log::info!("Loaded Whisper model from {}", model_path.display());
        Ok(Self {
            model_path: model_path.to_path_buf(),
            context,
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl fmt::Debug for WhisperRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhisperRecognizer")
            .field("model_path", &self.model_path)
            .finish_non_exhaustive()
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &PcmAudio,
        language: Option<&str>,
    ) -> Result<Vec<SpeechSegment>, RecognitionError> {
        if audio.sample_rate() != WHISPER_SAMPLE_RATE {
            return Err(RecognitionError::Inference(format!(
                "Whisper expects {WHISPER_SAMPLE_RATE} Hz audio, got {} Hz",
                audio.sample_rate()
            )));
        }

        let mut state = self
            .context
            .create_state()
            .map_err(|e| RecognitionError::Inference(format!("failed to create state: {e}")))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(language.unwrap_or("auto")));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| RecognitionError::Inference(e.to_string()))?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = match segment.to_str() {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("Skipping segment {seg_idx} with undecodable text: {e}");
                    continue;
                }
            };

            // Segment timestamps are in centiseconds (10ms units)
            segments.push(SpeechSegment::new(
                centiseconds_to_seconds(segment.start_timestamp()),
                centiseconds_to_seconds(segment.end_timestamp()),
                text,
            ));
        }

        log::debug!("Whisper produced {} segments", segments.len());
        Ok(segments)
    }
}

fn centiseconds_to_seconds(cs: i64) -> f64 {
    cs as f64 / 100.0
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
