use std::path::PathBuf;

use thiserror::Error;

use super::pcm_audio::PcmAudio;
use crate::captions::domain::speech_segment::SpeechSegment;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("failed to load speech model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
    #[error("failed to decode audio from {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("speech recognition failed: {0}")]
    Inference(String),
}

/// Domain interface for speech-to-text transcription.
///
/// Implementations return time-stamped segments in recognition order.
/// `language` is an ISO code hint; `None` asks the engine to auto-detect.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio: &PcmAudio,
        language: Option<&str>,
    ) -> Result<Vec<SpeechSegment>, RecognitionError>;
}
