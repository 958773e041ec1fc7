use std::path::Path;

use crate::audio::domain::pcm_audio::PcmAudio;
use crate::audio::domain::speech_recognizer::RecognitionError;

/// Domain interface for extracting the audio track of a media file.
pub trait AudioReader: Send {
    /// Decode the audio track to mono PCM at the given sample rate.
    /// Returns None if the file has no audio track.
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<PcmAudio>, RecognitionError>;
}
