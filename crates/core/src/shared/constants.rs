/// Directory name used under the platform cache/data dir.
pub const APP_DIR_NAME: &str = "captioner";

/// Whisper models are trained on 16 kHz mono audio.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

pub const SRT_EXTENSION: &str = "srt";
