//! Speech-to-subtitle pipeline: decode a media file's audio, transcribe it
//! with Whisper and format the recognized segments as SRT captions.

pub mod audio {
    pub mod domain {
        pub mod pcm_audio;
        pub mod speech_recognizer;
    }
    pub mod infrastructure {
        pub mod whisper_recognizer;
    }
}

pub mod captions {
    pub mod domain {
        pub mod caption;
        pub mod caption_formatter;
        pub mod speech_segment;
        pub mod subtitle_writer;
        pub mod timestamp;
    }
    pub mod infrastructure {
        pub mod srt_file_writer;
    }
}

pub mod media {
    pub mod domain {
        pub mod audio_reader;
    }
    pub mod infrastructure {
        pub mod ffmpeg_audio_reader;
    }
}

pub mod pipeline {
    pub mod generate_subtitles_use_case;
    pub mod pipeline_logger;
}

pub mod shared {
    pub mod constants;
    pub mod model_resolver;
    pub mod model_size;
    pub mod subtitle_config;
}

pub use captions::domain::caption::{render_srt, Caption};
pub use captions::domain::caption_formatter::{segments_to_srt, CaptionError, CaptionFormatter};
pub use captions::domain::speech_segment::SpeechSegment;
pub use captions::domain::timestamp::format_timestamp;
