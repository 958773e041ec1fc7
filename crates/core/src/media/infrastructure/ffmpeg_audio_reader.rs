use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleType;
use ffmpeg_next::format::Sample;
use ffmpeg_next::software::resampling;
use ffmpeg_next::util::frame::audio::Audio as AudioFrame;

use crate::audio::domain::pcm_audio::PcmAudio;
use crate::audio::domain::speech_recognizer::RecognitionError;
use crate::media::domain::audio_reader::AudioReader;

/// Decodes and resamples the best audio stream of a media file using ffmpeg-next.
pub struct FfmpegAudioReader;

impl AudioReader for FfmpegAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<PcmAudio>, RecognitionError> {
        decode(path, target_sample_rate).map_err(|e| RecognitionError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn decode(path: &Path, target_sample_rate: u32) -> Result<Option<PcmAudio>, ffmpeg_next::Error> {
    ffmpeg_next::init()?;

    let mut ictx = ffmpeg_next::format::input(path)?;

    let audio_stream = match ictx.streams().best(ffmpeg_next::media::Type::Audio) {
        Some(stream) => stream,
        None => return Ok(None),
    };
    let audio_stream_index = audio_stream.index();

    let codec_ctx =
        ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
    let mut decoder = codec_ctx.decoder().audio()?;
    log::debug!(
        "Decoding audio stream {audio_stream_index}: {} Hz, {} channels",
        decoder.rate(),
        decoder.channels()
    );

    let mut resampler = resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        Sample::F32(SampleType::Planar),
        ffmpeg_next::ChannelLayout::MONO,
        target_sample_rate,
    )?;

    let mut samples: Vec<f32> = Vec::new();
    let mut decoded = AudioFrame::empty();
    let mut resampled = AudioFrame::empty();

    for (stream, packet) in ictx.packets() {
        if stream.index() != audio_stream_index {
            continue;
        }

        decoder.send_packet(&packet)?;
        while decoder.receive_frame(&mut decoded).is_ok() {
            resampler.run(&decoded, &mut resampled)?;
            extract_f32_samples(&resampled, &mut samples);
        }
    }

    decoder.send_eof()?;
    while decoder.receive_frame(&mut decoded).is_ok() {
        resampler.run(&decoded, &mut resampled)?;
        extract_f32_samples(&resampled, &mut samples);
    }

    // The resampler may still hold buffered samples
    if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
        if delay.output > 0 {
            extract_f32_samples(&resampled, &mut samples);
        }
    }

    Ok(Some(PcmAudio::new(samples, target_sample_rate)))
}

/// Extract f32 samples from a planar mono resampled frame.
fn extract_f32_samples(frame: &AudioFrame, out: &mut Vec<f32>) {
    let num_samples = frame.samples();
    if num_samples == 0 {
        return;
    }
    let data = frame.data(0);
    // SAFETY: the resampler emits planar F32, so plane 0 holds `num_samples` f32s.
    let floats = unsafe { std::slice::from_raw_parts(data.as_ptr() as *const f32, num_samples) };
    out.extend_from_slice(floats);
}
