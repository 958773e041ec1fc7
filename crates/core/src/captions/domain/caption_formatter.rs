use thiserror::Error;

use super::caption::{render_srt, Caption};
use super::speech_segment::SpeechSegment;

pub const DEFAULT_MAX_WORDS: usize = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CaptionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Splits recognized segments into captions of at most `max_words` words.
///
/// A segment longer than the limit is cut into `k = ceil(words / max_words)`
/// chunks, and its time span is shared equally between them: chunk `i`
/// covers `[start + i*d/k, start + (i+1)*d/k]`. Chunks of one segment are
/// contiguous and together cover exactly the segment's span.
///
/// Malformed timing is clamped rather than rejected: a negative start becomes
/// `0.0` and an end before the start becomes the start. Segments without any
/// words produce no captions and do not consume an index.
#[derive(Debug, Clone, Copy)]
pub struct CaptionFormatter {
    max_words: usize,
}

impl CaptionFormatter {
    pub fn new(max_words: usize) -> Result<Self, CaptionError> {
        if max_words == 0 {
            return Err(CaptionError::InvalidConfiguration(
                "max words per caption must be a positive integer, got 0".to_string(),
            ));
        }
        Ok(Self { max_words })
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn chunk(&self, segments: &[SpeechSegment]) -> Vec<Caption> {
        let mut captions = Vec::new();

        for (position, segment) in segments.iter().enumerate() {
            let words = segment.words();
            if words.is_empty() {
                continue;
            }

            let (start, end) = clamp_timing(position, segment);
            let chunks: Vec<&[&str]> = words.chunks(self.max_words).collect();
            let k = chunks.len();
            let step = (end - start) / k as f64;
            let boundary = |i: usize| {
                if i == k {
                    end
                } else {
                    start + i as f64 * step
                }
            };

            for (i, chunk) in chunks.into_iter().enumerate() {
                captions.push(Caption {
                    index: captions.len() + 1,
                    start: boundary(i),
                    end: boundary(i + 1),
                    text: chunk.join(" "),
                });
            }
        }

        captions
    }

    pub fn to_srt(&self, segments: &[SpeechSegment]) -> String {
        render_srt(&self.chunk(segments))
    }
}

impl Default for CaptionFormatter {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

/// Format recognized segments as SRT text with at most `max_words` words per
/// caption. Empty input yields an empty string.
pub fn segments_to_srt(
    segments: &[SpeechSegment],
    max_words: usize,
) -> Result<String, CaptionError> {
    Ok(CaptionFormatter::new(max_words)?.to_srt(segments))
}

fn clamp_timing(position: usize, segment: &SpeechSegment) -> (f64, f64) {
    let mut start = segment.start;
    if start.is_nan() || start < 0.0 {
        log::warn!("Segment {position}: start {start} is invalid, clamping to 0");
        start = 0.0;
    }
    let mut end = segment.end;
    if end.is_nan() || end < start {
        log::warn!("Segment {position}: end {end} precedes start {start}, clamping to start");
        end = start;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const TWELVE: &str = "one two three four five six seven eight nine ten eleven twelve";

    fn seg(start: f64, end: f64, text: &str) -> SpeechSegment {
        SpeechSegment::new(start, end, text)
    }

    fn formatter(max_words: usize) -> CaptionFormatter {
        CaptionFormatter::new(max_words).unwrap()
    }

    // ── Configuration ────────────────────────────────────────────────

    #[test]
    fn test_zero_max_words_is_invalid_configuration() {
        let err = CaptionFormatter::new(0).unwrap_err();
        assert!(matches!(err, CaptionError::InvalidConfiguration(_)));
        assert!(segments_to_srt(&[seg(0.0, 1.0, "hi")], 0).is_err());
    }

    #[test]
    fn test_default_is_ten_words() {
        assert_eq!(CaptionFormatter::default().max_words(), 10);
    }

    // ── Empty input ──────────────────────────────────────────────────

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(1000)]
    fn test_empty_input_produces_empty_output(#[case] max_words: usize) {
        assert_eq!(segments_to_srt(&[], max_words).unwrap(), "");
    }

    #[test]
    fn test_whitespace_segment_is_skipped_without_index_gap() {
        let segments = vec![
            seg(0.0, 1.0, "first"),
            seg(1.0, 2.0, "   \t "),
            seg(2.0, 3.0, ""),
            seg(3.0, 4.0, "second"),
        ];
        let captions = formatter(10).chunk(&segments);
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].index, 1);
        assert_eq!(captions[1].index, 2);
        assert_eq!(captions[1].text, "second");
        assert_eq!(captions[1].start, 3.0);
    }

    // ── Chunking ─────────────────────────────────────────────────────

    #[test]
    fn test_twelve_words_split_into_two_halves() {
        let srt = segments_to_srt(&[seg(0.0, 4.0, TWELVE)], 10).unwrap();
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:02,000\n\
             one two three four five six seven eight nine ten\n\n\
             2\n00:00:02,000 --> 00:00:04,000\n\
             eleven twelve\n\n"
        );
    }

    #[test]
    fn test_short_segment_kept_whole_and_trimmed() {
        let captions = formatter(10).chunk(&[seg(1.25, 2.5, "  Hello,   world!  ")]);
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].text, "Hello, world!");
        assert_eq!(captions[0].start, 1.25);
        assert_eq!(captions[0].end, 2.5);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_chunk() {
        let captions = formatter(4).chunk(&[seg(0.0, 3.0, "a b c d e f g h")]);
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].text, "a b c d");
        assert_eq!(captions[1].text, "e f g h");
    }

    #[rstest]
    #[case(1, 12)]
    #[case(3, 4)]
    #[case(5, 3)]
    #[case(11, 2)]
    #[case(12, 1)]
    #[case(50, 1)]
    fn test_chunk_count_is_ceiling(#[case] max_words: usize, #[case] expected: usize) {
        let captions = formatter(max_words).chunk(&[seg(0.0, 6.0, TWELVE)]);
        assert_eq!(captions.len(), expected);
    }

    #[test]
    fn test_word_order_preserved_across_chunks() {
        let captions = formatter(5).chunk(&[seg(0.0, 6.0, TWELVE)]);
        let rejoined: Vec<&str> = captions
            .iter()
            .flat_map(|c| c.text.split_whitespace())
            .collect();
        assert_eq!(rejoined.join(" "), TWELVE);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    #[case(10)]
    fn test_word_count_bound(#[case] max_words: usize) {
        let segments = vec![
            seg(0.0, 2.0, TWELVE),
            seg(2.0, 2.5, "just three words"),
            seg(3.0, 9.0, &format!("{TWELVE} {TWELVE}")),
        ];
        for c in formatter(max_words).chunk(&segments) {
            let n = c.word_count();
            assert!((1..=max_words).contains(&n), "caption {} has {n} words", c.index);
        }
    }

    // ── Indexing ─────────────────────────────────────────────────────

    #[test]
    fn test_indices_are_contiguous_across_segments() {
        let segments = vec![
            seg(0.0, 4.0, TWELVE),
            seg(4.0, 5.0, " "),
            seg(5.0, 9.0, TWELVE),
            seg(9.0, 10.0, "tail"),
        ];
        let captions = formatter(5).chunk(&segments);
        let indices: Vec<usize> = captions.iter().map(|c| c.index).collect();
        let expected: Vec<usize> = (1..=captions.len()).collect();
        assert_eq!(indices, expected);
        assert_eq!(captions.len(), 7);
    }

    // ── Timing ───────────────────────────────────────────────────────

    #[test]
    fn test_sub_spans_partition_parent_span() {
        let captions = formatter(3).chunk(&[seg(1.3, 8.7, TWELVE)]);
        assert_eq!(captions.len(), 4);
        assert_eq!(captions.first().unwrap().start, 1.3);
        assert_eq!(captions.last().unwrap().end, 8.7);
        for pair in captions.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for c in &captions {
            assert_relative_eq!(c.duration(), 7.4 / 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_uneven_chunks_get_equal_time() {
        let captions = formatter(10).chunk(&[seg(0.0, 4.0, TWELVE)]);
        assert_relative_eq!(captions[0].duration(), 2.0);
        assert_relative_eq!(captions[1].duration(), 2.0);
    }

    #[test]
    fn test_zero_duration_segment() {
        let captions = formatter(2).chunk(&[seg(5.0, 5.0, "a b c")]);
        assert_eq!(captions.len(), 2);
        assert!(captions.iter().all(|c| c.start == 5.0 && c.end == 5.0));
    }

    #[test]
    fn test_end_before_start_is_clamped() {
        let captions = formatter(2).chunk(&[seg(3.0, 1.0, "a b c d")]);
        assert_eq!(captions.len(), 2);
        for c in &captions {
            assert_eq!(c.start, 3.0);
            assert_eq!(c.end, 3.0);
        }
    }

    #[test]
    fn test_negative_start_is_clamped() {
        let captions = formatter(10).chunk(&[seg(-0.5, 1.0, "hello")]);
        assert_eq!(captions[0].start, 0.0);
        assert_eq!(captions[0].end, 1.0);
    }

    #[test]
    fn test_nan_timing_is_clamped() {
        let captions = formatter(10).chunk(&[seg(f64::NAN, f64::NAN, "hello")]);
        assert_eq!(captions[0].start, 0.0);
        assert_eq!(captions[0].end, 0.0);
    }

    #[test]
    fn test_every_caption_is_well_ordered() {
        let segments = vec![
            seg(0.0, 1.0, TWELVE),
            seg(2.0, 0.5, TWELVE),
            seg(-3.0, -1.0, TWELVE),
        ];
        for c in formatter(4).chunk(&segments) {
            assert!(c.start <= c.end, "caption {} runs backwards", c.index);
            assert!(c.start >= 0.0);
        }
    }

    #[test]
    fn test_overlapping_segments_are_not_corrected() {
        let captions = formatter(10).chunk(&[seg(0.0, 3.0, "a"), seg(1.0, 2.0, "b")]);
        assert_eq!(captions[0].end, 3.0);
        assert_eq!(captions[1].start, 1.0);
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn test_output_is_deterministic() {
        let segments = vec![seg(0.1, 3.33, TWELVE), seg(3.4, 7.77, "and more words here")];
        let a = segments_to_srt(&segments, 3).unwrap();
        let b = segments_to_srt(&segments, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_block_structure() {
        let segments = vec![seg(0.0, 4.0, TWELVE), seg(4.0, 5.0, "bye")];
        let srt = segments_to_srt(&segments, 10).unwrap();
        let blocks: Vec<&str> = srt.trim_end_matches('\n').split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        for (i, block) in blocks.iter().enumerate() {
            let lines: Vec<&str> = block.lines().collect();
            assert_eq!(lines.len(), 3);
            assert_eq!(lines[0], (i + 1).to_string());
            assert!(lines[1].contains(" --> "));
            assert!(!lines[2].is_empty());
        }
        assert!(srt.ends_with("bye\n\n"));
    }
}
