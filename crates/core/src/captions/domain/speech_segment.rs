/// A span of recognized speech as reported by the recognizer.
///
/// Times are in seconds. Text is kept exactly as recognized, including any
/// leading or trailing whitespace.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SpeechSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whitespace-separated words, empty tokens dropped.
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
