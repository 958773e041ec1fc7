use std::fmt;

use super::timestamp::format_timestamp;

/// One numbered SRT block.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Caption {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// The `start --> end` timing line.
    pub fn timing_line(&self) -> String {
        format!(
            "{} --> {}",
            format_timestamp(self.start),
            format_timestamp(self.end)
        )
    }
}

/// Renders the block including its terminating blank line.
impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}\n\n", self.index, self.timing_line(), self.text)
    }
}

/// Serialize captions to SRT text, blocks in the given order.
pub fn render_srt(captions: &[Caption]) -> String {
    captions.iter().map(|c| c.to_string()).collect()
}
