/// Format seconds as an SRT timestamp `HH:MM:SS,mmm`.
///
/// Rounds to the nearest millisecond. Negative and NaN inputs clamp to zero;
/// values beyond the `u64` millisecond range saturate. Hours are zero-padded
/// to two digits and grow as needed.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = to_millis(seconds);
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours:02}:{mins:02}:{secs:02},{ms:03}")
}

fn to_millis(seconds: f64) -> u64 {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0;
    }
    // `as` saturates on overflow
    (seconds * 1000.0).round() as u64
}
