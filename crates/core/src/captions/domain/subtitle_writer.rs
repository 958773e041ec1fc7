use std::path::Path;

/// Domain interface for persisting rendered subtitle text.
pub trait SubtitleWriter: Send {
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}
