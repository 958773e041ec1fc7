use std::fs;
use std::io::Write;
use std::path::Path;

use crate::captions::domain::subtitle_writer::SubtitleWriter;

/// Writes UTF-8 subtitle files.
///
/// Content goes to `<path>.part` first and is renamed into place, so a failed
/// write never leaves a truncated subtitle file at `path`.
#[derive(Debug, Default)]
pub struct SrtFileWriter;

impl SrtFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SubtitleWriter for SrtFileWriter {
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".part");
        let temp_path = Path::new(&temp_name);

        let result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(temp_path)?;
            file.write_all(contents.as_bytes())?;
            file.flush()?;
            fs::rename(temp_path, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(temp_path);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SRT: &str = "1\n00:00:00,000 --> 00:00:01,000\nhéllo wörld\n\n";

    #[test]
    fn test_writes_utf8_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("talk.small.srt");
        SrtFileWriter::new().write(&path, SRT).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SRT);
        assert!(!tmp.path().join("talk.small.srt.part").exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("subs.srt");
        fs::write(&path, "stale").unwrap();
        SrtFileWriter::new().write(&path, SRT).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SRT);
    }

    #[test]
    fn test_missing_parent_dir_is_error_without_leftovers() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("subs.srt");
        assert!(SrtFileWriter::new().write(&path, SRT).is_err());
        assert!(!path.exists());
    }
}
