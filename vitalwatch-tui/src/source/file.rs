//! File-based data source.
//!
//! Polls a JSON file for vitals snapshots.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use vitalwatch_types::Snapshot;

use super::DataSource;

/// A data source that reads snapshots from a JSON file.
///
/// The simulator's file output overwrites the file on every emission. The
/// source tracks the file's modification time and only returns new data
/// when the file has been updated.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        match serde_json::from_str::<Snapshot>(&content) {
            Ok(snapshot) if !snapshot.version.is_compatible() => {
                self.last_error = Some(format!(
                    "Unsupported schema version {}",
                    snapshot.version
                ));
                None
            }
            Ok(snapshot) => {
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                self.last_error = Some(format!("Parse error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Snapshot> {
        let current_modified = self.modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(last), Some(current)) => current > last,
        };

        if !file_changed {
            return None;
        }

        let snapshot = self.read_file()?;
        self.last_modified = current_modified;
        tracing::trace!(path = %self.path.display(), children = snapshot.len(), "read snapshot");
        Some(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "version": { "major": 1, "minor": 0 },
            "timestamp_ms": 1703160000000,
            "children": {
                "Fatima": { "age_months": 8.0 }
            }
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/vitals.json");
        assert_eq!(source.path(), Path::new("/tmp/vitals.json"));
        assert_eq!(source.description(), "file: /tmp/vitals.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_poll_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.get("Fatima").unwrap().age_months, 8.0);

        // No change since the last read
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/vitals.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_rejects_future_major_version() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"version":{{"major":9,"minor":0}},"children":{{}}}}"#).unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("schema version"));
    }

    #[test]
    fn test_file_source_recovers_after_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();
        let mut source = FileSource::new(file.path());
        assert!(source.poll().is_none());

        std::fs::write(file.path(), sample_json()).unwrap();
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }
}
