//! Local JSON file source
//!
//! Reads a document in the endpoint's format from disk on every fetch.
//! Useful for offline demos and for replaying a captured response.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sheet_pulse_core::{SnapshotSource, SourceMetadata};
use sheet_pulse_types::{FetchError, Snapshot};
use std::path::{Path, PathBuf};

pub struct StaticSheetSource {
    metadata: SourceMetadata,
    path: PathBuf,
}

impl StaticSheetSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            metadata: SourceMetadata {
                id: "file".to_string(),
                location: path.display().to_string(),
            },
            path,
        }
    }
}

#[async_trait]
impl SnapshotSource for StaticSheetSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        debug!("Reading sheet document {:?}", self.path);
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {}", self.path.display(), e)))?;
        crate::payload::decode_payload(&body, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_for;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_file_each_fetch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"headers":["ts","q"],"rows":[["t","a"]]}}"#).unwrap();
        file.flush().unwrap();

        let source = StaticSheetSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap().row_count(), 1);

        std::fs::write(
            file.path(),
            r#"{"headers":["ts","q"],"rows":[["t","a"],["t","b"]]}"#,
        )
        .unwrap();
        assert_eq!(source.fetch().await.unwrap().row_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_transport_error() {
        let source = StaticSheetSource::new("/nonexistent/sheet-pulse/responses.json");
        assert!(matches!(source.fetch().await, Err(FetchError::Transport(_))));
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        let http = source_for("https://script.example.com/exec").unwrap();
        assert_eq!(http.metadata().id, "http");

        let file = source_for("file:///tmp/responses.json").unwrap();
        assert_eq!(file.metadata().id, "file");
        assert_eq!(file.metadata().location, "/tmp/responses.json");

        let bare = source_for("responses.json").unwrap();
        assert_eq!(bare.metadata().id, "file");
    }
}
