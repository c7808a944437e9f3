//! One pretty-printed JSON file per debate record

use debate_application::{RecordStore, RecordStoreError};
use debate_domain::DebateRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes `<dir>/<id>.json` with 4-space indentation and raw UTF-8,
/// matching what existing scoring scripts read.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    dir: PathBuf,
}

impl JsonRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Write a record to an explicit path (used by `mad debate --save`)
    pub fn write_to(path: &Path, record: &DebateRecord) -> Result<(), RecordStoreError> {
        let bytes = to_pretty_json(record).map_err(|e| RecordStoreError::Serialize {
            id: path.display().to_string(),
            message: e.to_string(),
        })?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| RecordStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, bytes).map_err(|source| RecordStoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn to_pretty_json(record: &DebateRecord) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    record.serialize(&mut serializer)?;
    Ok(buffer)
}

impl RecordStore for JsonRecordStore {
    fn exists(&self, id: &str) -> bool {
        self.path_for(id).is_file()
    }

    fn save(&self, id: &str, record: &DebateRecord) -> Result<PathBuf, RecordStoreError> {
        let path = self.path_for(id);
        Self::write_to(&path, record)?;
        debug!(path = %path.display(), "Wrote debate record");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{DecisionObject, Outcome, RecordMeta, SupportedSide, TopicSeed};

    fn record() -> DebateRecord {
        DebateRecord::assemble(
            RecordMeta {
                start_time: "2024-05-01_09:00:00".to_string(),
                end_time: "2024-05-01_09:02:00".to_string(),
                model_name: "claude-3-haiku-20240307".to_string(),
                temperature: 0.0,
                max_round: 3,
            },
            &TopicSeed::new("Is zero even?").unwrap(),
            "Yes",
            &DecisionObject::new("Yes, zero is even", "divisible by 2", SupportedSide::Affirmative),
            Outcome::Resolved,
            1,
            vec![],
        )
    }

    #[test]
    fn test_save_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::new(dir.path().join("out"));
        assert!(!store.exists("0"));

        let path = store.save("0", &record()).unwrap();
        assert_eq!(path, dir.path().join("out").join("0.json"));
        assert!(store.exists("0"));
        assert!(!store.exists("1"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"start_time\""));
        let parsed: DebateRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record());
        assert_eq!(parsed.final_answer(), "Yes, zero is even");
    }

    #[test]
    fn test_non_ascii_written_raw() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zh.json");
        let mut rec = record();
        rec.fields
            .insert("debate_topic".to_string(), serde_json::json!("零是偶数吗"));

        JsonRecordStore::write_to(&path, &rec).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("零是偶数吗"));
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = JsonRecordStore::new(&blocker);
        assert!(matches!(
            store.save("0", &record()),
            Err(RecordStoreError::Io { .. })
        ));
    }
}
