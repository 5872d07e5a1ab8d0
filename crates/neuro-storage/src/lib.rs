use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use neuro_core::ScoreResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// A persisted test outcome: the score plus when the test was completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedRecord {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Completed-test store, keyed by test id. Saving a retaken test replaces
/// the previous record.
pub trait ResultStore: Send {
    fn save(&mut self, test_id: &str, result: ScoreResult)
        -> Result<CompletedRecord, StorageError>;
    fn get(&self, test_id: &str) -> Option<CompletedRecord>;
    fn is_completed(&self, test_id: &str) -> bool;
    fn completed_count(&self) -> usize;
    fn completed(&self) -> HashMap<String, CompletedRecord>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Persisted {
    records: HashMap<String, CompletedRecord>,
}

pub struct PersistentResultStore {
    path: PathBuf,
    records: HashMap<String, CompletedRecord>,
}

impl PersistentResultStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if !path.exists() {
            let persisted = Persisted::default();
            let bytes = serde_json::to_vec_pretty(&persisted)?;
            fs::write(&path, bytes)?;
        }

        let bytes = fs::read(&path)?;
        let persisted: Persisted = serde_json::from_slice(&bytes)?;

        Ok(Self {
            path,
            records: persisted.records,
        })
    }

    fn persist(&self) -> Result<(), StorageError> {
        let persisted = Persisted {
            records: self.records.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&persisted)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl ResultStore for PersistentResultStore {
    fn save(
        &mut self,
        test_id: &str,
        result: ScoreResult,
    ) -> Result<CompletedRecord, StorageError> {
        let record = CompletedRecord {
            result,
            completed_at: Utc::now(),
        };
        self.records.insert(test_id.to_string(), record.clone());
        self.persist()?;
        Ok(record)
    }

    fn get(&self, test_id: &str) -> Option<CompletedRecord> {
        self.records.get(test_id).cloned()
    }

    fn is_completed(&self, test_id: &str) -> bool {
        self.records.contains_key(test_id)
    }

    fn completed_count(&self) -> usize {
        self.records.len()
    }

    fn completed(&self) -> HashMap<String, CompletedRecord> {
        self.records.clone()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.records.clear();
        self.persist()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    records: HashMap<String, CompletedRecord>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for InMemoryResultStore {
    fn save(
        &mut self,
        test_id: &str,
        result: ScoreResult,
    ) -> Result<CompletedRecord, StorageError> {
        let record = CompletedRecord {
            result,
            completed_at: Utc::now(),
        };
        self.records.insert(test_id.to_string(), record.clone());
        Ok(record)
    }

    fn get(&self, test_id: &str) -> Option<CompletedRecord> {
        self.records.get(test_id).cloned()
    }

    fn is_completed(&self, test_id: &str) -> bool {
        self.records.contains_key(test_id)
    }

    fn completed_count(&self) -> usize {
        self.records.len()
    }

    fn completed(&self) -> HashMap<String, CompletedRecord> {
        self.records.clone()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.records.clear();
        Ok(())
    }
}

/// Open the durable store, or fall back to a process-local in-memory store
/// when it cannot be reached. Callers only ever see the trait; the failover
/// is logged once and otherwise transparent.
pub fn open_result_store(path: impl AsRef<Path>) -> Box<dyn ResultStore> {
    match PersistentResultStore::open(path.as_ref()) {
        Ok(store) => Box::new(store),
        Err(error) => {
            warn!(
                path = %path.as_ref().display(),
                %error,
                "durable result store unavailable, using in-memory fallback"
            );
            Box::new(InMemoryResultStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use neuro_core::{DomainScore, RiskLevel};

    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("neuro-results-{tag}-{}-{now}.json", std::process::id()))
    }

    fn sample_result() -> ScoreResult {
        ScoreResult {
            total: 6,
            normalized: 0.75,
            interpretation: "High Level Result".to_string(),
            recommendation: "Consider a full screening.".to_string(),
            breakdown: vec![DomainScore {
                name: "Inattention".to_string(),
                score: 0.75,
                level: RiskLevel::High,
            }],
        }
    }

    #[test]
    fn records_survive_a_reopen() {
        let path = temp_store_path("reopen");
        {
            let mut store = PersistentResultStore::open(&path).expect("open store");
            store.save("2", sample_result()).expect("save");
        }

        let store = PersistentResultStore::open(&path).expect("reopen store");
        let record = store.get("2").expect("record");
        assert_eq!(record.result.total, 6);
        assert!(store.is_completed("2"));
        assert_eq!(store.completed_count(), 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn saving_again_replaces_the_record() {
        let path = temp_store_path("replace");
        let mut store = PersistentResultStore::open(&path).expect("open store");

        store.save("2", sample_result()).expect("save");
        let mut second = sample_result();
        second.total = 1;
        store.save("2", second).expect("save again");

        assert_eq!(store.completed_count(), 1);
        assert_eq!(store.get("2").expect("record").result.total, 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn clear_empties_the_store() {
        let path = temp_store_path("clear");
        let mut store = PersistentResultStore::open(&path).expect("open store");
        store.save("2", sample_result()).expect("save");
        store.clear().expect("clear");
        assert_eq!(store.completed_count(), 0);

        let store = PersistentResultStore::open(&path).expect("reopen store");
        assert_eq!(store.completed_count(), 0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn unreachable_path_falls_back_to_memory() {
        // A path whose parent is a file cannot be created.
        let blocker = temp_store_path("blocker");
        fs::write(&blocker, b"not a directory").expect("write blocker");

        let mut store = open_result_store(blocker.join("results.json"));
        let record = store.save("2", sample_result()).expect("save");
        assert_eq!(record.result.total, 6);
        assert!(store.is_completed("2"));

        let _ = fs::remove_file(blocker);
    }

    #[test]
    fn record_serializes_with_a_flattened_result_and_timestamp() {
        let record = CompletedRecord {
            result: sample_result(),
            completed_at: Utc::now(),
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["total"], 6);
        assert_eq!(value["breakdown"][0]["level"], "High");
        assert!(value["completed_at"].is_string());
    }
}
