//! Run Batch use case
//!
//! Runs one debate instance per corpus item. Instances share nothing
//! mutable, so they run concurrently up to `concurrency`. A failed
//! instance is logged and counted; it never stops the batch.

use crate::config::BatchSettings;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{BatchProgressNotifier, NoBatchProgress, NoProgress};
use crate::ports::record_store::RecordStore;
use crate::use_cases::run_debate::{RunDebateInput, RunDebateUseCase};
use debate_domain::{DebateSeed, Outcome};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};
use tracing::{info, warn};

/// One corpus entry
#[derive(Debug)]
pub struct BatchItem {
    /// Record id (`<id>.json`)
    pub id: String,
    pub seed: Box<dyn DebateSeed>,
}

impl BatchItem {
    pub fn new(id: impl Into<String>, seed: impl DebateSeed + 'static) -> Self {
        Self {
            id: id.into(),
            seed: Box::new(seed),
        }
    }
}

/// What happened to one instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    Completed(Outcome),
    /// A record already existed
    Skipped,
    Failed(String),
}

/// Counts over a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    pub judge_tie_break: usize,
    pub unresolved: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl BatchSummary {
    fn count(&mut self, status: &InstanceStatus) {
        match status {
            InstanceStatus::Completed(Outcome::Resolved) => self.resolved += 1,
            InstanceStatus::Completed(Outcome::JudgeTieBreak) => self.judge_tie_break += 1,
            InstanceStatus::Completed(Outcome::Unresolved) => self.unresolved += 1,
            InstanceStatus::Skipped => self.skipped += 1,
            InstanceStatus::Failed(_) => self.failed += 1,
        }
    }

    /// Instances whose record says `success: true`
    pub fn succeeded(&self) -> usize {
        self.resolved + self.judge_tie_break
    }
}

/// Use case for running a corpus of debates
pub struct RunBatchUseCase<G: LlmGateway + 'static> {
    debate: Arc<RunDebateUseCase<G>>,
    store: Arc<dyn RecordStore>,
    settings: BatchSettings,
}

impl<G: LlmGateway + 'static> RunBatchUseCase<G> {
    pub fn new(
        debate: Arc<RunDebateUseCase<G>>,
        store: Arc<dyn RecordStore>,
        settings: BatchSettings,
    ) -> Self {
        Self {
            debate,
            store,
            settings,
        }
    }

    pub async fn execute(&self, items: Vec<BatchItem>) -> BatchSummary {
        self.execute_with_progress(items, &NoBatchProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        items: Vec<BatchItem>,
        progress: &dyn BatchProgressNotifier,
    ) -> BatchSummary {
        let mut summary = BatchSummary {
            total: items.len(),
            ..Default::default()
        };
        progress.on_batch_start(items.len());
        info!(
            "Starting batch of {} debates (concurrency {})",
            items.len(),
            self.settings.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.settings.concurrency.max(1)));
        let mut join_set = JoinSet::new();
        let mut spawned: HashMap<Id, String> = HashMap::new();

        for item in items {
            if self.settings.skip_existing && self.store.exists(&item.id) {
                info!(instance = %item.id, "Record exists, skipping");
                let status = InstanceStatus::Skipped;
                summary.count(&status);
                progress.on_instance_complete(&item.id, &status);
                continue;
            }

            let debate = Arc::clone(&self.debate);
            let store = Arc::clone(&self.store);
            let semaphore = Arc::clone(&semaphore);

            let item_id = item.id.clone();
            let handle = join_set.spawn(async move {
                let BatchItem { id, seed } = item;
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (id, InstanceStatus::Failed("batch cancelled".to_string()));
                };
                let status = Self::run_one(&debate, store.as_ref(), &id, seed).await;
                (id, status)
            });
            spawned.insert(handle.id(), item_id);
        }

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((id, status)) => {
                    summary.count(&status);
                    progress.on_instance_complete(&id, &status);
                }
                Err(e) => {
                    let id = spawned.remove(&e.id()).unwrap_or_else(|| "?".to_string());
                    warn!(instance = %id, "Task join error: {}", e);
                    let status = InstanceStatus::Failed(e.to_string());
                    summary.count(&status);
                    progress.on_instance_complete(&id, &status);
                }
            }
        }

        info!(
            "Batch finished: {} resolved, {} judge tie-break, {} unresolved, {} failed, {} skipped",
            summary.resolved,
            summary.judge_tie_break,
            summary.unresolved,
            summary.failed,
            summary.skipped
        );
        progress.on_batch_complete(&summary);
        summary
    }

    async fn run_one(
        debate: &RunDebateUseCase<G>,
        store: &dyn RecordStore,
        id: &str,
        seed: Box<dyn DebateSeed>,
    ) -> InstanceStatus {
        let input = RunDebateInput {
            instance_id: id.to_string(),
            seed,
        };
        let record = match debate.execute_with_progress(input, &NoProgress).await {
            Ok(record) => record,
            Err(e) => {
                warn!(instance = %id, "Debate failed: {}", e);
                return InstanceStatus::Failed(e.to_string());
            }
        };

        match store.save(id, &record) {
            Ok(path) => {
                info!(instance = %id, path = %path.display(), "Saved record");
                InstanceStatus::Completed(record.outcome)
            }
            Err(e) => {
                warn!(instance = %id, "Could not save record: {}", e);
                InstanceStatus::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebateSettings;
    use crate::ports::llm_gateway::{CompletionRequest, GatewayError};
    use crate::ports::record_store::RecordStoreError;
    use async_trait::async_trait;
    use debate_domain::{DebatePrompts, DebateRecord, TopicSeed};
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Decides immediately unless the topic mentions "fail", "stuck" or "panic"
    struct TopicGateway;

    #[async_trait]
    impl LlmGateway for TopicGateway {
        async fn ask(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError> {
            let persona = request.persona.unwrap_or_default();
            if persona.contains("panic") {
                panic!("gateway bug");
            }
            if persona.contains("fail") {
                return Err(GatewayError::Timeout);
            }
            if persona.starts_with("moderator") {
                if persona.contains("stuck") {
                    return Ok("still thinking".to_string());
                }
                return Ok(r#"{"final_answer": "done"}"#.to_string());
            }
            Ok("statement".to_string())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, DebateRecord>>,
        existing: Vec<String>,
    }

    impl RecordStore for MemoryStore {
        fn exists(&self, id: &str) -> bool {
            self.existing.iter().any(|e| e == id)
        }

        fn save(&self, id: &str, record: &DebateRecord) -> Result<PathBuf, RecordStoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(id.to_string(), record.clone());
            Ok(PathBuf::from(format!("{}.json", id)))
        }
    }

    #[derive(Default)]
    struct RecordingBatchProgress {
        completed: Mutex<Vec<(String, InstanceStatus)>>,
        started: Mutex<Option<usize>>,
    }

    impl BatchProgressNotifier for RecordingBatchProgress {
        fn on_batch_start(&self, total: usize) {
            *self.started.lock().unwrap() = Some(total);
        }

        fn on_instance_complete(&self, id: &str, status: &InstanceStatus) {
            self.completed
                .lock()
                .unwrap()
                .push((id.to_string(), status.clone()));
        }
    }

    fn debate() -> Arc<RunDebateUseCase<TopicGateway>> {
        let prompts = DebatePrompts::from_json_object(
            json!({
                "player_meta_prompt": "debater on ##debate_topic##",
                "moderator_meta_prompt": "moderator of ##debate_topic##",
                "affirmative_prompt": "##debate_topic##",
                "negative_prompt": "##aff_ans##",
                "moderator_prompt": "##aff_ans## ##neg_ans## ##round##",
                "debate_prompt": "##oppo_ans##",
                "judge_prompt_last1": "##aff_ans## ##neg_ans##",
                "judge_prompt_last2": "pick"
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();
        Arc::new(
            RunDebateUseCase::new(
                Arc::new(TopicGateway),
                Arc::new(prompts),
                DebateSettings::default().with_max_round(2),
            )
            .unwrap(),
        )
    }

    fn items(topics: &[&str]) -> Vec<BatchItem> {
        topics
            .iter()
            .enumerate()
            .map(|(i, t)| BatchItem::new(i.to_string(), TopicSeed::new(*t).unwrap()))
            .collect()
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_batch() {
        let store = Arc::new(MemoryStore::default());
        let batch = RunBatchUseCase::new(
            debate(),
            store.clone(),
            BatchSettings::default().with_concurrency(2),
        );
        let progress = RecordingBatchProgress::default();
        let summary = batch
            .execute_with_progress(items(&["easy", "fail please", "stuck forever", "easy again"]), &progress)
            .await;

        assert_eq!(
            summary,
            BatchSummary {
                total: 4,
                resolved: 2,
                judge_tie_break: 0,
                unresolved: 1,
                failed: 1,
                skipped: 0,
            }
        );
        assert_eq!(summary.succeeded(), 2);

        let records = store.records.lock().unwrap();
        assert_eq!(records.len(), 3);
        assert!(!records.contains_key("1"));
        assert!(!records["2"].success);

        assert_eq!(*progress.started.lock().unwrap(), Some(4));
        assert_eq!(progress.completed.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_panicking_instance_counts_as_failed() {
        let store = Arc::new(MemoryStore::default());
        let batch = RunBatchUseCase::new(debate(), store.clone(), BatchSettings::default());
        let progress = RecordingBatchProgress::default();
        let summary = batch
            .execute_with_progress(items(&["easy", "panic now"]), &progress)
            .await;

        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.failed, 1);
        assert!(!store.records.lock().unwrap().contains_key("1"));

        let completed = progress.completed.lock().unwrap();
        assert_eq!(completed.len(), summary.total);
        assert!(
            completed
                .iter()
                .any(|(id, status)| id == "1" && matches!(status, InstanceStatus::Failed(_)))
        );
    }

    #[tokio::test]
    async fn test_existing_records_skipped() {
        let store = Arc::new(MemoryStore {
            existing: vec!["0".to_string()],
            ..Default::default()
        });
        let batch = RunBatchUseCase::new(debate(), store.clone(), BatchSettings::default());
        let summary = batch.execute(items(&["easy", "easy too"])).await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.resolved, 1);
        assert!(store.records.lock().unwrap().contains_key("1"));
    }

    #[tokio::test]
    async fn test_skip_disabled_reruns_everything() {
        let store = Arc::new(MemoryStore {
            existing: vec!["0".to_string()],
            ..Default::default()
        });
        let batch = RunBatchUseCase::new(
            debate(),
            store.clone(),
            BatchSettings::default().with_skip_existing(false),
        );
        let summary = batch.execute(items(&["easy"])).await;
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.resolved, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let batch = RunBatchUseCase::new(
            debate(),
            Arc::new(MemoryStore::default()),
            BatchSettings::default(),
        );
        assert_eq!(batch.execute(vec![]).await, BatchSummary::default());
    }
}
