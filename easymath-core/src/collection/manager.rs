//! Topic collection manager
//!
//! Drives the generator for a topic, assigns the next contiguous ids,
//! normalizes and deduplicates the text, and hands the finished batch to
//! the record store as a single write.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::dataset::{DatasetQuery, Problem, RecordStore, RemoveOutcome, normalize_latex};
use crate::error::StoreError;
use crate::generation::{GenerationParams, ProblemGenerator};

/// Prefix of the proof text stored when the proof call fails
pub const PROOF_FAILED_PREFIX: &str = "Proof generation failed";

/// Approval step for manually added problems
pub trait Confirm {
    /// Return true to store `candidate` under `topic`
    fn confirm(&self, topic: &str, candidate: &Problem) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str, &Problem) -> bool,
{
    fn confirm(&self, topic: &str, candidate: &Problem) -> bool {
        self(topic, candidate)
    }
}

/// What one generation batch did to a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub topic: String,
    /// Records appended, in id order
    pub added: Vec<Problem>,
    /// Candidates skipped because the statement was already present
    pub duplicates: usize,
    /// Statement generation failure, if any
    pub error: Option<String>,
}

impl BatchReport {
    fn new(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            added: Vec::new(),
            duplicates: 0,
            error: None,
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of a manual add
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualAdd {
    Added(Problem),
    /// The confirmation step said no; nothing was stored
    Declined,
    /// The statement already exists under this id
    Duplicate(String),
}

/// Orchestrates generation and storage per topic
pub struct TopicCollectionManager {
    store: RecordStore,
    generator: Arc<dyn ProblemGenerator>,
}

impl TopicCollectionManager {
    pub fn new(store: RecordStore, generator: Arc<dyn ProblemGenerator>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn query(&self) -> DatasetQuery<'_> {
        self.store.query()
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }

    /// Generate up to `count` new problems for a topic and persist them
    ///
    /// A failing statement call is logged and yields an empty batch; the
    /// topic is still created and the dataset still written. Only store
    /// I/O failures are returned as errors.
    pub async fn add_topic_problems(
        &mut self,
        topic: &str,
        count: usize,
        params: &GenerationParams,
    ) -> Result<BatchReport, StoreError> {
        let mut report = BatchReport::new(topic);

        let candidates = match self
            .generator
            .generate_statements(topic, count, params)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(topic, error = %e, "error generating problems");
                report.error = Some(e.to_string());
                Vec::new()
            }
        };

        let last_id = self.store.dataset().next_id(topic) - 1;
        let mut seen = HashSet::new();
        let mut staged: Vec<Problem> = Vec::new();

        for candidate in candidates {
            let candidate = candidate.trim();
            let statement = normalize_latex(candidate);
            if statement.is_empty() {
                continue;
            }
            if self.store.dataset().find_statement(topic, candidate).is_some()
                || !seen.insert(statement.clone())
            {
                debug!(topic, %statement, "skipping duplicate statement");
                report.duplicates += 1;
                continue;
            }

            let proof = self.prove(topic, candidate, params).await;
            let id = last_id + staged.len() as u32 + 1;
            debug!(topic, id, "generated problem");
            staged.push(Problem::new(id, candidate, &proof));
        }

        self.store.append_batch(topic, staged.clone())?;
        report.added = staged;

        info!(
            topic,
            added = report.added.len(),
            duplicates = report.duplicates,
            total = self.store.get_topic(topic).len(),
            "topic batch complete"
        );
        Ok(report)
    }

    /// Run [`add_topic_problems`](Self::add_topic_problems) for each distinct topic in order
    pub async fn add_topics<S: AsRef<str>>(
        &mut self,
        topics: &[S],
        count: usize,
        params: &GenerationParams,
    ) -> Result<Vec<BatchReport>, StoreError> {
        let mut visited = HashSet::new();
        let mut reports = Vec::new();
        for topic in topics {
            let topic = topic.as_ref();
            if !visited.insert(topic) {
                continue;
            }
            reports.push(self.add_topic_problems(topic, count, params).await?);
        }
        Ok(reports)
    }

    /// Add one statement by hand
    ///
    /// Without a proof, one is generated. With `confirm`, the finished record
    /// is shown to the caller first and only stored on approval. The record
    /// takes the topic's next id.
    pub async fn add_problem_manually(
        &mut self,
        topic: &str,
        statement: &str,
        proof: Option<&str>,
        confirm: Option<&dyn Confirm>,
        params: &GenerationParams,
    ) -> Result<ManualAdd, StoreError> {
        let statement = statement.trim();
        if let Some(existing) = self.store.dataset().find_statement(topic, statement) {
            info!(topic, id = %existing.id, "statement already present");
            return Ok(ManualAdd::Duplicate(existing.id.clone()));
        }

        let proof = match proof {
            Some(proof) => proof.to_string(),
            None => self.prove(topic, statement, params).await,
        };

        let id = self.store.dataset().next_id(topic);
        let problem = Problem::new(id, statement, &proof);

        if let Some(confirm) = confirm
            && !confirm.confirm(topic, &problem)
        {
            info!(topic, "manual problem declined");
            return Ok(ManualAdd::Declined);
        }

        self.store.append_batch(topic, vec![problem.clone()])?;
        info!(topic, id, "proof added");
        Ok(ManualAdd::Added(problem))
    }

    /// Remove problems by id and renumber the topic
    pub fn remove_problems(
        &mut self,
        topic: &str,
        ids: &BTreeSet<u32>,
    ) -> Result<RemoveOutcome, StoreError> {
        self.store.remove(topic, ids)
    }

    async fn prove(&self, topic: &str, statement: &str, params: &GenerationParams) -> String {
        match self.generator.generate_proof(topic, statement, params).await {
            Ok(proof) => proof,
            Err(e) => {
                warn!(topic, error = %e, "proof generation failed, storing placeholder");
                format!("{}: {}", PROOF_FAILED_PREFIX, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::generation::MockGenerator;

    fn manager(generator: MockGenerator) -> (tempfile::TempDir, TopicCollectionManager) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::with_dataset(dir.path().join("d.json"), Dataset::new());
        (dir, TopicCollectionManager::new(store, Arc::new(generator)))
    }

    #[tokio::test]
    async fn batch_normalizes_statement_and_proof() {
        let (_dir, mut manager) = manager(
            MockGenerator::new().with_statements("Algebra", [r"  $\\alpha + 0 = \\alpha$ "]),
        );

        let report = manager
            .add_topic_problems("Algebra", 5, &GenerationParams::default())
            .await
            .unwrap();

        assert_eq!(report.added.len(), 1);
        let problem = &report.added[0];
        assert_eq!(problem.id, "1");
        assert_eq!(problem.statement, r"$\alpha + 0 = \alpha$");
        assert_eq!(problem.proof, r"Proof of: $\alpha + 0 = \alpha$");
    }

    #[tokio::test]
    async fn escaped_line_break_is_collapsed_once() {
        let (_dir, mut manager) =
            manager(MockGenerator::new().with_statements("Algebra", [r"a \\\\ b"]));
        let params = GenerationParams::default();

        let report = manager
            .add_topic_problems("Algebra", 1, &params)
            .await
            .unwrap();
        assert_eq!(report.added[0].statement, r"a \\ b");
        assert_eq!(report.added[0].proof, r"Proof of: a \\ b");

        let generator = MockGenerator::new().with_statements("Algebra", [r"a \\ b"]);
        let mut manager = TopicCollectionManager::new(manager.into_store(), Arc::new(generator));
        let report = manager
            .add_topic_problems("Algebra", 1, &params)
            .await
            .unwrap();

        assert_eq!(report.duplicates, 0);
        assert_eq!(report.added[0].statement, r"a \ b");
        let statements: Vec<_> = manager
            .store()
            .get_topic("Algebra")
            .iter()
            .map(|p| p.statement.as_str())
            .collect();
        assert_eq!(statements, vec![r"a \\ b", r"a \ b"]);
    }

    #[tokio::test]
    async fn duplicates_within_batch_are_skipped() {
        let (_dir, mut manager) = manager(MockGenerator::new().with_statements(
            "Logic",
            ["p or not p", " p or not p", "q implies q"],
        ));

        let report = manager
            .add_topic_problems("Logic", 10, &GenerationParams::default())
            .await
            .unwrap();

        let ids: Vec<_> = report.added.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(report.duplicates, 1);
    }

    #[tokio::test]
    async fn failed_proof_stores_placeholder() {
        let (_dir, mut manager) = manager(
            MockGenerator::new()
                .with_statements("Logic", ["a", "b"])
                .failing_proof("a"),
        );

        let report = manager
            .add_topic_problems("Logic", 2, &GenerationParams::default())
            .await
            .unwrap();

        assert!(report.added[0].proof.starts_with(PROOF_FAILED_PREFIX));
        assert_eq!(report.added[1].proof, "Proof of: b");
        assert!(!report.failed());
    }

    #[tokio::test]
    async fn add_topics_visits_each_topic_once() {
        let (_dir, mut manager) = manager(
            MockGenerator::new()
                .with_statements("Number Theory", ["2 is prime"])
                .with_statements("Geometry", ["A square has four sides"]),
        );

        let reports = manager
            .add_topics(
                &["Number Theory", "Geometry", "Number Theory"],
                15,
                &GenerationParams::default(),
            )
            .await
            .unwrap();

        let topics: Vec<_> = reports.iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(topics, vec!["Number Theory", "Geometry"]);
        assert_eq!(manager.store().get_topic("Number Theory").len(), 1);
    }

    #[tokio::test]
    async fn manual_add_with_given_proof_skips_generator() {
        let generator = Arc::new(MockGenerator::new());
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::with_dataset(dir.path().join("d.json"), Dataset::new());
        let mut manager = TopicCollectionManager::new(store, generator.clone());

        let outcome = manager
            .add_problem_manually(
                "Set Theory",
                "A is a subset of A.",
                Some("Every element of $A$ is in $A$."),
                None,
                &GenerationParams::default(),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, ManualAdd::Added(ref p) if p.id == "1"));
        assert!(generator.proof_calls().is_empty());
    }
}
