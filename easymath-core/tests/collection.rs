//! End-to-end tests for topic collection against a dataset file
//!
//! These drive the manager with `MockGenerator` and check what actually
//! lands on disk:
//! - ids stay contiguous across generation, manual adds and removals
//! - duplicate statements are never stored twice
//! - failures leave the dataset consistent and still persisted

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use easymath_core::{
    CorruptPolicy, GenerationParams, ManualAdd, MockGenerator, Problem, RecordStore,
    RemoveOutcome, TopicCollectionManager,
};

fn open_manager(path: &Path, generator: MockGenerator) -> TopicCollectionManager {
    let store = RecordStore::open(path, CorruptPolicy::Fail).unwrap();
    TopicCollectionManager::new(store, Arc::new(generator))
}

fn reopen(path: &Path) -> RecordStore {
    RecordStore::open(path, CorruptPolicy::Fail).unwrap()
}

fn assert_contiguous(store: &RecordStore) {
    for (topic, problems) in store.dataset().topics() {
        let ids: Vec<String> = problems.iter().map(|p| p.id.clone()).collect();
        let expected: Vec<String> = (1..=problems.len()).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected, "ids in {topic} are not contiguous");
    }
}

#[tokio::test]
async fn ids_stay_contiguous_across_adds_and_removals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");
    let params = GenerationParams::default();

    let generator = MockGenerator::new().with_statements(
        "Set Theory",
        [
            "The empty set is a subset of every set.",
            "Every set is a subset of itself.",
            "The union of A with itself is A.",
            "The intersection of A with itself is A.",
        ],
    );
    let mut manager = open_manager(&path, generator);

    manager.add_topic_problems("Set Theory", 4, &params).await.unwrap();
    assert_contiguous(manager.store());

    manager
        .remove_problems("Set Theory", &BTreeSet::from([1, 3]))
        .unwrap();
    assert_contiguous(manager.store());

    let outcome = manager
        .add_problem_manually(
            "Set Theory",
            "If A is subset of B, and B is subset of C, then A is subset of C.",
            Some("Take $x \\in A$."),
            None,
            &params,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, ManualAdd::Added(ref p) if p.id == "3"));

    let store = reopen(&path);
    assert_contiguous(&store);
    let statements: Vec<&str> = store
        .get_topic("Set Theory")
        .iter()
        .map(|p| p.statement.as_str())
        .collect();
    assert_eq!(
        statements,
        vec![
            "Every set is a subset of itself.",
            "The intersection of A with itself is A.",
            "If A is subset of B, and B is subset of C, then A is subset of C.",
        ]
    );
}

#[tokio::test]
async fn second_batch_continues_numbering_and_skips_stored_statements() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");
    let params = GenerationParams::default();

    let first = MockGenerator::new().with_statements("Calculus", ["d/dx c = 0", "d/dx x = 1"]);
    open_manager(&path, first)
        .add_topic_problems("Calculus", 2, &params)
        .await
        .unwrap();

    let second = MockGenerator::new()
        .with_statements("Calculus", ["d/dx x = 1", "d/dx x^2 = 2x"]);
    let mut manager = open_manager(&path, second);
    let report = manager.add_topic_problems("Calculus", 2, &params).await.unwrap();

    assert_eq!(report.duplicates, 1);
    assert_eq!(report.added.len(), 1);
    assert_eq!(report.added[0].id, "3");
    assert_eq!(report.added[0].statement, "d/dx x^2 = 2x");

    let store = reopen(&path);
    assert_eq!(store.get_topic("Calculus").len(), 3);
    assert_contiguous(&store);
}

#[tokio::test]
async fn duplicate_detection_uses_normalized_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");
    let params = GenerationParams::default();

    let generator = MockGenerator::new().with_statements("Analysis", [r"$\\epsilon > 0$ exists."]);
    let mut manager = open_manager(&path, generator);

    manager
        .add_problem_manually("Analysis", r"$\epsilon > 0$ exists.", Some("Pick 1."), None, &params)
        .await
        .unwrap();
    let report = manager.add_topic_problems("Analysis", 1, &params).await.unwrap();

    assert!(report.added.is_empty());
    assert_eq!(report.duplicates, 1);
    assert_eq!(manager.store().get_topic("Analysis").len(), 1);
}

#[tokio::test]
async fn empty_generation_still_persists_topic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");

    let mut manager = open_manager(&path, MockGenerator::new());
    let report = manager
        .add_topic_problems("Topology", 15, &GenerationParams::default())
        .await
        .unwrap();

    assert!(report.added.is_empty());
    assert!(!report.failed());

    let store = reopen(&path);
    assert!(store.dataset().contains_topic("Topology"));
    assert!(store.get_topic("Topology").is_empty());
}

#[tokio::test]
async fn generation_failure_keeps_existing_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");
    let params = GenerationParams::default();

    let first = MockGenerator::new().with_statements("Probability", ["P(A) >= 0"]);
    open_manager(&path, first)
        .add_topic_problems("Probability", 1, &params)
        .await
        .unwrap();

    let mut manager = open_manager(&path, MockGenerator::new().failing_topic("Probability"));
    let report = manager.add_topic_problems("Probability", 5, &params).await.unwrap();

    assert!(report.failed());
    assert!(report.added.is_empty());

    let store = reopen(&path);
    assert_eq!(store.get_topic("Probability").len(), 1);
    assert_contiguous(&store);
}

#[tokio::test]
async fn declined_manual_add_does_not_touch_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");

    let mut manager = open_manager(&path, MockGenerator::new());
    let decline = |_: &str, candidate: &Problem| {
        assert_eq!(candidate.proof, "Proof of: 0 is even.");
        false
    };

    let outcome = manager
        .add_problem_manually(
            "Number Theory",
            "0 is even.",
            None,
            Some(&decline),
            &GenerationParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome, ManualAdd::Declined);
    assert!(!manager.store().dataset().contains_topic("Number Theory"));
    assert!(!path.exists());
}

#[tokio::test]
async fn confirmed_manual_add_is_persisted_and_duplicates_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");
    let params = GenerationParams::default();

    let mut manager = open_manager(&path, MockGenerator::new());
    let accept = |_: &str, _: &Problem| true;

    let outcome = manager
        .add_problem_manually("Number Theory", "0 is even.", None, Some(&accept), &params)
        .await
        .unwrap();
    assert!(matches!(outcome, ManualAdd::Added(_)));

    let outcome = manager
        .add_problem_manually("Number Theory", "0 is even.", None, Some(&accept), &params)
        .await
        .unwrap();
    assert_eq!(outcome, ManualAdd::Duplicate("1".to_string()));

    let store = reopen(&path);
    assert_eq!(store.get_topic("Number Theory").len(), 1);
}

#[tokio::test]
async fn removal_of_unknown_topic_reports_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");

    let mut manager = open_manager(&path, MockGenerator::new());
    let outcome = manager
        .remove_problems("Graph Theory", &BTreeSet::from([1]))
        .unwrap();

    assert_eq!(outcome, RemoveOutcome::TopicMissing);
}

#[tokio::test]
async fn query_after_generation_finds_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EasyMathDataset.json");

    let generator = MockGenerator::new().with_statements(
        "Set Theory",
        ["A = A", "A is a subset of A", "A union A = A"],
    );
    let mut manager = open_manager(&path, generator);
    manager
        .add_topic_problems("Set Theory", 3, &GenerationParams::default())
        .await
        .unwrap();

    let query = manager.query();
    assert_eq!(query.find("Set Theory", "2").unwrap().statement, "A is a subset of A");
    assert!(query.find("Set Theory", "999").is_err());
    assert_eq!(query.summary()[0].count, 3);
}
