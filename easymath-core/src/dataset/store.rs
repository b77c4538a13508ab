//! JSON-file backed record store
//!
//! The whole dataset is held in memory and the whole document is rewritten
//! on every mutation. Writes go to a temporary sibling file that is renamed
//! over the backing file, and the in-memory dataset is only replaced once
//! that rename succeeded.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use super::query::DatasetQuery;
use super::types::{Dataset, Problem};
use crate::error::StoreError;

type Result<T> = std::result::Result<T, StoreError>;

/// What to do when the backing file exists but does not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Refuse to open the store
    #[default]
    Fail,
    /// Log a warning and continue with an empty dataset. The corrupt file is
    /// overwritten by the next mutation.
    StartEmpty,
}

/// Result of reading the backing file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Dataset),
    Missing,
    Corrupt { reason: String },
}

/// Result of a removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The topic does not exist; nothing changed
    TopicMissing,
    /// Records were filtered and the rest renumbered and persisted
    Removed { removed: usize, remaining: usize },
    /// The topic could not be renumbered; nothing changed
    Rejected(String),
}

/// Read the dataset document at `path`
///
/// Missing files and unparsable content are reported as outcomes. Any other
/// I/O failure, such as a permission error, is returned as an error.
pub fn load(path: &Path) -> Result<LoadOutcome> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadOutcome::Missing),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Ok(LoadOutcome::Corrupt {
                reason: e.to_string(),
            });
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match serde_json::from_str::<Dataset>(&content) {
        Ok(dataset) => Ok(LoadOutcome::Loaded(dataset)),
        Err(e) => Ok(LoadOutcome::Corrupt {
            reason: e.to_string(),
        }),
    }
}

/// Owner of the in-memory dataset and its backing file
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    dataset: Dataset,
}

impl RecordStore {
    /// Open the store at `path`, loading the dataset if the file exists
    pub fn open(path: impl Into<PathBuf>, policy: CorruptPolicy) -> Result<Self> {
        let path = path.into();

        let dataset = match load(&path)? {
            LoadOutcome::Loaded(dataset) => {
                debug!(
                    path = %path.display(),
                    topics = dataset.len(),
                    problems = dataset.total_problems(),
                    "loaded dataset"
                );
                dataset
            }
            LoadOutcome::Missing => {
                debug!(path = %path.display(), "no dataset file, starting empty");
                Dataset::new()
            }
            LoadOutcome::Corrupt { reason } => match policy {
                CorruptPolicy::Fail => return Err(StoreError::Corrupt { path, reason }),
                CorruptPolicy::StartEmpty => {
                    warn!(
                        path = %path.display(),
                        %reason,
                        "dataset file is corrupt, starting empty"
                    );
                    Dataset::new()
                }
            },
        };

        Ok(Self { path, dataset })
    }

    /// Create a store over an existing in-memory dataset without touching disk
    pub fn with_dataset(path: impl Into<PathBuf>, dataset: Dataset) -> Self {
        Self {
            path: path.into(),
            dataset,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Read-only queries over the current dataset
    pub fn query(&self) -> DatasetQuery<'_> {
        DatasetQuery::new(&self.dataset)
    }

    /// Records for a topic, empty if the topic is absent
    pub fn get_topic(&self, name: &str) -> &[Problem] {
        self.dataset.topic(name)
    }

    /// Create an empty topic in memory. Returns true if it was created.
    pub fn ensure_topic(&mut self, name: &str) -> bool {
        self.dataset.ensure_topic(name)
    }

    /// Append a record to the end of a topic in memory
    ///
    /// The record must carry the topic's next id; nothing is renumbered
    /// here. Call [`persist`](Self::persist) to make the change durable.
    pub fn append(&mut self, topic: &str, record: Problem) -> Result<()> {
        push_next(&mut self.dataset, topic, record)
    }

    /// Append records to a topic and persist them as one write
    ///
    /// The topic is created if missing, so an empty batch still records the
    /// topic. On any failure the in-memory dataset is left unchanged.
    pub fn append_batch(&mut self, topic: &str, records: Vec<Problem>) -> Result<()> {
        let mut next = self.dataset.clone();
        next.ensure_topic(topic);
        for record in records {
            push_next(&mut next, topic, record)?;
        }
        self.commit(next)
    }

    /// Remove records by id and renumber the rest to `1..=n`
    ///
    /// Relative order of the remaining records is preserved. If a stored id
    /// is not a positive integer the removal is rejected and logged.
    pub fn remove(&mut self, topic: &str, ids: &BTreeSet<u32>) -> Result<RemoveOutcome> {
        if !self.dataset.contains_topic(topic) {
            warn!(topic, "no problems found for topic");
            return Ok(RemoveOutcome::TopicMissing);
        }
        let records = self.dataset.topic(topic);

        let kept = match filter_and_renumber(topic, records, ids) {
            Ok(kept) => kept,
            Err(e) => {
                error!(topic, error = %e, "failed to remove problems");
                return Ok(RemoveOutcome::Rejected(e.to_string()));
            }
        };

        let removed = records.len() - kept.len();
        let remaining = kept.len();

        let mut next = self.dataset.clone();
        next.replace_topic(topic, kept);
        self.commit(next)?;

        info!(topic, removed, remaining, ?ids, "removed problems");
        Ok(RemoveOutcome::Removed { removed, remaining })
    }

    /// Write the full dataset to the backing file
    pub fn persist(&self) -> Result<()> {
        write_dataset(&self.path, &self.dataset)
    }

    fn commit(&mut self, next: Dataset) -> Result<()> {
        write_dataset(&self.path, &next)?;
        self.dataset = next;
        Ok(())
    }
}

fn push_next(dataset: &mut Dataset, topic: &str, record: Problem) -> Result<()> {
    let expected = dataset.next_id(topic);
    if record.numeric_id() != Some(expected) {
        return Err(StoreError::OutOfSequence {
            topic: topic.to_string(),
            id: record.id,
            expected,
        });
    }
    dataset.ensure_topic(topic);
    if let Some(problems) = dataset.topic_mut(topic) {
        problems.push(record);
    }
    Ok(())
}

fn filter_and_renumber(
    topic: &str,
    records: &[Problem],
    ids: &BTreeSet<u32>,
) -> Result<Vec<Problem>> {
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let id = record.numeric_id().ok_or_else(|| StoreError::InvalidId {
            topic: topic.to_string(),
            id: record.id.clone(),
        })?;
        if !ids.contains(&id) {
            kept.push(record.clone());
        }
    }

    for (rank, record) in kept.iter_mut().enumerate() {
        record.id = (rank + 1).to_string();
    }
    Ok(kept)
}

fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let content = serde_json::to_string_pretty(dataset)?;
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    // A symlinked dataset is rewritten at its target so the link survives.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut staged = NamedTempFile::new_in(parent).map_err(write_err)?;
    staged.write_all(content.as_bytes()).map_err(write_err)?;
    if let Ok(existing) = fs::metadata(&target) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(&target).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "persisted dataset");
    Ok(())
}
