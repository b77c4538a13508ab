//! Read-only lookups and per-topic reporting

use serde::Serialize;
use thiserror::Error;

use super::types::{Dataset, Problem};

/// A lookup that matched nothing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("No problems found for topic {0}")]
    Topic(String),

    #[error("No problem with id {id} in topic {topic}")]
    Id { topic: String, id: String },
}

/// Record count for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub topic: String,
    pub count: usize,
}

impl std::fmt::Display for TopicSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} proofs", self.topic, self.count)
    }
}

/// Read-only view over a dataset
#[derive(Debug, Clone, Copy)]
pub struct DatasetQuery<'a> {
    dataset: &'a Dataset,
}

impl<'a> DatasetQuery<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Find a record by topic and id
    pub fn find(&self, topic: &str, id: &str) -> Result<&'a Problem, NotFound> {
        if !self.dataset.contains_topic(topic) {
            return Err(NotFound::Topic(topic.to_string()));
        }
        let id = id.trim();
        self.dataset
            .topic(topic)
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| NotFound::Id {
                topic: topic.to_string(),
                id: id.to_string(),
            })
    }

    /// One entry per topic, in dataset order
    pub fn summary(&self) -> Vec<TopicSummary> {
        self.dataset
            .topics()
            .map(|(topic, problems)| TopicSummary {
                topic: topic.to_string(),
                count: problems.len(),
            })
            .collect()
    }

    pub fn topic_names(&self) -> Vec<&'a str> {
        self.dataset.topics().map(|(topic, _)| topic).collect()
    }

    pub fn total(&self) -> usize {
        self.dataset.total_problems()
    }
}
