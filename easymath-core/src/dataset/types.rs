//! Dataset and problem record types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::latex::normalize_latex;

/// A single statement and proof pair
///
/// `id` is stored as a string on disk. Within a topic the ids are the
/// contiguous ranks `1..=n` of the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub statement: String,
    pub proof: String,
}

impl Problem {
    /// Build a record, normalizing the latex in both texts
    pub fn new(id: u32, statement: &str, proof: &str) -> Self {
        Self {
            id: id.to_string(),
            statement: normalize_latex(statement.trim()),
            proof: normalize_latex(proof.trim()),
        }
    }

    /// The id as a positive integer, if it is one
    pub fn numeric_id(&self) -> Option<u32> {
        self.id.trim().parse::<u32>().ok().filter(|id| *id > 0)
    }
}

/// Topic name to ordered records
///
/// Topics are kept in a `BTreeMap` so the serialized document has a stable
/// key order and rewriting an unchanged dataset is byte-for-byte identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    topics: BTreeMap<String, Vec<Problem>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for a topic, empty if the topic is absent
    pub fn topic(&self, name: &str) -> &[Problem] {
        self.topics.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_topic(&self, name: &str) -> bool {
        self.topics.contains_key(name)
    }

    /// Iterate topics with their records in key order
    pub fn topics(&self) -> impl Iterator<Item = (&str, &[Problem])> {
        self.topics
            .iter()
            .map(|(name, problems)| (name.as_str(), problems.as_slice()))
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Number of records across every topic
    pub fn total_problems(&self) -> usize {
        self.topics.values().map(Vec::len).sum()
    }

    /// Create an empty topic if missing. Returns true if it was created.
    pub fn ensure_topic(&mut self, name: &str) -> bool {
        if self.topics.contains_key(name) {
            return false;
        }
        self.topics.insert(name.to_string(), Vec::new());
        true
    }

    /// Id the next appended record must carry
    ///
    /// One past the largest numeric id in the topic, which is `len + 1`
    /// whenever the topic's ids are contiguous.
    pub fn next_id(&self, topic: &str) -> u32 {
        self.topic(topic)
            .iter()
            .filter_map(Problem::numeric_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Find a stored record whose statement matches `statement` after normalization
    ///
    /// Stored statements are already normalized, so only the candidate is.
    pub fn find_statement(&self, topic: &str, statement: &str) -> Option<&Problem> {
        let wanted = normalize_latex(statement.trim());
        self.topic(topic)
            .iter()
            .find(|p| p.statement.trim() == wanted)
    }

    pub(crate) fn topic_mut(&mut self, name: &str) -> Option<&mut Vec<Problem>> {
        self.topics.get_mut(name)
    }

    pub(crate) fn replace_topic(&mut self, name: &str, problems: Vec<Problem>) {
        self.topics.insert(name.to_string(), problems);
    }
}

impl FromIterator<(String, Vec<Problem>)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Problem>)>>(iter: I) -> Self {
        Self {
            topics: iter.into_iter().collect(),
        }
    }
}
