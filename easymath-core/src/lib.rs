//! easymath-core: record store and topic collection for the easymath dataset
//!
//! This crate owns everything between the text-generation provider and the
//! JSON document on disk:
//!
//! - **Latex normalization** - [`normalize_latex`] fixes double-escaped backslashes
//! - **Record store** - [`RecordStore`] loads, mutates and rewrites the dataset file
//! - **Queries** - [`DatasetQuery`] for lookups by topic and id and per-topic counts
//! - **Generation** - [`ProblemGenerator`] capability with [`LlmGenerator`] and [`MockGenerator`]
//! - **Collection** - [`TopicCollectionManager`] turns generated text into numbered records
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use easymath_core::{
//!     CorruptPolicy, GenerationParams, MockGenerator, RecordStore, TopicCollectionManager,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RecordStore::open("EasyMathDataset.json", CorruptPolicy::Fail)?;
//! let generator = MockGenerator::new().with_statements("Logic", ["p implies p."]);
//! let mut manager = TopicCollectionManager::new(store, Arc::new(generator));
//!
//! let report = manager
//!     .add_topic_problems("Logic", 5, &GenerationParams::default())
//!     .await?;
//! println!("added {} problems", report.added.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐     ┌───────────────────────┐
//! │  TopicCollectionManager  │────▶│   ProblemGenerator    │
//! └────────────┬─────────────┘     │ (LLM / mock)          │
//!              │ append_batch      └───────────────────────┘
//!              ▼
//! ┌──────────────────────────┐     ┌───────────────────────┐
//! │       RecordStore        │────▶│  EasyMathDataset.json │
//! └────────────┬─────────────┘     └───────────────────────┘
//!              │ query()
//!              ▼
//! ┌──────────────────────────┐
//! │       DatasetQuery       │
//! └──────────────────────────┘
//! ```

pub mod collection;
pub mod dataset;
pub mod error;
pub mod generation;

pub use collection::{BatchReport, Confirm, ManualAdd, TopicCollectionManager};
pub use dataset::{
    CorruptPolicy, Dataset, DatasetQuery, LoadOutcome, NotFound, Problem, RecordStore,
    RemoveOutcome, TopicSummary, normalize_latex,
};
pub use error::{GenerationError, StoreError};
pub use generation::{
    DEFAULT_MODEL, GenerationParams, LlmGenerator, MockGenerator, ProblemGenerator,
};
