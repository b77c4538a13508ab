//! Dataset model, latex normalization, the JSON record store and queries

mod latex;
mod query;
mod store;
mod types;

pub use latex::normalize_latex;
pub use query::{DatasetQuery, NotFound, TopicSummary};
pub use store::{CorruptPolicy, LoadOutcome, RecordStore, RemoveOutcome, load};
pub use types::{Dataset, Problem};
