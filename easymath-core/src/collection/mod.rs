//! Topic collection: turning generated text into numbered, persisted records

mod manager;

pub use manager::{BatchReport, Confirm, ManualAdd, TopicCollectionManager};
