//! The actual pipelines

pub mod archive_batch;
pub mod listing_match;
