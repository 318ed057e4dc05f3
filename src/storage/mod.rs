//! Storage module for Pagesift
//!
//! Defines the record sink contract consumed by the crawl loop and the CSV
//! implementation backing it.

mod csv_sink;
mod traits;

pub use csv_sink::CsvSink;
pub use traits::{RecordSink, StorageError, StorageResult};
