//! Record sink trait and storage error types

use crate::crawler::CrawlRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable sink for crawl records
///
/// `append` must preserve existing rows and be atomic per call, so that
/// concurrent crawl invocations sharing one sink never interleave partial
/// batches. `read_all` returns every stored record; rows that fail to parse
/// are dropped with a warning rather than failing the read.
pub trait RecordSink {
    /// Appends a batch of records, keeping all previously written rows
    fn append(&mut self, records: &[CrawlRecord]) -> StorageResult<()>;

    /// Reads back all stored records
    fn read_all(&self) -> StorageResult<Vec<CrawlRecord>>;
}
