//! CSV-backed record sink
//!
//! Rows use fixed columns
//! `url,title,h1,metaDescription,metaTitle,links,images,bodyText,status,scraped_at`;
//! the `links` and `images` cells hold JSON-encoded arrays so the tabular file
//! stays a single flat table.

use crate::crawler::{CrawlRecord, PageLink, PageStatus};
use crate::storage::traits::{RecordSink, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One CSV row as it appears on disk
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    url: String,
    title: String,
    h1: String,
    #[serde(rename = "metaDescription")]
    meta_description: String,
    #[serde(rename = "metaTitle")]
    meta_title: String,
    links: String,
    images: String,
    #[serde(rename = "bodyText")]
    body_text: String,
    status: String,
    scraped_at: String,
}

impl CsvRow {
    fn from_record(record: &CrawlRecord) -> StorageResult<Self> {
        let links = serde_json::to_string(&record.links)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let images = serde_json::to_string(&record.images)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(Self {
            url: record.url.clone(),
            title: record.title.clone(),
            h1: record.h1.clone(),
            meta_description: record.meta_description.clone(),
            meta_title: record.meta_title.clone(),
            links,
            images,
            body_text: record.body_text.clone(),
            status: record.status.as_str().to_string(),
            scraped_at: record.scraped_at.to_rfc3339(),
        })
    }

    fn into_record(self) -> Result<CrawlRecord, String> {
        let links: Vec<PageLink> =
            serde_json::from_str(&self.links).map_err(|e| format!("bad links cell: {}", e))?;
        let images: Vec<String> =
            serde_json::from_str(&self.images).map_err(|e| format!("bad images cell: {}", e))?;
        let status = PageStatus::from_str(&self.status)?;
        let scraped_at = DateTime::parse_from_rfc3339(&self.scraped_at)
            .map_err(|e| format!("bad timestamp: {}", e))?
            .with_timezone(&Utc);

        Ok(CrawlRecord {
            url: self.url,
            title: self.title,
            h1: self.h1,
            meta_description: self.meta_description,
            meta_title: self.meta_title,
            links,
            images,
            body_text: self.body_text,
            status,
            scraped_at,
        })
    }
}

/// Append-only CSV sink for crawl records
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing to the given CSV path
    ///
    /// The file is created lazily on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once at least one record has been written
    pub fn has_data(&self) -> bool {
        self.path
            .metadata()
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, records: &[CrawlRecord]) -> StorageResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        // Header only when starting a fresh file
        let write_header = !self.has_data();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);

        for record in records {
            writer.serialize(CsvRow::from_record(record)?)?;
        }
        writer.flush()?;

        tracing::debug!(
            "Appended {} records to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }

    fn read_all(&self) -> StorageResult<Vec<CrawlRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();

        for row in reader.deserialize::<CsvRow>() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Skipping unreadable CSV row: {}", e);
                    continue;
                }
            };

            match row.into_record() {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping bad row: {}", e),
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_record(url: &str) -> CrawlRecord {
        CrawlRecord {
            url: url.to_string(),
            title: "Title".to_string(),
            h1: "Heading".to_string(),
            meta_description: "Desc, with comma".to_string(),
            meta_title: "Meta".to_string(),
            links: vec![PageLink {
                text: "Next".to_string(),
                href: "/page/2".to_string(),
            }],
            images: vec!["/logo.png".to_string()],
            body_text: "Some body text".to_string(),
            status: PageStatus::Success,
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("none.csv"));
        assert!(sink.read_all().unwrap().is_empty());
        assert!(!sink.has_data());
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("records.csv"));

        let record = sample_record("https://example.com/");
        sink.append(std::slice::from_ref(&record)).unwrap();

        let read = sink.read_all().unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].url, record.url);
        assert_eq!(read[0].links, record.links);
        assert_eq!(read[0].images, record.images);
        assert_eq!(read[0].status, PageStatus::Success);
    }

    #[test]
    fn test_append_preserves_existing_rows() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("records.csv"));

        sink.append(&[sample_record("https://example.com/a")]).unwrap();
        sink.append(&[sample_record("https://example.com/b")]).unwrap();

        let read = sink.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].url, "https://example.com/a");
        assert_eq!(read[1].url, "https://example.com/b");
    }

    #[test]
    fn test_append_empty_batch_creates_nothing() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path().join("records.csv"));
        sink.append(&[]).unwrap();
        assert!(!sink.path().exists());
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut sink = CsvSink::new(&path);

        sink.append(&[sample_record("https://example.com/a")]).unwrap();
        sink.append(&[sample_record("https://example.com/b")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("metaDescription").count(), 1);
        assert!(content.starts_with(
            "url,title,h1,metaDescription,metaTitle,links,images,bodyText,status,scraped_at"
        ));
    }

    #[test]
    fn test_bad_rows_dropped_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut sink = CsvSink::new(&path);
        sink.append(&[sample_record("https://example.com/good")]).unwrap();

        // Corrupt a second row by hand: links cell is not valid JSON
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("https://example.com/bad,t,h,d,m,not-json,[],b,SUCCESS,2024-01-01T00:00:00+00:00\n");
        std::fs::write(&path, content).unwrap();

        let read = sink.read_all().unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].url, "https://example.com/good");
    }
}
