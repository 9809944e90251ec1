//! Document metadata written to docProps/core.xml and docProps/app.xml.

use super::PageBlock;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Application name recorded in docProps/app.xml when none is given.
pub const DEFAULT_APPLICATION: &str = "docxgen";

/// 1980-01-01T00:00:00Z, the earliest time a ZIP entry can carry.
const ZIP_EPOCH_SECS: i64 = 315_532_800;

/// Metadata for one generated document.
///
/// Built once per run and passed to every part that embeds it, so the core
/// and extended properties always agree on dates and names. When decoded
/// without a `modified` timestamp, `modified` takes the `created` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MetadataFields")]
pub struct DocumentMetadata {
    /// Document title
    pub title: String,

    /// Document author/creator
    pub author: String,

    /// Last modified by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,

    /// Application that created the document
    pub application: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last modification timestamp (also used as the archive entry time)
    pub modified: DateTime<Utc>,

    /// Number of pages, descriptive only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// Word count, descriptive only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            last_modified_by: None,
            application: DEFAULT_APPLICATION.to_string(),
            created: zip_epoch(),
            modified: zip_epoch(),
            page_count: None,
            word_count: None,
        }
    }
}

impl DocumentMetadata {
    /// Create metadata created and modified at `created`.
    pub fn new(title: impl Into<String>, author: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            created,
            modified: created,
            ..Default::default()
        }
    }

    /// Create metadata stamped at midnight UTC of `date`.
    pub fn on_date(title: impl Into<String>, author: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(title, author, date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// Set both timestamps to midnight UTC of `date`.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        let stamp = date.and_time(chrono::NaiveTime::MIN).and_utc();
        self.created = stamp;
        self.modified = stamp;
        self
    }

    /// Set the last-modified-by name.
    pub fn with_last_modified_by(mut self, name: impl Into<String>) -> Self {
        self.last_modified_by = Some(name.into());
        self
    }

    /// Fill page and word counts from the content.
    pub fn with_counts_from(mut self, pages: &[PageBlock]) -> Self {
        let words: usize = pages.iter().map(PageBlock::word_count).sum();
        self.page_count = Some(saturating_u32(pages.len()));
        self.word_count = Some(saturating_u32(words));
        self
    }
}

/// Decoded form of [`DocumentMetadata`], where `modified` may be absent.
#[derive(Deserialize)]
#[serde(default)]
struct MetadataFields {
    title: String,
    author: String,
    last_modified_by: Option<String>,
    application: String,
    created: DateTime<Utc>,
    modified: Option<DateTime<Utc>>,
    page_count: Option<u32>,
    word_count: Option<u32>,
}

impl Default for MetadataFields {
    fn default() -> Self {
        let defaults = DocumentMetadata::default();
        Self {
            title: defaults.title,
            author: defaults.author,
            last_modified_by: defaults.last_modified_by,
            application: defaults.application,
            created: defaults.created,
            modified: None,
            page_count: defaults.page_count,
            word_count: defaults.word_count,
        }
    }
}

impl From<MetadataFields> for DocumentMetadata {
    fn from(fields: MetadataFields) -> Self {
        Self {
            title: fields.title,
            author: fields.author,
            last_modified_by: fields.last_modified_by,
            application: fields.application,
            created: fields.created,
            modified: fields.modified.unwrap_or(fields.created),
            page_count: fields.page_count,
            word_count: fields.word_count,
        }
    }
}

/// Format a timestamp as a W3CDTF value (`2025-01-31T00:00:00Z`).
pub fn w3cdtf(stamp: &DateTime<Utc>) -> String {
    stamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn zip_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(ZIP_EPOCH_SECS, 0).unwrap_or_default()
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_on_date_sets_both_timestamps() {
        let meta = DocumentMetadata::on_date("Proposal", "Team", date(2025, 3, 9));
        assert_eq!(meta.created, meta.modified);
        assert_eq!(w3cdtf(&meta.created), "2025-03-09T00:00:00Z");
        assert_eq!(meta.application, DEFAULT_APPLICATION);
    }

    #[test]
    fn test_default_timestamp_is_zip_epoch() {
        let meta = DocumentMetadata::default();
        assert_eq!(w3cdtf(&meta.created), "1980-01-01T00:00:00Z");
        assert_eq!(meta.modified, meta.created);
    }

    #[test]
    fn test_counts_from_pages() {
        let pages = vec![
            PageBlock::new("Cover").with_lines(["Line A", ""]),
            PageBlock::new("End").with_line("Line B"),
        ];
        let meta = DocumentMetadata::default().with_counts_from(&pages);
        assert_eq!(meta.page_count, Some(2));
        assert_eq!(meta.word_count, Some(6));
    }

    #[test]
    fn test_deserialize_partial() {
        let meta: DocumentMetadata = serde_json::from_str(
            r#"{"title": "T", "author": "A", "created": "2024-05-01T08:30:00Z", "modified": "2024-05-02T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(meta.title, "T");
        assert_eq!(w3cdtf(&meta.modified), "2024-05-02T00:00:00Z");
        assert_eq!(meta.application, DEFAULT_APPLICATION);
        assert!(meta.page_count.is_none());
    }

    #[test]
    fn test_missing_modified_follows_created() {
        let meta: DocumentMetadata =
            serde_json::from_str(r#"{"title": "T", "created": "2025-01-31T00:00:00Z"}"#).unwrap();
        assert_eq!(meta.modified, meta.created);
        assert_eq!(w3cdtf(&meta.modified), "2025-01-31T00:00:00Z");

        let empty: DocumentMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DocumentMetadata::default());
    }
}
