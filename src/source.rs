//! Content sources: fully materialized page data plus metadata.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{DocumentMetadata, PageBlock};

/// Placeholder replaced by the document date in page text.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Long date format used for [`DATE_PLACEHOLDER`] (`January 31, 2025`).
const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// Everything needed to generate one document.
///
/// JSON layout:
///
/// ```json
/// {
///   "metadata": { "title": "Proposal", "author": "Team", "created": "2025-01-31T00:00:00Z" },
///   "pages": [ { "title": "Cover", "subtitle": "Draft", "lines": ["Date: {date}", ""] } ]
/// }
/// ```
///
/// A missing `modified` timestamp takes the `created` value. Titles, subtitles
/// and lines may contain `{date}`, which [`ContentSource::resolved_pages`]
/// replaces with the creation date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    /// Document metadata
    #[serde(default)]
    pub metadata: DocumentMetadata,

    /// Pages in rendering order
    pub pages: Vec<PageBlock>,
}

impl ContentSource {
    /// Decode a source from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a source from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| Error::InvalidSource(format!("{}: {}", path.display(), e)))
    }

    /// Pages with every `{date}` replaced by the metadata creation date.
    pub fn resolved_pages(&self) -> Vec<PageBlock> {
        let date = self.metadata.created.format(LONG_DATE_FORMAT).to_string();
        let fill = |text: &str| text.replace(DATE_PLACEHOLDER, &date);

        self.pages
            .iter()
            .map(|page| PageBlock {
                title: fill(&page.title),
                subtitle: page.subtitle.as_deref().map(fill),
                lines: page.lines.iter().map(|line| fill(line)).collect(),
            })
            .collect()
    }

    /// Encode this source as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
