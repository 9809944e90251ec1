//! Page content model.

use serde::{Deserialize, Serialize};

/// One semantic page of output: a title, an optional subtitle and body lines.
///
/// Lines render in order. An empty line renders as a blank spacer paragraph,
/// it is never dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBlock {
    /// Page title
    pub title: String,

    /// Optional subtitle shown below the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Body lines; `""` marks a blank line
    #[serde(default)]
    pub lines: Vec<String>,
}

impl PageBlock {
    /// Create a page with a title and no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Append a body line.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append several body lines.
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// The subtitle, if one is present and non-empty.
    pub fn visible_subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref().filter(|s| !s.is_empty())
    }

    /// Count whitespace-separated words across title, subtitle and lines.
    pub fn word_count(&self) -> usize {
        let title = self.title.split_whitespace().count();
        let subtitle = self
            .visible_subtitle()
            .map(|s| s.split_whitespace().count())
            .unwrap_or(0);
        let body: usize = self
            .lines
            .iter()
            .map(|line| line.split_whitespace().count())
            .sum();
        title + subtitle + body
    }
}
