//! Run formatting.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Font size of page titles, in half-points (18pt).
pub const TITLE_SIZE: u32 = 36;

/// Font size of page subtitles, in half-points (14pt).
pub const SUBTITLE_SIZE: u32 = 28;

/// Font size of body lines, in half-points (11pt).
pub const BODY_SIZE: u32 = 22;

/// Formatting applied to a rendered text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,

    /// Font size in half-points (e.g., 24 = 12pt); `None` inherits the default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<NonZeroU32>,
}

impl RunStyle {
    /// Create a style that inherits everything.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Create a bold style.
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Set the font size in half-points.
    ///
    /// # Panics
    ///
    /// Panics if `half_points` is zero.
    pub fn with_size(mut self, half_points: u32) -> Self {
        let size = NonZeroU32::new(half_points)
            .unwrap_or_else(|| panic!("font size must be a positive number of half-points"));
        self.size = Some(size);
        self
    }

    /// Set the font size in whole points.
    ///
    /// # Panics
    ///
    /// Panics if `points` is zero or the half-point value overflows.
    pub fn with_points(self, points: u32) -> Self {
        let half_points = points
            .checked_mul(2)
            .unwrap_or_else(|| panic!("font size of {points}pt is out of range"));
        self.with_size(half_points)
    }

    /// Font size in half-points, if set.
    pub fn size_half_points(&self) -> Option<u32> {
        self.size.map(NonZeroU32::get)
    }

    /// Style of page titles.
    pub fn title() -> Self {
        Self::bold().with_size(TITLE_SIZE)
    }

    /// Style of page subtitles.
    pub fn subtitle() -> Self {
        Self::plain().with_size(SUBTITLE_SIZE)
    }

    /// Style of body lines.
    pub fn body() -> Self {
        Self::plain().with_size(BODY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_are_doubled() {
        let style = RunStyle::plain().with_points(11);
        assert_eq!(style.size_half_points(), Some(22));
    }

    #[test]
    fn test_presets() {
        assert!(RunStyle::title().bold);
        assert_eq!(RunStyle::title().size_half_points(), Some(TITLE_SIZE));
        assert!(!RunStyle::subtitle().bold);
        assert_eq!(RunStyle::body().size_half_points(), Some(BODY_SIZE));
        assert_eq!(RunStyle::plain().size_half_points(), None);
    }

    #[test]
    #[should_panic(expected = "positive number of half-points")]
    fn test_zero_size_panics() {
        let _ = RunStyle::bold().with_size(0);
    }

    #[test]
    fn test_zero_size_rejected_on_deserialize() {
        assert!(serde_json::from_str::<RunStyle>(r#"{"size": 0}"#).is_err());
        let style: RunStyle = serde_json::from_str(r#"{"bold": true, "size": 28}"#).unwrap();
        assert_eq!(style, RunStyle::bold().with_size(28));
    }
}
