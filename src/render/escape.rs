//! Text escaping for markup insertion.

use std::borrow::Cow;

/// Escape `& < > " '` so `text` can be placed in element content or an
/// attribute value.
///
/// This is the only routine used to insert caller-provided text into markup.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::escape::unescape;

    #[test]
    fn test_escapes_all_metacharacters() {
        assert_eq!(
            escape_text(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &apos;f&apos;"
        );
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_text("Line A"), Cow::Borrowed("Line A")));
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "R&D <team> \"quoted\" 'single'",
            "&amp; already looks escaped",
            "Ünïcödé — 日本語 🚀",
            "   leading and trailing   ",
            "",
        ];
        for sample in samples {
            let escaped = escape_text(sample);
            assert_eq!(unescape(&escaped).unwrap(), sample);
        }
    }
}
