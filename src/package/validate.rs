//! Structural checks shared by assembly and archive verification.

use std::collections::HashSet;
use std::fmt;

use quick_xml::events::Event;

use crate::error::{Error, Result};

use super::content_types::ContentTypes;
use super::relationships::{resolve_target, source_part_for, Relationships};
use super::{CONTENT_TYPES_PATH, PACKAGE_RELS_PATH};

/// Anything that exposes named package parts.
pub trait PartSource {
    /// Part names in archive order.
    fn part_names(&self) -> Vec<String>;

    /// Raw content of one part.
    fn read_part(&self, path: &str) -> Result<Vec<u8>>;

    /// Content of one part as text, without a UTF-8 byte order mark.
    fn read_part_text(&self, path: &str) -> Result<String> {
        let bytes = self.read_part(path)?;
        let text = String::from_utf8(bytes).map_err(|e| Error::Encoding(format!("{path}: {e}")))?;
        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

/// A relationship whose target is not in the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingTarget {
    /// The .rels part declaring the relationship
    pub rels_part: String,
    /// Relationship ID
    pub id: String,
    /// Target resolved to an archive path
    pub target: String,
}

impl fmt::Display for DanglingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.rels_part, self.id, self.target)
    }
}

/// Outcome of a structural check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Entry names in archive order
    pub entries: Vec<String>,
    /// Entry names that appear more than once
    pub duplicate_entries: Vec<String>,
    /// Required parts that are absent
    pub missing_parts: Vec<String>,
    /// Relationships pointing at absent parts
    pub dangling_targets: Vec<DanglingTarget>,
    /// Parts without a declared content type
    pub untyped_parts: Vec<String>,
}

impl VerifyReport {
    /// Check if no problem was found.
    pub fn is_ok(&self) -> bool {
        self.duplicate_entries.is_empty()
            && self.missing_parts.is_empty()
            && self.dangling_targets.is_empty()
            && self.untyped_parts.is_empty()
    }

    /// One-line description of every problem found.
    pub fn summary(&self) -> String {
        let mut problems = Vec::new();
        for name in &self.duplicate_entries {
            problems.push(format!("duplicate entry {name}"));
        }
        for name in &self.missing_parts {
            problems.push(format!("missing part {name}"));
        }
        for dangling in &self.dangling_targets {
            problems.push(format!("dangling relationship {dangling}"));
        }
        for name in &self.untyped_parts {
            problems.push(format!("no content type for {name}"));
        }
        if problems.is_empty() {
            "ok".to_string()
        } else {
            problems.join("; ")
        }
    }
}

/// Check relationship targets, content-type coverage and entry uniqueness.
///
/// Fails outright only when the content-type manifest is missing or a
/// manifest or relationships part cannot be parsed; everything else is
/// collected into the report.
pub fn verify_parts<S: PartSource + ?Sized>(source: &S) -> Result<VerifyReport> {
    let entries = source.part_names();
    let mut report = VerifyReport::default();

    let mut seen = HashSet::new();
    for name in &entries {
        if !seen.insert(name.as_str()) && !report.duplicate_entries.contains(name) {
            report.duplicate_entries.push(name.clone());
        }
    }

    let types = ContentTypes::parse(&source.read_part_text(CONTENT_TYPES_PATH)?)?;
    for name in &entries {
        // Directory entries and the manifest itself need no declaration.
        if name == CONTENT_TYPES_PATH || name.ends_with('/') {
            continue;
        }
        if types.content_type_for(name).is_none() {
            report.untyped_parts.push(name.clone());
        }
    }

    if !seen.contains(PACKAGE_RELS_PATH) {
        report.missing_parts.push(PACKAGE_RELS_PATH.to_string());
    }

    for rels_part in entries.iter().filter(|n| n.ends_with(".rels")) {
        let Some(source_part) = source_part_for(rels_part) else {
            continue;
        };
        let rels = Relationships::parse(&source.read_part_text(rels_part)?)?;
        for rel in rels.iter().filter(|r| !r.external) {
            let target = resolve_target(&source_part, &rel.target);
            if !seen.contains(target.as_str()) {
                report.dangling_targets.push(DanglingTarget {
                    rels_part: rels_part.clone(),
                    id: rel.id.clone(),
                    target,
                });
            }
        }
    }

    report.entries = entries;
    Ok(report)
}

/// Check that `xml` is well-formed: tags balance and every text node
/// unescapes cleanly.
pub fn check_well_formed(xml: &str) -> Result<()> {
    let mut reader = quick_xml::Reader::from_str(xml);
    let mut depth = 0usize;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(e)) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::Encoding(format!(
                        "unexpected closing tag {} at byte {position}",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::Encoding(format!("text at byte {position}: {err}")))?;
                if let Some(c) = text.chars().find(|&c| !is_xml_char(c)) {
                    return Err(Error::Encoding(format!(
                        "character U+{:04X} in text at byte {position} is not allowed in XML",
                        c as u32
                    )));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(Error::Encoding(format!("at byte {position}: {err}"))),
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::Encoding(format!("{depth} unclosed element(s)")));
    }
    Ok(())
}

/// The XML 1.0 `Char` production. C0 controls other than tab, line feed and
/// carriage return are excluded, even when written as character references.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(check_well_formed("<a><b x=\"1\">t &amp; u</b><c/></a>").is_ok());
    }

    #[test]
    fn test_bare_ampersand() {
        let err = check_well_formed("<a>fish & chips</a>").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_control_characters_rejected() {
        let rejected = [
            "<a>bell\u{7}here</a>",
            "<a>v\u{b}tab</a>",
            "<a>nul&#0;</a>",
            "<a>&#x1F;</a>",
        ];
        for xml in rejected {
            let err = check_well_formed(xml).unwrap_err();
            assert!(matches!(err, Error::Encoding(_)), "{xml:?}");
        }
        assert!(check_well_formed("<a>tab\there\r\nnext \u{a0}\u{1F680}</a>").is_ok());
    }

    #[test]
    fn test_unbalanced_tags() {
        assert!(check_well_formed("<a><b></a>").is_err());
        assert!(check_well_formed("<a><b></b>").is_err());
        assert!(check_well_formed("</a>").is_err());
    }

    #[test]
    fn test_summary() {
        let mut report = VerifyReport::default();
        assert!(report.is_ok());
        assert_eq!(report.summary(), "ok");

        report.dangling_targets.push(DanglingTarget {
            rels_part: "_rels/.rels".to_string(),
            id: "rId1".to_string(),
            target: "word/document.xml".to_string(),
        });
        report.untyped_parts.push("media/a.png".to_string());
        assert!(!report.is_ok());
        assert_eq!(
            report.summary(),
            "dangling relationship _rels/.rels rId1 -> word/document.xml; no content type for media/a.png"
        );
    }
}
