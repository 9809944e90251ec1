//! OOXML package assembly.
//!
//! A [`DocumentPackage`] is the ordered set of parts that make up a `.docx`
//! file. [`assemble`] merges the document part with the manifest parts from
//! [`build_manifest_parts`] and checks the package's structural invariants;
//! [`write_archive`] persists it as a ZIP archive, and [`PackageReader`] opens
//! a written archive again for inspection.
//!
//! # Example
//!
//! ```no_run
//! use docxgen::model::{DocumentMetadata, PageBlock};
//! use docxgen::package::{assemble, build_manifest_parts, wrap_body, write_archive};
//! use docxgen::render::{render_document, PageLayout};
//!
//! let pages = vec![PageBlock::new("Cover").with_line("Hello")];
//! let meta = DocumentMetadata::default();
//! let body = render_document(&pages, &PageLayout::A4);
//! let package = assemble(wrap_body(&body), build_manifest_parts(&meta))?;
//! write_archive(&package, "cover.docx")?;
//! # Ok::<(), docxgen::Error>(())
//! ```

mod content_types;
mod parts;
mod reader;
mod relationships;
mod validate;
mod writer;

pub use content_types::{
    ContentTypes, DefaultType, OverrideType, CORE_PROPERTIES_TYPE, EXTENDED_PROPERTIES_TYPE,
    MAIN_DOCUMENT_TYPE, RELATIONSHIPS_TYPE, XML_TYPE,
};
pub use parts::{app_properties_xml, build_manifest_parts, core_properties_xml, wrap_body};
pub use reader::PackageReader;
pub use relationships::{
    rels_path_for, resolve_target, source_part_for, Relationship, Relationships,
    CORE_PROPERTIES_REL, EXTENDED_PROPERTIES_REL, OFFICE_DOCUMENT_REL,
};
pub use validate::{check_well_formed, verify_parts, DanglingTarget, PartSource, VerifyReport};
pub use writer::{write_archive, write_to_writer};

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// Archive path of the content-type manifest.
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
/// Archive path of the package relationships.
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";
/// Archive path of the main document part.
pub const DOCUMENT_PATH: &str = "word/document.xml";
/// Archive path of the document relationships.
pub const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
/// Archive path of the core properties.
pub const CORE_PROPS_PATH: &str = "docProps/core.xml";
/// Archive path of the extended properties.
pub const APP_PROPS_PATH: &str = "docProps/app.xml";

/// Archive write order of the known parts.
pub const ENTRY_ORDER: [&str; 6] = [
    CONTENT_TYPES_PATH,
    PACKAGE_RELS_PATH,
    DOCUMENT_PATH,
    DOCUMENT_RELS_PATH,
    CORE_PROPS_PATH,
    APP_PROPS_PATH,
];

/// One named part of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Archive entry path (no leading slash)
    pub path: String,
    /// Raw part content
    pub data: Vec<u8>,
}

impl PackageEntry {
    /// Create an entry.
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }

    /// Part content as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.data).map_err(|e| Error::Encoding(format!("{}: {}", self.path, e)))
    }
}

/// The complete set of parts of one document, in archive order.
///
/// Paths are unique: inserting an existing path replaces its content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPackage {
    entries: Vec<PackageEntry>,
    modified: Option<DateTime<Utc>>,
}

impl DocumentPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every archive entry with `modified`.
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Timestamp written on archive entries, if set.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// Insert an entry, replacing any entry with the same path in place.
    pub fn insert(&mut self, entry: PackageEntry) {
        match self.entries.iter_mut().find(|e| e.path == entry.path) {
            Some(existing) => existing.data = entry.data,
            None => self.entries.push(entry),
        }
    }

    /// Get an entry by path.
    pub fn get(&self, path: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Check if an entry exists.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Entries in archive order.
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Entry paths in archive order.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the package has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort entries into the fixed archive order. Unknown parts follow the
    /// known ones in insertion order.
    fn sort_entries(&mut self) {
        self.entries.sort_by_key(|e| {
            ENTRY_ORDER
                .iter()
                .position(|p| *p == e.path)
                .unwrap_or(ENTRY_ORDER.len())
        });
    }

    /// Check the structural invariants: every relationship target exists,
    /// every part has a content type, paths are unique and the document part
    /// is well-formed.
    pub fn validate(&self) -> Result<()> {
        let report = verify_parts(self)?;
        if !report.is_ok() {
            return Err(Error::InvalidPackage(report.summary()));
        }

        let document = self
            .get(DOCUMENT_PATH)
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PATH.to_string()))?;
        check_well_formed(document.text()?)
    }
}

impl PartSource for DocumentPackage {
    fn part_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        self.get(path)
            .map(|e| e.data.clone())
            .ok_or_else(|| Error::MissingPart(path.to_string()))
    }
}

/// Merge the document part with the manifest parts and validate the result.
pub fn assemble(document_xml: String, manifest_parts: Vec<PackageEntry>) -> Result<DocumentPackage> {
    let mut package = DocumentPackage::new();
    package.insert(PackageEntry::new(DOCUMENT_PATH, document_xml));
    for entry in manifest_parts {
        package.insert(entry);
    }
    package.sort_entries();
    package.validate()?;

    log::debug!("Assembled package with {} parts", package.len());
    Ok(package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentMetadata, PageBlock};
    use crate::render::{render_document, PageLayout};

    fn document_xml() -> String {
        let pages = vec![PageBlock::new("Cover").with_lines(["Line A", ""])];
        wrap_body(&render_document(&pages, &PageLayout::A4))
    }

    #[test]
    fn test_assemble_orders_entries() {
        let package = assemble(
            document_xml(),
            build_manifest_parts(&DocumentMetadata::default()),
        )
        .unwrap();
        assert_eq!(package.paths(), ENTRY_ORDER.to_vec());
    }

    #[test]
    fn test_insert_replaces() {
        let mut package = DocumentPackage::new();
        package.insert(PackageEntry::new("a.xml", "<a/>"));
        package.insert(PackageEntry::new("b.xml", "<b/>"));
        package.insert(PackageEntry::new("a.xml", "<c/>"));

        assert_eq!(package.len(), 2);
        assert_eq!(package.paths(), vec!["a.xml", "b.xml"]);
        assert_eq!(package.get("a.xml").unwrap().data, b"<c/>");
    }

    #[test]
    fn test_assemble_rejects_missing_target() {
        let manifest: Vec<PackageEntry> = build_manifest_parts(&DocumentMetadata::default())
            .into_iter()
            .filter(|e| e.path != APP_PROPS_PATH)
            .collect();
        let err = assemble(document_xml(), manifest).unwrap_err();
        assert!(matches!(err, Error::InvalidPackage(ref msg) if msg.contains(APP_PROPS_PATH)));
    }

    #[test]
    fn test_assemble_rejects_untyped_part() {
        let mut manifest = build_manifest_parts(&DocumentMetadata::default());
        manifest.push(PackageEntry::new("word/media/logo.png", vec![0x89, b'P']));
        let err = assemble(document_xml(), manifest).unwrap_err();
        assert!(matches!(err, Error::InvalidPackage(ref msg) if msg.contains("logo.png")));
    }

    #[test]
    fn test_assemble_rejects_unescaped_body() {
        let broken = wrap_body("<w:p><w:r><w:t>fish & chips</w:t></w:r></w:p>");
        let err = assemble(broken, build_manifest_parts(&DocumentMetadata::default())).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_assemble_requires_manifest() {
        let err = assemble(document_xml(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MissingPart(ref p) if p == CONTENT_TYPES_PATH));
    }
}
