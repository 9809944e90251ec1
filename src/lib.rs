//! # docxgen
//!
//! Generate Word (DOCX) documents from structured page content.
//!
//! A document is an ordered list of [`PageBlock`]s, each with a title, an
//! optional subtitle and body lines. The crate renders them to
//! WordprocessingML, assembles the OOXML package parts around the body and
//! writes a deflate-compressed archive. Output is fully determined by the
//! input: the same pages and metadata always give the same bytes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use docxgen::{DocumentMetadata, PageBlock};
//!
//! let pages = vec![
//!     PageBlock::new("Cover")
//!         .with_subtitle("Project Proposal")
//!         .with_lines(["Prepared by: Team", "", "Version: 1.0"]),
//!     PageBlock::new("Page 2 - Summary").with_line("- First point"),
//! ];
//! let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//! let meta = DocumentMetadata::on_date("Proposal", "Team", date).with_counts_from(&pages);
//!
//! docxgen::generate_file(&pages, &meta, "proposal.docx")?;
//! # Ok::<(), docxgen::Error>(())
//! ```
//!
//! ## Lower-level APIs
//!
//! ```no_run
//! use docxgen::package::{assemble, build_manifest_parts, wrap_body, PackageReader};
//! use docxgen::render::{render_document, PageLayout};
//! # let pages = vec![docxgen::PageBlock::new("Cover")];
//! # let meta = docxgen::DocumentMetadata::default();
//!
//! let body = render_document(&pages, &PageLayout::A4);
//! let package = assemble(wrap_body(&body), build_manifest_parts(&meta))?;
//! docxgen::package::write_archive(&package, "out.docx")?;
//!
//! let report = PackageReader::open("out.docx")?.verify()?;
//! assert!(report.is_ok());
//! # Ok::<(), docxgen::Error>(())
//! ```

pub mod error;
pub mod model;
pub mod package;
pub mod render;
pub mod source;

// Re-exports
pub use error::{Error, Result};
pub use model::{DocumentMetadata, PageBlock, RunStyle};
pub use package::{DocumentPackage, PackageEntry, PackageReader, VerifyReport};
pub use render::PageLayout;
pub use source::ContentSource;

use std::io::Cursor;
use std::path::Path;

/// Render pages and assemble the complete package.
///
/// # Example
///
/// ```
/// use docxgen::{build_package, DocumentMetadata, PageBlock};
///
/// let pages = vec![PageBlock::new("Cover"), PageBlock::new("End")];
/// let package = build_package(&pages, &DocumentMetadata::default())?;
/// assert_eq!(package.len(), 6);
/// # Ok::<(), docxgen::Error>(())
/// ```
pub fn build_package(pages: &[PageBlock], metadata: &DocumentMetadata) -> Result<DocumentPackage> {
    let body = render::render_document(pages, &PageLayout::A4);
    let document = package::wrap_body(&body);
    let package = package::assemble(document, package::build_manifest_parts(metadata))?;
    Ok(package.with_modified(metadata.modified))
}

/// Generate a document in memory and return the archive bytes.
pub fn generate_bytes(pages: &[PageBlock], metadata: &DocumentMetadata) -> Result<Vec<u8>> {
    let package = build_package(pages, metadata)?;
    let cursor = package::write_to_writer(&package, Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

/// Generate a document and write it to `path`.
pub fn generate_file(
    pages: &[PageBlock],
    metadata: &DocumentMetadata,
    path: impl AsRef<Path>,
) -> Result<()> {
    let package = build_package(pages, metadata)?;
    package::write_archive(&package, path)
}

/// Generate a document from a [`ContentSource`] and write it to `path`.
///
/// `{date}` placeholders in the pages are filled from the metadata first.
pub fn generate_from_source(source: &ContentSource, path: impl AsRef<Path>) -> Result<()> {
    generate_file(&source.resolved_pages(), &source.metadata, path)
}
