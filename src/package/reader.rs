//! Read access to a written package archive.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use quick_xml::events::Event;

use crate::error::{Error, Result};

use super::content_types::ContentTypes;
use super::relationships::{rels_path_for, Relationships};
use super::validate::{check_well_formed, verify_parts, PartSource, VerifyReport};
use super::{CONTENT_TYPES_PATH, DOCUMENT_PATH};

/// A `.docx` archive opened for inspection.
pub struct PackageReader {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl PackageReader {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxgen::package::PackageReader;
    ///
    /// let reader = PackageReader::open("report.docx")?;
    /// assert!(reader.verify()?.is_ok());
    /// # Ok::<(), docxgen::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a package from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        (0..archive.len())
            .filter_map(|i| archive.name_for_index(i).map(String::from))
            .collect()
    }

    /// Check if an entry exists.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().index_for_name(path).is_some()
    }

    /// Read an entry's raw bytes.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingPart(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an XML entry as text.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        self.read_part_text(path)
    }

    /// Parse the content-type manifest.
    pub fn content_types(&self) -> Result<ContentTypes> {
        ContentTypes::parse(&self.read_xml(CONTENT_TYPES_PATH)?)
    }

    /// Parse the relationships of `part_path` (`""` for the package root).
    ///
    /// A part without a .rels entry has no relationships.
    pub fn relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = rels_path_for(part_path);
        if !self.exists(&rels_path) {
            return Ok(Relationships::new());
        }
        Relationships::parse(&self.read_xml(&rels_path)?)
    }

    /// Check relationship targets, content types and document markup.
    pub fn verify(&self) -> Result<VerifyReport> {
        let report = verify_parts(self)?;
        if self.exists(DOCUMENT_PATH) {
            check_well_formed(&self.read_xml(DOCUMENT_PATH)?)?;
        }
        Ok(report)
    }

    /// Text of every paragraph in `word/document.xml`, unescaped, in order.
    ///
    /// Paragraphs without text runs (page breaks) yield empty strings.
    pub fn paragraph_texts(&self) -> Result<Vec<String>> {
        let xml = self.read_xml(DOCUMENT_PATH)?;
        let mut reader = quick_xml::Reader::from_str(&xml);

        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"w:p" => current = Some(String::new()),
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" => {
                    paragraphs.push(String::new());
                }
                Ok(Event::Text(e)) if in_text => {
                    if let Some(ref mut text) = current {
                        let decoded = e.unescape().map_err(|e| Error::Encoding(e.to_string()))?;
                        text.push_str(&decoded);
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

impl PartSource for PackageReader {
    fn part_names(&self) -> Vec<String> {
        self.entry_names()
    }

    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        self.read_binary(path)
    }
}

impl std::fmt::Debug for PackageReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageReader")
            .field("entries", &self.archive.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentMetadata, PageBlock};
    use crate::package::{assemble, build_manifest_parts, wrap_body, write_to_writer};
    use crate::render::{render_document, PageLayout, BLANK_LINE_TEXT};

    fn reader_for(pages: &[PageBlock]) -> PackageReader {
        let body = render_document(pages, &PageLayout::A4);
        let package = assemble(
            wrap_body(&body),
            build_manifest_parts(&DocumentMetadata::default()),
        )
        .unwrap();
        let cursor = write_to_writer(&package, Cursor::new(Vec::new())).unwrap();
        PackageReader::from_bytes(cursor.into_inner()).unwrap()
    }

    #[test]
    fn test_paragraph_texts() {
        let pages = vec![
            PageBlock::new("Cover").with_lines(["Line A", ""]),
            PageBlock::new("End").with_line("Line B"),
        ];
        let texts = reader_for(&pages).paragraph_texts().unwrap();
        assert_eq!(
            texts,
            vec![
                "Cover",
                BLANK_LINE_TEXT,
                "Line A",
                BLANK_LINE_TEXT,
                "",
                "End",
                BLANK_LINE_TEXT,
                "Line B"
            ]
        );
    }

    #[test]
    fn test_relationships_of_parts() {
        let reader = reader_for(&[PageBlock::new("Only")]);
        assert_eq!(reader.relationships("").unwrap().len(), 3);
        assert!(reader.relationships(DOCUMENT_PATH).unwrap().is_empty());
        assert!(reader.relationships("docProps/core.xml").unwrap().is_empty());
    }

    #[test]
    fn test_missing_entry() {
        let reader = reader_for(&[PageBlock::new("Only")]);
        assert!(!reader.exists("word/styles.xml"));
        assert!(matches!(
            reader.read_binary("word/styles.xml"),
            Err(Error::MissingPart(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        let err = PackageReader::from_bytes(b"plain text".to_vec()).unwrap_err();
        assert!(matches!(err, Error::ZipArchive(_)));
    }
}
