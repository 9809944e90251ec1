//! Content-type manifest (`[Content_Types].xml`).

use crate::error::{Error, Result};
use crate::render::escape_text;

/// Content type of relationship parts.
pub const RELATIONSHIPS_TYPE: &str = "application/vnd.openxmlformats-package.relationships+xml";
/// Content type of generic XML parts.
pub const XML_TYPE: &str = "application/xml";
/// Content type of the main document part.
pub const MAIN_DOCUMENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
/// Content type of the core properties part.
pub const CORE_PROPERTIES_TYPE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
/// Content type of the extended properties part.
pub const EXTENDED_PROPERTIES_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// A default mapping from file extension to content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultType {
    /// Extension without the dot (e.g., "rels")
    pub extension: String,
    /// Content type
    pub content_type: String,
}

/// An explicit content type for one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideType {
    /// Absolute part name (e.g., "/word/document.xml")
    pub part_name: String,
    /// Content type
    pub content_type: String,
}

/// The package content-type manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// Extension defaults, in declaration order
    pub defaults: Vec<DefaultType>,
    /// Part overrides, in declaration order
    pub overrides: Vec<OverrideType>,
}

impl ContentTypes {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// The manifest of a word-processing package with core and extended
    /// properties.
    pub fn wordprocessing() -> Self {
        let mut types = Self::new();
        types.add_default("rels", RELATIONSHIPS_TYPE);
        types.add_default("xml", XML_TYPE);
        types.add_override("/word/document.xml", MAIN_DOCUMENT_TYPE);
        types.add_override("/docProps/core.xml", CORE_PROPERTIES_TYPE);
        types.add_override("/docProps/app.xml", EXTENDED_PROPERTIES_TYPE);
        types
    }

    /// Add or replace an extension default.
    pub fn add_default(&mut self, extension: impl Into<String>, content_type: impl Into<String>) {
        let extension = extension.into().to_ascii_lowercase();
        let content_type = content_type.into();
        match self.defaults.iter_mut().find(|d| d.extension == extension) {
            Some(existing) => existing.content_type = content_type,
            None => self.defaults.push(DefaultType {
                extension,
                content_type,
            }),
        }
    }

    /// Add or replace a part override.
    pub fn add_override(&mut self, part_name: impl Into<String>, content_type: impl Into<String>) {
        let part_name = part_name.into();
        let content_type = content_type.into();
        match self.overrides.iter_mut().find(|o| o.part_name == part_name) {
            Some(existing) => existing.content_type = content_type,
            None => self.overrides.push(OverrideType {
                part_name,
                content_type,
            }),
        }
    }

    /// Resolve the content type of an archive entry.
    ///
    /// Overrides win over extension defaults. `path` is an archive entry name
    /// without the leading slash.
    pub fn content_type_for(&self, path: &str) -> Option<&str> {
        let part_name = format!("/{}", path.trim_start_matches('/'));
        if let Some(o) = self
            .overrides
            .iter()
            .find(|o| o.part_name.eq_ignore_ascii_case(&part_name))
        {
            return Some(&o.content_type);
        }

        let file_name = part_name.rsplit('/').next().unwrap_or_default();
        let extension = file_name.rsplit_once('.').map(|(_, ext)| ext)?;
        self.defaults
            .iter()
            .find(|d| d.extension.eq_ignore_ascii_case(extension))
            .map(|d| d.content_type.as_str())
    }

    /// Serialize the manifest.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(&format!("<Types xmlns=\"{CONTENT_TYPES_NS}\">\n"));
        for d in &self.defaults {
            xml.push_str(&format!(
                "  <Default Extension=\"{}\" ContentType=\"{}\"/>\n",
                escape_text(&d.extension),
                escape_text(&d.content_type)
            ));
        }
        for o in &self.overrides {
            xml.push_str(&format!(
                "  <Override PartName=\"{}\" ContentType=\"{}\"/>\n",
                escape_text(&o.part_name),
                escape_text(&o.content_type)
            ));
        }
        xml.push_str("</Types>\n");
        xml
    }

    /// Parse a manifest.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut types = Self::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) => {
                    let element = e.local_name().as_ref().to_vec();
                    let mut key = String::new();
                    let mut content_type = String::new();

                    for attr in e.attributes().flatten() {
                        let value = attr
                            .unescape_value()
                            .map_err(|e| Error::XmlParse(e.to_string()))?
                            .into_owned();
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => key = value,
                            b"ContentType" => content_type = value,
                            _ => {}
                        }
                    }

                    match element.as_slice() {
                        b"Default" if !key.is_empty() => types.add_default(key, content_type),
                        b"Override" if !key.is_empty() => types.add_override(key, content_type),
                        _ => {}
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(types)
    }
}
