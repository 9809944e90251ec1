//! Static part templates: the document envelope and the manifest parts.

use crate::model::{w3cdtf, DocumentMetadata};
use crate::render::escape_text;

use super::content_types::ContentTypes;
use super::relationships::Relationships;
use super::{
    PackageEntry, APP_PROPS_PATH, CONTENT_TYPES_PATH, CORE_PROPS_PATH, DOCUMENT_RELS_PATH,
    PACKAGE_RELS_PATH,
};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

const DOCUMENT_OPEN: &str = concat!(
    "<w:document ",
    "xmlns:wpc=\"http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas\" ",
    "xmlns:mc=\"http://schemas.openxmlformats.org/markup-compatibility/2006\" ",
    "xmlns:o=\"urn:schemas-microsoft-com:office:office\" ",
    "xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" ",
    "xmlns:m=\"http://schemas.openxmlformats.org/officeDocument/2006/math\" ",
    "xmlns:v=\"urn:schemas-microsoft-com:vml\" ",
    "xmlns:wp14=\"http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing\" ",
    "xmlns:wp=\"http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing\" ",
    "xmlns:w10=\"urn:schemas-microsoft-com:office:word\" ",
    "xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" ",
    "xmlns:w14=\"http://schemas.microsoft.com/office/word/2010/wordml\" ",
    "xmlns:wpg=\"http://schemas.microsoft.com/office/word/2010/wordprocessingGroup\" ",
    "xmlns:wpi=\"http://schemas.microsoft.com/office/word/2010/wordprocessingInk\" ",
    "xmlns:wne=\"http://schemas.microsoft.com/office/word/2006/wordml\" ",
    "xmlns:wps=\"http://schemas.microsoft.com/office/word/2010/wordprocessingShape\" ",
    "mc:Ignorable=\"w14 wp14\">",
    "<w:body>",
);

const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

/// Wrap rendered body markup into the complete `word/document.xml`.
pub fn wrap_body(body: &str) -> String {
    let mut xml =
        String::with_capacity(XML_DECLARATION.len() + DOCUMENT_OPEN.len() + body.len() + 32);
    xml.push_str(XML_DECLARATION);
    xml.push_str(DOCUMENT_OPEN);
    xml.push_str(body);
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

/// Build `docProps/core.xml`.
pub fn core_properties_xml(meta: &DocumentMetadata) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        "<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n",
    );
    xml.push_str(&format!("  <dc:title>{}</dc:title>\n", escape_text(&meta.title)));
    xml.push_str(&format!(
        "  <dc:creator>{}</dc:creator>\n",
        escape_text(&meta.author)
    ));
    if let Some(ref name) = meta.last_modified_by {
        xml.push_str(&format!(
            "  <cp:lastModifiedBy>{}</cp:lastModifiedBy>\n",
            escape_text(name)
        ));
    }
    xml.push_str(&format!(
        "  <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>\n",
        w3cdtf(&meta.created)
    ));
    xml.push_str(&format!(
        "  <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>\n",
        w3cdtf(&meta.modified)
    ));
    xml.push_str("</cp:coreProperties>\n");
    xml
}

/// Build `docProps/app.xml`.
///
/// Page and word counts are descriptive; consumers recompute them.
pub fn app_properties_xml(meta: &DocumentMetadata) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        "<Properties \
         xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
         xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\n",
    );
    xml.push_str(&format!(
        "  <Application>{}</Application>\n",
        escape_text(&meta.application)
    ));
    if let Some(pages) = meta.page_count {
        xml.push_str(&format!("  <Pages>{pages}</Pages>\n"));
    }
    if let Some(words) = meta.word_count {
        xml.push_str(&format!("  <Words>{words}</Words>\n"));
    }
    xml.push_str("</Properties>\n");
    xml
}

/// Generate the five auxiliary parts of the package.
///
/// Output depends only on `meta`, in a fixed order: content types, package
/// relationships, document relationships, core properties, extended
/// properties.
pub fn build_manifest_parts(meta: &DocumentMetadata) -> Vec<PackageEntry> {
    vec![
        PackageEntry::new(CONTENT_TYPES_PATH, ContentTypes::wordprocessing().to_xml()),
        PackageEntry::new(PACKAGE_RELS_PATH, Relationships::package().to_xml()),
        PackageEntry::new(DOCUMENT_RELS_PATH, Relationships::new().to_xml()),
        PackageEntry::new(CORE_PROPS_PATH, core_properties_xml(meta)),
        PackageEntry::new(APP_PROPS_PATH, app_properties_xml(meta)),
    ]
}
