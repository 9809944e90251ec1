//! Body fragments and their markup.

use crate::model::RunStyle;

use super::escape::escape_text;
use super::layout::PageLayout;

/// Text of a blank-line run: a single no-break space, so the paragraph keeps
/// its line height in viewers that collapse empty paragraphs.
pub const BLANK_LINE_TEXT: &str = "\u{a0}";

/// One top-level node of the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// A paragraph with a single styled run
    Paragraph {
        /// Unescaped run text
        text: &'a str,
        /// Run formatting
        style: RunStyle,
    },
    /// A spacer paragraph
    BlankLine,
    /// A paragraph holding an explicit page break
    PageBreak,
    /// The closing section properties
    SectionProperties(PageLayout),
}

impl Fragment<'_> {
    /// Append this fragment's markup to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Fragment::Paragraph { text, style } => write_paragraph(out, text, style),
            Fragment::BlankLine => {
                out.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
                out.push_str(BLANK_LINE_TEXT);
                out.push_str("</w:t></w:r></w:p>");
            }
            Fragment::PageBreak => out.push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>"),
            Fragment::SectionProperties(layout) => write_section_properties(out, layout),
        }
    }

    /// Render this fragment to a markup string.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

fn write_paragraph(out: &mut String, text: &str, style: &RunStyle) {
    out.push_str("<w:p><w:r>");
    write_run_properties(out, style);
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&escape_text(text));
    out.push_str("</w:t></w:r></w:p>");
}

fn write_run_properties(out: &mut String, style: &RunStyle) {
    let size = style.size_half_points();
    if !style.bold && size.is_none() {
        return;
    }

    out.push_str("<w:rPr>");
    if style.bold {
        out.push_str("<w:b/>");
    }
    if let Some(size) = size {
        // Complex-script size tracks the Latin size.
        out.push_str(&format!("<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>"));
    }
    out.push_str("</w:rPr>");
}

fn write_section_properties(out: &mut String, layout: &PageLayout) {
    out.push_str(&format!(
        "<w:sectPr>\
         <w:pgSz w:w=\"{}\" w:h=\"{}\"/>\
         <w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" \
         w:header=\"{}\" w:footer=\"{}\" w:gutter=\"{}\"/>\
         <w:cols w:space=\"{}\"/>\
         <w:docGrid w:linePitch=\"{}\"/>\
         </w:sectPr>",
        layout.width,
        layout.height,
        layout.margin_top,
        layout.margin_right,
        layout.margin_bottom,
        layout.margin_left,
        layout.header,
        layout.footer,
        layout.gutter,
        layout.column_space,
        layout.line_pitch,
    ));
}

/// Render a single-run paragraph with escaped, space-preserved text.
pub fn render_paragraph(text: &str, style: RunStyle) -> String {
    Fragment::Paragraph { text, style }.to_xml()
}

/// Render a spacer paragraph.
pub fn render_blank_line() -> String {
    Fragment::BlankLine.to_xml()
}

/// Render a page-break paragraph.
pub fn render_page_break() -> String {
    Fragment::PageBreak.to_xml()
}

/// Render the section properties node.
pub fn render_section_properties(layout: &PageLayout) -> String {
    Fragment::SectionProperties(*layout).to_xml()
}
