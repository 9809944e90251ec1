//! WordprocessingML markup rendering.
//!
//! This module turns [`PageBlock`](crate::model::PageBlock)s into the body
//! markup of `word/document.xml`. Every user-supplied string passes through
//! [`escape_text`] before it is inserted.
//!
//! # Example
//!
//! ```
//! use docxgen::model::PageBlock;
//! use docxgen::render::{render_document, PageLayout};
//!
//! let pages = vec![
//!     PageBlock::new("Cover").with_line("Prepared by: Team"),
//!     PageBlock::new("End"),
//! ];
//! let body = render_document(&pages, &PageLayout::A4);
//! assert!(body.ends_with("</w:sectPr>"));
//! ```

mod document;
mod escape;
mod fragment;
mod layout;

pub use document::{document_fragments, page_fragments, render_document, render_page};
pub use escape::escape_text;
pub use fragment::{
    render_blank_line, render_page_break, render_paragraph, render_section_properties, Fragment,
    BLANK_LINE_TEXT,
};
pub use layout::PageLayout;
