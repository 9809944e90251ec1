//! Page and document body rendering.

use crate::model::{PageBlock, RunStyle};

use super::fragment::Fragment;
use super::layout::PageLayout;

/// Break a page into body fragments in rendering order.
///
/// A page break closes every page except the last one, so the document never
/// ends on an empty trailing page.
pub fn page_fragments(page: &PageBlock, is_last: bool) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::with_capacity(page.lines.len() + 5);

    fragments.push(Fragment::Paragraph {
        text: &page.title,
        style: RunStyle::title(),
    });

    if let Some(subtitle) = page.visible_subtitle() {
        fragments.push(Fragment::BlankLine);
        fragments.push(Fragment::Paragraph {
            text: subtitle,
            style: RunStyle::subtitle(),
        });
    }

    fragments.push(Fragment::BlankLine);

    for line in &page.lines {
        if line.is_empty() {
            fragments.push(Fragment::BlankLine);
        } else {
            fragments.push(Fragment::Paragraph {
                text: line,
                style: RunStyle::body(),
            });
        }
    }

    if !is_last {
        fragments.push(Fragment::PageBreak);
    }

    fragments
}

/// Break a whole document into body fragments, ending with the section
/// properties.
pub fn document_fragments<'a>(pages: &'a [PageBlock], layout: &PageLayout) -> Vec<Fragment<'a>> {
    let last = pages.len().saturating_sub(1);
    let mut fragments: Vec<Fragment<'a>> = pages
        .iter()
        .enumerate()
        .inspect(|(i, page)| {
            log::debug!("Rendering page {} of {}: {:?}", i + 1, pages.len(), page.title);
        })
        .flat_map(|(i, page)| page_fragments(page, i == last))
        .collect();
    fragments.push(Fragment::SectionProperties(*layout));
    fragments
}

/// Render one page to markup.
pub fn render_page(page: &PageBlock, is_last: bool) -> String {
    write_fragments(page_fragments(page, is_last))
}

/// Render the complete body markup: every page in order, then the section
/// properties.
pub fn render_document(pages: &[PageBlock], layout: &PageLayout) -> String {
    write_fragments(document_fragments(pages, layout))
}

fn write_fragments<'a>(fragments: impl IntoIterator<Item = Fragment<'a>>) -> String {
    let mut out = String::new();
    for fragment in fragments {
        fragment.write_to(&mut out);
    }
    out
}
