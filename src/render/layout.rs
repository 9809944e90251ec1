//! Page geometry for the final section properties.

/// Page size, margins and grid of the single document section.
///
/// All lengths are twentieths of a point (twips).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Page width
    pub width: u32,
    /// Page height
    pub height: u32,
    /// Top margin
    pub margin_top: u32,
    /// Right margin
    pub margin_right: u32,
    /// Bottom margin
    pub margin_bottom: u32,
    /// Left margin
    pub margin_left: u32,
    /// Distance from page edge to header
    pub header: u32,
    /// Distance from page edge to footer
    pub footer: u32,
    /// Binding gutter
    pub gutter: u32,
    /// Spacing between text columns
    pub column_space: u32,
    /// Document grid line pitch
    pub line_pitch: u32,
}

impl PageLayout {
    /// A4 portrait with one-inch margins.
    pub const A4: PageLayout = PageLayout {
        width: 11906,
        height: 16838,
        margin_top: 1440,
        margin_right: 1440,
        margin_bottom: 1440,
        margin_left: 1440,
        header: 708,
        footer: 708,
        gutter: 0,
        column_space: 708,
        line_pitch: 360,
    };
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::A4
    }
}
