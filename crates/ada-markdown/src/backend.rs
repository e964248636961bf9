//! Render backend trait for output-format-specific markup.

/// Kind of list a list frame or list item belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// `1. item`
    Ordered,
    /// `- item` or `* item`
    Unordered,
}

/// Column alignment declared by a table separator row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// `---`
    #[default]
    None,
    /// `:--`
    Left,
    /// `:-:`
    Center,
    /// `--:`
    Right,
}

/// Backend trait for format-specific rendering.
///
/// The pipeline stages decide *what* construct was recognized; the backend
/// decides *how* it is written. All methods append to `out` and never fail.
///
/// Text handed to structural methods (`heading`, `table_cell`, `list_item_start`,
/// `paragraph`) is already-rendered markup and is written as is. Raw code
/// (`code_block`, `inline_code`) and link destinations are escaped by the backend.
pub trait RenderBackend {
    /// Render a fenced code block with optional language tag.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render a header of the given level (1-4).
    fn heading(level: u8, text: &str, out: &mut String);

    /// Start a table.
    fn table_start(out: &mut String);

    /// End a table.
    fn table_end(out: &mut String);

    /// Start the table header section.
    fn table_head_start(out: &mut String);

    /// End the table header section.
    fn table_head_end(out: &mut String);

    /// Start the table body section.
    fn table_body_start(out: &mut String);

    /// End the table body section.
    fn table_body_end(out: &mut String);

    /// Start a table row.
    fn table_row_start(out: &mut String);

    /// End a table row.
    fn table_row_end(out: &mut String);

    /// Render a single table cell.
    fn table_cell(header: bool, align: Alignment, text: &str, out: &mut String);

    /// Open a list. `start` is set for ordered lists not starting at 1.
    fn list_start(kind: ListKind, start: Option<u64>, out: &mut String);

    /// Close a list.
    fn list_end(kind: ListKind, out: &mut String);

    /// Open a list item and write its text.
    fn list_item_start(text: &str, out: &mut String);

    /// Close a list item.
    fn list_item_end(out: &mut String);

    /// Render a link around already-rendered link text.
    fn link(text: &str, url: &str, new_tab: bool, out: &mut String);

    /// Render strong emphasis around already-rendered content.
    fn strong(content: &str, out: &mut String);

    /// Render emphasis around already-rendered content.
    fn emphasis(content: &str, out: &mut String);

    /// Render an inline code span.
    fn inline_code(code: &str, out: &mut String);

    /// Wrap a run of text in a paragraph.
    fn paragraph(text: &str, out: &mut String);

    /// Whether a line of rendered output opens or closes block-level markup.
    ///
    /// The paragraph wrapper passes such lines through and wraps the text
    /// lines between them.
    fn is_block_line(line: &str) -> bool;

    /// Byte length of a structural tag emitted by this backend at the start of `text`.
    ///
    /// The inline transformer copies such tags verbatim and never lets an
    /// inline construct span across one.
    fn structural_tag_len(text: &str) -> Option<usize>;
}
