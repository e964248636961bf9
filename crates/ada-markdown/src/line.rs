//! Line classification shared by the block and list stages.

use crate::backend::ListKind;

/// Maximum number of `#` markers recognized as a header.
const MAX_HEADER_LEVEL: usize = 4;

/// A single line of working text, classified by its leading syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `## text` with 1-4 markers at the start of the line.
    Header { level: u8, text: &'a str },
    /// `| a | b |`, trimmed.
    TableRow(&'a str),
    /// `1. text`, `- text` or `* text`, at any indentation.
    ListItem(ListItem<'a>),
    /// Empty or whitespace-only.
    Blank,
    /// Anything else.
    Plain(&'a str),
}

/// A list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListItem<'a> {
    pub(crate) kind: ListKind,
    /// Item number for ordered items, if it fits in a `u64`.
    pub(crate) number: Option<u64>,
    /// Count of leading whitespace characters.
    pub(crate) indent: usize,
    pub(crate) text: &'a str,
}

impl<'a> Line<'a> {
    /// Classify a line. Earlier variants win when several could apply.
    pub(crate) fn classify(line: &'a str) -> Self {
        if let Some((level, text)) = parse_header(line) {
            return Line::Header { level, text };
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Line::Blank;
        }
        if is_table_row(trimmed) {
            return Line::TableRow(trimmed);
        }
        if let Some(item) = parse_list_item(line, trimmed) {
            return Line::ListItem(item);
        }
        Line::Plain(line)
    }
}

/// Parse `#{1,4}<whitespace><text>` at column zero.
fn parse_header(line: &str) -> Option<(u8, &str)> {
    let markers = line.bytes().take_while(|&b| b == b'#').count();
    if markers == 0 || markers > MAX_HEADER_LEVEL {
        return None;
    }
    let rest = &line[markers..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    let level = u8::try_from(markers).ok()?;
    Some((level, text))
}

/// A table row starts and ends with `|` and has something in between.
pub(crate) fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() > 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn parse_list_item<'a>(line: &'a str, trimmed: &'a str) -> Option<ListItem<'a>> {
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();

    if let Some(rest) = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('*'))
    {
        let text = item_text(rest)?;
        return Some(ListItem {
            kind: ListKind::Unordered,
            number: None,
            indent,
            text,
        });
    }

    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    let text = item_text(rest)?;
    Some(ListItem {
        kind: ListKind::Ordered,
        number: trimmed[..digits].parse().ok(),
        indent,
        text,
    })
}

/// Item text after a marker: at least one whitespace, then non-empty text.
fn item_text(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim_start();
    (!text.is_empty()).then_some(text)
}
