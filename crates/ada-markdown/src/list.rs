//! Stack-based list nesting.
//!
//! Each list item line is placed by its indentation: `indent / indent_width`
//! is the zero-based nesting level, and the stack of open list frames is
//! grown or shrunk until its depth is `level + 1`. Item text is never
//! re-scanned for nested lists; nesting comes only from indentation.
//!
//! Nested lists are written inside the still-open parent item:
//!
//! ```text
//! - a          <ul>
//!   - b        <li>a
//! - c          <ul>
//!              <li>b</li>
//!              </ul>
//!              </li>
//!              <li>c</li>
//!              </ul>
//! ```

use std::marker::PhantomData;

use crate::backend::{ListKind, RenderBackend};
use crate::line::{Line, ListItem};

/// One level of open list nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListFrame {
    kind: ListKind,
    /// Nesting level, equal to the frame's position in the stack.
    level: usize,
    /// Whether the frame's last `<li>` is still open.
    item_open: bool,
}

/// Line scanner that turns list item lines into nested list markup.
///
/// Created per render call; nothing survives between calls.
pub(crate) struct ListProcessor<B> {
    indent_width: usize,
    stack: Vec<ListFrame>,
    /// Blank lines seen while a list is open, not yet emitted.
    pending_blank: usize,
    lines: Vec<String>,
    /// Whether the last emitted line is an item start with nothing nested after it.
    item_line_last: bool,
    frames_opened: usize,
    _backend: PhantomData<fn() -> B>,
}

impl<B: RenderBackend> ListProcessor<B> {
    /// Create a processor with the given indentation unit (clamped to at least 1).
    pub(crate) fn new(indent_width: usize) -> Self {
        Self {
            indent_width: indent_width.max(1),
            stack: Vec::new(),
            pending_blank: 0,
            lines: Vec::new(),
            item_line_last: false,
            frames_opened: 0,
            _backend: PhantomData,
        }
    }

    /// Process `text` line by line and return the transformed text.
    pub(crate) fn process(mut self, text: &str) -> String {
        for line in text.split('\n') {
            match Line::classify(line) {
                Line::ListItem(item) => self.item(item),
                Line::Blank if !self.stack.is_empty() => self.pending_blank += 1,
                Line::Header { .. } | Line::TableRow(_) | Line::Blank | Line::Plain(_) => {
                    self.close_all();
                    self.flush_blank();
                    self.emit(line.to_owned());
                }
            }
        }
        self.close_all();
        self.flush_blank();

        debug_assert!(self.stack.is_empty());
        tracing::trace!(frames = self.frames_opened, "Processed lists");
        self.lines.join("\n")
    }

    fn item(&mut self, item: ListItem<'_>) {
        let target = item.indent / self.indent_width + 1;

        // Blank lines between items of one list run are dropped.
        self.pending_blank = 0;

        if !self.stack.is_empty() {
            while self.stack.len() > target {
                self.pop();
            }
            if self.stack.len() == target
                && self.stack.last().is_some_and(|top| top.kind != item.kind)
            {
                self.pop();
            }
        }

        while self.stack.len() < target {
            let start = if self.stack.len() + 1 == target {
                item.number.filter(|&n| n != 1)
            } else {
                None
            };
            self.push(item.kind, start);
        }

        if self.stack.last().is_some_and(|top| top.item_open) {
            self.close_item();
        }
        if let Some(top) = self.stack.last_mut() {
            top.item_open = true;
        }

        let mut line = String::new();
        B::list_item_start(item.text, &mut line);
        self.emit(line);
        self.item_line_last = true;
    }

    fn push(&mut self, kind: ListKind, start: Option<u64>) {
        let level = self.stack.len();
        debug_assert!(self.stack.last().is_none_or(|top| top.level < level));

        let mut line = String::new();
        B::list_start(kind, start.filter(|_| kind == ListKind::Ordered), &mut line);
        self.emit(line);
        self.stack.push(ListFrame {
            kind,
            level,
            item_open: false,
        });
        self.frames_opened += 1;
    }

    fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if frame.item_open {
            self.close_item();
        }
        let mut line = String::new();
        B::list_end(frame.kind, &mut line);
        self.emit(line);
    }

    /// Close the innermost open item, on the item's own line when nothing
    /// was nested inside it.
    fn close_item(&mut self) {
        let mut tag = String::new();
        B::list_item_end(&mut tag);
        match self.lines.last_mut() {
            Some(last) if self.item_line_last => last.push_str(&tag),
            _ => self.lines.push(tag),
        }
        self.item_line_last = false;
    }

    fn emit(&mut self, line: String) {
        self.lines.push(line);
        self.item_line_last = false;
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.pop();
        }
    }

    fn flush_blank(&mut self) {
        for _ in 0..self.pending_blank {
            self.emit(String::new());
        }
        self.pending_blank = 0;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HtmlBackend;

    fn process(text: &str) -> String {
        ListProcessor::<HtmlBackend>::new(2).process(text)
    }

    fn balanced(output: &str) -> bool {
        output.matches("<ul>").count() == output.matches("</ul>").count()
            && output.matches("<ol").count() == output.matches("</ol>").count()
            && output.matches("<li>").count() == output.matches("</li>").count()
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(process("1. a\n2. b"), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>");
    }

    #[test]
    fn test_unordered_list_both_markers() {
        assert_eq!(
            process("- a\n* b"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_nested_list_inside_parent_item() {
        assert_eq!(
            process("- a\n  - b\n- c"),
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n<li>c</li>\n</ul>"
        );
    }

    #[test]
    fn test_deep_nesting_closes_everything() {
        let output = process("- a\n  - b\n    - c\ntext");
        assert_eq!(
            output,
            "<ul>\n<li>a\n<ul>\n<li>b\n<ul>\n<li>c</li>\n</ul>\n</li>\n</ul>\n</li>\n</ul>\ntext"
        );
        assert!(balanced(&output));
    }

    #[test]
    fn test_odd_indent_floors() {
        // 3 spaces / 2 = level 1
        assert_eq!(
            process("- a\n   - b"),
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>"
        );
    }

    #[test]
    fn test_kind_switch_same_level_reopens() {
        assert_eq!(
            process("- a\n1. b"),
            "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>"
        );
    }

    #[test]
    fn test_ordered_nested_in_unordered() {
        assert_eq!(
            process("- a\n  1. b\n  2. c\n- d"),
            "<ul>\n<li>a\n<ol>\n<li>b</li>\n<li>c</li>\n</ol>\n</li>\n<li>d</li>\n</ul>"
        );
    }

    #[test]
    fn test_skipped_level_opens_intermediate_frames() {
        let output = process("    - deep");
        assert_eq!(output, "<ul>\n<ul>\n<ul>\n<li>deep</li>\n</ul>\n</ul>\n</ul>");
        assert!(balanced(&output));
    }

    #[test]
    fn test_non_list_line_closes_lists() {
        assert_eq!(
            process("- a\nplain\n- b"),
            "<ul>\n<li>a</li>\n</ul>\nplain\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_blank_line_inside_list_does_not_close() {
        assert_eq!(
            process("- a\n\n- b"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_blank_line_after_list_kept_after_close() {
        assert_eq!(
            process("- a\n\nafter"),
            "<ul>\n<li>a</li>\n</ul>\n\nafter"
        );
    }

    #[test]
    fn test_trailing_blank_after_list() {
        assert_eq!(process("- a\n"), "<ul>\n<li>a</li>\n</ul>\n");
    }

    #[test]
    fn test_ordered_start_number() {
        assert_eq!(
            process("3. c\n4. d"),
            "<ol start=\"3\">\n<li>c</li>\n<li>d</li>\n</ol>"
        );
    }

    #[test]
    fn test_no_lists_unchanged() {
        let text = "line one\n\nline two\n| a |";
        assert_eq!(process(text), text);
    }

    #[test]
    fn test_indent_width_four() {
        let output = ListProcessor::<HtmlBackend>::new(4).process("- a\n  - b\n    - c");
        assert_eq!(
            output,
            "<ul>\n<li>a</li>\n<li>b\n<ul>\n<li>c</li>\n</ul>\n</li>\n</ul>"
        );
    }

    #[test]
    fn test_zero_indent_width_clamped() {
        let output = ListProcessor::<HtmlBackend>::new(0).process("- a\n - b");
        assert!(balanced(&output));
        assert!(output.contains("<li>b</li>"));
    }

    #[test]
    fn test_item_text_not_rescanned() {
        assert_eq!(process("- - inner"), "<ul>\n<li>- inner</li>\n</ul>");
    }
}
