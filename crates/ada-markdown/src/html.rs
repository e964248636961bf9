//! HTML backend for markdown rendering.
//!
//! Produces HTML5 suitable for a chat message bubble.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::backend::{Alignment, ListKind, RenderBackend};

/// Tags emitted by the block and list stages.
const STRUCTURAL_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "table", "thead", "tbody", "tr", "th", "td", "ul", "ol", "li",
];

/// Tags whose opening or closing form makes a line block-level.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "ul", "ol", "pre", "table", "li", "tr", "td", "th",
];

/// HTML render backend.
///
/// Produces:
/// - `<pre><code>` for fenced code blocks
/// - `<h1>`-`<h4>` for headers
/// - `<table>` with `<thead>`/`<tbody>` for tables
/// - `<ul>`/`<ol>` for lists
/// - `<a target="_blank">` for links when opening in a new tab
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                encode_double_quoted_attribute(lang),
                encode_text(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", encode_text(content)).unwrap();
        }
    }

    fn heading(level: u8, text: &str, out: &mut String) {
        write!(out, "<h{level}>{text}</h{level}>").unwrap();
    }

    fn table_start(out: &mut String) {
        out.push_str("<table>");
    }

    fn table_end(out: &mut String) {
        out.push_str("</table>");
    }

    fn table_head_start(out: &mut String) {
        out.push_str("<thead>");
    }

    fn table_head_end(out: &mut String) {
        out.push_str("</thead>");
    }

    fn table_body_start(out: &mut String) {
        out.push_str("<tbody>");
    }

    fn table_body_end(out: &mut String) {
        out.push_str("</tbody>");
    }

    fn table_row_start(out: &mut String) {
        out.push_str("<tr>");
    }

    fn table_row_end(out: &mut String) {
        out.push_str("</tr>");
    }

    fn table_cell(header: bool, align: Alignment, text: &str, out: &mut String) {
        let tag = if header { "th" } else { "td" };
        let style = match align {
            Alignment::Left => r#" style="text-align:left""#,
            Alignment::Center => r#" style="text-align:center""#,
            Alignment::Right => r#" style="text-align:right""#,
            Alignment::None => "",
        };
        write!(out, "<{tag}{style}>{text}</{tag}>").unwrap();
    }

    fn list_start(kind: ListKind, start: Option<u64>, out: &mut String) {
        match (kind, start) {
            (ListKind::Ordered, Some(n)) => write!(out, r#"<ol start="{n}">"#).unwrap(),
            (ListKind::Ordered, None) => out.push_str("<ol>"),
            (ListKind::Unordered, _) => out.push_str("<ul>"),
        }
    }

    fn list_end(kind: ListKind, out: &mut String) {
        match kind {
            ListKind::Ordered => out.push_str("</ol>"),
            ListKind::Unordered => out.push_str("</ul>"),
        }
    }

    fn list_item_start(text: &str, out: &mut String) {
        out.push_str("<li>");
        out.push_str(text);
    }

    fn list_item_end(out: &mut String) {
        out.push_str("</li>");
    }

    fn link(text: &str, url: &str, new_tab: bool, out: &mut String) {
        let href = encode_double_quoted_attribute(url);
        if new_tab {
            write!(
                out,
                r#"<a href="{href}" target="_blank" rel="noopener noreferrer">{text}</a>"#
            )
            .unwrap();
        } else {
            write!(out, r#"<a href="{href}">{text}</a>"#).unwrap();
        }
    }

    fn strong(content: &str, out: &mut String) {
        write!(out, "<strong>{content}</strong>").unwrap();
    }

    fn emphasis(content: &str, out: &mut String) {
        write!(out, "<em>{content}</em>").unwrap();
    }

    fn inline_code(code: &str, out: &mut String) {
        write!(out, "<code>{}</code>", encode_text(code)).unwrap();
    }

    fn paragraph(text: &str, out: &mut String) {
        write!(out, "<p>{text}</p>").unwrap();
    }

    fn is_block_line(line: &str) -> bool {
        line.trim_start()
            .strip_prefix('<')
            .map(|rest| rest.strip_prefix('/').unwrap_or(rest))
            .is_some_and(|name| BLOCK_TAGS.iter().any(|tag| starts_with_tag(name, tag)))
    }

    fn structural_tag_len(text: &str) -> Option<usize> {
        let rest = text.strip_prefix('<')?;
        let name = rest.strip_prefix('/').unwrap_or(rest);
        if !STRUCTURAL_TAGS.iter().any(|tag| starts_with_tag(name, tag)) {
            return None;
        }
        let end = 1 + rest.find(['>', '<', '\n'])?;
        (text.as_bytes()[end] == b'>').then_some(end + 1)
    }
}

/// Check that `rest` starts with tag name `tag` followed by `>` or an attribute list.
fn starts_with_tag(rest: &str, tag: &str) -> bool {
    rest.strip_prefix(tag)
        .and_then(|after| after.chars().next())
        .is_some_and(|c| c == '>' || c == ' ')
}
