//! Inline formatting: links, bold, italic and inline code.
//!
//! Works line by line. Structural tags emitted by earlier stages split a line
//! into text runs, and each run is scanned on its own, so an inline construct
//! never spans a table cell or list item boundary.
//!
//! Resolution order at any position: link, then `**bold**`, then `*italic*`,
//! then `` `code` ``. Bold always wins over italic on a `**` run, and italic
//! only fires on a lone `*`.

use crate::backend::RenderBackend;
use crate::renderer::RenderOptions;

/// Apply inline formatting to every line of `text`.
pub(crate) fn transform_inline<B: RenderBackend>(text: &str, options: &RenderOptions) -> String {
    let mut output = String::with_capacity(text.len() + text.len() / 4);
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            output.push('\n');
        }
        transform_line::<B>(line, options, &mut output);
    }
    output
}

/// Copy structural tags verbatim and scan the text runs between them.
fn transform_line<B: RenderBackend>(line: &str, options: &RenderOptions, out: &mut String) {
    let mut run_start = 0;
    let mut pos = 0;

    while let Some(offset) = line[pos..].find('<') {
        let tag_start = pos + offset;
        if let Some(len) = B::structural_tag_len(&line[tag_start..]) {
            render_span::<B>(&line[run_start..tag_start], options, out);
            out.push_str(&line[tag_start..tag_start + len]);
            pos = tag_start + len;
            run_start = pos;
        } else {
            pos = tag_start + 1;
        }
    }
    render_span::<B>(&line[run_start..], options, out);
}

/// Render inline constructs in a single run of text.
fn render_span<B: RenderBackend>(text: &str, options: &RenderOptions, out: &mut String) {
    let bytes = text.as_bytes();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let rendered = match bytes[pos] {
            b'[' => link::<B>(&text[pos..], options),
            b'*' => emphasis::<B>(&text[pos..], options),
            b'`' => code::<B>(&text[pos..]),
            _ => {
                pos += 1;
                continue;
            }
        };

        if let Some((len, html)) = rendered {
            out.push_str(&text[plain_start..pos]);
            out.push_str(&html);
            pos += len;
            plain_start = pos;
        } else {
            pos += literal_run(&bytes[pos..]);
        }
    }
    out.push_str(&text[plain_start..]);
}

/// Render `text` into a fresh buffer.
fn render_nested<B: RenderBackend>(text: &str, options: &RenderOptions) -> String {
    let mut html = String::with_capacity(text.len());
    render_span::<B>(text, options, &mut html);
    html
}

/// Length of the marker run at the start of `bytes` to keep as literal text
/// when no construct could be formed from it.
fn literal_run(bytes: &[u8]) -> usize {
    match bytes[0] {
        b'[' => 1,
        marker => bytes.iter().take_while(|&&b| b == marker).count(),
    }
}

/// `[text](url)` with non-empty text and url.
///
/// Returns the consumed length and the rendered link.
fn link<B: RenderBackend>(text: &str, options: &RenderOptions) -> Option<(usize, String)> {
    let close = text.find(']')?;
    let label = &text[1..close];
    let rest = text[close + 1..].strip_prefix('(')?;
    let url_len = rest.find(')')?;
    let url = &rest[..url_len];
    if label.is_empty() || url.is_empty() {
        return None;
    }

    let label_html = render_nested::<B>(label, options);
    let mut html = String::new();
    B::link(&label_html, url, options.links_in_new_tab, &mut html);
    Some((close + url_len + 3, html))
}

/// `**bold**` first, then `*italic*` on a lone marker.
fn emphasis<B: RenderBackend>(text: &str, options: &RenderOptions) -> Option<(usize, String)> {
    let mut html = String::new();

    if let Some(inner) = text.strip_prefix("**") {
        let close = inner.find("**")?;
        let content = &inner[..close];
        if !is_flanked(content) {
            return None;
        }
        B::strong(&render_nested::<B>(content, options), &mut html);
        return Some((close + 4, html));
    }

    let inner = &text[1..];
    let close = inner.find('*')?;
    let content = &inner[..close];
    if !is_flanked(content) || inner[close + 1..].starts_with('*') {
        return None;
    }
    B::emphasis(&render_nested::<B>(content, options), &mut html);
    Some((close + 2, html))
}

/// `` `code` `` with a lone backtick on each side.
fn code<B: RenderBackend>(text: &str) -> Option<(usize, String)> {
    let inner = text.strip_prefix('`')?;
    if inner.starts_with('`') {
        return None;
    }
    let close = inner.find('`')?;
    if close == 0 || inner[close + 1..].starts_with('`') {
        return None;
    }
    let mut html = String::new();
    B::inline_code(&inner[..close], &mut html);
    Some((close + 2, html))
}

/// Emphasis content must be non-empty and must not start or end with whitespace.
fn is_flanked(content: &str) -> bool {
    !content.is_empty()
        && !content.starts_with(char::is_whitespace)
        && !content.ends_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::HtmlBackend;

    fn inline(text: &str) -> String {
        transform_inline::<HtmlBackend>(text, &RenderOptions::default())
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(inline("just words, 2 < 3 & 4 > 1"), "just words, 2 < 3 & 4 > 1");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            inline("see [docs](https://example.com) now"),
            r#"see <a href="https://example.com" target="_blank" rel="noopener noreferrer">docs</a> now"#
        );
    }

    #[test]
    fn test_link_same_tab() {
        let options = RenderOptions {
            links_in_new_tab: false,
            ..RenderOptions::default()
        };
        assert_eq!(
            transform_inline::<HtmlBackend>("[a](/b)", &options),
            r#"<a href="/b">a</a>"#
        );
    }

    #[test]
    fn test_link_url_not_formatted() {
        assert_eq!(
            inline("[x](http://a/*b*)"),
            r#"<a href="http://a/*b*" target="_blank" rel="noopener noreferrer">x</a>"#
        );
    }

    #[test]
    fn test_link_label_formatted() {
        assert_eq!(
            inline("[**x**](u)"),
            r#"<a href="u" target="_blank" rel="noopener noreferrer"><strong>x</strong></a>"#
        );
    }

    #[test]
    fn test_incomplete_links_literal() {
        assert_eq!(inline("[text] (url)"), "[text] (url)");
        assert_eq!(inline("[](url)"), "[](url)");
        assert_eq!(inline("[text]()"), "[text]()");
        assert_eq!(inline("[text](url"), "[text](url");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            inline("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_bold_resolved_before_italic() {
        assert_eq!(
            inline("**bold *and* nested***"),
            "<strong>bold <em>and</em> nested</strong>*"
        );
    }

    #[test]
    fn test_unmatched_markers_literal() {
        assert_eq!(inline("**open"), "**open");
        assert_eq!(inline("*open"), "*open");
        assert_eq!(inline("a ** b"), "a ** b");
        assert_eq!(inline("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn test_italic_not_followed_by_star() {
        assert_eq!(inline("*a**"), "*a**");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(inline("use `cargo test`"), "use <code>cargo test</code>");
    }

    #[test]
    fn test_inline_code_protects_emphasis_and_escapes() {
        assert_eq!(
            inline("`*not* <nav>` and *yes*"),
            "<code>*not* &lt;nav&gt;</code> and <em>yes</em>"
        );
    }

    #[test]
    fn test_double_backticks_literal() {
        assert_eq!(inline("``x``"), "``x``");
        assert_eq!(inline("`a``"), "`a``");
    }

    #[test]
    fn test_code_inside_bold() {
        assert_eq!(
            inline("**run `ls`**"),
            "<strong>run <code>ls</code></strong>"
        );
    }

    #[test]
    fn test_structural_tags_split_runs() {
        assert_eq!(
            inline("<tr><td>*a</td><td>b*</td></tr>"),
            "<tr><td>*a</td><td>b*</td></tr>"
        );
        assert_eq!(
            inline("<li>**done**"),
            "<li><strong>done</strong>"
        );
    }

    #[test]
    fn test_constructs_do_not_cross_lines() {
        assert_eq!(inline("**a\nb**"), "**a\nb**");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            inline("ação *ênfase* · `código`"),
            "ação <em>ênfase</em> · <code>código</code>"
        );
    }
}
