//! Staged markdown renderer.
//!
//! Stages run in a fixed order, each over the previous stage's output:
//!
//! 1. fenced code blocks, and everything after a stray opening fence, are
//!    isolated behind placeholder tokens,
//! 2. headers and tables become block markup,
//! 3. list item lines become nested lists,
//! 4. links, emphasis and inline code are applied,
//! 5. placeholders are replaced by what they protect,
//! 6. remaining text is wrapped in paragraphs.

use std::marker::PhantomData;

use crate::backend::RenderBackend;
use crate::block::transform_blocks;
use crate::fence::CodeBlockRegistry;
use crate::html::HtmlBackend;
use crate::inline::transform_inline;
use crate::list::ListProcessor;
use crate::markup::Markup;
use crate::paragraph::wrap_paragraphs;

/// Default number of leading whitespace characters per list nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Rendering options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Leading whitespace characters per list nesting level. Values below 1 act as 1.
    pub indent_width: usize,
    /// Open links in a new browsing context (`target="_blank"`).
    pub links_in_new_tab: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            links_in_new_tab: true,
        }
    }
}

/// Result of rendering a message.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered, unsanitized markup.
    pub html: Markup,
    /// Constructs that were left as literal text (e.g. an unterminated code fence).
    pub warnings: Vec<String>,
}

/// Markdown renderer parameterized by output backend.
///
/// The renderer only holds options. Every call to [`render`](Self::render)
/// builds its own code-block registry and list stack, so one renderer can be
/// shared freely across threads.
///
/// # Example
///
/// ```
/// use ada_markdown::{HtmlBackend, MarkdownRenderer};
///
/// let renderer = MarkdownRenderer::<HtmlBackend>::new().with_links_in_new_tab(false);
/// let result = renderer.render("See [the guide](/guide).");
///
/// assert_eq!(
///     result.html.as_unsanitized_str(),
///     r#"<p>See <a href="/guide">the guide</a>.</p>"#
/// );
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownRenderer<B: RenderBackend = HtmlBackend> {
    options: RenderOptions,
    _backend: PhantomData<fn() -> B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            _backend: PhantomData,
        }
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the list indentation unit.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.options.indent_width = indent_width;
        self
    }

    /// Set whether links open in a new tab.
    #[must_use]
    pub fn with_links_in_new_tab(mut self, new_tab: bool) -> Self {
        self.options.links_in_new_tab = new_tab;
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `text` to markup.
    ///
    /// Never fails: constructs that cannot be recognized are kept as literal
    /// text and reported in [`RenderResult::warnings`].
    pub fn render(&self, text: &str) -> RenderResult {
        if text.trim().is_empty() {
            return RenderResult::default();
        }

        let text = text.replace("\r\n", "\n");
        let mut warnings = Vec::new();

        let (working, registry) = CodeBlockRegistry::isolate::<B>(&text, &mut warnings);
        let working = transform_blocks::<B>(&working, &mut warnings);
        let working = ListProcessor::<B>::new(self.options.indent_width).process(&working);
        let mut working = transform_inline::<B>(&working, &self.options);
        let code_spans = registry.restore(&mut working);
        let html = wrap_paragraphs::<B>(&working, &code_spans);

        tracing::trace!(
            input_len = text.len(),
            output_len = html.len(),
            code_blocks = code_spans.len(),
            warnings = warnings.len(),
            "Rendered message"
        );

        RenderResult {
            html: Markup::new(html),
            warnings,
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `text` to HTML with default options.
///
/// The result is not sanitized; see [`Markup`].
///
/// ```
/// let html = ada_markdown::render("**Hello**").into_trusted_string();
/// assert_eq!(html, "<p><strong>Hello</strong></p>");
/// ```
pub fn render(text: &str) -> Markup {
    MarkdownRenderer::<HtmlBackend>::new().render(text).html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn html(text: &str) -> String {
        render(text).into_trusted_string()
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html(""), "");
        assert_eq!(html("   \n\n  "), "");
    }

    #[test]
    fn test_plain_text_only_wrapped() {
        assert_eq!(html("Hello, how can I help?"), "<p>Hello, how can I help?</p>");
        assert_eq!(html("one\n\ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn test_ordered_list_two_items() {
        let output = html("1. a\n2. b");
        assert_eq!(output, "<ol>\n<li>a</li>\n<li>b</li>\n</ol>");
        assert_eq!(count(&output, "<ol>"), 1);
        assert_eq!(count(&output, "<li>"), 2);
        assert!(output.find("<li>a").unwrap() < output.find("<li>b").unwrap());
    }

    #[test]
    fn test_nested_unordered_list() {
        let output = html("- a\n  - b\n- c");
        assert_eq!(
            output,
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n<li>c</li>\n</ul>"
        );
        assert_eq!(count(&output, "<ul>"), count(&output, "</ul>"));
        assert_eq!(count(&output, "<li>"), count(&output, "</li>"));
    }

    #[test]
    fn test_table() {
        let output = html("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            output,
            "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
        assert_eq!(count(&output, "<tr>"), 2);
    }

    #[test]
    fn test_table_cells_get_inline_formatting() {
        let output = html("| Key | Action |\n|---|---|\n| `Tab` | **Next** |");
        assert!(output.contains("<td><code>Tab</code></td><td><strong>Next</strong></td>"));
    }

    #[test]
    fn test_code_block_contents_not_transformed() {
        let output = html("```\n# heading\n- item\n1. one\n**bold** *em* [l](u) | a |\n```");
        assert_eq!(
            output,
            "<pre><code># heading\n- item\n1. one\n**bold** *em* [l](u) | a |</code></pre>"
        );
    }

    #[test]
    fn test_code_block_escaped_and_kept_whole() {
        let output = html("Example:\n\n```html\n<nav>\n\n</nav>\n```\n\nDone.");
        assert_eq!(
            output,
            "<p>Example:</p>\n<pre><code class=\"language-html\">&lt;nav&gt;\n\n&lt;/nav&gt;</code></pre>\n<p>Done.</p>"
        );
    }

    #[test]
    fn test_unterminated_fence_is_literal() {
        let result =
            MarkdownRenderer::<HtmlBackend>::new().render("Try this:\n```\n- not a list\n1. nor this");
        let output = result.html.into_trusted_string();
        assert_eq!(output, "<p>Try this:\n```\n- not a list\n1. nor this</p>");
        assert!(!output.contains("<ul>"));
        assert!(!output.contains("<ol>"));
        assert!(!output.contains("<li>"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_text_after_unterminated_fence_not_transformed() {
        let output = html("- real item\n\n```\n\n# not a header\n  - **not** bold\n| a |\n|---|\n| 1 |");
        assert_eq!(
            output,
            "<ul>\n<li>real item</li>\n</ul>\n<p>```</p>\n<p># not a header\n  - **not** bold\n| a |\n|---|\n| 1 |</p>"
        );
    }

    #[test]
    fn test_private_use_char_kept_in_code() {
        assert_eq!(
            html("```\na\u{E000}b\n```"),
            "<pre><code>a\u{E000}b</code></pre>"
        );
        assert_eq!(html("`a\u{E000}b`"), "<p><code>a\u{E000}b</code></p>");
        assert_eq!(html("x\u{E000}0\u{E001}y"), "<p>x\u{E000}0\u{E001}y</p>");
    }

    #[test]
    fn test_text_around_list_gets_paragraphs() {
        assert_eq!(
            html("Steps:\n1. a\n2. b\nDone."),
            "<p>Steps:</p>\n<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n<p>Done.</p>"
        );
    }

    #[test]
    fn test_raw_unclosed_pre_still_splits() {
        assert_eq!(
            html("<pre><code>\n\nx\n\ny"),
            "<pre><code>\n<p>x</p>\n<p>y</p>"
        );
    }

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            html("**bold *and* nested***"),
            "<p><strong>bold <em>and</em> nested</strong>*</p>"
        );
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            html("# Title\n\n#### Small\n\nBody"),
            "<h1>Title</h1>\n<h4>Small</h4>\n<p>Body</p>"
        );
    }

    #[test]
    fn test_full_message() {
        let message = "## Keyboard navigation\n\
                       \n\
                       Use these keys:\n\
                       \n\
                       - **Tab** moves forward\n\
                       - **Shift+Tab** moves back\n\
                       \x20\x20- works in *all* browsers\n\
                       \n\
                       See [WCAG 2.1](https://www.w3.org/TR/WCAG21/).";
        assert_eq!(
            html(message),
            "<h2>Keyboard navigation</h2>\n\
             <p>Use these keys:</p>\n\
             <ul>\n\
             <li><strong>Tab</strong> moves forward</li>\n\
             <li><strong>Shift+Tab</strong> moves back\n\
             <ul>\n\
             <li>works in <em>all</em> browsers</li>\n\
             </ul>\n\
             </li>\n\
             </ul>\n\
             <p>See <a href=\"https://www.w3.org/TR/WCAG21/\" target=\"_blank\" rel=\"noopener noreferrer\">WCAG 2.1</a>.</p>"
        );
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(html("1. a\r\n2. b"), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>");
    }

    #[test]
    fn test_deterministic() {
        let text = "# T\n\n- a\n  - b\n\n```x```\n\n| A |\n|---|\n| 1 |";
        assert_eq!(html(text), html(text));
    }

    #[test]
    fn test_renderer_options() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new()
            .with_indent_width(4)
            .with_links_in_new_tab(false);
        assert_eq!(renderer.options().indent_width, 4);
        assert!(!renderer.options().links_in_new_tab);

        let output = renderer.render("- a\n  - b").html.into_trusted_string();
        assert_eq!(output, "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn test_malformed_input_never_panics() {
        let inputs = [
            "```",
            "``` ```",
            "**",
            "*",
            "[",
            "[]()",
            "](",
            "|",
            "||\n|-|",
            "| a |\n|---|",
            "#",
            "####",
            "1.",
            "- ",
            "\u{E000}0\u{E001}",
            "\u{E000}",
            "`",
            "        - deep\n- shallow\n    1. mixed",
            "**a *b** c*",
            "ç*ã*`õ`",
        ];
        for input in inputs {
            let output = html(input);
            assert_eq!(
                output.matches('\u{E000}').count(),
                input.matches('\u{E000}').count(),
                "placeholder leaked for {input:?}"
            );
        }
    }

    #[test]
    fn test_no_placeholder_left() {
        let output = html("```a```\n\n- ```b```\n\n| ```c``` |\n|---|\n| d |");
        assert!(!output.contains('\u{E000}'));
        assert_eq!(count(&output, "<pre><code>"), 3);
    }

    #[test]
    fn test_concurrent_renders() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let renderer = &renderer;
                    scope.spawn(move || renderer.render(&format!("- item {i}")))
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let result = handle.join().unwrap();
                assert_eq!(
                    result.html.into_trusted_string(),
                    format!("<ul>\n<li>item {i}</li>\n</ul>")
                );
            }
        });
    }
}
