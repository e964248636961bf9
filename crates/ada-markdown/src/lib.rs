//! Markdown-subset renderer for assistant chat messages.
//!
//! Converts the small markdown dialect an assistant writes (headers, tables,
//! nested lists, fenced code, links, emphasis, inline code) into HTML for a
//! message bubble. Rendering never fails: anything that is not recognized is
//! kept as literal text.
//!
//! # Architecture
//!
//! [`MarkdownRenderer`] runs a fixed pipeline of text stages. The stages
//! decide which construct was recognized; the [`RenderBackend`] trait decides
//! how it is written:
//! - [`HtmlBackend`]: HTML5 with escaped code and `<a target="_blank">` links
//!
//! Output is wrapped in [`Markup`], which must either pass through a
//! [`Sanitizer`] or be explicitly declared trusted before use. With the
//! `ammonia` feature, `AmmoniaSanitizer` provides an allowlist sanitizer.
//!
//! [`speech_text`] and [`strip_bold_markers`] produce plain-text views of a
//! message for speech synthesis and section titles.
//!
//! # Example
//!
//! ```
//! use ada_markdown::{HtmlBackend, MarkdownRenderer};
//!
//! let markdown = "## Steps\n\n1. Press **Tab**\n2. Press `Enter`";
//! let result = MarkdownRenderer::<HtmlBackend>::new().render(markdown);
//!
//! assert_eq!(
//!     result.html.into_trusted_string(),
//!     "<h2>Steps</h2>\n<ol>\n<li>Press <strong>Tab</strong></li>\n<li>Press <code>Enter</code></li>\n</ol>"
//! );
//! ```

mod backend;
mod block;
mod fence;
mod html;
mod inline;
mod line;
mod list;
mod markup;
mod paragraph;
mod renderer;
mod speech;

pub use backend::{Alignment, ListKind, RenderBackend};
pub use html::HtmlBackend;
#[cfg(feature = "ammonia")]
pub use markup::AmmoniaSanitizer;
pub use markup::{Markup, Sanitizer};
pub use renderer::{DEFAULT_INDENT_WIDTH, MarkdownRenderer, RenderOptions, RenderResult, render};
pub use speech::{speech_text, strip_bold_markers};
