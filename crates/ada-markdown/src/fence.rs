//! Fenced code block isolation and restoration.
//!
//! Fenced regions are cut out of the working text before any other stage runs
//! and replaced by placeholder tokens. After the inline stage the tokens are
//! swapped back for the rendered code blocks, so no markdown syntax inside a
//! fence is ever interpreted.
//!
//! A token is `U+E000`, the decimal registry index, then `U+E001`. Source text
//! can never form a token: every `U+E000` outside a fence is itself moved into
//! the registry as a literal entry.
//!
//! An opening fence without a closing fence protects everything after it the
//! same way. The stray marker and the rest of the message go into a literal
//! entry and come back unchanged.

use std::ops::Range;

use crate::backend::RenderBackend;

/// Fence marker opening and closing a code block.
const FENCE: &str = "```";

/// First character of a placeholder token.
const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Last character of a placeholder token.
const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// What a registry entry restores to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    /// Rendered code-block container.
    CodeBlock,
    /// Source text restored as is.
    Literal,
}

#[derive(Debug)]
struct Entry {
    kind: EntryKind,
    text: String,
}

/// Protected regions keyed by their placeholder index.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockRegistry {
    entries: Vec<Entry>,
}

impl CodeBlockRegistry {
    /// Extract fenced code blocks from `source`.
    ///
    /// Returns the working text with each protected region replaced by its
    /// placeholder, and the registry of entries. An opening fence with no
    /// closing fence protects the rest of the text as literal and is reported
    /// in `warnings`.
    pub(crate) fn isolate<B: RenderBackend>(
        source: &str,
        warnings: &mut Vec<String>,
    ) -> (String, Self) {
        let mut registry = Self::default();
        let mut output = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(open) = rest.find(FENCE) {
            registry.push_text(&rest[..open], &mut output);
            let after_open = &rest[open + FENCE.len()..];

            if let Some(close) = after_open.find(FENCE) {
                registry.push_code_block::<B>(&after_open[..close], &mut output);
                rest = &after_open[close + FENCE.len()..];
            } else {
                let offset = source.len() - rest.len() + open;
                let line = source[..offset].matches('\n').count() + 1;
                tracing::debug!(line, "Unterminated code fence, keeping as text");
                warnings.push(format!(
                    "line {line}: unterminated code fence, rendered as text"
                ));
                registry.push_entry(EntryKind::Literal, rest[open..].to_owned(), &mut output);
                rest = "";
            }
        }
        registry.push_text(rest, &mut output);

        tracing::trace!(
            code_blocks = registry.code_block_count(),
            placeholders = registry.entries.len(),
            "Isolated fenced code blocks"
        );
        (output, registry)
    }

    /// Number of isolated code blocks.
    pub(crate) fn code_block_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::CodeBlock)
            .count()
    }

    /// Replace every placeholder token in `text` with its entry.
    ///
    /// Tokens appear in index order, so a single left-to-right pass restores
    /// them. Returns the byte ranges of the restored code-block containers,
    /// in order.
    pub(crate) fn restore(&self, text: &mut String) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        if self.entries.is_empty() || !text.contains(PLACEHOLDER_OPEN) {
            return spans;
        }

        let mut output = String::with_capacity(
            text.len() + self.entries.iter().map(|entry| entry.text.len()).sum::<usize>(),
        );
        let mut rest = text.as_str();

        while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
            output.push_str(&rest[..start]);
            let token = &rest[start + PLACEHOLDER_OPEN.len_utf8()..];
            match parse_token(token).and_then(|(index, len)| Some((self.entries.get(index)?, len)))
            {
                Some((entry, len)) => {
                    let entry_start = output.len();
                    output.push_str(&entry.text);
                    if entry.kind == EntryKind::CodeBlock {
                        spans.push(entry_start..output.len());
                    }
                    rest = &token[len..];
                }
                None => {
                    output.push(PLACEHOLDER_OPEN);
                    rest = token;
                }
            }
        }
        output.push_str(rest);

        *text = output;
        spans
    }

    /// Copy unfenced source text, moving literal `U+E000` into the registry.
    fn push_text(&mut self, text: &str, out: &mut String) {
        let mut rest = text;
        while let Some(pos) = rest.find(PLACEHOLDER_OPEN) {
            out.push_str(&rest[..pos]);
            self.push_entry(EntryKind::Literal, PLACEHOLDER_OPEN.to_string(), out);
            rest = &rest[pos + PLACEHOLDER_OPEN.len_utf8()..];
        }
        out.push_str(rest);
    }

    /// Render a fenced payload, store it and write its placeholder.
    fn push_code_block<B: RenderBackend>(&mut self, payload: &str, out: &mut String) {
        let (lang, code) = split_language(payload);
        let mut block = String::with_capacity(code.len() + 32);
        B::code_block(lang, code, &mut block);
        self.push_entry(EntryKind::CodeBlock, block, out);
    }

    fn push_entry(&mut self, kind: EntryKind, text: String, out: &mut String) {
        out.push(PLACEHOLDER_OPEN);
        out.push_str(&self.entries.len().to_string());
        out.push(PLACEHOLDER_CLOSE);
        self.entries.push(Entry { kind, text });
    }
}

/// Parse `<digits>U+E001` at the start of `token`.
///
/// Returns the index and the number of bytes consumed.
fn parse_token(token: &str) -> Option<(usize, usize)> {
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !token[digits..].starts_with(PLACEHOLDER_CLOSE) {
        return None;
    }
    let index = token[..digits].parse().ok()?;
    Some((index, digits + PLACEHOLDER_CLOSE.len_utf8()))
}

/// Split an optional language tag from a fenced payload and trim the code.
///
/// The first line is a language tag when the payload spans several lines and
/// that line is a single word such as `rust` or `c++`.
fn split_language(payload: &str) -> (Option<&str>, &str) {
    if let Some((first, rest)) = payload.split_once('\n') {
        let code = rest.trim();
        if is_language_tag(first) && !code.is_empty() {
            return (Some(first), code);
        }
    }
    (None, payload.trim())
}

fn is_language_tag(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '_' | '.' | '#'))
}
