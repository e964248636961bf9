//! Paragraph wrapping on blank-line boundaries.

use std::ops::Range;

use crate::backend::RenderBackend;

/// Split `text` on blank lines and wrap every run of text lines that is not
/// block-level markup in a paragraph.
///
/// `code_spans` are the byte ranges of restored code-block containers, in
/// order. A line starting inside one belongs to that container: it never
/// splits a segment and never starts a new run.
///
/// Within a segment, block lines and text lines form separate runs, so text
/// directly before or after a list, table or header gets its own paragraph.
pub(crate) fn wrap_paragraphs<B: RenderBackend>(text: &str, code_spans: &[Range<usize>]) -> String {
    let mut output = String::with_capacity(text.len() + 16);
    let mut run: Vec<&str> = Vec::new();
    let mut run_is_block = false;
    let mut spans = code_spans.iter().peekable();
    let mut offset = 0;

    for line in text.split('\n') {
        let line_start = offset;
        offset += line.len() + 1;

        while spans.next_if(|span| span.end <= line_start).is_some() {}
        if spans.peek().is_some_and(|span| span.start < line_start) {
            run.push(line);
            continue;
        }

        if line.trim().is_empty() {
            flush_run::<B>(&run, run_is_block, &mut output);
            run.clear();
            continue;
        }

        let is_block = B::is_block_line(line);
        if is_block != run_is_block {
            flush_run::<B>(&run, run_is_block, &mut output);
            run.clear();
            run_is_block = is_block;
        }
        run.push(line);
    }
    flush_run::<B>(&run, run_is_block, &mut output);

    output
}

fn flush_run<B: RenderBackend>(lines: &[&str], is_block: bool, output: &mut String) {
    let joined = lines.join("\n");
    let run = joined.trim();
    if run.is_empty() {
        return;
    }

    if !output.is_empty() {
        output.push('\n');
    }
    if is_block {
        output.push_str(run);
    } else {
        B::paragraph(run, output);
    }
}
