//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod speech;

pub(crate) use render::RenderArgs;
pub(crate) use speech::SpeechArgs;

use std::io::Read;
use std::path::Path;

/// Read a message from `path`, or from stdin when `path` is absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Write `text` to stdout followed by a newline.
pub(crate) fn write_output(text: &str) -> std::io::Result<()> {
    use std::io::Write;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}
