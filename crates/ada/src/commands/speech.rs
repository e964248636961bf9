//! `ada speech` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{read_input, write_output};
use crate::error::CliError;

/// Arguments for the speech command.
#[derive(Args)]
pub(crate) struct SpeechArgs {
    /// Path to the markdown message (default: stdin).
    path: Option<PathBuf>,
}

impl SpeechArgs {
    /// Execute the speech command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = read_input(self.path.as_deref())?;
        write_output(&ada_markdown::speech_text(&text))?;
        Ok(())
    }
}
