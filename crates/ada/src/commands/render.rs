//! `ada render` command implementation.

use std::path::PathBuf;

use ada_config::{CliSettings, Config};
use ada_markdown::{AmmoniaSanitizer, HtmlBackend, MarkdownRenderer, RenderOptions};
use clap::Args;

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown message (default: stdin).
    path: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover ada.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leading whitespace characters per list nesting level (overrides config).
    #[arg(long)]
    indent_width: Option<usize>,

    /// Treat the input as trusted and skip sanitization.
    #[arg(long)]
    trusted: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading fails, the input cannot be read,
    /// or stdout cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let text = read_input(self.path.as_deref())?;
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_options(render_options(&config))
            .render(&text);

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let html = if config.output.sanitize {
            result.html.sanitize(&AmmoniaSanitizer::new())
        } else {
            output.info("Output is not sanitized (trusted input)");
            result.html.into_trusted_string()
        };
        write_output(&html)?;

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            indent_width: self.indent_width,
            sanitize: self.trusted.then_some(false),
        }
    }
}

/// Map loaded configuration to renderer options.
fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        indent_width: config.render.indent_width,
        links_in_new_tab: config.render.links_in_new_tab,
    }
}
