//! Output formatting utilities

use crate::cli::OutputFormat;

/// Resolve `auto` to the human-readable default
pub fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    }
}
