//! Rendering lookup results.

use std::io::{self, Write};

use clap::ValueEnum;

use crate::lookup::Binding;
use crate::report::target::{ContextSwitchError, ContextSwitcher};

/// How a binding is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Result of the optional targeting step.
#[derive(Debug)]
pub enum TargetOutcome {
    Switched,
    /// Targeting failed; the lookup result still stands.
    Warned(ContextSwitchError),
}

/// Writes bindings to `out` and progress/warnings to `diag`.
///
/// In text mode everything goes to `out`, the way the CF CLI prints. In JSON
/// mode `out` carries only the document so it stays machine-readable.
pub struct Reporter<W, E> {
    out: W,
    diag: E,
    format: OutputFormat,
}

impl<W: Write, E: Write> Reporter<W, E> {
    pub fn new(out: W, diag: E, format: OutputFormat) -> Self {
        Self { out, diag, format }
    }

    pub fn write_binding(&mut self, binding: &Binding) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "Bound to:")?;
                writeln!(
                    self.out,
                    "Organization: {} ({})",
                    binding.organization.name, binding.organization.guid
                )?;
                writeln!(self.out, "Space       : {} ({})", binding.space.name, binding.space.guid)?;
                for app in &binding.applications {
                    writeln!(self.out, "App         : {} ({})", app.name, app.guid)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, binding)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()
    }

    /// Switch to the binding's org/space. A failure is reported as a warning
    /// and returned as [`TargetOutcome::Warned`], never as an error.
    pub async fn target<S: ContextSwitcher>(
        &mut self,
        switcher: &S,
        binding: &Binding,
    ) -> io::Result<TargetOutcome> {
        writeln!(self.progress(), "Targeting an app's organization and space...")?;

        match switcher
            .set_active(&binding.organization.name, &binding.space.name)
            .await
        {
            Ok(()) => {
                writeln!(self.progress(), "Targeting an app's organization and space successful.")?;
                Ok(TargetOutcome::Switched)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Context switch failed");
                writeln!(self.progress(), "targeting an app's organization and space failed: {e}")?;
                Ok(TargetOutcome::Warned(e))
            }
        }
    }

    fn progress(&mut self) -> &mut dyn Write {
        match self.format {
            OutputFormat::Text => &mut self.out,
            OutputFormat::Json => &mut self.diag,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }
}
