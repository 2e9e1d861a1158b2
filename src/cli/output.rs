//! Colored terminal output for command results.
//!
//! Progress and diagnostics from the packaging core go through `log`; this is
//! only for what a command reports back to the user.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing messages, honoring the quiet switch.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    choice: ColorChoice,
}

impl OutputManager {
    /// Creates an output manager; `quiet` silences everything but warnings.
    pub fn new(quiet: bool) -> Self {
        let choice = if std::env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Self { quiet, choice }
    }

    fn print(
        &self,
        mut stream: StandardStream,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        stream.set_color(&spec)?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(self.choice)
    }

    /// Warning on stderr; never silenced.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.print(
            StandardStream::stderr(self.choice),
            Some(Color::Yellow),
            true,
            "warning: ",
            message,
        )
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print(self.stdout(), Some(Color::Green), true, "✓ ", message)
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print(self.stdout(), Some(Color::Cyan), false, "→ ", message)
    }

    /// Bold section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print(self.stdout(), None, true, "", title)
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.print(self.stdout(), None, false, "  ", message)
    }
}
