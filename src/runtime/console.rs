//! Human-readable run output.

use std::io;

use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::description::Description;
use crate::runtime::config::RunnerConfig;
use crate::runtime::listener::RunListener;
use crate::runtime::result::{FailureReport, RunResult};

/// Prints one line per test and a summary at the end of the run.
///
/// ```text
/// PASS  Strings::testLength: length of 'a'
/// FAIL  Strings::testLength: length of 'bb'
///       panic: assertion `left == right` failed
/// SKIP  Strings::testSlow
///
/// total 3, passed 1, failed 1, skipped 1
/// ```
pub struct ConsoleListener<W: WriteColor> {
    writer: W,
    pending: Vec<FailureReport>,
    failed: Vec<String>,
}

impl ConsoleListener<StandardStream> {
    /// Writes to stderr, colored when the configuration asks for it.
    pub fn stderr(config: &RunnerConfig) -> Self {
        let choice = if config.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stderr(choice))
    }
}

impl ConsoleListener<Buffer> {
    /// Writes to an in-memory buffer without colors.
    pub fn buffered() -> Self {
        Self::new(Buffer::no_color())
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(self.writer.as_slice()).into_owned()
    }
}

impl<W: WriteColor> ConsoleListener<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn status(&mut self, tag: &str, color: Color, description: &Description) -> io::Result<()> {
        self.writer
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.writer, "{:<6}", tag)?;
        self.writer.reset()?;
        writeln!(self.writer, "{}", description)
    }

    fn finish(&mut self, description: &Description) -> io::Result<()> {
        if self.pending.is_empty() {
            return self.status("PASS", Color::Green, description);
        }
        self.status("FAIL", Color::Red, description)?;
        for report in std::mem::take(&mut self.pending) {
            writeln!(
                self.writer,
                "      {}: {}",
                report.failure.type_name(),
                report.failure.message()
            )?;
        }
        self.failed.push(description.to_string());
        Ok(())
    }

    fn summary(&mut self, result: &RunResult) -> io::Result<()> {
        let failed = self.failed.len();
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "total {}, passed {}, failed {}, skipped {}",
            result.run_count + result.ignore_count,
            result.run_count.saturating_sub(failed),
            failed,
            result.ignore_count
        )?;
        if !self.failed.is_empty() {
            self.writer
                .set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(self.writer, "Failed tests:")?;
            self.writer.reset()?;
            for name in &self.failed {
                writeln!(self.writer, "  - {}", name)?;
            }
        }
        self.writer.flush()
    }
}

// Write errors are ignored.
impl<W: WriteColor> RunListener for ConsoleListener<W> {
    fn test_started(&mut self, _description: &Description) {
        self.pending.clear();
    }

    fn test_failure(&mut self, report: &FailureReport) {
        self.pending.push(report.clone());
    }

    fn test_finished(&mut self, description: &Description) {
        let _ = self.finish(description);
    }

    fn test_ignored(&mut self, description: &Description) {
        let _ = self.status("SKIP", Color::Yellow, description);
    }

    fn run_finished(&mut self, result: &RunResult) {
        let _ = self.summary(result);
    }
}
