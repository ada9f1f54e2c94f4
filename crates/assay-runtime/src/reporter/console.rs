//! Human-readable console reporter

use crate::assert::{AssertionOutcome, Primitive};
use crate::error::RunError;
use crate::registry::HookKind;
use crate::reporter::Reporter;
use crate::runner::RunTotals;
use crate::value::Value;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 50;

/// A failed assertion kept for the summary
#[derive(Debug, Clone)]
struct Failure {
    suite: String,
    location: String,
    primitive: Primitive,
    description: String,
    arguments: Vec<Value>,
}

/// Writes suite headers, one line per assertion, and a totals summary.
///
/// In quiet mode (`verbose == false`) each assertion prints as a single
/// `.` or `F` and only the summary and failure details are spelled out.
pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
    color: bool,
    suite: String,
    location: String,
    failures: Vec<Failure>,
    marks_on_line: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbose: true,
            color: true,
            suite: String::new(),
            location: String::new(),
            failures: Vec::new(),
            marks_on_line: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn mark(&mut self, mark: &str, style: impl FnOnce(&str) -> ColoredString) -> io::Result<()> {
        let painted = self.paint(mark, style);
        write!(self.out, "{}", painted)?;
        self.marks_on_line = true;
        self.out.flush()
    }

    fn end_marks(&mut self) -> io::Result<()> {
        if self.marks_on_line {
            writeln!(self.out)?;
            self.marks_on_line = false;
        }
        Ok(())
    }

    fn print_failures(&mut self) -> io::Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }

        let heading = self.paint("Failures:", |s| s.red().bold());
        writeln!(self.out)?;
        writeln!(self.out, "{}", heading)?;

        let failures = std::mem::take(&mut self.failures);
        for failure in &failures {
            let bullet = self.paint("●", |s| s.red());
            writeln!(self.out)?;
            writeln!(
                self.out,
                "  {} {} › {}",
                bullet, failure.suite, failure.location
            )?;
            writeln!(
                self.out,
                "    \"{}\" (assert->{})",
                failure.description, failure.primitive
            )?;
            if !failure.arguments.is_empty() {
                let args: Vec<String> = failure.arguments.iter().map(Value::to_string).collect();
                let line = format!("arguments: {}", args.join(", "));
                let line = self.paint(&line, |s| s.dimmed());
                writeln!(self.out, "      {}", line)?;
            }
        }
        self.failures = failures;
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn suite_started(&mut self, description: &str) -> io::Result<()> {
        self.suite = description.to_string();
        self.location = String::new();
        if self.verbose {
            let title = self.paint(&format!("\"{}\"", description), |s| s.bold());
            writeln!(self.out)?;
            writeln!(self.out, "Running tests for {}", title)?;
        }
        Ok(())
    }

    fn hook_started(&mut self, hook: HookKind) -> io::Result<()> {
        self.location = format!("<{}>", hook);
        Ok(())
    }

    fn test_started(&mut self, description: &str) -> io::Result<()> {
        self.location = description.to_string();
        if self.verbose {
            writeln!(self.out)?;
            writeln!(self.out, " - Test: \"{}\"", description)?;
        }
        Ok(())
    }

    fn test_skipped(&mut self, _description: &str) -> io::Result<()> {
        if self.verbose {
            let line = self.paint("------- SKIPPED -------", |s| s.yellow());
            writeln!(self.out, "   {}", line)
        } else {
            self.mark("S", |s| s.yellow())
        }
    }

    fn assertion_recorded(&mut self, outcome: &AssertionOutcome) -> io::Result<()> {
        let passed = outcome.result.is_pass();
        if !passed {
            self.failures.push(Failure {
                suite: self.suite.clone(),
                location: self.location.clone(),
                primitive: outcome.primitive,
                description: outcome.description.clone(),
                arguments: outcome.arguments.clone(),
            });
        }

        if self.verbose {
            let line = outcome.response().to_string();
            let line = if passed {
                self.paint(&line, |s| s.green())
            } else {
                self.paint(&line, |s| s.red().bold())
            };
            writeln!(self.out, "   {}", line)
        } else if passed {
            self.mark(".", |s| s.green())
        } else {
            self.mark("F", |s| s.red().bold())
        }
    }

    fn suite_finished(&mut self, _description: &str) -> io::Result<()> {
        if self.verbose {
            writeln!(self.out)?;
            writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    fn run_finished(&mut self, totals: &RunTotals) -> io::Result<()> {
        self.end_marks()?;
        writeln!(self.out)?;

        let success = if totals.assertions == 0 {
            "no assertions recorded".to_string()
        } else {
            format!("{}% success", totals.success_percent)
        };
        let summary = format!(
            "Totals: {} assertions; {} passed, {} failed - ({})",
            totals.assertions, totals.passed, totals.failed, success
        );
        let summary = if totals.failed == 0 {
            self.paint(&summary, |s| s.green().bold())
        } else {
            self.paint(&summary, |s| s.red().bold())
        };
        writeln!(self.out, "{}", summary)?;
        writeln!(
            self.out,
            "Execution time: {:.4} seconds",
            totals.elapsed.as_secs_f64()
        )?;

        self.print_failures()?;
        self.out.flush()
    }

    fn run_aborted(&mut self, _error: &RunError) -> io::Result<()> {
        self.end_marks()?;
        self.out.flush()
    }
}
