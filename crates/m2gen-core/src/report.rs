use std::io::Write;

use console::style;

use crate::merge::InvalidRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// Sink for everything a run has to say. Passed explicitly to the merge,
/// generate and cleanup steps.
pub trait Reporter {
    fn report(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warning(&mut self, message: &str) {
        self.report(Level::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.report(Level::Error, message);
    }

    /// A record that was skipped because required fields are missing.
    fn invalid_record(&mut self, record: &InvalidRecord) {
        self.error(&record.to_string());
    }
}

/// Styled output on stderr for interactive use.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, level: Level, message: &str) {
        match level {
            Level::Info => eprintln!("{} {}", style("==>").cyan().bold(), message),
            Level::Warning => eprintln!(
                "{} {}",
                style("warning:").yellow().bold(),
                style(message).yellow()
            ),
            Level::Error => eprintln!("{} {}", style("error:").red().bold(), style(message).red()),
        }
    }
}

/// Workflow-command output (`::warning::…`) understood by GitHub Actions
/// runners, which turns warnings and errors into job annotations.
pub struct ActionsReporter<W: Write> {
    out: W,
}

impl<W: Write> ActionsReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ActionsReporter<W> {
    fn report(&mut self, level: Level, message: &str) {
        let message = escape_command_data(message);
        // Write failures on the log stream are not actionable.
        let _ = match level {
            Level::Info => writeln!(self.out, "{message}"),
            Level::Warning => writeln!(self.out, "::warning::{message}"),
            Level::Error => writeln!(self.out, "::error::{message}"),
        };
    }
}

fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub level: Level,
    pub message: String,
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub entries: Vec<Entry>,
    pub invalid_records: Vec<InvalidRecord>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages(Level::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages(Level::Warning)
    }

    pub fn infos(&self) -> Vec<&str> {
        self.messages(Level::Info)
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, level: Level, message: &str) {
        self.entries.push(Entry {
            level,
            message: message.to_string(),
        });
    }

    fn invalid_record(&mut self, record: &InvalidRecord) {
        self.invalid_records.push(record.clone());
        self.error(&record.to_string());
    }
}
