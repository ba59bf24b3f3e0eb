//! Injected reporting capability.
//!
//! Pipeline stages never write to the console themselves. They are handed a
//! [`Reporter`] and surface non-fatal problems through it, keyed by the file
//! that caused them. The binary uses [`LogReporter`]; tests use
//! [`MemoryReporter`] to assert on what was reported.
use std::{
  path::{Path, PathBuf},
  sync::Mutex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
  Info,
  Warn,
}

/// One reported entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
  pub level:   ReportLevel,
  pub file:    Option<PathBuf>,
  pub message: String,
}

pub trait Reporter {
  /// Progress information.
  fn info(&self, message: &str);

  /// A recovered, non-fatal problem in `file`.
  fn warn(&self, file: &Path, message: &str);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
  fn info(&self, message: &str) {
    log::info!("{message}");
  }

  fn warn(&self, file: &Path, message: &str) {
    log::warn!("{}: {message}", file.display());
  }
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
  entries: Mutex<Vec<Report>>,
}

impl MemoryReporter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Snapshot of everything reported so far.
  #[must_use]
  pub fn entries(&self) -> Vec<Report> {
    self
      .entries
      .lock()
      .map(|entries| entries.clone())
      .unwrap_or_default()
  }

  /// Only the warnings.
  #[must_use]
  pub fn warnings(&self) -> Vec<Report> {
    self
      .entries()
      .into_iter()
      .filter(|entry| entry.level == ReportLevel::Warn)
      .collect()
  }

  fn push(&self, report: Report) {
    if let Ok(mut entries) = self.entries.lock() {
      entries.push(report);
    }
  }
}

impl Reporter for MemoryReporter {
  fn info(&self, message: &str) {
    self.push(Report {
      level:   ReportLevel::Info,
      file:    None,
      message: message.to_string(),
    });
  }

  fn warn(&self, file: &Path, message: &str) {
    self.push(Report {
      level:   ReportLevel::Warn,
      file:    Some(file.to_path_buf()),
      message: message.to_string(),
    });
  }
}
