//! `docwright-model`.
//!
//! The data model shared by every stage of the pipeline: the normalized
//! [`DocumentNode`] produced by the generator and consumed by the site
//! builder and search indexer, plus the [`Reporter`] capability through which
//! the stages surface warnings without touching process-wide output state.
pub mod document;
pub mod report;

pub use document::{
  DocumentKind,
  DocumentNode,
  MetaValue,
  Metadata,
  SOURCE_KEY,
  humanize,
};
pub use report::{LogReporter, MemoryReporter, Report, ReportLevel, Reporter};
