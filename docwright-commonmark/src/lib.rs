//! # docwright-commonmark
//!
//! Markdown processor used by docwright to render prose pages, and the
//! generated API and component pages, into HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use docwright_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Hello World\n\nThis is **bold** text.");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello World"));
//! assert!(result.html.contains(r#"<h1 id="hello-world">"#));
//! ```
//!
//! ## Features
//!
//! - **Admonitions**: `::: tip`, `::: warning`, `::: danger`, `::: info` and
//!   `::: details`, each with an optional custom title
//! - **Heading anchors** with deterministic slugs
//! - **Glyph substitution** for `:smile:`-style tokens
//! - **Syntax highlighting** through an injected [`SyntaxHighlighter`]
//! - **Line numbers** for fenced code blocks
//! - **Error recovery**: [`MarkdownProcessor::render`] never fails; errors
//!   become an inline placeholder
//!
//! Heading and excerpt extraction are exposed separately, so callers can
//! build navigation or search data without rendering.

pub mod processor;
pub mod syntax;
mod types;
pub mod utils;

pub use crate::{
  processor::{
    AstTransformer,
    GlyphTransformer,
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
  },
  syntax::{FnHighlighter, SyntaxError, SyntaxHighlighter},
  types::{Header, MarkdownResult, RenderError},
  utils::{extract_excerpt, slugify},
};
