//! Type definitions for the Markdown processor.
//!
//! Contains all the core types used by the processor, including:
//! - Configuration options (`MarkdownOptions`)
//! - The main processor struct (`MarkdownProcessor`)
//! - AST transformation traits and implementations
//!
//! # Examples
//!
//! ```
//! use docwright_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   line_numbers: true,
//!   highlight_code: false,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

use std::sync::Arc;

use comrak::nodes::{AstNode, NodeValue};

use super::extensions::replace_glyphs;
use crate::syntax::SyntaxHighlighter;

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct MarkdownOptions {
  /// Enable GitHub Flavored Markdown (GFM) extensions.
  pub gfm: bool,

  /// Recognize `::: kind [title]` admonition blocks.
  pub admonitions: bool,

  /// Substitute `:name:` glyph tokens.
  pub glyphs: bool,

  /// Give headings `id` attributes and a trailing anchor link.
  pub anchors: bool,

  /// Enable syntax highlighting for code blocks.
  pub highlight_code: bool,

  /// Wrap fenced code blocks with a line-number gutter.
  pub line_numbers: bool,

  /// Light theme for the default highlighter.
  pub highlight_theme: Option<String>,

  /// Dark theme for the default highlighter.
  pub highlight_theme_dark: Option<String>,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      gfm:                  cfg!(feature = "gfm"),
      admonitions:          true,
      glyphs:               true,
      anchors:              true,
      highlight_code:       cfg!(feature = "syntect"),
      line_numbers:         false,
      highlight_theme:      None,
      highlight_theme_dark: None,
    }
  }
}

/// Main Markdown processor.
///
/// Can be cheaply cloned since it uses `Arc` internally for the highlighter.
#[derive(Clone)]
pub struct MarkdownProcessor {
  pub(crate) options:     MarkdownOptions,
  pub(crate) highlighter: Option<Arc<dyn SyntaxHighlighter>>,
}

impl std::fmt::Debug for MarkdownProcessor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MarkdownProcessor")
      .field("options", &self.options)
      .field(
        "highlighter",
        &self.highlighter.as_ref().map(|h| h.name()),
      )
      .finish()
  }
}

/// Trait for AST transformations applied between parsing and rendering.
pub trait AstTransformer {
  fn transform<'a>(&self, node: &'a AstNode<'a>);
}

/// AST transformer replacing glyph tokens (`:smile:`) in text nodes.
///
/// Code spans and code blocks carry literals rather than text children, so
/// they are never touched.
pub struct GlyphTransformer;

impl AstTransformer for GlyphTransformer {
  fn transform<'a>(&self, node: &'a AstNode<'a>) {
    for descendant in node.descendants() {
      let mut data = descendant.data.borrow_mut();
      if let NodeValue::Text(ref text) = data.value {
        if let Some(replaced) = replace_glyphs(text) {
          data.value = NodeValue::Text(replaced.into());
        }
      }
    }
  }
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: MarkdownOptions::default(),
    }
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  #[must_use]
  pub const fn admonitions(mut self, enabled: bool) -> Self {
    self.options.admonitions = enabled;
    self
  }

  #[must_use]
  pub const fn glyphs(mut self, enabled: bool) -> Self {
    self.options.glyphs = enabled;
    self
  }

  #[must_use]
  pub const fn anchors(mut self, enabled: bool) -> Self {
    self.options.anchors = enabled;
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.highlight_code = enabled;
    self
  }

  #[must_use]
  pub const fn line_numbers(mut self, enabled: bool) -> Self {
    self.options.line_numbers = enabled;
    self
  }

  /// Set the light and dark syntax highlighting themes.
  #[must_use]
  pub fn highlight_themes<S: Into<String>>(
    mut self,
    light: Option<S>,
    dark: Option<S>,
  ) -> Self {
    self.options.highlight_theme = light.map(Into::into);
    self.options.highlight_theme_dark = dark.map(Into::into);
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}

impl Default for MarkdownOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}
