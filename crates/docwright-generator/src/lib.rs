//! `docwright-generator`.
//!
//! Walks the configured roots, runs the matching extractor or the prose
//! processor on every candidate file and normalizes each result into one
//! [`DocumentNode`]. Generate hooks of the plugin pipeline bracket the batch;
//! `transform_markdown` runs on every prose file before rendering.
//!
//! A file that cannot be read or parsed is reported and skipped. Two files
//! resolving to the same output path abort the pass with
//! [`GenerateError::OutputCollision`].
mod api;
pub mod collect;
mod component;
mod error;
pub mod frontmatter;
mod generator;
mod markdown;
pub mod paths;

use docwright_commonmark::{MarkdownOptionsBuilder, MarkdownProcessor};
use docwright_config::Config;
use docwright_model::{DocumentNode, Reporter};
use docwright_plugin::PluginPipeline;

pub use crate::{
  collect::SourceFiles,
  error::GenerateError,
  frontmatter::{FrontMatter, split_front_matter},
  generator::{Generation, Generator},
};

/// Generate the complete document set for `config`.
///
/// # Errors
///
/// See [`Generator::run`].
pub fn generate(
  config: &Config,
  pipeline: &PluginPipeline,
  processor: &MarkdownProcessor,
  reporter: &dyn Reporter,
) -> Result<Vec<DocumentNode>, GenerateError> {
  Generator::new(config, pipeline, processor, reporter)
    .run()
    .map(|generation| generation.documents)
}

/// Creates the prose processor described by the configuration's Markdown
/// toggles.
#[must_use]
pub fn create_processor(config: &Config) -> MarkdownProcessor {
  let markdown = &config.markdown;
  let non_empty = |theme: &str| {
    let theme = theme.trim();
    (!theme.is_empty()).then(|| theme.to_string())
  };

  let options = MarkdownOptionsBuilder::new()
    .gfm(true)
    .admonitions(markdown.admonitions)
    .glyphs(markdown.glyphs)
    .anchors(markdown.anchors)
    .highlight_code(markdown.highlight)
    .line_numbers(markdown.line_numbers)
    .highlight_themes(
      non_empty(&markdown.theme.light),
      non_empty(&markdown.theme.dark),
    )
    .build();

  MarkdownProcessor::new(options)
}
