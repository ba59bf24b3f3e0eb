//! `docwright-html`.
//!
//! The site builder: turns a generated document set into a static site.
//! Every build clears the output directory, writes one page per document,
//! synthesizes the stylesheet and script under `assets/` and, when search is
//! enabled, writes `search-index.json`. Build hooks of the plugin pipeline
//! bracket the whole step.
pub mod assets;
mod builder;
mod error;
pub mod links;
pub mod navigation;
pub mod search;
pub mod template;

use docwright_commonmark::MarkdownProcessor;
use docwright_config::Config;
use docwright_model::{DocumentNode, Reporter};
use docwright_plugin::PluginPipeline;

pub use crate::{
  builder::{BuildOutput, SiteBuilder},
  error::BuildError,
  search::{SearchIndexItem, build_search_index},
};

/// Build the site for `documents` into `config.output_dir`.
///
/// # Errors
///
/// See [`SiteBuilder::build`].
pub fn build_site(
  config: &Config,
  pipeline: &PluginPipeline,
  processor: &MarkdownProcessor,
  reporter: &dyn Reporter,
  documents: &[DocumentNode],
) -> Result<BuildOutput, BuildError> {
  SiteBuilder::new(config, pipeline, processor, reporter).build(documents)
}
