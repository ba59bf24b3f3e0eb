use std::{
  collections::HashSet,
  fmt::Write,
  fs,
  path::{Component, Path, PathBuf},
};

use docwright_commonmark::MarkdownProcessor;
use docwright_config::Config;
use docwright_model::{DocumentKind, DocumentNode, Reporter};
use docwright_plugin::PluginPipeline;

use crate::{
  assets::write_assets,
  error::BuildError,
  links::PageLinks,
  navigation::{attr, automatic_sidebar, display_title, sidebar_groups, text},
  search::{build_search_index, write_search_index},
  template::{Page, PageRenderer},
};

const INDEX_PAGE: &str = "index.html";

/// Counts of what a build emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOutput {
  /// HTML pages written, including a generated index.
  pub pages:          usize,
  /// Entries in `search-index.json`; zero when search is disabled.
  pub search_entries: usize,
}

/// Assembles the static site from a generated document set.
pub struct SiteBuilder<'a> {
  config:    &'a Config,
  pipeline:  &'a PluginPipeline,
  processor: &'a MarkdownProcessor,
  reporter:  &'a dyn Reporter,
}

impl<'a> SiteBuilder<'a> {
  #[must_use]
  pub fn new(
    config: &'a Config,
    pipeline: &'a PluginPipeline,
    processor: &'a MarkdownProcessor,
    reporter: &'a dyn Reporter,
  ) -> Self {
    Self {
      config,
      pipeline,
      processor,
      reporter,
    }
  }

  /// Clear the output directory and write every page, the assets and the
  /// search index.
  ///
  /// # Errors
  ///
  /// - [`BuildError::OutputCollision`] if two documents share a path.
  /// - [`BuildError::UnsafeOutputDir`] if clearing the output directory would
  ///   delete an input root.
  /// - [`BuildError::Plugin`] if a build hook fails.
  /// - Any template, stylesheet, serialization or I/O failure.
  pub fn build(&self, documents: &[DocumentNode]) -> Result<BuildOutput, BuildError> {
    check_unique_paths(documents)?;
    self.check_output_dir()?;

    self.pipeline.before_build(self.config)?;

    let output_dir = self.config.output_dir.as_path();
    self.reporter.info(&format!(
      "Building {} pages into {}",
      documents.len(),
      output_dir.display()
    ));
    clear_dir(output_dir)?;

    let renderer =
      PageRenderer::new(self.config, sidebar_groups(self.config, documents))?;

    let mut pages = 0;
    for document in documents {
      let Some(target) = page_target(output_dir, &document.path) else {
        self.reporter.warn(
          Path::new(&document.path),
          "Page path leaves the output directory, skipped",
        );
        continue;
      };
      let html = renderer.render(&self.page(document))?;
      write_page(&target, &html)?;
      pages += 1;
    }

    if !documents.iter().any(|document| document.path == INDEX_PAGE) {
      let content = index_listing(self.config, documents);
      let html = renderer.render(&Page {
        path:        INDEX_PAGE,
        title:       self.config.title.clone(),
        content:     &content,
        kind:        "index",
        description: None,
        edit_link:   None,
      })?;
      write_page(&output_dir.join(INDEX_PAGE), &html)?;
      pages += 1;
    }

    write_assets(output_dir, self.config, self.processor.theme_css().as_deref())?;

    let search_entries = if self.config.search.enable {
      let items =
        build_search_index(documents, self.config.search.max_content_length);
      write_search_index(output_dir, &items)?;
      items.len()
    } else {
      0
    };

    self.pipeline.after_build(self.config)?;
    self.reporter.info(&format!("Wrote {pages} pages"));

    Ok(BuildOutput {
      pages,
      search_entries,
    })
  }

  fn page<'d>(&self, document: &'d DocumentNode) -> Page<'d> {
    // Only prose sources are edited by hand.
    let edit_link = document
      .source()
      .filter(|_| document.kind == DocumentKind::Prose)
      .and_then(|source| self.config.theme.edit_link_for(source));

    Page {
      path: &document.path,
      title: display_title(document),
      content: &document.content,
      kind: document.kind.as_str(),
      description: document.description(),
      edit_link,
    }
  }

  fn check_output_dir(&self) -> Result<(), BuildError> {
    let output = canonical(&self.config.output_dir);
    for (_, root) in self.config.input_roots() {
      if canonical(root).starts_with(&output) {
        return Err(BuildError::UnsafeOutputDir {
          output: self.config.output_dir.clone(),
          root:   root.to_path_buf(),
        });
      }
    }
    Ok(())
  }
}

fn canonical(path: &Path) -> PathBuf {
  fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn check_unique_paths(documents: &[DocumentNode]) -> Result<(), BuildError> {
  let mut seen = HashSet::new();
  for document in documents {
    if !seen.insert(document.path.as_str()) {
      return Err(BuildError::OutputCollision {
        path: document.path.clone(),
      });
    }
  }
  Ok(())
}

/// Target file for a page, or `None` if the path is empty or would escape
/// the output directory.
fn page_target(output_dir: &Path, page: &str) -> Option<PathBuf> {
  let rel = Path::new(page);
  let contained = !page.is_empty()
    && rel
      .components()
      .all(|component| matches!(component, Component::Normal(_)));
  contained.then(|| output_dir.join(rel))
}

fn clear_dir(dir: &Path) -> Result<(), BuildError> {
  if dir.exists() {
    fs::remove_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
  }
  fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))
}

fn write_page(target: &Path, html: &str) -> Result<(), BuildError> {
  if let Some(parent) = target.parent() {
    fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
  }
  fs::write(target, html).map_err(|e| BuildError::io(target, e))
}

/// Body of the generated `index.html`: every page, grouped by kind.
fn index_listing(config: &Config, documents: &[DocumentNode]) -> String {
  let links = PageLinks::new(config, INDEX_PAGE);
  let mut html = String::new();
  let _ = writeln!(html, "<h1 id=\"index\">{}</h1>", text(&config.title));
  if !config.description.is_empty() {
    let _ = writeln!(html, "<p>{}</p>", text(&config.description));
  }
  if documents.is_empty() {
    let _ = writeln!(html, "<p>No pages were generated.</p>");
    return html;
  }

  for group in automatic_sidebar(documents) {
    let _ = writeln!(html, "<h2>{}</h2>", text(&group.text));
    let _ = writeln!(html, "<ul class=\"page-index-list\">");
    for item in &group.items {
      let _ = writeln!(
        html,
        "<li><a href=\"{}\">{}</a></li>",
        attr(&links.resolve(&item.link)),
        text(&item.text)
      );
    }
    let _ = writeln!(html, "</ul>");
  }
  html
}
