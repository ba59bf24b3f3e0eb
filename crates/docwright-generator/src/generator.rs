use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use docwright_commonmark::{
  MarkdownProcessor,
  MarkdownResult,
  processor::{placeholder_result, render_catching_panics},
};
use docwright_components::{ComponentStyle, extract_component_file};
use docwright_config::Config;
use docwright_model::{
  DocumentKind,
  DocumentNode,
  MetaValue,
  Metadata,
  Reporter,
  SOURCE_KEY,
  humanize,
};
use docwright_plugin::{GenerateContext, PluginPipeline};
use docwright_tsdoc::extract_from_file;

use crate::{
  api::api_markdown,
  collect::SourceFiles,
  component::component_markdown,
  error::GenerateError,
  frontmatter::split_front_matter,
  paths::{output_path, slash_path},
};

/// The outcome of a generation pass.
#[derive(Debug, Clone, Default)]
pub struct Generation {
  /// Documents in category order, input order within a category.
  pub documents: Vec<DocumentNode>,
  /// Files that produced no document: unreadable, unparsable, drafts or
  /// without declarations.
  pub skipped:   Vec<PathBuf>,
}

/// Runs extraction and rendering over every configured root.
pub struct Generator<'a> {
  config:    &'a Config,
  pipeline:  &'a PluginPipeline,
  processor: &'a MarkdownProcessor,
  reporter:  &'a dyn Reporter,
}

/// Documents by output path, rejecting a second document for a path.
#[derive(Default)]
struct DocumentSet {
  documents: Vec<DocumentNode>,
  sources:   HashMap<String, PathBuf>,
}

impl DocumentSet {
  fn push(
    &mut self,
    document: DocumentNode,
    source: &Path,
  ) -> Result<(), GenerateError> {
    if let Some(first) = self.sources.get(&document.path) {
      return Err(GenerateError::OutputCollision {
        path:   document.path,
        first:  first.clone(),
        second: source.to_path_buf(),
      });
    }
    self
      .sources
      .insert(document.path.clone(), source.to_path_buf());
    self.documents.push(document);
    Ok(())
  }
}

impl<'a> Generator<'a> {
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

  /// Generate every document.
  ///
  /// # Errors
  ///
  /// - [`GenerateError::Config`] if a configured root is missing.
  /// - [`GenerateError::OutputCollision`] if two files map to one page.
  /// - [`GenerateError::Plugin`] if a hook fails.
  pub fn run(&self) -> Result<Generation, GenerateError> {
    let files = SourceFiles::collect(self.config)?;
    let all = files.all();
    self
      .reporter
      .info(&format!("Generating documents from {} files", all.len()));

    self.pipeline.before_generate(&GenerateContext {
      config:    self.config,
      files:     &all,
      documents: None,
    })?;

    let mut set = DocumentSet::default();
    let mut skipped = Vec::new();

    if let Some(root) = self.config.docs_dir.as_deref() {
      for path in &files.prose {
        match self.prose(root, path)? {
          Some(document) => set.push(document, path)?,
          None => skipped.push(path.clone()),
        }
      }
    }

    if let Some(root) = self.config.src_dir.as_deref() {
      for path in &files.api {
        match self.api(root, path) {
          Some(document) => set.push(document, path)?,
          None => skipped.push(path.clone()),
        }
      }
    }

    if let Some(root) = self.config.components_dir.as_deref() {
      for path in &files.components {
        match self.component(root, path) {
          Some(document) => set.push(document, path)?,
          None => skipped.push(path.clone()),
        }
      }
    }

    let documents = set.documents;
    self.reporter.info(&format!(
      "Generated {} documents, skipped {} files",
      documents.len(),
      skipped.len()
    ));

    self.pipeline.after_generate(&GenerateContext {
      config:    self.config,
      files:     &all,
      documents: Some(documents.as_slice()),
    })?;

    Ok(Generation { documents, skipped })
  }

  fn prose(
    &self,
    root: &Path,
    path: &Path,
  ) -> Result<Option<DocumentNode>, GenerateError> {
    let Some(raw) = self.read(path) else {
      return Ok(None);
    };
    let text = self.pipeline.transform_markdown(&raw, path)?;
    let (front, body) = split_front_matter(&text);

    if front.metadata.get("draft").is_some_and(MetaValue::is_truthy) {
      self.reporter.info(&format!("Skipping draft {}", path.display()));
      return Ok(None);
    }

    let rel = path.strip_prefix(root).unwrap_or(path);
    let result = self.render(body, path);
    let title = front
      .title
      .filter(|title| !title.is_empty())
      .or(result.title)
      .unwrap_or_else(|| humanize(&file_stem(path)));

    let mut metadata = front.metadata;
    metadata.insert(SOURCE_KEY.to_string(), slash_path(rel).into());

    Ok(Some(
      DocumentNode::new(
        output_path(rel, DocumentKind::Prose),
        title,
        result.html,
        DocumentKind::Prose,
      )
      .with_metadata(metadata),
    ))
  }

  fn api(&self, root: &Path, path: &Path) -> Option<DocumentNode> {
    let nodes = match extract_from_file(path) {
      Ok(nodes) => nodes,
      Err(e) => {
        self.reporter.warn(path, &e.to_string());
        return None;
      },
    };

    let nodes: Vec<_> = if self.config.api.exported_only {
      nodes.into_iter().filter(|node| node.exported).collect()
    } else {
      nodes
    };
    if nodes.is_empty() {
      log::debug!("{}: no declarations to document", path.display());
      return None;
    }

    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut title_path = rel.to_path_buf();
    title_path.set_extension("");
    let title = slash_path(&title_path);

    let markdown = api_markdown(&title, &nodes, fence_language(path));
    let result = self.render(&markdown, path);

    let mut metadata = Metadata::new();
    metadata.insert(SOURCE_KEY.to_string(), slash_path(rel).into());
    Some(
      DocumentNode::new(
        output_path(rel, DocumentKind::Api),
        title,
        result.html,
        DocumentKind::Api,
      )
      .with_metadata(metadata),
    )
  }

  fn component(&self, root: &Path, path: &Path) -> Option<DocumentNode> {
    let style = if has_extension(path, &self.config.components.sfc_extensions)
    {
      ComponentStyle::SingleFile
    } else {
      ComponentStyle::Jsx
    };
    let component = match extract_component_file(path, style) {
      Ok(component) => component,
      Err(e) => {
        self.reporter.warn(path, &e.to_string());
        return None;
      },
    };

    let rel = path.strip_prefix(root).unwrap_or(path);
    let result = self.render(&component_markdown(&component), path);

    let mut metadata = Metadata::new();
    metadata.insert(SOURCE_KEY.to_string(), slash_path(rel).into());
    if !component.description.is_empty() {
      metadata.insert(
        "description".to_string(),
        component.description.as_str().into(),
      );
    }

    Some(
      DocumentNode::new(
        output_path(rel, DocumentKind::Component),
        component.name,
        result.html,
        DocumentKind::Component,
      )
      .with_metadata(metadata),
    )
  }

  fn read(&self, path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
      Ok(text) => Some(text),
      Err(e) => {
        self.reporter.warn(path, &format!("Failed to read file: {e}"));
        None
      },
    }
  }

  /// Render Markdown, reporting a failure and substituting a placeholder.
  fn render(&self, markdown: &str, path: &Path) -> MarkdownResult {
    render_catching_panics(self.processor, markdown).unwrap_or_else(|e| {
      self.reporter.warn(path, &format!("Failed to render: {e}"));
      placeholder_result(&e)
    })
  }
}

fn file_stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_default()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Code fence language for signatures extracted from `path`.
fn fence_language(path: &Path) -> &'static str {
  match path.extension().and_then(|ext| ext.to_str()) {
    Some("js" | "jsx" | "mjs" | "cjs") => "js",
    _ => "ts",
  }
}
