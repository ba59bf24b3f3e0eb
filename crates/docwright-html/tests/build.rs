#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use std::{
  cell::RefCell,
  fs,
  path::PathBuf,
  rc::Rc,
};

use docwright_commonmark::{MarkdownOptionsBuilder, MarkdownProcessor};
use docwright_config::Config;
use docwright_html::{BuildError, SearchIndexItem, build_site};
use docwright_model::{
  DocumentKind,
  DocumentNode,
  MemoryReporter,
  Metadata,
  SOURCE_KEY,
};
use docwright_plugin::{HookResult, Plugin, PluginPipeline};
use tempfile::TempDir;

struct Site {
  dir:    TempDir,
  config: Config,
}

impl Site {
  fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();
    let config = Config {
      docs_dir: Some(PathBuf::from("docs")),
      output_dir: PathBuf::from("dist"),
      title: "Widgets".to_string(),
      ..Config::default()
    }
    .with_root(dir.path());
    Self { dir, config }
  }

  fn out(&self, rel: &str) -> PathBuf {
    self.config.output_dir.join(rel)
  }

  fn read(&self, rel: &str) -> String {
    fs::read_to_string(self.out(rel)).unwrap()
  }
}

fn processor() -> MarkdownProcessor {
  MarkdownProcessor::new(MarkdownOptionsBuilder::new().highlight_code(false).build())
}

fn prose(path: &str, title: &str, content: &str, source: &str) -> DocumentNode {
  let mut metadata = Metadata::new();
  metadata.insert(SOURCE_KEY.to_string(), source.into());
  DocumentNode::new(path, title, content, DocumentKind::Prose).with_metadata(metadata)
}

fn documents() -> Vec<DocumentNode> {
  vec![
    prose(
      "index.html",
      "Home",
      "<h1 id=\"welcome\">Welcome</h1>\n<p>Start here.</p>",
      "index.md",
    ),
    prose(
      "guide/intro.html",
      "",
      "<h2 id=\"install\">Install</h2>\n<p>Run the installer.</p>",
      "guide/intro.md",
    ),
    DocumentNode::new(
      "api/math.html",
      "math",
      "<h2 id=\"add\">add</h2>",
      DocumentKind::Api,
    ),
  ]
}

#[test]
fn test_build_writes_pages_assets_and_index() {
  let mut site = Site::new();
  site.config.theme.edit_link =
    Some("https://git.example/edit/main/docs/:path".to_string());
  let reporter = MemoryReporter::new();

  let output = build_site(
    &site.config,
    &PluginPipeline::new(),
    &processor(),
    &reporter,
    &documents(),
  )
  .unwrap();
  assert_eq!(output.pages, 3);
  assert_eq!(output.search_entries, 3);

  let index = site.read("index.html");
  assert!(index.contains("<h1 id=\"welcome\">Welcome</h1>"));
  assert!(index.contains("<title>Home | Widgets</title>"));
  assert!(index.contains("href=\"https://git.example/edit/main/docs/index.md\""));

  let intro = site.read("guide/intro.html");
  assert!(intro.contains("<title>Intro | Widgets</title>"));
  assert!(intro.contains("href=\"../assets/style.css\""));
  assert!(intro.contains("class=\"active\" aria-current=\"page\">Intro</a>"));

  let api = site.read("api/math.html");
  assert!(!api.contains("Edit this page"));

  assert!(site.out("assets/style.css").is_file());
  assert!(site.read("assets/main.js").contains("buildToc"));

  let items: Vec<SearchIndexItem> =
    serde_json::from_str(&site.read("search-index.json")).unwrap();
  assert_eq!(items.len(), 3);
  assert_eq!(items[1].id, "guide/intro.html");
  assert_eq!(items[1].title, "Intro");
  assert_eq!(items[1].headings, vec!["Install"]);
  assert_eq!(items[1].content, "Install Run the installer.");
  assert!(reporter.warnings().is_empty());
}

#[test]
fn test_build_clears_stale_output() {
  let site = Site::new();
  fs::create_dir_all(site.out("old")).unwrap();
  fs::write(site.out("old/page.html"), "stale").unwrap();

  build_site(
    &site.config,
    &PluginPipeline::new(),
    &processor(),
    &MemoryReporter::new(),
    &documents(),
  )
  .unwrap();
  assert!(!site.out("old").exists());
  assert!(site.out("api/math.html").is_file());
}

#[test]
fn test_index_fallback_and_disabled_search() {
  let mut site = Site::new();
  site.config.search.enable = false;
  let documents = vec![DocumentNode::new(
    "api/math.html",
    "math",
    "<p>x</p>",
    DocumentKind::Api,
  )];

  let output = build_site(
    &site.config,
    &PluginPipeline::new(),
    &processor(),
    &MemoryReporter::new(),
    &documents,
  )
  .unwrap();
  assert_eq!(output.pages, 2);
  assert_eq!(output.search_entries, 0);
  assert!(!site.out("search-index.json").exists());
  assert!(
    site
      .read("index.html")
      .contains("<li><a href=\"api/math.html\">math</a></li>")
  );
}

#[test]
fn test_output_containing_input_root_is_refused() {
  let mut site = Site::new();
  site.config.output_dir = site.dir.path().to_path_buf();

  let result = build_site(
    &site.config,
    &PluginPipeline::new(),
    &processor(),
    &MemoryReporter::new(),
    &documents(),
  );
  assert!(matches!(result, Err(BuildError::UnsafeOutputDir { .. })));
  assert!(site.dir.path().join("docs").is_dir());
}

#[test]
fn test_escaping_page_is_skipped() {
  let site = Site::new();
  let reporter = MemoryReporter::new();
  let documents = vec![DocumentNode::new(
    "../outside.html",
    "Outside",
    "",
    DocumentKind::Prose,
  )];

  let output = build_site(
    &site.config,
    &PluginPipeline::new(),
    &processor(),
    &reporter,
    &documents,
  )
  .unwrap();
  assert_eq!(output.pages, 1);
  assert_eq!(reporter.warnings().len(), 1);
  assert!(!site.dir.path().join("outside.html").exists());
}

struct Hooks {
  calls: Rc<RefCell<Vec<&'static str>>>,
}

impl Plugin for Hooks {
  fn name(&self) -> &str {
    "hooks"
  }

  fn before_build(&self, config: &Config) -> HookResult {
    assert!(!config.output_dir.join("index.html").exists());
    self.calls.borrow_mut().push("before_build");
    Ok(())
  }

  fn after_build(&self, config: &Config) -> HookResult {
    assert!(config.output_dir.join("index.html").is_file());
    self.calls.borrow_mut().push("after_build");
    Ok(())
  }
}

#[test]
fn test_build_hooks_bracket_assembly() {
  let site = Site::new();
  let calls = Rc::new(RefCell::new(Vec::new()));
  let pipeline = PluginPipeline::new().with(Hooks {
    calls: Rc::clone(&calls),
  });

  build_site(
    &site.config,
    &pipeline,
    &processor(),
    &MemoryReporter::new(),
    &documents(),
  )
  .unwrap();
  assert_eq!(*calls.borrow(), vec!["before_build", "after_build"]);
}
