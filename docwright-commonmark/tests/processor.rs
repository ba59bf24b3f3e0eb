#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use std::sync::Arc;

use docwright_commonmark::{
  FnHighlighter,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  extract_excerpt,
  slugify,
};

/// Check if HTML output contains all expected substrings.
fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

fn processor() -> MarkdownProcessor {
  MarkdownProcessor::new(
    MarkdownOptionsBuilder::new().highlight_code(false).build(),
  )
}

#[test]
fn test_welcome_heading_gets_deterministic_anchor() {
  let result = processor().render("# Welcome\n\nHello.");
  assert_html_contains(&result.html, &[
    r#"<h1 id="welcome">Welcome<a "#,
    r#"class="header-anchor""#,
    r##"href="#welcome""##,
    ">#</a></h1>",
  ]);
  assert_eq!(result.title.as_deref(), Some("Welcome"));
}

#[test]
fn test_identical_headings_share_a_slug() {
  let result = processor().render("## Usage\n\ntext\n\n## Usage\n");
  assert_eq!(result.headers.len(), 2);
  assert_eq!(result.headers[0].id, "usage");
  assert_eq!(result.headers[1].id, "usage");
  assert_eq!(result.html.matches(r#"id="usage""#).count(), 2);
}

#[test]
fn test_extract_headers_levels_and_inline_markup() {
  let (headers, title) = processor()
    .extract_headers("# The `add` function\n\n### Returns **sum**\n");
  assert_eq!(title.as_deref(), Some("The add function"));
  assert_eq!(headers[0].level, 1);
  assert_eq!(headers[0].id, "the-add-function");
  assert_eq!(headers[1].level, 3);
  assert_eq!(headers[1].text, "Returns sum");
}

#[test]
fn test_all_admonition_kinds() {
  let md = "::: tip\na\n:::\n\n::: warning\nb\n:::\n\n::: danger\nc\n:::\n\n::: \
            info\nd\n:::\n\n::: details Click me\ne\n:::\n";
  let html = processor().render(md).html;
  assert_html_contains(&html, &[
    r#"<div class="custom-block tip">"#,
    r#"<p class="custom-block-title">TIP</p>"#,
    r#"<div class="custom-block warning">"#,
    r#"<div class="custom-block danger">"#,
    r#"<div class="custom-block info">"#,
    r#"<details class="custom-block details">"#,
    "<summary>Click me</summary>",
  ]);
}

#[test]
fn test_injected_highlighter_receives_language() {
  let highlighter = FnHighlighter::new(|code: &str, lang: &str| {
    format!("<span class=\"hl-{lang}\">{}</span>", code.trim_end())
  });
  let processor = MarkdownProcessor::new(
    MarkdownOptionsBuilder::new().highlight_code(false).build(),
  )
  .with_highlighter(Arc::new(highlighter));

  let html = processor.render("```ts\nconst x = 1;\n```\n").html;
  assert_html_contains(&html, &[
    r#"<div class="language-ts"><pre><code class="language-ts">"#,
    r#"<span class="hl-ts">const x = 1;</span>"#,
  ]);
}

#[test]
fn test_code_without_language_is_not_highlighted() {
  let highlighter =
    FnHighlighter::new(|_: &str, _: &str| "HIGHLIGHTED".to_string());
  let processor =
    MarkdownProcessor::new(MarkdownOptions::default())
      .with_highlighter(Arc::new(highlighter));
  let html = processor.render("```\nplain\n```\n").html;
  assert!(html.contains("plain"));
  assert!(!html.contains("HIGHLIGHTED"));
}

#[cfg(feature = "syntect")]
#[test]
fn test_default_highlighter_emits_classes() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let html = processor.render("```rust\nfn main() {}\n```\n").html;
  assert!(html.contains("<span class=\""));
  assert!(processor.theme_css().is_some());
}

#[cfg(feature = "gfm")]
#[test]
fn test_gfm_tables() {
  let html = processor()
    .render("| Name | Type |\n| --- | --- |\n| a | number |\n")
    .html;
  assert_html_contains(&html, &["<table>", "<td>number</td>"]);
}

#[test]
fn test_raw_html_passes_through() {
  let html = processor().render("<Badge text=\"beta\" />\n\nText").html;
  assert!(html.contains("<badge text=\"beta\">"));
}

#[test]
fn test_excerpt_and_slug_are_exposed() {
  assert_eq!(slugify("Hello World"), "hello-world");
  assert_eq!(
    extract_excerpt("## Intro\n\nRead the [guide](guide.md).", 100),
    "Intro Read the guide."
  );
}
