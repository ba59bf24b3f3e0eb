//! Markdown processing module.
//!
//! - [`core`]: main processor implementation and the rendering pipeline
//! - [`process`]: error recovery around rendering
//! - [`extensions`]: admonition and glyph handling
//! - [`types`]: options, the processor struct and AST transformers
pub mod core;
pub mod extensions;
pub mod process;
pub mod types;

pub use core::extract_inline_text;

pub use extensions::{GLYPHS, process_admonitions, replace_glyphs};
pub use process::{
  placeholder_result,
  process_with_recovery,
  render_catching_panics,
  render_error_placeholder,
};
pub use types::{
  AstTransformer,
  GlyphTransformer,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
};

#[cfg(test)]
mod tests {
  use super::{MarkdownOptions, MarkdownProcessor};

  fn plain_processor() -> MarkdownProcessor {
    MarkdownProcessor::new(MarkdownOptions {
      highlight_code: false,
      ..Default::default()
    })
  }

  #[test]
  fn test_glyphs_in_text_not_code() {
    let html = plain_processor().render("Nice :smile: and `:smile:`").html;
    assert!(html.contains("Nice 😄"));
    assert!(html.contains("<code>:smile:</code>"));
  }

  #[test]
  fn test_glyphs_disabled() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      glyphs: false,
      highlight_code: false,
      ..Default::default()
    });
    assert!(processor.render(":smile:").html.contains(":smile:"));
  }

  #[test]
  fn test_admonition_inner_markdown_is_rendered() {
    let html = plain_processor()
      .render("::: warning Heads up\nThis is **important**.\n:::\n")
      .html;
    assert!(html.contains(r#"<div class="custom-block warning">"#));
    assert!(html.contains(r#"<p class="custom-block-title">Heads up</p>"#));
    assert!(html.contains("<strong>important</strong>"));
  }

  #[test]
  fn test_plain_text_is_untouched_by_extensions() {
    let processor = plain_processor();
    let md = "Just a paragraph with *emphasis*.\n";
    let html = processor.render(md).html;
    assert_eq!(html.trim(), "<p>Just a paragraph with <em>emphasis</em>.</p>");
  }

  #[test]
  fn test_heading_slugs_match_extraction() {
    let processor = plain_processor();
    let md = "# Install :rocket:\n\n## Install :rocket:\n";
    let (headers, _) = processor.extract_headers(md);
    let html = processor.render(md).html;
    for header in &headers {
      assert!(html.contains(&format!("id=\"{}\"", header.id)));
    }
    assert_eq!(headers[0].id, headers[1].id);
  }
}
