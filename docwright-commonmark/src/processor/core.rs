//! Core implementation of the Markdown processor.
//!
//! This module contains the main implementation of `MarkdownProcessor` and its
//! methods, focused on the core rendering pipeline and configuration
//! management.
use std::sync::Arc;

use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use log::trace;
use markup5ever::{LocalName, QualName, local_name, ns};
use tendril::TendrilSink;

use super::{
  extensions::process_admonitions,
  process::process_with_recovery,
  types::{
    AstTransformer,
    GlyphTransformer,
    MarkdownOptions,
    MarkdownProcessor,
  },
};
use crate::{
  syntax::{SyntaxHighlighter, create_default_highlighter},
  types::{Header, MarkdownResult, RenderError},
  utils::{self, heading_text, parse_body, serialize_body},
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  ///
  /// When highlighting is enabled the default backend for the compiled
  /// features is used; see [`Self::with_highlighter`] to inject another one.
  #[must_use]
  pub fn new(options: MarkdownOptions) -> Self {
    let highlighter = if options.highlight_code {
      create_default_highlighter(
        options.highlight_theme.clone(),
        options.highlight_theme_dark.clone(),
      )
    } else {
      None
    };

    Self {
      options,
      highlighter,
    }
  }

  /// Replace the syntax highlighter. Also turns highlighting on.
  #[must_use]
  pub fn with_highlighter(
    mut self,
    highlighter: Arc<dyn SyntaxHighlighter>,
  ) -> Self {
    self.options.highlight_code = true;
    self.highlighter = Some(highlighter);
    self
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// The active highlighter, if highlighting is enabled.
  #[must_use]
  pub fn highlighter(&self) -> Option<&dyn SyntaxHighlighter> {
    if self.options.highlight_code {
      self.highlighter.as_deref()
    } else {
      None
    }
  }

  /// Stylesheet rules required by the active highlighter's output.
  #[must_use]
  pub fn theme_css(&self) -> Option<String> {
    self.highlighter().and_then(SyntaxHighlighter::theme_css)
  }

  /// Render Markdown to HTML, extracting headers and title.
  ///
  /// Never fails: if rendering errors or panics, the HTML is a
  /// `render-error` placeholder carrying the message.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    process_with_recovery(self, markdown)
  }

  /// Render Markdown to HTML, surfacing errors instead of recovering.
  ///
  /// # Errors
  ///
  /// Returns [`RenderError`] if HTML formatting or post-processing fails.
  pub fn try_render(
    &self,
    markdown: &str,
  ) -> Result<MarkdownResult, RenderError> {
    let (headers, title) = self.extract_headers(markdown);
    let preprocessed = self.preprocess(markdown);
    let html = self.convert_to_html(&preprocessed)?;
    let html = self.postprocess(&html)?;

    Ok(MarkdownResult {
      html,
      headers,
      title,
    })
  }

  /// Preprocess the markdown content with all enabled transformations.
  fn preprocess(&self, content: &str) -> String {
    if self.options.admonitions {
      process_admonitions(content)
    } else {
      content.to_string()
    }
  }

  /// Extract headings and title from the markdown content.
  ///
  /// Parses the text on its own, independent of [`Self::render`]. Slugs match
  /// the `id` attributes `render` assigns to the same headings.
  #[must_use]
  pub fn extract_headers(
    &self,
    content: &str,
  ) -> (Vec<Header>, Option<String>) {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    if self.options.glyphs {
      GlyphTransformer.transform(root);
    }

    let mut headers = Vec::new();
    let mut found_title = None;

    for node in root.descendants() {
      if let NodeValue::Heading(NodeHeading { level, .. }) =
        &node.data.borrow().value
      {
        let text = extract_inline_text(node).trim().to_string();
        if text.is_empty() {
          continue;
        }
        if *level == 1 && found_title.is_none() {
          found_title = Some(text.clone());
        }
        headers.push(Header {
          id: utils::slugify(&text),
          text,
          level: *level,
        });
      }
    }

    trace!("Extracted {} headings", headers.len());
    (headers, found_title)
  }

  /// Convert markdown to HTML using comrak and configured options.
  fn convert_to_html(&self, content: &str) -> Result<String, RenderError> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    if self.options.glyphs {
      GlyphTransformer.transform(root);
    }

    let mut html_output = String::new();
    comrak::format_html(root, &options, &mut html_output)?;
    Ok(html_output)
  }

  /// Build comrak options from `MarkdownOptions` and feature flags.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    // Admonition wrappers and component docs rely on raw HTML passing through.
    options.render.r#unsafe = true;
    options.extension.header_ids = None;
    options
  }

  /// HTML post-processing using kuchiki DOM manipulation.
  fn postprocess(&self, html: &str) -> Result<String, RenderError> {
    let wants_code = html.contains("<pre");
    if !self.options.anchors && !wants_code {
      return Ok(html.to_string());
    }

    let document = parse_body(html);
    if self.options.anchors {
      add_heading_anchors(&document);
    }
    if wants_code {
      self.process_code_blocks(&document);
    }
    Ok(serialize_body(&document)?)
  }

  /// Highlight fenced code blocks and wrap them in their language container.
  fn process_code_blocks(&self, document: &NodeRef) {
    let Ok(selection) = document.select("pre > code") else {
      return;
    };
    let blocks = selection.collect::<Vec<_>>();

    for code in blocks {
      let code_node = code.as_node();
      let Some(pre) = code_node.parent() else {
        continue;
      };
      let language = code
        .attributes
        .borrow()
        .get("class")
        .and_then(|class| {
          class
            .split_whitespace()
            .find_map(|c| c.strip_prefix("language-"))
            .map(ToString::to_string)
        })
        .unwrap_or_default();
      let source = code_node.text_contents();

      if !language.is_empty() {
        if let Some(highlighter) = self.highlighter() {
          match highlighter.highlight(&source, &language) {
            Ok(highlighted) => replace_children(code_node, &highlighted),
            Err(e) => log::debug!("Leaving `{language}` block plain: {e}"),
          }
        }
      }

      let mut class = if language.is_empty() {
        "language-text".to_string()
      } else {
        format!("language-{language}")
      };
      if self.options.line_numbers {
        class.push_str(" line-numbers-mode");
      }

      let wrapper = new_element("div", &[("class", &class)]);
      pre.insert_before(wrapper.clone());
      wrapper.append(pre);

      if self.options.line_numbers {
        wrapper.append(line_number_gutter(source.lines().count()));
      }
    }
  }
}

/// Give every heading an `id` (unless it has one) and a trailing anchor link.
fn add_heading_anchors(document: &NodeRef) {
  let Ok(selection) = document.select("h1, h2, h3, h4, h5, h6") else {
    return;
  };

  for heading in selection.collect::<Vec<_>>() {
    let text = heading_text(heading.as_node());
    if text.is_empty() {
      continue;
    }

    let id = {
      let mut attributes = heading.attributes.borrow_mut();
      if let Some(existing) = attributes.get("id") {
        existing.to_string()
      } else {
        let slug = utils::slugify(&text);
        attributes.insert(local_name!("id"), slug.clone());
        slug
      }
    };

    let anchor = new_element("a", &[
      ("class", "header-anchor"),
      ("href", &format!("#{id}")),
      ("aria-hidden", "true"),
    ]);
    anchor.append(NodeRef::new_text("#"));
    heading.as_node().append(anchor);
  }
}

/// Replace the children of `node` with the nodes parsed from `html`.
fn replace_children(node: &NodeRef, html: &str) {
  let fragment = kuchikikiki::parse_html()
    .one(format!("<html><body><pre><code>{html}</code></pre></body></html>"));
  let Ok(parsed) = fragment.select_first("code") else {
    return;
  };

  for child in node.children().collect::<Vec<_>>() {
    child.detach();
  }
  for child in parsed.as_node().children().collect::<Vec<_>>() {
    node.append(child);
  }
}

fn line_number_gutter(lines: usize) -> NodeRef {
  let gutter = new_element("div", &[
    ("class", "line-numbers-wrapper"),
    ("aria-hidden", "true"),
  ]);
  for number in 1..=lines.max(1) {
    let span = new_element("span", &[("class", "line-number")]);
    span.append(NodeRef::new_text(number.to_string()));
    gutter.append(span);
    gutter.append(new_element("br", &[]));
  }
  gutter
}

fn new_element(tag: &str, attributes: &[(&str, &str)]) -> NodeRef {
  NodeRef::new_element(
    QualName::new(None, ns!(html), LocalName::from(tag)),
    attributes.iter().map(|(name, value)| {
      (ExpandedName::new(ns!(), *name), Attribute {
        prefix: None,
        value:  (*value).to_string(),
      })
    }),
  )
}

/// Extract all inline text from a heading node.
pub fn extract_inline_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    match &child.data.borrow().value {
      NodeValue::Text(t) => text.push_str(t),
      NodeValue::Code(t) => text.push_str(&t.literal),
      NodeValue::Link(..)
      | NodeValue::Emph
      | NodeValue::Strong
      | NodeValue::Strikethrough
      | NodeValue::Superscript => text.push_str(&extract_inline_text(child)),
      NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
      _ => {},
    }
  }
  text
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_render_sets_heading_ids() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      highlight_code: false,
      ..Default::default()
    });
    let result = processor.render("# Welcome\n\n## Next Steps\n");
    assert!(result.html.contains(r#"<h1 id="welcome">Welcome"#));
    assert!(result.html.contains(r##"href="#next-steps""##));
    assert_eq!(result.title.as_deref(), Some("Welcome"));
    assert_eq!(result.headers.len(), 2);
  }

  #[test]
  fn test_anchors_disabled() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      anchors: false,
      highlight_code: false,
      ..Default::default()
    });
    let html = processor.render("## Plain").html;
    assert_eq!(html.trim(), "<h2>Plain</h2>");
  }

  #[test]
  fn test_line_numbers() {
    let processor = MarkdownProcessor::new(MarkdownOptions {
      line_numbers: true,
      highlight_code: false,
      ..Default::default()
    });
    let html = processor.render("```js\na\nb\nc\n```\n").html;
    assert!(html.contains(r#"<div class="language-js line-numbers-mode">"#));
    assert_eq!(html.matches(r#"<span class="line-number">"#).count(), 3);
  }
}
