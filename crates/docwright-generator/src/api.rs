//! Markdown for API pages.
//!
//! The page is plain Markdown rendered by the prose processor, so
//! declarations get heading anchors and highlighted signatures like any
//! other page.
use std::fmt::Write;

use docwright_tsdoc::{AnnotationNode, Parameter};

use crate::markdown::{cell, inline_code};

/// Tags rendered in their own section rather than in the tag list.
const STRUCTURED_TAGS: &[&str] = &[
  "param",
  "returns",
  "return",
  "example",
  "deprecated",
  "optional",
  "default",
];

/// Render the declarations of one source file as a Markdown page.
#[must_use]
pub fn api_markdown(title: &str, nodes: &[AnnotationNode], lang: &str) -> String {
  let mut md = String::new();
  let _ = writeln!(md, "# {title}\n");

  if nodes.is_empty() {
    let _ = writeln!(md, "_No documented declarations._");
    return md;
  }

  for node in nodes {
    write_declaration(&mut md, node, 2, lang);
  }
  md
}

fn write_declaration(
  md: &mut String,
  node: &AnnotationNode,
  level: usize,
  lang: &str,
) {
  let hashes = "#".repeat(level);
  let _ = writeln!(md, "{hashes} {}\n", node.name);
  let _ = writeln!(
    md,
    "<p class=\"api-kind api-kind-{kind}\">{kind}</p>\n",
    kind = node.kind
  );

  if node.is_deprecated() {
    let notice = node
      .tags
      .get("deprecated")
      .and_then(|value| value.as_str())
      .filter(|notice| !notice.is_empty());
    match notice {
      Some(notice) => {
        let _ = writeln!(md, "> **Deprecated:** {notice}\n");
      },
      None => {
        let _ = writeln!(md, "> **Deprecated**\n");
      },
    }
  }

  if !node.description.is_empty() {
    let _ = writeln!(md, "{}\n", node.description);
  }

  if !node.signature.is_empty() {
    let _ = writeln!(md, "```{lang}\n{}\n```\n", node.signature);
  }

  if !node.parameters.is_empty() {
    write_parameters(md, &node.parameters);
  }

  if let Some(returns) = &node.returns {
    let _ = write!(md, "**Returns:** {}", inline_code(returns));
    let description = node
      .tags
      .get("returns")
      .or_else(|| node.tags.get("return"))
      .and_then(|value| value.as_str());
    if let Some(description) = description {
      let _ = write!(md, " {description}");
    }
    let _ = writeln!(md, "\n");
  } else if let Some(type_text) = &node.type_text {
    let _ = writeln!(md, "**Type:** {}\n", inline_code(type_text));
  }

  let tags: Vec<_> = node
    .tags
    .iter()
    .filter(|(name, _)| !STRUCTURED_TAGS.contains(&name.as_str()))
    .collect();
  if !tags.is_empty() {
    for (name, value) in tags {
      let values = value.iter().collect::<Vec<_>>().join(", ");
      if values.is_empty() {
        let _ = writeln!(md, "- `@{name}`");
      } else {
        let _ = writeln!(md, "- `@{name}` {values}");
      }
    }
    md.push('\n');
  }

  for example in &node.examples {
    let _ = writeln!(md, "**Example**\n\n```{lang}\n{example}\n```\n");
  }

  for child in &node.children {
    write_declaration(md, child, level + 1, lang);
  }

  let _ = writeln!(
    md,
    "<p class=\"api-source\">Defined in <code>{}:{}</code></p>\n",
    html_escape::encode_text(&node.source.file.display().to_string()),
    node.source.line
  );
}

fn write_parameters(md: &mut String, parameters: &[Parameter]) {
  let _ = writeln!(md, "| Parameter | Type | Default | Description |");
  let _ = writeln!(md, "| --- | --- | --- | --- |");
  for param in parameters {
    let name = if param.optional {
      format!("{}?", param.name)
    } else {
      param.name.clone()
    };
    let _ = writeln!(
      md,
      "| {} | {} | {} | {} |",
      cell(&inline_code(&name)),
      cell(&param.type_text.as_deref().map(inline_code).unwrap_or_default()),
      cell(&param.default.as_deref().map(inline_code).unwrap_or_default()),
      cell(param.description.as_deref().unwrap_or_default()),
    );
  }
  md.push('\n');
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
  use std::path::Path;

  use docwright_tsdoc::extract_from_source;

  use super::*;

  #[test]
  fn test_function_page() {
    let nodes = extract_from_source(
      "/**\n * Adds two numbers\n * @param a - First | left\n * @since 1.2\n \
       * @example\n * add(1, 2)\n */\nexport function add(a: number, b = 2): \
       number { return a + b }\n",
      Path::new("math.ts"),
    )
    .unwrap();
    let md = api_markdown("math", &nodes, "ts");

    assert!(md.starts_with("# math\n"));
    assert!(md.contains("## add\n"));
    assert!(md.contains("Adds two numbers"));
    assert!(md.contains("```ts\nfunction add(a: number, b = 2): number\n```"));
    assert!(md.contains("| `a` | `number` |  | First \\| left |"));
    assert!(md.contains("| `b?` |  | `2` |  |"));
    assert!(md.contains("**Returns:** `number`"));
    assert!(md.contains("- `@since` 1.2"));
    assert!(md.contains("```ts\nadd(1, 2)\n```"));
    assert!(md.contains("Defined in <code>math.ts:8</code>"));
  }

  #[test]
  fn test_empty_page() {
    let md = api_markdown("empty", &[], "ts");
    assert!(md.contains("_No documented declarations._"));
  }
}
