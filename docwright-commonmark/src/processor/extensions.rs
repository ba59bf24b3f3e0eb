//! Source-level extensions applied around the CommonMark parser.
//!
//! Admonitions are rewritten into raw HTML wrapper lines before parsing, with
//! blank lines around the inner content so CommonMark still renders it as
//! Markdown. Glyph tokens are replaced on text nodes after parsing (see
//! [`super::GlyphTransformer`]).

/// Glyph tokens recognized by [`replace_glyphs`].
pub const GLYPHS: &[(&str, &str)] = &[
  (":smile:", "😄"),
  (":laughing:", "😆"),
  (":wink:", "😉"),
  (":heart:", "❤️"),
  (":+1:", "👍"),
  (":thumbsup:", "👍"),
  (":-1:", "👎"),
  (":tada:", "🎉"),
  (":rocket:", "🚀"),
  (":fire:", "🔥"),
  (":sparkles:", "✨"),
  (":star:", "⭐"),
  (":bulb:", "💡"),
  (":memo:", "📝"),
  (":book:", "📖"),
  (":bug:", "🐛"),
  (":warning:", "⚠️"),
  (":white_check_mark:", "✅"),
  (":x:", "❌"),
  (":eyes:", "👀"),
];

/// Replace every known glyph token in `text`.
///
/// Returns `None` when the text contains no token, so callers can skip
/// touching the node.
#[must_use]
pub fn replace_glyphs(text: &str) -> Option<String> {
  if !text.contains(':') {
    return None;
  }

  let mut out = String::with_capacity(text.len());
  let mut rest = text;
  let mut changed = false;

  while let Some(start) = rest.find(':') {
    out.push_str(&rest[..start]);
    let candidate = &rest[start..];
    if let Some((token, glyph)) =
      GLYPHS.iter().find(|(token, _)| candidate.starts_with(token))
    {
      out.push_str(glyph);
      rest = &candidate[token.len()..];
      changed = true;
    } else {
      out.push(':');
      rest = &candidate[1..];
    }
  }
  out.push_str(rest);

  changed.then_some(out)
}

/// Admonition kinds and their default titles.
const ADMONITIONS: &[(&str, &str)] = &[
  ("tip", "TIP"),
  ("warning", "WARNING"),
  ("danger", "DANGER"),
  ("info", "INFO"),
  ("details", "Details"),
];

/// Parse an admonition opener: `::: kind [custom title]`.
fn parse_admonition_start(line: &str) -> Option<(&'static str, String)> {
  let after_colons = line.trim().strip_prefix(":::")?.trim_start();
  let (kind, title) = after_colons
    .split_once(char::is_whitespace)
    .map_or((after_colons, ""), |(kind, title)| (kind, title.trim()));

  let &(kind, default_title) =
    ADMONITIONS.iter().find(|(name, _)| *name == kind)?;
  let title = if title.is_empty() {
    default_title.to_string()
  } else {
    title.to_string()
  };
  Some((kind, title))
}

fn is_admonition_end(line: &str) -> bool {
  line.trim() == ":::"
}

/// Render the opening wrapper of an admonition.
fn render_admonition_open(kind: &str, title: &str) -> String {
  let title = html_escape::encode_text(title);
  if kind == "details" {
    format!("<details class=\"custom-block details\">\n<summary>{title}</summary>\n")
  } else {
    format!(
      "<div class=\"custom-block {kind}\">\n<p \
       class=\"custom-block-title\">{title}</p>\n"
    )
  }
}

fn render_admonition_close(kind: &str) -> &'static str {
  if kind == "details" {
    "</details>"
  } else {
    "</div>"
  }
}

/// Tracks whether the scan is inside a fenced code block.
#[derive(Default)]
struct FenceState {
  fence: Option<(char, usize)>,
}

impl FenceState {
  /// Feed one line; returns `true` if the line belongs to a code block
  /// (including its fences).
  fn observe(&mut self, line: &str) -> bool {
    let trimmed = line.trim_start();
    let fence_char = match trimmed.chars().next() {
      Some(c @ ('`' | '~')) => c,
      _ => return self.fence.is_some(),
    };
    let count = trimmed.chars().take_while(|&c| c == fence_char).count();
    if count < 3 {
      return self.fence.is_some();
    }

    match self.fence {
      None => {
        self.fence = Some((fence_char, count));
      },
      Some((open_char, open_count))
        if open_char == fence_char
          && count >= open_count
          && trimmed[count..].trim().is_empty() =>
      {
        self.fence = None;
      },
      Some(_) => {},
    }
    true
  }
}

/// Rewrite `::: kind [title]` ... `:::` blocks into HTML wrappers.
///
/// Code-fence aware: markers inside fenced code are left alone. Admonitions
/// may nest; an unclosed admonition is closed at the end of the text. Text
/// without admonitions is returned unchanged.
#[must_use]
pub fn process_admonitions(content: &str) -> String {
  if !content.contains(":::") {
    return content.to_string();
  }

  let mut result = Vec::new();
  let mut fences = FenceState::default();
  let mut open: Vec<&'static str> = Vec::new();
  let mut found = false;

  for line in content.lines() {
    if fences.observe(line) {
      result.push(line.to_string());
      continue;
    }

    if let Some((kind, title)) = parse_admonition_start(line) {
      found = true;
      open.push(kind);
      result.push(render_admonition_open(kind, &title));
      continue;
    }

    if is_admonition_end(line) {
      if let Some(kind) = open.pop() {
        result.push(String::new());
        result.push(render_admonition_close(kind).to_string());
        result.push(String::new());
        continue;
      }
    }

    result.push(line.to_string());
  }

  while let Some(kind) = open.pop() {
    result.push(String::new());
    result.push(render_admonition_close(kind).to_string());
  }

  if !found {
    return content.to_string();
  }

  let mut joined = result.join("\n");
  if content.ends_with('\n') {
    joined.push('\n');
  }
  joined
}
