//! Leading `---`-delimited key-value headers of prose files.
//!
//! ```text
//! ---
//! title: Getting started
//! tags: [intro, setup]
//! authors:
//!   - Ada
//!   - Grace
//! ---
//! ```
//!
//! Values are bare, quoted or inline lists. A key with no value followed by
//! `- item` lines collects those items. Anything else is ignored.
use docwright_model::{MetaValue, Metadata};

/// A parsed front matter block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
  pub title:    Option<String>,
  /// Every key except `title`, in written order.
  pub metadata: Metadata,
}

/// Split `text` into its front matter and the remaining body.
///
/// Text without a complete front matter block is returned whole, with an
/// empty [`FrontMatter`].
#[must_use]
pub fn split_front_matter(text: &str) -> (FrontMatter, &str) {
  let unmarked = text.strip_prefix('\u{feff}').unwrap_or(text);
  let Some(rest) = unmarked
    .strip_prefix("---\r\n")
    .or_else(|| unmarked.strip_prefix("---\n"))
  else {
    return (FrontMatter::default(), text);
  };

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == "---" {
      let header = &rest[..offset];
      let body = &rest[offset + line.len()..];
      return (parse_header(header), body);
    }
    offset += line.len();
  }

  log::debug!("Unterminated front matter, treating it as content");
  (FrontMatter::default(), text)
}

fn parse_header(header: &str) -> FrontMatter {
  let mut front = FrontMatter::default();
  let mut list_key: Option<String> = None;

  for line in header.lines() {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
      continue;
    }

    if let Some(item) = trimmed.strip_prefix('-') {
      if let Some(key) = &list_key {
        let item = unquote(item.trim()).to_string();
        match front.metadata.get_mut(key) {
          Some(MetaValue::List(items)) => items.push(item),
          Some(value) => value.push(item),
          None => {
            front.metadata.insert(key.clone(), MetaValue::List(vec![item]));
          },
        }
      }
      continue;
    }

    let Some((key, value)) = trimmed.split_once(':') else {
      log::trace!("Ignoring front matter line: {trimmed}");
      continue;
    };
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
      continue;
    }

    if value.is_empty() {
      list_key = Some(key.to_string());
      front
        .metadata
        .insert(key.to_string(), MetaValue::List(Vec::new()));
      continue;
    }
    list_key = None;

    let value = parse_value(value);
    if key == "title" {
      front.title = Some(value.iter().collect::<Vec<_>>().join(", "));
    } else {
      front.metadata.insert(key.to_string(), value);
    }
  }

  // `key:` with nothing after it is an empty value, not an empty list.
  for value in front.metadata.values_mut() {
    if matches!(value, MetaValue::List(items) if items.is_empty()) {
      *value = MetaValue::Single(String::new());
    }
  }
  if let Some(MetaValue::Single(title)) = front.metadata.shift_remove("title")
  {
    front.title = Some(title);
  }

  front
}

fn parse_value(value: &str) -> MetaValue {
  match value
    .strip_prefix('[')
    .and_then(|inner| inner.strip_suffix(']'))
  {
    Some(inner) => {
      MetaValue::List(
        inner
          .split(',')
          .map(|item| unquote(item.trim()).to_string())
          .filter(|item| !item.is_empty())
          .collect(),
      )
    },
    None => MetaValue::Single(unquote(value).to_string()),
  }
}

fn unquote(value: &str) -> &str {
  for quote in ['"', '\''] {
    if let Some(inner) = value
      .strip_prefix(quote)
      .and_then(|inner| inner.strip_suffix(quote))
    {
      return inner;
    }
  }
  value
}
