//! Navbar and sidebar view models handed to the templates.
use std::path::Path;

use docwright_config::{
  Config,
  sidebar::{NavItem, SidebarGroup, SidebarLink},
};
use docwright_model::{DocumentKind, DocumentNode, humanize};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::links::PageLinks;

/// Escape for an element body.
pub(crate) fn text(value: &str) -> String {
  encode_text(value).into_owned()
}

/// Escape for a double-quoted attribute value.
pub(crate) fn attr(value: &str) -> String {
  encode_double_quoted_attribute(value).into_owned()
}

/// A resolved sidebar or dropdown link. Fields are HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
  pub text:   String,
  pub link:   String,
  pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
  pub text:        String,
  pub collapsible: bool,
  pub collapsed:   bool,
  pub items:       Vec<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
  pub text:   String,
  pub link:   String,
  pub active: bool,
  pub items:  Vec<NavView>,
}

/// Title shown for a document, derived from its path when empty.
#[must_use]
pub fn display_title(document: &DocumentNode) -> String {
  let title = document.title.trim();
  if !title.is_empty() {
    return title.to_string();
  }
  let stem = Path::new(&document.path)
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_default();
  humanize(&stem)
}

const fn group_title(kind: DocumentKind) -> &'static str {
  match kind {
    DocumentKind::Prose => "Guide",
    DocumentKind::Api => "API",
    DocumentKind::Component => "Components",
  }
}

/// One group per document kind, in kind order, documents in input order.
#[must_use]
pub fn automatic_sidebar(documents: &[DocumentNode]) -> Vec<SidebarGroup> {
  [DocumentKind::Prose, DocumentKind::Api, DocumentKind::Component]
    .into_iter()
    .filter_map(|kind| {
      let items: Vec<_> = documents
        .iter()
        .filter(|document| document.kind == kind)
        .map(|document| {
          SidebarLink {
            text: display_title(document),
            link: document.path.clone(),
          }
        })
        .collect();
      (!items.is_empty()).then(|| {
        SidebarGroup {
          text: group_title(kind).to_string(),
          collapsible: kind != DocumentKind::Prose,
          collapsed: false,
          items,
        }
      })
    })
    .collect()
}

/// The configured sidebar, or the automatic one when none is configured.
#[must_use]
pub fn sidebar_groups(
  config: &Config,
  documents: &[DocumentNode],
) -> Vec<SidebarGroup> {
  if config.sidebar.is_empty() {
    automatic_sidebar(documents)
  } else {
    config.sidebar.clone()
  }
}

#[must_use]
pub fn group_views(groups: &[SidebarGroup], links: &PageLinks<'_>) -> Vec<GroupView> {
  groups
    .iter()
    .map(|group| {
      GroupView {
        text:        text(&group.text),
        collapsible: group.collapsible,
        // The group holding the current page always starts open.
        collapsed:   group.collapsed
          && !group.items.iter().any(|item| links.is_active(&item.link)),
        items:       group
          .items
          .iter()
          .map(|item| {
            LinkView {
              text:   text(&item.text),
              link:   attr(&links.resolve(&item.link)),
              active: links.is_active(&item.link),
            }
          })
          .collect(),
      }
    })
    .collect()
}

#[must_use]
pub fn nav_views(items: &[NavItem], links: &PageLinks<'_>) -> Vec<NavView> {
  items
    .iter()
    .map(|item| {
      let children = nav_views(&item.items, links);
      let active = item.link.as_deref().is_some_and(|link| links.is_active(link))
        || children.iter().any(|child| child.active);
      NavView {
        text: text(&item.text),
        link: item
          .link
          .as_deref()
          .map(|link| attr(&links.resolve(link)))
          .unwrap_or_default(),
        active,
        items: children,
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn doc(path: &str, title: &str, kind: DocumentKind) -> DocumentNode {
    DocumentNode::new(path, title, "", kind)
  }

  #[test]
  fn test_automatic_sidebar_groups_by_kind() {
    let documents = vec![
      doc("components/Card.html", "Card", DocumentKind::Component),
      doc("index.html", "Home", DocumentKind::Prose),
      doc("guide/getting-started.html", "", DocumentKind::Prose),
    ];
    let groups = automatic_sidebar(&documents);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].text, "Guide");
    assert!(!groups[0].collapsible);
    assert_eq!(groups[0].items[1].text, "Getting Started");
    assert_eq!(groups[1].text, "Components");
    assert_eq!(groups[1].items[0].link, "components/Card.html");
  }

  #[test]
  fn test_group_views_mark_active_and_open_current_group() {
    let config = Config::default();
    let links = PageLinks::new(&config, "guide/intro.html");
    let groups = vec![SidebarGroup {
      text:        "Guide".to_string(),
      collapsible: true,
      collapsed:   true,
      items:       vec![
        SidebarLink {
          text: "Intro".to_string(),
          link: "guide/intro.html".to_string(),
        },
        SidebarLink {
          text: "Home".to_string(),
          link: "index.html".to_string(),
        },
      ],
    }];

    let views = group_views(&groups, &links);
    assert!(!views[0].collapsed);
    assert!(views[0].items[0].active);
    assert_eq!(views[0].items[0].link, "../guide/intro.html");
    assert!(!views[0].items[1].active);
    assert_eq!(views[0].items[1].link, "../index.html");
  }

  #[test]
  fn test_views_are_escaped() {
    let config = Config::default();
    let links = PageLinks::new(&config, "index.html");
    let nav = vec![NavItem {
      text:  "Q&A".to_string(),
      link:  Some("faq.html?a=\"b\"".to_string()),
      items: Vec::new(),
    }];
    let views = nav_views(&nav, &links);
    assert_eq!(views[0].text, "Q&amp;A");
    assert_eq!(views[0].link, "faq.html?a=&quot;b&quot;");
  }

  #[test]
  fn test_nav_dropdown_is_active_through_child() {
    let config = Config::default();
    let links = PageLinks::new(&config, "api/math.html");
    let nav = vec![NavItem {
      text:  "Reference".to_string(),
      link:  None,
      items: vec![NavItem {
        text:  "Math".to_string(),
        link:  Some("api/math.html".to_string()),
        items: Vec::new(),
      }],
    }];

    let views = nav_views(&nav, &links);
    assert!(views[0].active);
    assert!(views[0].link.is_empty());
    assert_eq!(views[0].items[0].link, "../api/math.html");
  }
}
