//! Page rendering with the embedded Tera templates.
use docwright_config::{Config, sidebar::SidebarGroup};
use docwright_templates as templates;
use serde::Serialize;
use tera::Tera;

use crate::{
  error::BuildError,
  links::PageLinks,
  navigation::{attr, group_views, nav_views, text},
  search::SEARCH_INDEX_FILE,
};

#[derive(Serialize)]
struct SocialView {
  icon: String,
  link: String,
}

/// Everything page-specific the layout needs.
#[derive(Debug, Clone)]
pub struct Page<'a> {
  /// Output-relative path of the page.
  pub path:        &'a str,
  pub title:       String,
  /// Rendered HTML body, inserted verbatim.
  pub content:     &'a str,
  pub kind:        &'a str,
  pub description: Option<&'a str>,
  pub edit_link:   Option<String>,
}

/// Renders pages into the site layout.
///
/// The navbar, sidebar and footer are rendered per page so that links stay
/// relative to that page and the active entry is marked. Templates do not
/// autoescape; every value is escaped before it enters a context.
pub struct PageRenderer<'a> {
  config:  &'a Config,
  sidebar: Vec<SidebarGroup>,
  tera:    Tera,
}

impl<'a> PageRenderer<'a> {
  /// # Errors
  ///
  /// Returns [`BuildError::Template`] if an embedded template fails to parse.
  pub fn new(
    config: &'a Config,
    sidebar: Vec<SidebarGroup>,
  ) -> Result<Self, BuildError> {
    let mut tera = Tera::default();
    tera.add_raw_template("page", templates::PAGE_TEMPLATE)?;
    tera.add_raw_template("navbar", templates::NAVBAR_TEMPLATE)?;
    tera.add_raw_template("sidebar", templates::SIDEBAR_TEMPLATE)?;
    tera.add_raw_template("footer", templates::FOOTER_TEMPLATE)?;
    Ok(Self {
      config,
      sidebar,
      tera,
    })
  }

  /// Render a complete HTML document for `page`.
  ///
  /// # Errors
  ///
  /// Returns [`BuildError::Template`] if rendering fails.
  pub fn render(&self, page: &Page<'_>) -> Result<String, BuildError> {
    let config = self.config;
    let theme = &config.theme;
    let links = PageLinks::new(config, page.path);
    let search_index_path = config
      .search
      .enable
      .then(|| attr(&links.resolve(SEARCH_INDEX_FILE)));
    let social_links: Vec<_> = theme
      .social_links
      .iter()
      .map(|social| {
        SocialView {
          icon: attr(&social.icon),
          link: attr(&links.resolve(&social.link)),
        }
      })
      .collect();

    let navbar_html = self.tera.render("navbar", &{
      let mut ctx = tera::Context::new();
      ctx.insert("site_title", &text(&config.title));
      ctx.insert("home_path", &attr(&links.resolve("index.html")));
      ctx.insert(
        "logo",
        &theme.logo.as_deref().map(|logo| attr(&links.resolve(logo))),
      );
      ctx.insert("nav", &nav_views(&config.nav, &links));
      ctx.insert("search_enabled", &config.search.enable);
      ctx.insert("repo", &theme.repo.as_deref().map(attr));
      ctx.insert("social_links", &social_links);
      ctx
    })?;

    let sidebar_html = self.tera.render("sidebar", &{
      let mut ctx = tera::Context::new();
      ctx.insert("groups", &group_views(&self.sidebar, &links));
      ctx
    })?;

    let footer_html = self.tera.render("footer", &{
      let mut ctx = tera::Context::new();
      ctx.insert("footer_text", &theme.footer.as_deref().map(text));
      ctx
    })?;

    let description = page
      .description
      .filter(|description| !description.is_empty())
      .or_else(|| {
        (!config.description.is_empty()).then_some(config.description.as_str())
      })
      .map(attr);

    let mut tera_context = tera::Context::new();
    tera_context.insert("content", page.content);
    tera_context.insert("title", &text(&page.title));
    tera_context.insert("site_title", &text(&config.title));
    tera_context.insert("description", &description);
    tera_context.insert("kind", page.kind);
    tera_context.insert("navbar_html", &navbar_html);
    tera_context.insert("sidebar_html", &sidebar_html);
    tera_context.insert("footer_html", &footer_html);
    tera_context.insert("edit_link", &page.edit_link.as_deref().map(attr));
    tera_context
      .insert("stylesheet_path", &attr(&links.resolve("assets/style.css")));
    tera_context.insert("main_js_path", &attr(&links.resolve("assets/main.js")));
    tera_context.insert("root_prefix", &attr(&links.root()));
    tera_context.insert("search_index_path", &search_index_path);

    Ok(self.tera.render("page", &tera_context)?)
  }
}
