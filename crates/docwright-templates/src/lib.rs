//! Built-in templates and assets.
//!
//! HTML templates are Tera sources. The stylesheet is SCSS and expects the
//! site builder to define `$primary-color` before compiling it.
pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const NAVBAR_TEMPLATE: &str = include_str!("../templates/navbar.html");
pub const SIDEBAR_TEMPLATE: &str = include_str!("../templates/sidebar.html");
pub const FOOTER_TEMPLATE: &str = include_str!("../templates/footer.html");

pub const STYLE_SCSS: &str = include_str!("../templates/style.scss");
pub const MAIN_JS: &str = include_str!("../templates/main.js");

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_stylesheet_uses_primary_color() {
    assert!(STYLE_SCSS.contains("$primary-color"));
  }
}
