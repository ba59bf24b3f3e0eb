//! Error recovery around the rendering pipeline.
use std::panic::{AssertUnwindSafe, catch_unwind};

use log::error;

use super::types::MarkdownProcessor;
use crate::types::{MarkdownResult, RenderError};

/// Process markdown content with error recovery.
///
/// Runs [`render_catching_panics`] and turns any error into an inline
/// placeholder so a single malformed document never aborts a batch.
#[must_use]
pub fn process_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
) -> MarkdownResult {
  match render_catching_panics(processor, content) {
    Ok(result) => result,
    Err(e) => {
      error!("Error processing markdown: {e}");
      placeholder_result(&e)
    },
  }
}

/// [`MarkdownProcessor::try_render`], with panics raised inside the renderer
/// reported as [`RenderError::Panic`].
///
/// # Errors
///
/// Returns the render error or the panic message.
pub fn render_catching_panics(
  processor: &MarkdownProcessor,
  content: &str,
) -> Result<MarkdownResult, RenderError> {
  catch_unwind(AssertUnwindSafe(|| processor.try_render(content)))
    .unwrap_or_else(|panic_err| {
      let message = panic_err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| {
          panic_err.downcast_ref::<&str>().map(ToString::to_string)
        })
        .unwrap_or_else(|| "unknown panic".to_string());
      Err(RenderError::Panic(message))
    })
}

/// A result whose body is the placeholder for `error`.
#[must_use]
pub fn placeholder_result(error: &RenderError) -> MarkdownResult {
  MarkdownResult {
    html:    render_error_placeholder(error),
    headers: Vec::new(),
    title:   None,
  }
}

/// HTML placeholder substituted for a document that failed to render.
#[must_use]
pub fn render_error_placeholder(error: &RenderError) -> String {
  format!(
    "<div class=\"render-error\"><p>Failed to render this page: {}</p></div>",
    html_escape::encode_text(&error.to_string())
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_placeholder_escapes_message() {
    let html = render_error_placeholder(&RenderError::Panic("<boom>".to_string()));
    assert!(html.starts_with("<div class=\"render-error\">"));
    assert!(html.contains("&lt;boom&gt;"));
  }
}
