use std::path::{Path, PathBuf};

use docwright_config::Config;
use docwright_model::DocumentNode;

use crate::error::{HookResult, PluginError};

/// What the generate hooks can see.
#[derive(Debug, Clone, Copy)]
pub struct GenerateContext<'a> {
  /// The resolved configuration.
  pub config:    &'a Config,
  /// Every candidate file of the batch, in processing order.
  pub files:     &'a [PathBuf],
  /// The completed documents. Only set for [`Plugin::after_generate`].
  pub documents: Option<&'a [DocumentNode]>,
}

/// A named bundle of optional hooks.
///
/// Every hook has a no-op default, so a plugin implements only what it
/// needs.
pub trait Plugin {
  fn name(&self) -> &str;

  /// Return a replacement configuration, or `None` to keep the current one.
  ///
  /// # Errors
  ///
  /// Any error aborts the run.
  fn config(&self, _config: &Config) -> HookResult<Option<Config>> {
    Ok(None)
  }

  /// Observe the final configuration.
  ///
  /// # Errors
  ///
  /// Any error aborts the run.
  fn config_resolved(&self, _config: &Config) -> HookResult {
    Ok(())
  }

  /// Rewrite prose before rendering. `None` keeps the text unchanged.
  ///
  /// # Errors
  ///
  /// Any error aborts the run.
  fn transform_markdown(
    &self,
    _text: &str,
    _path: &Path,
  ) -> HookResult<Option<String>> {
    Ok(None)
  }

  /// # Errors
  ///
  /// Any error aborts the run.
  fn before_generate(&self, _context: &GenerateContext<'_>) -> HookResult {
    Ok(())
  }

  /// # Errors
  ///
  /// Any error aborts the run.
  fn after_generate(&self, _context: &GenerateContext<'_>) -> HookResult {
    Ok(())
  }

  /// # Errors
  ///
  /// Any error aborts the run.
  fn before_build(&self, _config: &Config) -> HookResult {
    Ok(())
  }

  /// # Errors
  ///
  /// Any error aborts the run.
  fn after_build(&self, _config: &Config) -> HookResult {
    Ok(())
  }
}

/// Plugin that only rewrites prose, backed by a closure.
pub struct MarkdownTransform<F> {
  name:      String,
  transform: F,
}

impl<F> MarkdownTransform<F>
where
  F: Fn(&str, &Path) -> Option<String>,
{
  #[must_use]
  pub fn new(name: impl Into<String>, transform: F) -> Self {
    Self {
      name: name.into(),
      transform,
    }
  }
}

impl<F> Plugin for MarkdownTransform<F>
where
  F: Fn(&str, &Path) -> Option<String>,
{
  fn name(&self) -> &str {
    &self.name
  }

  fn transform_markdown(
    &self,
    text: &str,
    path: &Path,
  ) -> HookResult<Option<String>> {
    Ok((self.transform)(text, path))
  }
}

/// Registered plugins, run sequentially in registration order.
#[derive(Default)]
pub struct PluginPipeline {
  plugins: Vec<Box<dyn Plugin>>,
}

impl std::fmt::Debug for PluginPipeline {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PluginPipeline")
      .field("plugins", &self.names())
      .finish()
  }
}

impl PluginPipeline {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a plugin. It runs after every plugin registered before it.
  pub fn register(&mut self, plugin: Box<dyn Plugin>) {
    log::debug!("Registered plugin `{}`", plugin.name());
    self.plugins.push(plugin);
  }

  /// Builder form of [`Self::register`].
  #[must_use]
  pub fn with(mut self, plugin: impl Plugin + 'static) -> Self {
    self.register(Box::new(plugin));
    self
  }

  #[must_use]
  pub fn names(&self) -> Vec<&str> {
    self.plugins.iter().map(|plugin| plugin.name()).collect()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.plugins.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.plugins.is_empty()
  }

  /// Thread `config` through every `config` hook.
  ///
  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn apply_config(&self, config: Config) -> Result<Config, PluginError> {
    self.plugins.iter().try_fold(config, |current, plugin| {
      let replaced = plugin
        .config(&current)
        .map_err(|source| hook_error(plugin.as_ref(), "config", source))?;
      Ok(replaced.map_or(current, |next| {
        log::debug!("Plugin `{}` replaced the configuration", plugin.name());
        next
      }))
    })
  }

  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn config_resolved(&self, config: &Config) -> Result<(), PluginError> {
    self.observe("config_resolved", |plugin| plugin.config_resolved(config))
  }

  /// Thread prose `text` through every `transform_markdown` hook.
  ///
  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn transform_markdown(
    &self,
    text: &str,
    path: &Path,
  ) -> Result<String, PluginError> {
    self
      .plugins
      .iter()
      .try_fold(text.to_string(), |current, plugin| {
        let replaced = plugin
          .transform_markdown(&current, path)
          .map_err(|source| {
            hook_error(plugin.as_ref(), "transform_markdown", source)
          })?;
        Ok(replaced.unwrap_or(current))
      })
  }

  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn before_generate(
    &self,
    context: &GenerateContext<'_>,
  ) -> Result<(), PluginError> {
    self.observe("before_generate", |plugin| plugin.before_generate(context))
  }

  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn after_generate(
    &self,
    context: &GenerateContext<'_>,
  ) -> Result<(), PluginError> {
    self.observe("after_generate", |plugin| plugin.after_generate(context))
  }

  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn before_build(&self, config: &Config) -> Result<(), PluginError> {
    self.observe("before_build", |plugin| plugin.before_build(config))
  }

  /// # Errors
  ///
  /// Returns the first hook failure.
  pub fn after_build(&self, config: &Config) -> Result<(), PluginError> {
    self.observe("after_build", |plugin| plugin.after_build(config))
  }

  fn observe<F>(&self, hook: &'static str, call: F) -> Result<(), PluginError>
  where
    F: Fn(&dyn Plugin) -> HookResult,
  {
    for plugin in &self.plugins {
      log::trace!("Running `{hook}` of plugin `{}`", plugin.name());
      call(plugin.as_ref())
        .map_err(|source| hook_error(plugin.as_ref(), hook, source))?;
    }
    Ok(())
  }
}

fn hook_error(
  plugin: &dyn Plugin,
  hook: &'static str,
  source: crate::HookError,
) -> PluginError {
  PluginError::Hook {
    plugin: plugin.name().to_string(),
    hook,
    source,
  }
}
