use docwright_config::ConfigError;
use indexmap::IndexMap;

use crate::pipeline::{Plugin, PluginPipeline};

/// Builds a fresh plugin instance.
pub type PluginFactory = Box<dyn Fn() -> Box<dyn Plugin>>;

/// Plugin factories by name.
///
/// The configuration only names plugins; the embedding program decides what
/// each name stands for by registering a factory here.
#[derive(Default)]
pub struct PluginRegistry {
  factories: IndexMap<String, PluginFactory>,
}

impl std::fmt::Debug for PluginRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PluginRegistry")
      .field("names", &self.factories.keys().collect::<Vec<_>>())
      .finish()
  }
}

impl PluginRegistry {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `factory` under `name`, replacing an earlier registration.
  pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
  where
    F: Fn() -> Box<dyn Plugin> + 'static,
  {
    let name = name.into();
    if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
      log::warn!("Plugin `{name}` registered twice, keeping the last one");
    }
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.factories.contains_key(name)
  }

  /// Instantiate the named plugins, in the order given.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::UnknownPlugin`] for the first name without a
  /// registered factory.
  pub fn instantiate(
    &self,
    names: &[String],
  ) -> Result<PluginPipeline, ConfigError> {
    let mut pipeline = PluginPipeline::new();
    for name in names {
      let factory = self
        .factories
        .get(name)
        .ok_or_else(|| ConfigError::UnknownPlugin(name.clone()))?;
      pipeline.register(factory());
    }
    Ok(pipeline)
  }
}
