//! `docwright-plugin`.
//!
//! The extension surface of docwright. A [`Plugin`] is a named bundle of
//! optional hooks; a [`PluginPipeline`] runs them strictly in registration
//! order. Transform hooks (`config`, `transform_markdown`) are chained, each
//! plugin receiving the previous plugin's output. Observer hooks all receive
//! the same input.
//!
//! Plugins are named in the configuration and instantiated from a
//! [`PluginRegistry`] the embedding program fills with factories.
pub mod error;
pub mod pipeline;
pub mod registry;

pub use error::{HookError, HookResult, PluginError};
pub use pipeline::{GenerateContext, MarkdownTransform, Plugin, PluginPipeline};
pub use registry::{PluginFactory, PluginRegistry};
