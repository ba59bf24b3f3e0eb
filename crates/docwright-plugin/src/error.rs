use thiserror::Error;

/// Error returned by a plugin's own hook implementation.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single hook call.
pub type HookResult<T = ()> = Result<T, HookError>;

/// A hook failure, tagged with the plugin and hook it came from.
///
/// Hook failures are fatal to the run.
#[derive(Debug, Error)]
pub enum PluginError {
  #[error("Plugin `{plugin}` failed in `{hook}`: {source}")]
  Hook {
    plugin: String,
    hook:   &'static str,
    #[source]
    source: HookError,
  },
}
