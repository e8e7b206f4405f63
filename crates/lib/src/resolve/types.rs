use std::sync::Arc;

use thiserror::Error;

use super::binding::PluginResolution;
use crate::build::BuildError;
use crate::plugin::PluginId;

/// What a plugin resolver had to say about one request.
#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
  /// The resolver does not apply here; other sources decide.
  NotParticipating,
  /// The plugin is provided by the given resolution.
  Found(Arc<PluginResolution>),
  /// The resolver looked and the plugin is definitively not available from it.
  NotFound { reason: String },
}

impl ResolutionOutcome {
  pub fn resolution(&self) -> Option<&Arc<PluginResolution>> {
    match self {
      ResolutionOutcome::Found(resolution) => Some(resolution),
      _ => None,
    }
  }

  pub fn is_found(&self) -> bool {
    matches!(self, ResolutionOutcome::Found(_))
  }
}

/// Failures that abort a plugin request.
///
/// A plugin that cannot be found is not an error; it is reported as
/// [`ResolutionOutcome::NotFound`].
#[derive(Debug, Error)]
pub enum ResolveError {
  /// An included build could not be configured.
  #[error(transparent)]
  Build(#[from] BuildError),

  /// The same resolver was asked for a plugin it is still resolving on this thread.
  #[error("plugin '{plugin_id}' is already being resolved by this resolver")]
  Cycle { plugin_id: PluginId },
}
