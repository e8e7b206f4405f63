//! Plugin resolver seam and per-request result reporting.

use std::sync::Arc;

use super::binding::PluginResolution;
use super::types::{ResolutionOutcome, ResolveError};
use crate::plugin::PluginRequest;

/// One strategy for locating plugins.
pub trait PluginResolver {
  /// Label shown to users when reporting where a plugin was looked for.
  fn source(&self) -> &str;

  fn resolve(&self, request: &PluginRequest) -> Result<ResolutionOutcome, ResolveError>;
}

/// Something that adds resolvers to the resolver list of a build.
pub trait PluginResolverContributor {
  fn collect_resolvers_into(&self, resolvers: &mut Vec<Box<dyn PluginResolver>>);
}

/// Everything the resolvers consulted for one request reported.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
  request: PluginRequest,
  found: Option<(String, Arc<PluginResolution>)>,
  not_found: Vec<(String, String)>,
  not_participating: Vec<String>,
}

impl ResolutionResult {
  pub fn new(request: PluginRequest) -> Self {
    Self {
      request,
      found: None,
      not_found: Vec::new(),
      not_participating: Vec::new(),
    }
  }

  pub fn request(&self) -> &PluginRequest {
    &self.request
  }

  /// Record what `source` reported. The first found resolution is kept.
  pub fn record(&mut self, source: &str, outcome: ResolutionOutcome) {
    match outcome {
      ResolutionOutcome::Found(resolution) => {
        if self.found.is_none() {
          self.found = Some((source.to_string(), resolution));
        }
      }
      ResolutionOutcome::NotFound { reason } => self.not_found.push((source.to_string(), reason)),
      ResolutionOutcome::NotParticipating => self.not_participating.push(source.to_string()),
    }
  }

  pub fn is_found(&self) -> bool {
    self.found.is_some()
  }

  pub fn resolution(&self) -> Option<&Arc<PluginResolution>> {
    self.found.as_ref().map(|(_, resolution)| resolution)
  }

  /// The source that found the plugin.
  pub fn found_source(&self) -> Option<&str> {
    self.found.as_ref().map(|(source, _)| source.as_str())
  }

  /// User-facing explanation of why the plugin could not be found.
  pub fn not_found_message(&self) -> String {
    if self.not_found.is_empty() {
      let mut message = format!(
        "Plugin {} was not found: no plugin source was able to look it up",
        self.request
      );
      if !self.not_participating.is_empty() {
        message.push_str(&format!(" (not applicable: {})", self.not_participating.join(", ")));
      }
      return message;
    }

    let mut message = format!(
      "Plugin {} was not found in any of the following sources:\n",
      self.request
    );
    for (source, reason) in &self.not_found {
      message.push_str(&format!("\n- {} ({})", source, reason));
    }
    message
  }
}
