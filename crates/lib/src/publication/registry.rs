//! Per-build registry of project publications.

use tracing::trace;

use super::types::{PluginPublication, ProjectPublication, PublicationKind};

/// Publications of every project in one build, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ProjectPublicationRegistry {
  publications: Vec<ProjectPublication>,
}

impl ProjectPublicationRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, publication: ProjectPublication) {
    trace!(
      kind = ?publication.kind(),
      project = %publication.producing_project(),
      "registering publication"
    );
    self.publications.push(publication);
  }

  /// All publications of the given kind, in registration order.
  pub fn publications_of_kind(&self, kind: PublicationKind) -> impl Iterator<Item = &ProjectPublication> {
    self.publications.iter().filter(move |p| p.kind() == kind)
  }

  /// Shorthand for the plugin publications of this build.
  pub fn plugin_publications(&self) -> impl Iterator<Item = &PluginPublication> {
    self
      .publications_of_kind(PublicationKind::Plugin)
      .filter_map(ProjectPublication::as_plugin)
  }

  pub fn len(&self) -> usize {
    self.publications.len()
  }

  pub fn is_empty(&self) -> bool {
    self.publications.is_empty()
  }
}
