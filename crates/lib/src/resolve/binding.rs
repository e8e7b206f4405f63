//! Plugin resolutions and the contexts they are applied to.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::build::BuildId;
use crate::plugin::PluginId;
use crate::publication::{PluginPublication, ProjectPath, ProjectRef};

/// A dependency on the output of a project in the composite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyRef {
  pub build: BuildId,
  pub project: ProjectPath,
}

impl DependencyRef {
  /// The dependency that puts `project`'s output on a plugin classpath.
  pub fn project(project: &ProjectRef) -> Self {
    Self {
      build: project.build.clone(),
      project: project.path.clone(),
    }
  }
}

impl fmt::Display for DependencyRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let project = ProjectRef::new(self.build.clone(), self.project.clone());
    write!(f, "{}", project)
  }
}

#[derive(Debug, Error)]
pub enum BindError {
  #[error("plugin '{plugin_id}' is already bound to {existing}, cannot bind it to {requested}")]
  Conflict {
    plugin_id: PluginId,
    existing: DependencyRef,
    requested: DependencyRef,
  },
}

/// Where resolved plugins are applied.
pub trait PluginResolveContext {
  /// Bind `plugin_id` to the given dependency, making its implementation loadable.
  fn add_legacy(&mut self, plugin_id: &PluginId, dependency: DependencyRef) -> Result<(), BindError>;
}

/// "Plugin X is implemented by project P."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginResolution {
  plugin_id: PluginId,
  producing_project: ProjectRef,
}

impl PluginResolution {
  pub fn new(plugin_id: PluginId, producing_project: ProjectRef) -> Self {
    Self {
      plugin_id,
      producing_project,
    }
  }

  pub fn plugin_id(&self) -> &PluginId {
    &self.plugin_id
  }

  pub fn producing_project(&self) -> &ProjectRef {
    &self.producing_project
  }

  /// Bind the plugin to a dependency on its producing project.
  pub fn execute(&self, context: &mut dyn PluginResolveContext) -> Result<(), BindError> {
    let dependency = DependencyRef::project(&self.producing_project);
    debug!(plugin = %self.plugin_id, dependency = %dependency, "binding plugin");
    context.add_legacy(&self.plugin_id, dependency)
  }
}

impl From<PluginPublication> for PluginResolution {
  fn from(publication: PluginPublication) -> Self {
    Self::new(publication.plugin_id, publication.producing_project)
  }
}

/// The plugins applied to one project, in the order they were bound.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PluginClasspath {
  entries: Vec<(PluginId, DependencyRef)>,
}

impl PluginClasspath {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, plugin_id: &PluginId) -> Option<&DependencyRef> {
    self
      .entries
      .iter()
      .find(|(id, _)| id == plugin_id)
      .map(|(_, dependency)| dependency)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&PluginId, &DependencyRef)> {
    self.entries.iter().map(|(id, dependency)| (id, dependency))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl PluginResolveContext for PluginClasspath {
  fn add_legacy(&mut self, plugin_id: &PluginId, dependency: DependencyRef) -> Result<(), BindError> {
    match self.get(plugin_id) {
      Some(existing) if *existing == dependency => Ok(()),
      Some(existing) => Err(BindError::Conflict {
        plugin_id: plugin_id.clone(),
        existing: existing.clone(),
        requested: dependency,
      }),
      None => {
        self.entries.push((plugin_id.clone(), dependency));
        Ok(())
      }
    }
  }
}
