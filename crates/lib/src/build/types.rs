use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::publication::{ProjectPath, ProjectPublicationRegistry};
use crate::resolve::{BindError, PluginClasspath, ResolveError};

/// Name of a build in the composite. Unique within one registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for BuildId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A configured project and the plugins applied to it during configuration.
#[derive(Debug, Clone)]
pub struct ProjectState {
  pub path: ProjectPath,
  pub classpath: PluginClasspath,
}

impl ProjectState {
  pub fn new(path: ProjectPath) -> Self {
    Self {
      path,
      classpath: PluginClasspath::new(),
    }
  }
}

/// The configured model of one build.
///
/// Produced once per build by its loader and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct BuildState {
  id: BuildId,
  projects: Vec<ProjectState>,
  publications: ProjectPublicationRegistry,
}

impl BuildState {
  pub fn new(id: BuildId, projects: Vec<ProjectState>, publications: ProjectPublicationRegistry) -> Self {
    Self {
      id,
      projects,
      publications,
    }
  }

  pub fn id(&self) -> &BuildId {
    &self.id
  }

  pub fn projects(&self) -> &[ProjectState] {
    &self.projects
  }

  pub fn project(&self, path: &ProjectPath) -> Option<&ProjectState> {
    self.projects.iter().find(|p| p.path == *path)
  }

  pub fn publications(&self) -> &ProjectPublicationRegistry {
    &self.publications
  }
}

/// Errors raised while registering or configuring builds.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The build was asked for its state while it was being configured on the same thread.
  #[error("cycle detected while configuring build '{build}'")]
  ConfigurationCycle { build: BuildId },

  #[error("build '{build}' is already registered")]
  Duplicate { build: BuildId },

  #[error("build '{build}' is not part of the composite")]
  Unknown { build: BuildId },

  #[error("failed to read build file {}: {source}", path.display())]
  Read {
    build: BuildId,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse build file {}: {source}", path.display())]
  Parse {
    build: BuildId,
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid declaration in build '{build}': {reason}")]
  Invalid { build: BuildId, reason: String },

  /// A plugin requested by one of the build's projects could not be resolved.
  #[error("failed to apply plugins to project '{project}' of build '{build}': {message}")]
  PluginNotFound {
    build: BuildId,
    project: ProjectPath,
    message: String,
  },

  #[error("failed to resolve plugins for build '{build}': {source}")]
  Resolve {
    build: BuildId,
    #[source]
    source: Box<ResolveError>,
  },

  #[error("failed to apply plugin to project '{project}' of build '{build}': {source}")]
  Bind {
    build: BuildId,
    project: ProjectPath,
    #[source]
    source: BindError,
  },

  #[error("build registry was dropped while configuring build '{build}'")]
  RegistryUnavailable { build: BuildId },

  #[error("configuration of build '{build}' failed: {reason}")]
  Failed { build: BuildId, reason: String },
}
