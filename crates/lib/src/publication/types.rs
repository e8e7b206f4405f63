use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::build::BuildId;
use crate::plugin::PluginId;

/// Path of a project inside its build, `:` separated. `:` is the root project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectPath(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectPathError {
  #[error("project path '{0}' must start with ':'")]
  NotAbsolute(String),

  #[error("project path '{0}' contains an empty segment")]
  EmptySegment(String),
}

impl ProjectPath {
  pub fn root() -> Self {
    Self(":".to_string())
  }

  pub fn parse(value: &str) -> Result<Self, ProjectPathError> {
    if !value.starts_with(':') {
      return Err(ProjectPathError::NotAbsolute(value.to_string()));
    }
    if value == ":" {
      return Ok(Self::root());
    }
    if value[1..].split(':').any(str::is_empty) {
      return Err(ProjectPathError::EmptySegment(value.to_string()));
    }
    Ok(Self(value.to_string()))
  }

  pub fn is_root(&self) -> bool {
    self.0 == ":"
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProjectPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl TryFrom<String> for ProjectPath {
  type Error = ProjectPathError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<ProjectPath> for String {
  fn from(path: ProjectPath) -> Self {
    path.0
  }
}

/// A project, qualified by the build that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectRef {
  pub build: BuildId,
  pub path: ProjectPath,
}

impl ProjectRef {
  pub fn new(build: BuildId, path: ProjectPath) -> Self {
    Self { build, path }
  }

  /// Path of the project within the whole composite, e.g. `:build-logic:greeting`.
  pub fn identity_path(&self) -> String {
    if self.path.is_root() {
      format!(":{}", self.build)
    } else {
      format!(":{}{}", self.build, self.path)
    }
  }
}

impl fmt::Display for ProjectRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "project '{}'", self.identity_path())
  }
}

/// Declares that a project is the producer of a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPublication {
  pub plugin_id: PluginId,
  pub producing_project: ProjectRef,
}

/// Declares that a project publishes a library under the given coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPublication {
  /// `group:name:version` coordinates.
  pub coordinates: String,
  pub producing_project: ProjectRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationKind {
  Plugin,
  Component,
}

/// Anything a project publishes to the rest of the composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectPublication {
  Plugin(PluginPublication),
  Component(ComponentPublication),
}

impl ProjectPublication {
  pub fn kind(&self) -> PublicationKind {
    match self {
      ProjectPublication::Plugin(_) => PublicationKind::Plugin,
      ProjectPublication::Component(_) => PublicationKind::Component,
    }
  }

  pub fn producing_project(&self) -> &ProjectRef {
    match self {
      ProjectPublication::Plugin(p) => &p.producing_project,
      ProjectPublication::Component(c) => &c.producing_project,
    }
  }

  pub fn as_plugin(&self) -> Option<&PluginPublication> {
    match self {
      ProjectPublication::Plugin(p) => Some(p),
      ProjectPublication::Component(_) => None,
    }
  }
}
