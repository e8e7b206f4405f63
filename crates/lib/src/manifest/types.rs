//! Manifest types for composites.
//!
//! # Structure
//!
//! A composite is described by a `composite.json` at its root:
//!
//! ```json
//! {
//!   "name": "app",
//!   "builds": [
//!     { "name": "build-logic", "path": "build-logic" },
//!     { "name": "shared", "path": "../shared", "implicit": true }
//!   ]
//! }
//! ```
//!
//! and every included build directory holds a `build.json`:
//!
//! ```json
//! {
//!   "projects": [
//!     {
//!       "path": ":greeting",
//!       "plugins": [{ "id": "org.sample.greeting" }],
//!       "components": ["org.sample:greeting:1.0"],
//!       "apply": ["org.sample.conventions"]
//!     }
//!   ]
//! }
//! ```
//!
//! `apply` lists the plugins the project's build script requests. They are
//! resolved against the other included builds when the build is configured.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::build::BuildError;
use crate::plugin::PluginId;
use crate::publication::ProjectPath;

/// Root description of a composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeManifest {
  /// Name of the root build.
  pub name: String,
  /// Included builds, in inclusion order.
  #[serde(default)]
  pub builds: Vec<IncludedBuildDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludedBuildDecl {
  pub name: String,
  /// Directory of the build, relative to the composite manifest.
  pub path: PathBuf,
  /// Pulled in only as a dependency substitution target.
  #[serde(default)]
  pub implicit: bool,
}

/// Contents of one included build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildManifest {
  #[serde(default)]
  pub projects: Vec<ProjectDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDecl {
  pub path: ProjectPath,
  /// Plugins implemented by this project.
  #[serde(default)]
  pub plugins: Vec<PluginDecl>,
  /// Libraries published by this project, as `group:name:version`.
  #[serde(default)]
  pub components: Vec<String>,
  /// Plugin ids requested by this project's build script.
  #[serde(default)]
  pub apply: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginDecl {
  pub id: PluginId,
}

/// Errors that can occur while loading a composite.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read composite manifest {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse composite manifest {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("included build '{build}' not found at {}", path.display())]
  MissingBuildDir { build: String, path: PathBuf },

  #[error(transparent)]
  Register(#[from] BuildError),
}

impl CompositeManifest {
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}

impl BuildManifest {
  pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }
}
