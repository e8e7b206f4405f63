//! Assembling a build registry from composite manifests.
//!
//! Loading a composite only registers its builds. Each included build is
//! configured the first time its state is needed: its `build.json` is read,
//! its publications are registered and the plugins its projects request are
//! resolved through a composite resolver owned by that build.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Weak};

use tracing::{debug, info};

use super::types::{BuildManifest, CompositeManifest, ManifestError, ProjectDecl};
use crate::build::{BuildError, BuildId, BuildRegistry, BuildState, IncludedBuild, ProjectState};
use crate::consts::BUILD_FILENAME;
use crate::plugin::PluginRequest;
use crate::publication::{
  ComponentPublication, PluginPublication, ProjectPublication, ProjectPublicationRegistry, ProjectRef,
};
use crate::resolve::{CompositeBuildPluginResolver, PluginResolver, ResolutionResult};

/// Load the composite described by the manifest at `path`.
///
/// Included build directories must exist; their `build.json` is only read when
/// the build is configured.
pub fn load_composite(path: &Path) -> Result<Arc<BuildRegistry>, ManifestError> {
  let manifest = CompositeManifest::load(path)?;
  let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

  info!(root = %manifest.name, builds = manifest.builds.len(), "loading composite");

  let registry = Arc::new(BuildRegistry::new(BuildId::new(&manifest.name)));

  for decl in &manifest.builds {
    let dir = base_dir.join(&decl.path);
    if !dir.is_dir() {
      return Err(ManifestError::MissingBuildDir {
        build: decl.name.clone(),
        path: dir,
      });
    }

    let weak = Arc::downgrade(&registry);
    registry.register(IncludedBuild::new(
      BuildId::new(&decl.name),
      decl.implicit,
      move |id| configure_build(&weak, id, &dir),
    ))?;
  }

  Ok(registry)
}

fn configure_build(registry: &Weak<BuildRegistry>, id: &BuildId, dir: &Path) -> Result<BuildState, BuildError> {
  let manifest = read_build_manifest(id, &dir.join(BUILD_FILENAME))?;

  let mut publications = ProjectPublicationRegistry::new();
  let mut projects = Vec::with_capacity(manifest.projects.len());
  let mut seen = HashSet::new();

  for decl in &manifest.projects {
    if !seen.insert(decl.path.clone()) {
      return Err(BuildError::Invalid {
        build: id.clone(),
        reason: format!("project '{}' is declared more than once", decl.path),
      });
    }
    register_publications(id, decl, &mut publications)?;
    projects.push(ProjectState::new(decl.path.clone()));
  }

  if manifest.projects.iter().any(|p| !p.apply.is_empty()) {
    let registry = registry
      .upgrade()
      .ok_or_else(|| BuildError::RegistryUnavailable { build: id.clone() })?;
    let resolver = CompositeBuildPluginResolver::new(registry, id.clone());

    for (decl, project) in manifest.projects.iter().zip(projects.iter_mut()) {
      apply_plugins(&resolver, id, decl, project)?;
    }
  }

  Ok(BuildState::new(id.clone(), projects, publications))
}

fn read_build_manifest(id: &BuildId, path: &Path) -> Result<BuildManifest, BuildError> {
  debug!(build = %id, path = %path.display(), "reading build manifest");
  let content = fs::read_to_string(path).map_err(|source| BuildError::Read {
    build: id.clone(),
    path: path.to_path_buf(),
    source,
  })?;
  BuildManifest::from_json(&content).map_err(|source| BuildError::Parse {
    build: id.clone(),
    path: path.to_path_buf(),
    source,
  })
}

fn register_publications(
  id: &BuildId,
  decl: &ProjectDecl,
  publications: &mut ProjectPublicationRegistry,
) -> Result<(), BuildError> {
  let project = ProjectRef::new(id.clone(), decl.path.clone());

  for plugin in &decl.plugins {
    publications.register(ProjectPublication::Plugin(PluginPublication {
      plugin_id: plugin.id.clone(),
      producing_project: project.clone(),
    }));
  }

  for coordinates in &decl.components {
    let parts: Vec<&str> = coordinates.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
      return Err(BuildError::Invalid {
        build: id.clone(),
        reason: format!(
          "component '{}' of project '{}' must be written as group:name:version",
          coordinates, decl.path
        ),
      });
    }
    publications.register(ProjectPublication::Component(ComponentPublication {
      coordinates: coordinates.clone(),
      producing_project: project.clone(),
    }));
  }

  Ok(())
}

fn apply_plugins(
  resolver: &CompositeBuildPluginResolver<BuildRegistry>,
  id: &BuildId,
  decl: &ProjectDecl,
  project: &mut ProjectState,
) -> Result<(), BuildError> {
  for raw in &decl.apply {
    let request = PluginRequest::parse(raw).map_err(|e| BuildError::Invalid {
      build: id.clone(),
      reason: format!("project '{}' requests an invalid plugin: {}", decl.path, e),
    })?;

    let outcome = resolver.resolve(&request).map_err(|e| BuildError::Resolve {
      build: id.clone(),
      source: Box::new(e),
    })?;

    let mut result = ResolutionResult::new(request);
    result.record(resolver.source(), outcome);

    let Some(resolution) = result.resolution() else {
      return Err(BuildError::PluginNotFound {
        build: id.clone(),
        project: decl.path.clone(),
        message: result.not_found_message(),
      });
    };

    resolution
      .execute(&mut project.classpath)
      .map_err(|source| BuildError::Bind {
        build: id.clone(),
        project: decl.path.clone(),
        source,
      })?;
  }

  Ok(())
}
