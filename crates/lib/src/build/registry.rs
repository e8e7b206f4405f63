//! Registry of the builds that make up a composite.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::types::{BuildError, BuildId};
use super::unit::{BuildUnit, IncludedBuild};

/// Source of the included builds of a composite, in inclusion order.
pub trait IncludedBuildsProvider {
  type Build: BuildUnit;

  /// A snapshot of the included builds.
  ///
  /// Callers iterate the snapshot while configuring builds, so implementations
  /// must not hand out anything that keeps a lock held.
  fn included_builds(&self) -> Vec<Arc<Self::Build>>;
}

/// The root build and every build included into it.
///
/// Builds are registered while the composite is assembled and the set is
/// expected to stay fixed once plugin resolution starts.
#[derive(Debug)]
pub struct BuildRegistry {
  root: BuildId,
  included: RwLock<Vec<Arc<IncludedBuild>>>,
}

impl BuildRegistry {
  pub fn new(root: BuildId) -> Self {
    Self {
      root,
      included: RwLock::new(Vec::new()),
    }
  }

  pub fn root(&self) -> &BuildId {
    &self.root
  }

  /// Append a build to the composite. Names must be unique, including the root's.
  pub fn register(&self, build: IncludedBuild) -> Result<Arc<IncludedBuild>, BuildError> {
    let mut included = self.included.write().unwrap_or_else(PoisonError::into_inner);

    if *build.id() == self.root || included.iter().any(|b| b.id() == build.id()) {
      return Err(BuildError::Duplicate {
        build: build.id().clone(),
      });
    }

    debug!(build = %build.id(), implicit = build.is_implicit(), "registering included build");
    let build = Arc::new(build);
    included.push(Arc::clone(&build));
    Ok(build)
  }

  pub fn get(&self, id: &BuildId) -> Option<Arc<IncludedBuild>> {
    self
      .included
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .find(|b| b.id() == id)
      .cloned()
  }

  /// True if `id` names the root build or one of the included builds.
  pub fn contains(&self, id: &BuildId) -> bool {
    *id == self.root || self.get(id).is_some()
  }

  /// Check that `id` names a build of this composite.
  pub fn require(&self, id: &BuildId) -> Result<(), BuildError> {
    if self.contains(id) {
      Ok(())
    } else {
      Err(BuildError::Unknown { build: id.clone() })
    }
  }
}

impl IncludedBuildsProvider for BuildRegistry {
  type Build = IncludedBuild;

  fn included_builds(&self) -> Vec<Arc<IncludedBuild>> {
    self.included.read().unwrap_or_else(PoisonError::into_inner).clone()
  }
}
