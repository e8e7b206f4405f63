//! Resolves plugins from the other builds of a composite.
//!
//! # Resolution Algorithm
//!
//! For a request issued while configuring the consuming build:
//! - If the composite has no included builds, the resolver does not participate
//! - Otherwise the answer for the plugin id is taken from the cache, or computed:
//!   every eligible included build (not the consumer, not implicit) is configured
//!   in inclusion order and its plugin publications are searched; the first
//!   match wins
//! - Both found and not-found answers are remembered for the lifetime of the resolver
//!
//! A build that fails to configure aborts the request; the remaining builds are
//! not consulted.

use std::sync::Arc;

use tracing::{debug, trace};

use super::binding::PluginResolution;
use super::cache::{CachedResolution, ResolutionCache};
use super::contributor::{PluginResolver, PluginResolverContributor};
use super::types::{ResolutionOutcome, ResolveError};
use super::visibility::eligible_builds;
use crate::build::{BuildId, BuildUnit, IncludedBuildsProvider};
use crate::consts::{INCLUDED_BUILDS_SOURCE, NOT_IN_INCLUDED_BUILDS};
use crate::plugin::{PluginId, PluginRequest};
use crate::publication::find_publication;

/// Plugin resolver backed by the included builds of a composite.
///
/// Cloning yields another handle on the same cache.
pub struct CompositeBuildPluginResolver<P> {
  registry: Arc<P>,
  consumer: BuildId,
  cache: Arc<ResolutionCache>,
}

impl<P: IncludedBuildsProvider> CompositeBuildPluginResolver<P> {
  /// Create a resolver for plugin requests made by `consumer`.
  pub fn new(registry: Arc<P>, consumer: BuildId) -> Self {
    Self {
      registry,
      consumer,
      cache: Arc::new(ResolutionCache::new()),
    }
  }

  pub fn consumer(&self) -> &BuildId {
    &self.consumer
  }

  pub fn cache(&self) -> &ResolutionCache {
    &self.cache
  }

  pub fn resolve(&self, request: &PluginRequest) -> Result<ResolutionOutcome, ResolveError> {
    let included = self.registry.included_builds();
    if included.is_empty() {
      trace!(plugin = %request.id, "no included builds, not participating");
      return Ok(ResolutionOutcome::NotParticipating);
    }

    let cached = self
      .cache
      .get_or_compute(&request.id, || self.resolve_from_included_builds(&included, &request.id))?;

    Ok(match cached {
      CachedResolution::Found(resolution) => ResolutionOutcome::Found(resolution),
      CachedResolution::NotFound => ResolutionOutcome::NotFound {
        reason: NOT_IN_INCLUDED_BUILDS.to_string(),
      },
    })
  }

  fn resolve_from_included_builds(
    &self,
    included: &[Arc<P::Build>],
    requested: &PluginId,
  ) -> Result<CachedResolution, ResolveError> {
    debug!(plugin = %requested, consumer = %self.consumer, "resolving plugin from included builds");

    for build in eligible_builds(included, &self.consumer) {
      let publication = build.with_state(|state| find_publication(state, requested))?;
      if let Some(publication) = publication {
        debug!(
          plugin = %requested,
          build = %build.id(),
          project = %publication.producing_project,
          "plugin found in included build"
        );
        return Ok(CachedResolution::Found(Arc::new(PluginResolution::from(publication))));
      }
    }

    debug!(plugin = %requested, consumer = %self.consumer, "plugin not found in included builds");
    Ok(CachedResolution::NotFound)
  }
}

impl<P> Clone for CompositeBuildPluginResolver<P> {
  fn clone(&self) -> Self {
    Self {
      registry: Arc::clone(&self.registry),
      consumer: self.consumer.clone(),
      cache: Arc::clone(&self.cache),
    }
  }
}

impl<P: IncludedBuildsProvider> PluginResolver for CompositeBuildPluginResolver<P> {
  fn source(&self) -> &str {
    INCLUDED_BUILDS_SOURCE
  }

  fn resolve(&self, request: &PluginRequest) -> Result<ResolutionOutcome, ResolveError> {
    CompositeBuildPluginResolver::resolve(self, request)
  }
}

/// Contributes the included-builds resolver to a consuming build's resolver list.
///
/// Every resolver handed out shares the contributor's cache.
pub struct CompositeBuildPluginResolverContributor<P> {
  resolver: CompositeBuildPluginResolver<P>,
}

impl<P: IncludedBuildsProvider> CompositeBuildPluginResolverContributor<P> {
  pub fn new(registry: Arc<P>, consumer: BuildId) -> Self {
    Self {
      resolver: CompositeBuildPluginResolver::new(registry, consumer),
    }
  }
}

impl<P: IncludedBuildsProvider + 'static> PluginResolverContributor for CompositeBuildPluginResolverContributor<P> {
  fn collect_resolvers_into(&self, resolvers: &mut Vec<Box<dyn PluginResolver>>) {
    resolvers.push(Box::new(self.resolver.clone()));
  }
}
