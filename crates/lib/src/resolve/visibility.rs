//! Which included builds may substitute plugins for a consuming build.

use std::sync::Arc;

use tracing::trace;

use crate::build::{BuildId, BuildUnit};

/// Whether `build` may provide plugins to `consumer`.
///
/// A build never provides plugins to itself, and builds that were only pulled
/// in implicitly never provide plugins at all.
pub fn is_eligible<B: BuildUnit + ?Sized>(build: &B, consumer: &BuildId) -> bool {
  build.id() != consumer && !build.is_implicit()
}

/// The builds consulted for `consumer`, in inclusion order.
pub fn eligible_builds<B: BuildUnit>(included: &[Arc<B>], consumer: &BuildId) -> Vec<Arc<B>> {
  included
    .iter()
    .filter(|build| {
      let eligible = is_eligible(build.as_ref(), consumer);
      if !eligible {
        trace!(
          build = %build.id(),
          consumer = %consumer,
          implicit = build.is_implicit(),
          "skipping build for plugin substitution"
        );
      }
      eligible
    })
    .cloned()
    .collect()
}
