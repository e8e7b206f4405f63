use tracing::trace;

use super::types::PluginPublication;
use crate::build::BuildState;
use crate::plugin::PluginId;

/// Find the publication of `target` among the plugins published by a build.
///
/// Returns the first match in registry order. Ids are compared exactly.
pub fn find_publication(state: &BuildState, target: &PluginId) -> Option<PluginPublication> {
  let found = state
    .publications()
    .plugin_publications()
    .find(|publication| publication.plugin_id == *target)
    .cloned();

  trace!(
    build = %state.id(),
    plugin = %target,
    found = found.is_some(),
    "searched plugin publications"
  );

  found
}
