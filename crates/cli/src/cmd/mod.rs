mod builds;
mod plugins;
mod resolve;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use incbuild_lib::build::{BuildId, BuildRegistry};
use incbuild_lib::manifest::load_composite;

pub use builds::cmd_builds;
pub use plugins::cmd_plugins;
pub use resolve::cmd_resolve;

/// Load the composite at `manifest`.
fn load(manifest: &Path) -> Result<Arc<BuildRegistry>> {
  debug!(manifest = %manifest.display(), "loading composite");
  load_composite(manifest).with_context(|| format!("Failed to load composite: {}", manifest.display()))
}

/// The consuming build: `from` if given, the root build otherwise.
fn consumer(registry: &BuildRegistry, from: Option<&str>) -> Result<BuildId> {
  let id = from
    .map(BuildId::new)
    .unwrap_or_else(|| registry.root().clone());
  registry.require(&id)?;
  Ok(id)
}
