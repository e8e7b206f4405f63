//! Implementation of the `inc plugins` command.
//!
//! Configures every build that may provide plugins to the consumer and lists
//! what each publishes. An id published by more than one build is only ever
//! resolved from the first; later publications are marked as shadowed.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use incbuild_lib::build::{BuildUnit, IncludedBuildsProvider};
use incbuild_lib::resolve::eligible_builds;

use crate::output::{OutputFormat, mapping, print_info, print_json, print_skipped, print_stat};

#[derive(Debug, Serialize)]
struct PluginRow {
  id: String,
  build: String,
  project: String,
  shadowed: bool,
}

pub fn cmd_plugins(manifest: &Path, from: Option<&str>, output: OutputFormat) -> Result<()> {
  let registry = super::load(manifest)?;
  let consumer = super::consumer(&registry, from)?;

  let mut rows = Vec::new();
  let mut seen = HashSet::new();

  for build in eligible_builds(&registry.included_builds(), &consumer) {
    let state = build
      .state()
      .with_context(|| format!("Failed to configure build '{}'", build.id()))?;

    for publication in state.publications().plugin_publications() {
      rows.push(PluginRow {
        id: publication.plugin_id.to_string(),
        build: build.id().to_string(),
        project: publication.producing_project.identity_path(),
        shadowed: !seen.insert(publication.plugin_id.clone()),
      });
    }
  }

  if output.is_json() {
    return print_json(&rows);
  }

  if rows.is_empty() {
    print_info(&format!("No plugins are available to '{}' from included builds", consumer));
    return Ok(());
  }

  let mut current_build = None;
  for row in &rows {
    if current_build != Some(row.build.as_str()) {
      print_info(&row.build);
      current_build = Some(row.build.as_str());
    }
    let line = mapping(&row.id, &format!("project '{}'", row.project));
    if row.shadowed {
      print_skipped(&format!("  {} (shadowed)", line));
    } else {
      println!("  {}", line);
    }
  }

  println!();
  print_stat("Plugins", &rows.iter().filter(|r| !r.shadowed).count().to_string());

  Ok(())
}
