//! Implementation of the `inc builds` command.
//!
//! Lists the included builds in inclusion order and whether each of them may
//! provide plugins to the consuming build.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use incbuild_lib::build::{BuildUnit, IncludedBuildsProvider};
use incbuild_lib::resolve::is_eligible;

use crate::output::{OutputFormat, print_info, print_json, print_skipped, print_success};

#[derive(Debug, Serialize)]
struct BuildRow {
  name: String,
  implicit: bool,
  eligible: bool,
}

pub fn cmd_builds(manifest: &Path, from: Option<&str>, output: OutputFormat) -> Result<()> {
  let registry = super::load(manifest)?;
  let consumer = super::consumer(&registry, from)?;

  let rows: Vec<BuildRow> = registry
    .included_builds()
    .iter()
    .map(|build| BuildRow {
      name: build.id().to_string(),
      implicit: build.is_implicit(),
      eligible: is_eligible(build.as_ref(), &consumer),
    })
    .collect();

  if output.is_json() {
    return print_json(&serde_json::json!({ "root": registry.root(), "consumer": consumer, "builds": rows }));
  }

  if rows.is_empty() {
    print_info(&format!("Build '{}' has no included builds", registry.root()));
    return Ok(());
  }

  print_info(&format!("Included builds visible to '{}':", consumer));
  for row in &rows {
    if row.eligible {
      print_success(&row.name);
    } else if row.implicit {
      print_skipped(&format!("{} (implicit)", row.name));
    } else {
      print_skipped(&format!("{} (consumer)", row.name));
    }
  }

  Ok(())
}
