//! Implementation of the `inc resolve` command.
//!
//! Resolves each requested plugin id for the consuming build and applies the
//! resolutions to a plugin classpath, the way a build script would.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use incbuild_lib::plugin::PluginRequest;
use incbuild_lib::resolve::{
  CompositeBuildPluginResolverContributor, DependencyRef, PluginClasspath, PluginResolver, PluginResolverContributor,
  ResolutionResult,
};

use crate::output::{OutputFormat, mapping, print_error, print_json, print_success};

#[derive(Debug, Serialize)]
struct ResolveRow {
  id: String,
  found: bool,
  source: Option<String>,
  dependency: Option<DependencyRef>,
  message: Option<String>,
}

impl ResolveRow {
  fn failed(id: &str, message: String) -> Self {
    Self {
      id: id.to_string(),
      found: false,
      source: None,
      dependency: None,
      message: Some(message),
    }
  }
}

pub fn cmd_resolve(manifest: &Path, ids: &[String], from: Option<&str>, output: OutputFormat) -> Result<()> {
  let registry = super::load(manifest)?;
  let consumer = super::consumer(&registry, from)?;

  let mut resolvers: Vec<Box<dyn PluginResolver>> = Vec::new();
  CompositeBuildPluginResolverContributor::new(registry, consumer).collect_resolvers_into(&mut resolvers);

  let mut classpath = PluginClasspath::new();
  let mut rows = Vec::with_capacity(ids.len());

  for raw in ids {
    let request = match PluginRequest::parse(raw) {
      Ok(request) => request,
      Err(e) => {
        rows.push(ResolveRow::failed(raw, format!("Invalid plugin request: {}", e)));
        continue;
      }
    };

    let mut result = ResolutionResult::new(request);
    for resolver in &resolvers {
      let outcome = resolver.resolve(result.request())?;
      result.record(resolver.source(), outcome);
      if result.is_found() {
        break;
      }
    }

    let row = match result.resolution() {
      Some(resolution) => match resolution.execute(&mut classpath) {
        Ok(()) => ResolveRow {
          id: raw.clone(),
          found: true,
          source: result.found_source().map(str::to_string),
          dependency: classpath.get(resolution.plugin_id()).cloned(),
          message: None,
        },
        Err(e) => ResolveRow::failed(raw, e.to_string()),
      },
      None => ResolveRow::failed(raw, result.not_found_message()),
    };
    rows.push(row);
  }

  let failures = rows.iter().filter(|r| !r.found).count();

  if output.is_json() {
    print_json(&rows)?;
  } else {
    for row in &rows {
      match (&row.dependency, &row.message) {
        (Some(dependency), _) => print_success(&mapping(&row.id, &dependency.to_string())),
        (None, Some(message)) => print_error(message),
        (None, None) => print_error(&format!("Plugin '{}' could not be resolved", row.id)),
      }
    }
  }

  if failures > 0 {
    std::process::exit(1);
  }

  Ok(())
}
