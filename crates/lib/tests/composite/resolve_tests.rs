use std::sync::Arc;

use incbuild_lib::build::{BuildError, BuildId};
use incbuild_lib::plugin::PluginRequest;
use incbuild_lib::resolve::{
  CompositeBuildPluginResolver, PluginClasspath, PluginResolver, ResolutionOutcome, ResolutionResult, ResolveError,
};

use super::common::TestComposite;

fn request(id: &str) -> PluginRequest {
  PluginRequest::parse(id).unwrap()
}

#[test]
fn composite_without_included_builds_does_not_participate() {
  let composite = TestComposite::new("app", &[]);
  let registry = composite.load();
  let resolver = CompositeBuildPluginResolver::new(registry, BuildId::new("app"));

  let outcome = resolver.resolve(&request("org.sample.plugin")).unwrap();
  assert!(matches!(outcome, ResolutionOutcome::NotParticipating));
}

#[test]
fn root_build_resolves_plugin_from_included_build() {
  let composite = TestComposite::new("app", &[("build-logic", false)]);
  composite.write_build(
    "build-logic",
    r#"{ "projects": [{ "path": ":greeting", "plugins": [{ "id": "org.sample.greeting" }] }] }"#,
  );
  let registry = composite.load();
  let resolver = CompositeBuildPluginResolver::new(Arc::clone(&registry), BuildId::new("app"));

  let outcome = resolver.resolve(&request("org.sample.greeting")).unwrap();
  let resolution = outcome.resolution().unwrap();

  let mut classpath = PluginClasspath::new();
  resolution.execute(&mut classpath).unwrap();

  let dependency = classpath.get(resolution.plugin_id()).unwrap();
  assert_eq!(dependency.to_string(), "project ':build-logic:greeting'");
}

#[test]
fn unused_builds_stay_unconfigured() {
  let composite = TestComposite::new("app", &[("first", false), ("second", false)]);
  composite.write_build(
    "first",
    r#"{ "projects": [{ "path": ":", "plugins": [{ "id": "org.sample.plugin" }] }] }"#,
  );
  // never read: resolution stops at the first build
  composite.write_build("second", "not json");
  let registry = composite.load();
  let resolver = CompositeBuildPluginResolver::new(Arc::clone(&registry), BuildId::new("app"));

  assert!(resolver.resolve(&request("org.sample.plugin")).unwrap().is_found());
  assert!(registry.get(&BuildId::new("first")).unwrap().is_configured());
  assert!(!registry.get(&BuildId::new("second")).unwrap().is_configured());
}

#[test]
fn broken_build_fails_the_request() {
  let composite = TestComposite::new("app", &[("broken", false), ("plugins", false)]);
  composite.write_build("broken", "{ \"projects\": [");
  composite.write_build(
    "plugins",
    r#"{ "projects": [{ "path": ":", "plugins": [{ "id": "org.sample.plugin" }] }] }"#,
  );
  let registry = composite.load();
  let resolver = CompositeBuildPluginResolver::new(registry, BuildId::new("app"));

  let err = resolver.resolve(&request("org.sample.plugin")).unwrap_err();
  assert!(matches!(err, ResolveError::Build(BuildError::Parse { .. })));
}

#[test]
fn missing_build_file_fails_the_request() {
  let composite = TestComposite::new("app", &[("empty", false)]);
  let registry = composite.load();
  let resolver = CompositeBuildPluginResolver::new(registry, BuildId::new("app"));

  let err = resolver.resolve(&request("org.sample.plugin")).unwrap_err();
  assert!(matches!(err, ResolveError::Build(BuildError::Read { .. })));
}

#[test]
fn not_found_report_names_the_source() {
  let composite = TestComposite::new("app", &[("plugins", false)]);
  composite.write_build("plugins", r#"{ "projects": [{ "path": ":" }] }"#);
  let registry = composite.load();
  let resolver = CompositeBuildPluginResolver::new(registry, BuildId::new("app"));

  let request = request("org.sample.missing");
  let mut result = ResolutionResult::new(request.clone());
  result.record(resolver.source(), resolver.resolve(&request).unwrap());

  assert_eq!(
    result.not_found_message(),
    "Plugin [id: 'org.sample.missing'] was not found in any of the following sources:\n\n\
     - Included Builds (None of the included builds contain this plugin)"
  );
}
