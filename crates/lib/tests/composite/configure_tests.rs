//! Plugins requested by included builds are resolved while they are configured.

use incbuild_lib::build::{BuildError, BuildId};
use incbuild_lib::plugin::PluginId;
use incbuild_lib::publication::ProjectPath;
use incbuild_lib::resolve::ResolveError;

use super::common::TestComposite;

#[test]
fn included_build_applies_plugin_from_sibling() {
  let composite = TestComposite::new("app", &[("A", false), ("B", false), ("C", true)]);
  composite.write_build("A", r#"{ "projects": [{ "path": ":", "apply": ["org.sample.plugin"] }] }"#);
  composite.write_build(
    "B",
    r#"{ "projects": [{ "path": ":projectB", "plugins": [{ "id": "org.sample.plugin" }] }] }"#,
  );
  composite.write_build(
    "C",
    r#"{ "projects": [{ "path": ":projectC", "plugins": [{ "id": "org.sample.plugin" }] }] }"#,
  );
  let registry = composite.load();

  let a = registry.get(&BuildId::new("A")).unwrap();
  let state = a.state().unwrap();

  let root = state.project(&ProjectPath::root()).unwrap();
  let dependency = root
    .classpath
    .get(&PluginId::parse("org.sample.plugin").unwrap())
    .unwrap();
  assert_eq!(dependency.build, BuildId::new("B"));
  assert_eq!(dependency.project.as_str(), ":projectB");

  assert!(registry.get(&BuildId::new("B")).unwrap().is_configured());
  assert!(!registry.get(&BuildId::new("C")).unwrap().is_configured());
}

#[test]
fn build_cannot_apply_its_own_plugin() {
  let composite = TestComposite::new("app", &[("A", false)]);
  composite.write_build(
    "A",
    r#"{ "projects": [
      { "path": ":impl", "plugins": [{ "id": "com.example.foo" }] },
      { "path": ":", "apply": ["com.example.foo"] }
    ] }"#,
  );
  let registry = composite.load();

  let err = registry.get(&BuildId::new("A")).unwrap().state().unwrap_err();
  match err {
    BuildError::PluginNotFound { message, project, .. } => {
      assert!(project.is_root());
      assert!(message.contains("None of the included builds contain this plugin"));
    }
    other => panic!("expected plugin not found, got {other}"),
  }
}

#[test]
fn mutual_plugin_dependencies_are_a_cycle() {
  let composite = TestComposite::new("app", &[("A", false), ("B", false)]);
  composite.write_build(
    "A",
    r#"{ "projects": [{ "path": ":", "plugins": [{ "id": "org.sample.a" }], "apply": ["org.sample.b"] }] }"#,
  );
  composite.write_build(
    "B",
    r#"{ "projects": [{ "path": ":", "plugins": [{ "id": "org.sample.b" }], "apply": ["org.sample.a"] }] }"#,
  );
  let registry = composite.load();

  let err = registry.get(&BuildId::new("A")).unwrap().state().unwrap_err();

  // A -> resolve org.sample.b -> configure B -> resolve org.sample.a -> configure A again
  let BuildError::Resolve { source, .. } = err else {
    panic!("expected resolve error");
  };
  let ResolveError::Build(BuildError::Resolve { source: inner, .. }) = *source else {
    panic!("expected nested resolve error");
  };
  assert!(matches!(
    *inner,
    ResolveError::Build(BuildError::ConfigurationCycle { ref build }) if build.as_str() == "A"
  ));

  assert!(!registry.get(&BuildId::new("A")).unwrap().is_configured());
  assert!(!registry.get(&BuildId::new("B")).unwrap().is_configured());
}

#[test]
fn invalid_plugin_request_fails_configuration() {
  let composite = TestComposite::new("app", &[("A", false)]);
  composite.write_build("A", r#"{ "projects": [{ "path": ":", "apply": ["not..valid"] }] }"#);
  let registry = composite.load();

  let err = registry.get(&BuildId::new("A")).unwrap().state().unwrap_err();
  assert!(matches!(err, BuildError::Invalid { .. }));
}
