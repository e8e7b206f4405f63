//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated composite on disk.
///
/// Each test gets its own temporary directory holding `composite.json` and
/// one directory per included build.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A composite named `app` including the given `(name, implicit)` builds.
  pub fn composite(builds: &[(&str, bool)]) -> Self {
    let temp = TempDir::new().unwrap();
    let decls: Vec<serde_json::Value> = builds
      .iter()
      .map(|(name, implicit)| {
        std::fs::create_dir_all(temp.path().join(name)).unwrap();
        serde_json::json!({ "name": name, "path": name, "implicit": implicit })
      })
      .collect();
    let manifest = serde_json::json!({ "name": "app", "builds": decls });
    std::fs::write(temp.path().join("composite.json"), manifest.to_string()).unwrap();
    Self { temp }
  }

  /// The scenario composite: `A` publishes nothing, `B` publishes
  /// `org.sample.plugin` from `:projectB`, implicit `C` publishes it from `:projectC`.
  pub fn scenario() -> Self {
    let env = Self::composite(&[("A", false), ("B", false), ("C", true)]);
    env.write_build("A", r#"{ "projects": [{ "path": ":" }] }"#);
    env.write_build(
      "B",
      r#"{ "projects": [{ "path": ":projectB", "plugins": [{ "id": "org.sample.plugin" }] }] }"#,
    );
    env.write_build(
      "C",
      r#"{ "projects": [{ "path": ":projectC", "plugins": [{ "id": "org.sample.plugin" }] }] }"#,
    );
    env
  }

  /// Write the `build.json` of an included build.
  pub fn write_build(&self, name: &str, content: &str) {
    std::fs::write(self.temp.path().join(name).join("build.json"), content).unwrap();
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.temp.path().join("composite.json")
  }

  /// Get a Command for the inc binary running inside the composite.
  pub fn inc_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("inc");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
