//! Shared helpers for composite integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use incbuild_lib::build::BuildRegistry;
use incbuild_lib::manifest::load_composite;
use tempfile::TempDir;

/// A composite laid out in a temporary directory.
pub struct TestComposite {
  pub temp: TempDir,
}

impl TestComposite {
  /// Create a composite with the given root name and `(name, implicit)` builds.
  ///
  /// Every build gets a directory named after it; `build.json` files are
  /// written separately with [`TestComposite::write_build`].
  pub fn new(root: &str, builds: &[(&str, bool)]) -> Self {
    let temp = TempDir::new().unwrap();
    let decls: Vec<serde_json::Value> = builds
      .iter()
      .map(|(name, implicit)| {
        std::fs::create_dir_all(temp.path().join(name)).unwrap();
        serde_json::json!({ "name": name, "path": name, "implicit": implicit })
      })
      .collect();
    let manifest = serde_json::json!({ "name": root, "builds": decls });
    std::fs::write(
      temp.path().join("composite.json"),
      serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
    Self { temp }
  }

  pub fn write_build(&self, name: &str, content: &str) {
    std::fs::write(self.temp.path().join(name).join("build.json"), content).unwrap();
  }

  pub fn manifest_path(&self) -> PathBuf {
    self.temp.path().join("composite.json")
  }

  pub fn load(&self) -> Arc<BuildRegistry> {
    load_composite(&self.manifest_path()).unwrap()
  }
}
