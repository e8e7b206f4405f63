use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plugins_lists_publications_of_visible_builds() {
  let env = TestEnv::scenario();

  env
    .inc_cmd()
    .args(["plugins", "--from", "A"])
    .assert()
    .success()
    .stdout(predicate::str::contains("org.sample.plugin → project ':B:projectB'"))
    .stdout(predicate::str::contains(":C:projectC").not());
}

#[test]
fn later_duplicates_are_shadowed() {
  let env = TestEnv::composite(&[("first", false), ("second", false)]);
  env.write_build(
    "first",
    r#"{ "projects": [{ "path": ":", "plugins": [{ "id": "org.sample.x" }] }] }"#,
  );
  env.write_build(
    "second",
    r#"{ "projects": [{ "path": ":", "plugins": [{ "id": "org.sample.x" }] }] }"#,
  );

  let output = env.inc_cmd().args(["plugins", "-o", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json[0]["build"], "first");
  assert_eq!(json[0]["shadowed"], false);
  assert_eq!(json[1]["build"], "second");
  assert_eq!(json[1]["shadowed"], true);
}

#[test]
fn broken_build_fails_listing() {
  let env = TestEnv::composite(&[("broken", false)]);
  env.write_build("broken", "{");

  env
    .inc_cmd()
    .arg("plugins")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to configure build 'broken'"));
}
