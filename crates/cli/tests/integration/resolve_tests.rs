use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn resolves_plugin_from_sibling_build() {
  let env = TestEnv::scenario();

  env
    .inc_cmd()
    .args(["resolve", "org.sample.plugin", "--from", "A"])
    .assert()
    .success()
    .stdout(predicate::str::contains("org.sample.plugin → project ':B:projectB'"));
}

#[test]
fn unknown_plugin_reports_included_builds_source() {
  let env = TestEnv::scenario();

  env
    .inc_cmd()
    .args(["resolve", "org.other", "--from", "A"])
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "Included Builds (None of the included builds contain this plugin)",
    ));
}

#[test]
fn empty_composite_does_not_participate() {
  let env = TestEnv::composite(&[]);

  env
    .inc_cmd()
    .args(["resolve", "org.sample.plugin"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("not applicable: Included Builds"));
}

#[test]
fn invalid_plugin_id_is_rejected() {
  let env = TestEnv::scenario();

  env
    .inc_cmd()
    .args(["resolve", "org..broken"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid plugin request"));
}

#[test]
fn json_output_reports_each_request() {
  let env = TestEnv::scenario();

  let output = env
    .inc_cmd()
    .args(["-o", "json", "resolve", "org.sample.plugin", "org.other", "--from", "A"])
    .output()
    .unwrap();
  assert!(!output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json[0]["found"], true);
  assert_eq!(json[0]["source"], "Included Builds");
  assert_eq!(json[0]["dependency"]["build"], "B");
  assert_eq!(json[0]["dependency"]["project"], ":projectB");
  assert_eq!(json[1]["found"], false);
}
