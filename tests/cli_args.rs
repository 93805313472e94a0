mod common;

use common::TestEnv;

#[test]
fn missing_environment_name_is_a_usage_error() {
    let env = TestEnv::new();
    let result = env.run(&["--app", "shop"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("--env"), "{}", result.stderr);
}

#[test]
fn invalid_environment_name_exits_one() {
    let env = TestEnv::new();
    let result = env.run(&["-a", "shop", "-e", "ab"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("invalid environment name"),
        "{}",
        result.stderr
    );
}

#[test]
fn missing_artifact_fails_before_any_provider_call() {
    let env = TestEnv::new();
    let result = env.run(&["-a", "shop", "-e", "shop-prod", "-f", "missing.zip"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("artifact not found"), "{}", result.stderr);
    // The provider tool would have been reported as unavailable
    assert!(!result.stderr.contains("unavailable"), "{}", result.stderr);
    assert!(!env.exists(".ebdeploy"));
}

#[test]
fn empty_artifact_is_rejected() {
    let env = TestEnv::new();
    env.write("deploy.zip", b"");
    let result = env.run(&["-a", "shop", "-e", "shop-prod"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("artifact is empty"), "{}", result.stderr);
}

#[test]
fn missing_provider_tool_fails_cleanly() {
    let env = TestEnv::new();
    env.write("deploy.zip", b"PK\x03\x04 bundle");
    let result = env.run(&["-a", "shop", "-e", "shop-prod"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("provider tool unavailable"),
        "{}",
        result.stderr
    );
    // Trust-policy documents are never written when the first lookup fails
    assert!(!env.exists(".ebdeploy/aws-elasticbeanstalk-service-role-trust-policy.json"));
}

#[test]
fn json_mode_streams_start_and_error_records() {
    let env = TestEnv::new();
    let result = env.run_with_env(
        &["-a", "shop", "-e", "shop-prod", "--version-label", "v7", "--json"],
        &[("EBDEPLOY_REGION", "eu-west-1")],
    );

    assert_eq!(result.exit_code, 1);
    let records = result.json_records();
    let first = &records[0];
    assert_eq!(first["event"], "start");
    assert_eq!(first["region"], "eu-west-1");
    assert_eq!(first["version_label"], "v7");

    let last = records.last().unwrap();
    assert_eq!(last["event"], "error");
    assert_eq!(last["status"], "failed");
    assert!(last["message"]
        .as_str()
        .unwrap()
        .contains("artifact not found"));
    assert!(records.iter().all(|r| r["command"] == "deploy"));
}

#[test]
fn json_mode_reports_configuration_errors() {
    let env = TestEnv::new();
    let result = env.run(&["-a", "shop", "-e", "bad_env", "--json"]);

    assert_eq!(result.exit_code, 1);
    let records = result.json_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["event"], "error");
}

#[test]
fn unknown_config_keys_are_reported_as_warnings() {
    let env = TestEnv::new();
    env.write("ebdeploy.toml", b"[deploy]\nregoin = \"eu-west-1\"\n");
    let result = env.run(&["-a", "shop", "-e", "shop-prod", "--json"]);

    assert_eq!(result.exit_code, 1);
    let warning = result
        .json_records()
        .into_iter()
        .find(|r| r["event"] == "warning")
        .expect("warning record");
    assert!(warning["message"].as_str().unwrap().contains("regoin"));
}

#[test]
fn explicit_config_file_must_exist() {
    let env = TestEnv::new();
    let result = env.run(&["-a", "shop", "-e", "shop-prod", "--config", "nope.toml"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("failed to read config file"),
        "{}",
        result.stderr
    );
}
