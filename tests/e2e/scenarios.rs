use super::helpers::{TestProject, CONFIG_FILE_NAME};

#[test]
fn test_missing_config_fails_with_suggestion() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    let manifest = test_env.init_node_project("no-config", None);
    test_env.set_licenses(&manifest, &["MIT"]);

    let output = test_env.run_checker(&scanner, &[&manifest]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Scanning licenses for"));
    assert!(stdout.contains(CONFIG_FILE_NAME));
    assert!(stdout.contains("\"allowedLicenses\": [\n    \"MIT\"\n  ]"));
}

#[test]
fn test_allowed_licenses_pass_silently() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    let manifest = test_env.init_node_project("allowed", Some(&["MIT", "GPL"]));
    test_env.set_licenses(&manifest, &["MIT"]);

    let output = test_env.run_checker(&scanner, &[&manifest]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Not all licenses"));
}

#[test]
fn test_one_failing_project_fails_the_run() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    let passing = test_env.init_node_project("passing", Some(&["MIT"]));
    let failing = test_env.init_node_project("failing", Some(&["MIT"]));
    test_env.set_licenses(&passing, &["MIT"]);
    test_env.set_licenses(&failing, &["MIT", "WTFPL"]);

    let output = test_env.run_checker(&scanner, &[&passing, &failing]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Not all licenses").count(), 1);
    assert!(stdout.contains("failing are allowed"));
    assert!(stdout.contains("\"WTFPL\""));
    assert!(!stdout.contains("passing are allowed"));
}

#[test]
fn test_scanner_failure_is_not_a_pass() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    // No license.csv, so the fake scanner exits non-zero
    let manifest = test_env.init_node_project("broken", Some(&["MIT"]));

    let output = test_env.run_checker(&scanner, &[&manifest]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("license scan failed"));
    assert!(stderr.contains("no package data"));
}

#[test]
fn test_missing_scanner_executable_fails() {
    let test_env = TestProject::new();
    let manifest = test_env.init_node_project("lonely", Some(&["MIT"]));
    let missing = test_env.dir.path().join("not-installed");

    let output = test_env.run_checker(&missing, &[&manifest]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not start"));
}

#[test]
fn test_malformed_config_is_reported() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    let manifest = test_env.init_node_project("malformed", None);
    test_env.set_licenses(&manifest, &["MIT"]);
    let config = manifest.parent().unwrap().join(CONFIG_FILE_NAME);
    std::fs::write(&config, "{ \"allowedLicenses\": ").unwrap();

    let output = test_env.run_checker(&scanner, &[&manifest]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse"));
    assert!(stderr.contains(CONFIG_FILE_NAME));
}

#[test]
fn test_duplicate_paths_are_checked_once() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    let manifest = test_env.init_node_project("twice", None);
    test_env.set_licenses(&manifest, &["ISC"]);

    let output = test_env.run_checker(&scanner, &[&manifest, &manifest]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Scanning licenses for").count(), 1);
    assert_eq!(stdout.matches("Not all licenses").count(), 1);
}

#[test]
fn test_no_paths_is_usage_error() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();

    let output = test_env.run_checker(&scanner, &[]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_relative_spellings_of_one_project_are_checked_once() {
    let test_env = TestProject::new();
    let scanner = test_env.fake_scanner();
    let manifest = test_env.init_node_project("spelled", None);
    test_env.set_licenses(&manifest, &["MIT"]);

    let plain = std::path::Path::new("spelled/package.json");
    let dotted = std::path::Path::new("./spelled/package.json");
    let output = test_env.run_checker(&scanner, &[plain, dotted]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Not all licenses").count(), 1);
}
