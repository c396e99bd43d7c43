//! Override directory resolution via MATHVOX_MATHMAPS_DIR.

mod common;

use std::fs;

use common::TestEnv;

const CUSTOM_EN: &str = r#"{
  "locale": "en",
  "symbols": { "=": "custom-equals" }
}"#;

#[test]
fn test_env_override_takes_precedence_over_embedded() {
    let env = TestEnv::new();
    let maps = env.work_path("maps");
    fs::create_dir(&maps).unwrap();
    fs::write(maps.join("en.json"), CUSTOM_EN).unwrap();

    let result = env.run_with_env(
        &["x=1"],
        &[("MATHVOX_MATHMAPS_DIR", maps.to_str().unwrap())],
    );
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.stdout.trim(), "x custom-equals 1");
}

#[test]
fn test_env_override_reported_in_verbose() {
    let env = TestEnv::new();
    let maps = env.work_path("maps");
    fs::create_dir(&maps).unwrap();
    fs::write(maps.join("en.json"), CUSTOM_EN).unwrap();

    let result = env.run_with_env(
        &["-v", "x=1"],
        &[("MATHVOX_MATHMAPS_DIR", maps.to_str().unwrap())],
    );
    assert!(result.stderr.contains("override"));
}

#[test]
fn test_env_override_missing_locale_falls_back_to_nothing() {
    // The override directory is the single source for the whole process;
    // locales it lacks are not served from embedded data behind its back.
    let env = TestEnv::new();
    let maps = env.work_path("maps");
    fs::create_dir(&maps).unwrap();
    fs::write(maps.join("en.json"), CUSTOM_EN).unwrap();

    let result = env.run_with_env(
        &["--locale", "de", "x=1"],
        &[("MATHVOX_MATHMAPS_DIR", maps.to_str().unwrap())],
    );
    assert!(result.success);
    assert_eq!(result.stdout, "");
    assert!(result.stderr.contains("no locale data found for 'de'"));
}

#[test]
fn test_env_override_bad_directory_is_fatal() {
    let env = TestEnv::new();
    let result = env.run_with_env(&["x=1"], &[("MATHVOX_MATHMAPS_DIR", "/no/such/dir")]);
    assert!(!result.success);
    assert!(result.stderr.contains("not a directory"));
}
