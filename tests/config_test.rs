//! Integration tests for Settings config loading.
//!
//! Precedence: defaults < config file < ENROLL_* env vars < --file.
//! Env vars are process-global, so every test that sets one lives in this
//! file and runs under the same lock.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

use enroll::config::{Settings, DEFAULT_DATA_FILE};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    std::env::remove_var("ENROLL_DATA_FILE");
    std::env::remove_var("ENROLL_CHECK_UNSAVED_ON_EXIT");
}

#[test]
fn given_no_config_file_when_loading_then_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let temp = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(&temp.path().join("enroll.toml"))).unwrap();

    assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    assert!(settings.check_unsaved_on_exit);
}

#[test]
fn given_config_file_when_loading_then_overrides_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("enroll.toml");
    fs::write(
        &config_path,
        r#"
data_file = "/srv/registrations/enrollments.json"
check_unsaved_on_exit = false
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&config_path)).unwrap();

    assert_eq!(
        settings.data_file,
        PathBuf::from("/srv/registrations/enrollments.json")
    );
    assert!(!settings.check_unsaved_on_exit);
}

#[test]
fn given_env_var_when_loading_then_overrides_config_file() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("enroll.toml");
    fs::write(&config_path, "data_file = \"from_file.json\"\n").unwrap();
    std::env::set_var("ENROLL_DATA_FILE", "/tmp/from_env.json");

    let settings = Settings::load_from(Some(&config_path));
    clear_env();

    assert_eq!(
        settings.unwrap().data_file,
        PathBuf::from("/tmp/from_env.json")
    );
}

#[test]
fn given_malformed_config_file_when_loading_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("enroll.toml");
    fs::write(&config_path, "data_file = [unclosed").unwrap();

    let err = Settings::load_from(Some(&config_path)).unwrap_err();

    assert!(err.to_string().starts_with("config error: parse"));
}

#[test]
fn given_template_when_parsed_then_yields_defaults() {
    let raw: Settings = toml_roundtrip(&Settings::template());
    assert_eq!(raw, Settings::default());
}

fn toml_roundtrip(text: &str) -> Settings {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("enroll.toml");
    fs::write(&path, text).unwrap();
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    Settings::load_from(Some(&path)).unwrap()
}
