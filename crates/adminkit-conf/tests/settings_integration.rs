//! Integration tests for loading settings from disk and the environment

use adminkit_conf::{AdminSettings, ENV_HELP_KEY, ENV_LIST_LIMIT, SettingsError};
use rstest::*;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

#[fixture]
fn settings_file() -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	writeln!(
		file,
		r#"
list_limit = 30
default_ordering = "a.title"

[models.field]
casts = {{ params = "array" }}
clean = {{ title = "string", ordering = "int" }}
"#
	)
	.unwrap();
	file
}

fn clear_env() {
	// SAFETY: tests touching the environment run serially
	unsafe {
		std::env::remove_var(ENV_LIST_LIMIT);
		std::env::remove_var(ENV_HELP_KEY);
	}
}

#[rstest]
#[serial(adminkit_env)]
fn test_load_reads_file(settings_file: NamedTempFile) {
	clear_env();

	let settings = AdminSettings::load(settings_file.path()).unwrap();

	assert_eq!(settings.list_limit, 30);
	assert_eq!(settings.default_ordering, "a.title");
	assert_eq!(settings.default_direction, "ASC");
	let field = settings.model("field");
	assert_eq!(field.casts["params"], "array");
	assert_eq!(field.clean["ordering"], "int");
}

#[rstest]
#[serial(adminkit_env)]
fn test_environment_overrides_file(settings_file: NamedTempFile) {
	clear_env();
	// SAFETY: serialized with every other environment test
	unsafe {
		std::env::set_var(ENV_LIST_LIMIT, "5");
		std::env::set_var(ENV_HELP_KEY, "JHELP_COMPONENTS_F90");
	}

	let settings = AdminSettings::load(settings_file.path());
	clear_env();
	let settings = settings.unwrap();

	assert_eq!(settings.list_limit, 5);
	assert_eq!(settings.help_key, "JHELP_COMPONENTS_F90");
}

#[rstest]
#[serial(adminkit_env)]
fn test_blank_help_key_is_rejected(settings_file: NamedTempFile) {
	clear_env();
	// SAFETY: serialized with every other environment test
	unsafe {
		std::env::set_var(ENV_HELP_KEY, "  ");
	}

	let result = AdminSettings::load(settings_file.path());
	clear_env();

	assert!(matches!(result, Err(SettingsError::InvalidValue { ref key, .. }) if key == ENV_HELP_KEY));
}

#[rstest]
fn test_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");

	let err = AdminSettings::load(&path).unwrap_err();

	assert!(matches!(err, SettingsError::Io { .. }));
	assert!(err.to_string().contains("absent.toml"));
}

#[rstest]
fn test_malformed_file_is_a_parse_error() {
	let mut file = NamedTempFile::new().unwrap();
	writeln!(file, "list_limit = \"many\"").unwrap();

	let err = AdminSettings::load(file.path()).unwrap_err();

	assert!(matches!(err, SettingsError::Parse(_)));
}
