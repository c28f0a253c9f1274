//! # adminkit-conf
//!
//! Settings shared by adminkit list and edit screens.
//!
//! Settings are read from a TOML document and then overridden from the
//! process environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ADMINKIT_LIST_LIMIT` | [`AdminSettings::list_limit`] |
//! | `ADMINKIT_HELP_KEY` | [`AdminSettings::help_key`] |
//!
//! ## Example
//!
//! ```
//! use adminkit_conf::AdminSettings;
//!
//! let settings = AdminSettings::from_toml_str(r#"
//! list_limit = 50
//!
//! [models.field]
//! casts = { params = "array" }
//! clean = { title = "string" }
//! "#).unwrap();
//!
//! assert_eq!(settings.list_limit, 50);
//! assert_eq!(settings.model("field").casts["params"], "array");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding [`AdminSettings::list_limit`]
pub const ENV_LIST_LIMIT: &str = "ADMINKIT_LIST_LIMIT";

/// Environment variable overriding [`AdminSettings::help_key`]
pub const ENV_HELP_KEY: &str = "ADMINKIT_HELP_KEY";

/// Settings loading errors
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("Failed to read settings file '{path}': {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("Invalid value for {key}: {value}")]
	InvalidValue { key: String, value: String },
}

/// Per-model declarations: which columns are cast and which are cleaned
///
/// Names are kept verbatim here. The admin crate turns them into typed
/// tables when a model is built, rejecting unknown names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
	/// Column name to cast name (`"array"`)
	pub casts: BTreeMap<String, String>,
	/// Column name to sanitizer name (`"int"`, `"string"`, `"cmd"`, ...)
	pub clean: BTreeMap<String, String>,
}

/// Settings for adminkit screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
	/// Rows per page when the request does not choose one
	pub list_limit: u64,
	/// Ordering column used when the requested one is not allowed
	pub default_ordering: String,
	/// Ordering direction used when the requested one is not `ASC`/`DESC`
	pub default_direction: String,
	/// Help screen key shown at the end of edit toolbars
	pub help_key: String,
	/// Model declarations keyed by model name
	pub models: BTreeMap<String, ModelSettings>,
}

impl Default for AdminSettings {
	fn default() -> Self {
		Self {
			list_limit: 20,
			default_ordering: "a.id".to_string(),
			default_direction: "ASC".to_string(),
			help_key: "JHELP_CONTENT_ARTICLE_MANAGER_EDIT".to_string(),
			models: BTreeMap::new(),
		}
	}
}

impl AdminSettings {
	/// Parse settings from a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(source)?)
	}

	/// Read a TOML file, then apply environment overrides.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.display().to_string(),
			source,
		})?;
		let mut settings = Self::from_toml_str(&source)?;
		settings.apply_env()?;
		tracing::debug!(
			path = %path.display(),
			models = settings.models.len(),
			list_limit = settings.list_limit,
			"loaded admin settings"
		);
		Ok(settings)
	}

	/// Override fields from `ADMINKIT_*` environment variables.
	pub fn apply_env(&mut self) -> Result<(), SettingsError> {
		self.apply_overrides(|key| std::env::var(key).ok())
	}

	/// Override fields from an arbitrary key lookup.
	pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SettingsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(value) = lookup(ENV_LIST_LIMIT) {
			self.list_limit = value
				.trim()
				.parse()
				.map_err(|_| SettingsError::InvalidValue {
					key: ENV_LIST_LIMIT.to_string(),
					value,
				})?;
		}
		if let Some(value) = lookup(ENV_HELP_KEY) {
			if value.trim().is_empty() {
				return Err(SettingsError::InvalidValue {
					key: ENV_HELP_KEY.to_string(),
					value,
				});
			}
			self.help_key = value;
		}
		Ok(())
	}

	/// Declarations for one model; an empty set when the model is not listed.
	pub fn model(&self, name: &str) -> ModelSettings {
		self.models.get(name).cloned().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	#[rstest]
	fn test_defaults_when_document_is_empty() {
		let settings = AdminSettings::from_toml_str("").unwrap();
		assert_eq!(settings, AdminSettings::default());
		assert_eq!(settings.list_limit, 20);
		assert_eq!(settings.default_ordering, "a.id");
	}

	#[rstest]
	#[case("12", 12)]
	#[case(" 7 ", 7)]
	fn test_list_limit_override(#[case] raw: &str, #[case] expected: u64) {
		let env: HashMap<&str, String> = HashMap::from([(ENV_LIST_LIMIT, raw.to_string())]);
		let mut settings = AdminSettings::default();
		settings
			.apply_overrides(|key| env.get(key).cloned())
			.unwrap();
		assert_eq!(settings.list_limit, expected);
	}

	#[rstest]
	fn test_invalid_list_limit_override_is_rejected() {
		let mut settings = AdminSettings::default();
		let result = settings.apply_overrides(|key| {
			(key == ENV_LIST_LIMIT).then(|| "many".to_string())
		});
		assert!(matches!(result, Err(SettingsError::InvalidValue { .. })));
		assert_eq!(settings.list_limit, 20);
	}

	#[rstest]
	fn test_unknown_model_has_no_declarations() {
		let settings = AdminSettings::default();
		assert_eq!(settings.model("missing"), ModelSettings::default());
	}
}
