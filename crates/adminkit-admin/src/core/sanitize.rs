//! Input sanitizers applied to untrusted form data before it is stored

use crate::types::{AdminError, AdminResult, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?[0-9]+").expect("valid regex"));
static FLOAT: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"-?[0-9]+(\.[0-9]+)?([eE]-?[0-9]+)?").expect("valid regex"));
static NOT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^A-Z_]").expect("valid regex"));
static NOT_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^A-Z0-9]").expect("valid regex"));
static NOT_CMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^A-Z0-9_.\-]").expect("valid regex"));
static NOT_BASE64: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)[^A-Z0-9/+=]").expect("valid regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static USERNAME_FORBIDDEN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r#"[\x00-\x1F\x7F<>"'%&]"#).expect("valid regex"));

/// Cleaning rule for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sanitizer {
	/// First integer found, else 0
	Int,
	/// Absolute value of the first integer found
	Uint,
	/// First decimal number found, else 0
	Float,
	/// Truthiness: blank, `"0"`, `0`, `false` and null are false
	Bool,
	/// Letters and underscores
	Word,
	/// Letters and digits
	Alnum,
	/// Letters, digits, `_`, `.`, `-`; no leading dot
	Cmd,
	/// Base64 alphabet
	Base64,
	/// Text with markup tags removed
	String,
	/// Text with surrounding whitespace removed
	Trim,
	/// Text without control characters and `<>"'%&`
	Username,
	/// Unchanged
	Raw,
}

impl FromStr for Sanitizer {
	type Err = AdminError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let sanitizer = match s.trim().to_ascii_lowercase().as_str() {
			"int" | "integer" => Sanitizer::Int,
			"uint" => Sanitizer::Uint,
			"float" | "double" => Sanitizer::Float,
			"bool" | "boolean" => Sanitizer::Bool,
			"word" => Sanitizer::Word,
			"alnum" => Sanitizer::Alnum,
			"cmd" => Sanitizer::Cmd,
			"base64" => Sanitizer::Base64,
			"string" => Sanitizer::String,
			"trim" => Sanitizer::Trim,
			"username" => Sanitizer::Username,
			"raw" => Sanitizer::Raw,
			other => return Err(AdminError::Config(format!("unknown sanitizer '{other}'"))),
		};
		Ok(sanitizer)
	}
}

impl Sanitizer {
	/// Clean a value. Lists and maps are cleaned element by element.
	pub fn clean(&self, value: &Value) -> Value {
		match value {
			Value::Array(items) => Value::Array(items.iter().map(|v| self.clean(v)).collect()),
			Value::Object(map) => Value::Object(
				map.iter()
					.map(|(k, v)| (k.clone(), self.clean(v)))
					.collect(),
			),
			scalar => self.clean_scalar(scalar),
		}
	}

	fn clean_scalar(&self, value: &Value) -> Value {
		match self {
			Sanitizer::Raw => value.clone(),
			Sanitizer::Int => Value::from(to_int(value)),
			Sanitizer::Uint => Value::from(to_int(value).unsigned_abs()),
			Sanitizer::Float => Number::from_f64(to_float(value))
				.map(Value::Number)
				.unwrap_or_else(|| Value::from(0)),
			Sanitizer::Bool => Value::Bool(truthy(value)),
			Sanitizer::Word => Value::String(NOT_WORD.replace_all(&text(value), "").into_owned()),
			Sanitizer::Alnum => Value::String(NOT_ALNUM.replace_all(&text(value), "").into_owned()),
			Sanitizer::Cmd => {
				let cleaned = NOT_CMD.replace_all(&text(value), "").into_owned();
				Value::String(cleaned.trim_start_matches('.').to_string())
			}
			Sanitizer::Base64 => {
				Value::String(NOT_BASE64.replace_all(&text(value), "").into_owned())
			}
			Sanitizer::String => Value::String(TAG.replace_all(&text(value), "").into_owned()),
			Sanitizer::Trim => Value::String(text(value).trim().to_string()),
			Sanitizer::Username => {
				Value::String(USERNAME_FORBIDDEN.replace_all(&text(value), "").into_owned())
			}
		}
	}
}

fn text(value: &Value) -> String {
	crate::types::state::stringify(value)
}

fn to_int(value: &Value) -> i64 {
	match value {
		Value::Number(n) => n
			.as_i64()
			.or_else(|| n.as_f64().map(|f| f as i64))
			.unwrap_or(0),
		Value::Bool(b) => i64::from(*b),
		Value::String(s) => INTEGER
			.find(s)
			.and_then(|m| m.as_str().parse().ok())
			.unwrap_or(0),
		_ => 0,
	}
}

fn to_float(value: &Value) -> f64 {
	match value {
		Value::Number(n) => n.as_f64().unwrap_or(0.0),
		Value::Bool(b) => f64::from(u8::from(*b)),
		Value::String(s) => FLOAT
			.find(s)
			.and_then(|m| m.as_str().parse().ok())
			.unwrap_or(0.0),
		_ => 0.0,
	}
}

fn truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
		Value::String(s) => !(s.is_empty() || s == "0"),
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Ordered `(column, sanitizer)` declarations of one model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSanitizers {
	entries: Vec<(String, Sanitizer)>,
}

impl FieldSanitizers {
	/// Validate declarations; a column may have one sanitizer.
	pub fn new<C: Into<String>>(
		entries: impl IntoIterator<Item = (C, Sanitizer)>,
	) -> AdminResult<Self> {
		let entries: Vec<(String, Sanitizer)> =
			entries.into_iter().map(|(c, s)| (c.into(), s)).collect();
		let mut seen = HashSet::new();
		for (column, _) in &entries {
			if !seen.insert(column.as_str()) {
				return Err(AdminError::Config(format!(
					"column '{column}' has more than one sanitizer"
				)));
			}
		}
		Ok(Self { entries })
	}

	/// Parse declarations read from settings (`column = "cmd"`).
	pub fn from_settings(clean: &BTreeMap<String, String>) -> AdminResult<Self> {
		let entries = clean
			.iter()
			.map(|(column, name)| Ok((column.clone(), name.parse::<Sanitizer>()?)))
			.collect::<AdminResult<Vec<_>>>()?;
		Self::new(entries)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Sanitizer)> {
		self.entries.iter().map(|(c, s)| (c.as_str(), *s))
	}

	/// Clean every declared column present in `record`.
	pub fn apply(&self, record: &mut Record) {
		for (column, sanitizer) in self.iter() {
			let cleaned = match record.get(column) {
				Some(value) if !value.is_null() => sanitizer.clean(value),
				_ => continue,
			};
			record.set(column, cleaned);
		}
	}
}
