//! State filters: WHERE fragments contributed by list state fields
//!
//! Each state field of a list may have one [`StateFilter`]. Filters are
//! registered by field name when the list model is built.

use crate::types::ModelState;
use sea_query::{Alias, Cond, Condition, Expr, SimpleExpr};
use std::fmt;
use std::sync::Arc;

/// Alias of the list's base table in generated queries
pub const TABLE_ALIAS: &str = "a";

/// Builds the WHERE fragment for one state field
pub trait StateFilter: Send + Sync {
	/// Fragment for the current state, or `None` to leave the query as is.
	/// The value lives under `filter.<field>`.
	fn condition(&self, field: &str, state: &ModelState) -> Option<Condition>;
}

impl<F> StateFilter for F
where
	F: Fn(&str, &ModelState) -> Option<Condition> + Send + Sync,
{
	fn condition(&self, field: &str, state: &ModelState) -> Option<Condition> {
		self(field, state)
	}
}

/// Column `a.<name>`
pub fn column(name: &str) -> Expr {
	Expr::col((Alias::new(TABLE_ALIAS), Alias::new(name)))
}

/// Tri-state publish filter
///
/// - numeric value: `a.<column> = <value>`
/// - blank value: `a.<column> IN (0, 1)`, i.e. everything not trashed or archived
/// - anything else (e.g. `*`): no fragment
#[derive(Debug, Clone)]
pub struct PublishedFilter {
	column: String,
}

impl PublishedFilter {
	pub fn new() -> Self {
		Self::on_column("published")
	}

	/// Filter a differently named state column
	pub fn on_column(column: impl Into<String>) -> Self {
		Self {
			column: column.into(),
		}
	}

	fn eq(&self, value: i64) -> SimpleExpr {
		column(&self.column).eq(value)
	}
}

impl Default for PublishedFilter {
	fn default() -> Self {
		Self::new()
	}
}

impl StateFilter for PublishedFilter {
	fn condition(&self, field: &str, state: &ModelState) -> Option<Condition> {
		let published = state.get_string(&format!("filter.{field}"));

		if let Some(value) = parse_numeric(&published) {
			Some(Cond::all().add(self.eq(value)))
		} else if published.is_empty() {
			Some(Cond::any().add(self.eq(0)).add(self.eq(1)))
		} else {
			None
		}
	}
}

/// Integer value of a numeric string (`"1"`, `" -2"`, `"1.0"`, `"1e2"`).
/// Fractions are truncated.
pub fn parse_numeric(raw: &str) -> Option<i64> {
	let trimmed = raw.trim();
	if trimmed.is_empty()
		|| !trimmed
			.chars()
			.all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
	{
		return None;
	}
	if let Ok(value) = trimmed.parse::<i64>() {
		return Some(value);
	}
	trimmed
		.parse::<f64>()
		.ok()
		.filter(|f| f.is_finite())
		.map(|f| f as i64)
}

/// Explicit field name to filter mapping
#[derive(Clone, Default)]
pub struct FilterRegistry {
	filters: Vec<(String, Arc<dyn StateFilter>)>,
}

impl FilterRegistry {
	/// Registry without any filter
	pub fn empty() -> Self {
		Self::default()
	}

	/// Registry with the built-in [`PublishedFilter`] on `published`
	pub fn with_defaults() -> Self {
		Self::empty().register("published", PublishedFilter::new())
	}

	/// Register (or replace) the filter for `field`.
	pub fn register(mut self, field: impl Into<String>, filter: impl StateFilter + 'static) -> Self {
		let field = field.into();
		let filter: Arc<dyn StateFilter> = Arc::new(filter);
		match self.filters.iter_mut().find(|(f, _)| *f == field) {
			Some(entry) => entry.1 = filter,
			None => self.filters.push((field, filter)),
		}
		self
	}

	pub fn get(&self, field: &str) -> Option<&dyn StateFilter> {
		self.filters
			.iter()
			.find(|(f, _)| f == field)
			.map(|(_, filter)| filter.as_ref())
	}

	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.filters.iter().map(|(f, _)| f.as_str())
	}
}

impl fmt::Debug for FilterRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterRegistry")
			.field("fields", &self.fields().collect::<Vec<_>>())
			.finish()
	}
}
