//! List model: persisted filter state and list query building
//!
//! A list screen declares its component, list name, backing table, the
//! columns users may order by ("filter fields") and the fields persisted in
//! per-user state ("state fields"). State fields with a registered
//! [`StateFilter`] contribute one WHERE fragment each.

use super::filters::{FilterRegistry, StateFilter, TABLE_ALIAS};
use super::ports::ListQueryExecutor;
use super::user_state::{RequestParams, UserStateStore, get_user_state_from_request};
use crate::types::state::stringify;
use crate::types::{AdminError, AdminResult, ModelState, Pagination, Record};
use adminkit_conf::AdminSettings;
use sea_query::{Alias, Cond, Condition, Expr, Order, Query, SelectStatement};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Declarations of one list screen
#[derive(Debug, Clone)]
pub struct ListModelConfig {
	component: String,
	name: String,
	table: String,
	filter_fields: Vec<String>,
	state_fields: Vec<String>,
	filters: FilterRegistry,
	default_ordering: Option<String>,
	default_direction: Option<String>,
}

impl ListModelConfig {
	/// Start a declaration. The `published` state filter is registered by default.
	pub fn new(
		component: impl Into<String>,
		name: impl Into<String>,
		table: impl Into<String>,
	) -> Self {
		Self {
			component: component.into(),
			name: name.into(),
			table: table.into(),
			filter_fields: Vec::new(),
			state_fields: Vec::new(),
			filters: FilterRegistry::with_defaults(),
			default_ordering: None,
			default_direction: None,
		}
	}

	/// Columns users may order the list by
	pub fn filter_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
		self.filter_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Fields persisted in per-user state as `filter.<field>`
	pub fn state_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
		self.state_fields = fields.into_iter().map(Into::into).collect();
		self
	}

	/// Register the WHERE fragment builder for a state field
	pub fn filter(mut self, field: impl Into<String>, filter: impl StateFilter + 'static) -> Self {
		self.filters = self.filters.register(field, filter);
		self
	}

	/// Replace every registered filter
	pub fn filters(mut self, filters: FilterRegistry) -> Self {
		self.filters = filters;
		self
	}

	/// Ordering used when the request asks for nothing valid
	pub fn default_ordering(mut self, column: impl Into<String>, direction: impl Into<String>) -> Self {
		self.default_ordering = Some(column.into());
		self.default_direction = Some(direction.into());
		self
	}
}

/// One filter of the list's filter form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
	pub name: String,
	pub value: Value,
}

/// List model for one admin list screen
pub struct ListModel {
	config: ListModelConfig,
	executor: Arc<dyn ListQueryExecutor>,
	state: ModelState,
	errors: Vec<String>,
	list_limit: u64,
	default_ordering: String,
	default_direction: String,
}

impl ListModel {
	/// Build a list model, validating its declarations.
	pub fn new(
		config: ListModelConfig,
		executor: Arc<dyn ListQueryExecutor>,
		settings: &AdminSettings,
	) -> AdminResult<Self> {
		for (what, value) in [
			("component", &config.component),
			("name", &config.name),
			("table", &config.table),
		] {
			if value.trim().is_empty() {
				return Err(AdminError::Config(format!("list model {what} is empty")));
			}
		}
		if config.filter_fields.is_empty() {
			return Err(AdminError::Config(format!(
				"list model '{}' declares no filter fields",
				config.name
			)));
		}
		let mut seen = HashSet::new();
		for field in &config.state_fields {
			if !seen.insert(field.as_str()) {
				return Err(AdminError::Config(format!(
					"state field '{field}' is declared more than once"
				)));
			}
		}

		let default_ordering = config
			.default_ordering
			.clone()
			.unwrap_or_else(|| settings.default_ordering.clone());
		let default_direction = normalize_direction(
			config
				.default_direction
				.as_deref()
				.unwrap_or(&settings.default_direction),
		)
		.unwrap_or("ASC")
		.to_string();

		let mut state = ModelState::new();
		state.set("list.ordering", default_ordering.clone());
		state.set("list.direction", default_direction.clone());
		state.set("list.start", 0);
		state.set("list.limit", settings.list_limit);

		Ok(Self {
			config,
			executor,
			state,
			errors: Vec::new(),
			list_limit: settings.list_limit,
			default_ordering,
			default_direction,
		})
	}

	pub fn component(&self) -> &str {
		&self.config.component
	}

	pub fn name(&self) -> &str {
		&self.config.name
	}

	pub fn table(&self) -> &str {
		&self.config.table
	}

	/// `com_<component>`
	pub fn option(&self) -> String {
		format!("com_{}", self.config.component)
	}

	/// `com_<component>.<name>`, the namespace of persisted list state
	pub fn context(&self) -> String {
		format!("{}.{}", self.option(), self.config.name)
	}

	pub fn filter_fields(&self) -> &[String] {
		&self.config.filter_fields
	}

	pub fn state_fields(&self) -> &[String] {
		&self.config.state_fields
	}

	pub fn state(&self) -> &ModelState {
		&self.state
	}

	/// Set a state value directly, e.g. `list.select`
	pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.state.set(key, value);
	}

	/// Data-retrieval errors accumulated so far
	pub fn errors(&self) -> &[String] {
		&self.errors
	}

	/// Fill the model state from the request, falling back to what the
	/// user chose on earlier requests.
	pub async fn populate_state(
		&mut self,
		request: &RequestParams,
		user_state: &dyn UserStateStore,
	) -> AdminResult<()> {
		let context = self.context();
		let mut filters_changed = false;

		for field in &self.config.state_fields {
			let lookup = get_user_state_from_request(
				user_state,
				&format!("{context}.filter.{field}"),
				request,
				&format!("filter_{field}"),
				Value::Null,
			)
			.await?;
			filters_changed |= lookup.changed;
			self.state.set(format!("filter.{field}"), lookup.value);
		}

		let limit = get_user_state_from_request(
			user_state,
			&format!("{context}.list.limit"),
			request,
			"limit",
			json!(self.list_limit),
		)
		.await?;
		let limit = as_u64(&limit.value).unwrap_or(self.list_limit);

		let ordering = get_user_state_from_request(
			user_state,
			&format!("{context}.ordercol"),
			request,
			"filter_order",
			json!(self.default_ordering),
		)
		.await?;
		let ordering = stringify(&ordering.value);
		let ordering = if self.config.filter_fields.contains(&ordering) {
			ordering
		} else {
			self.default_ordering.clone()
		};

		let direction = get_user_state_from_request(
			user_state,
			&format!("{context}.orderdirn"),
			request,
			"filter_order_Dir",
			json!(self.default_direction),
		)
		.await?;
		let direction = normalize_direction(&stringify(&direction.value))
			.map(str::to_string)
			.unwrap_or_else(|| self.default_direction.clone());

		let start = get_user_state_from_request(
			user_state,
			&format!("{context}.limitstart"),
			request,
			"limitstart",
			json!(0),
		)
		.await?;
		let start = match (filters_changed, limit) {
			(true, _) | (_, 0) => 0,
			(false, limit) => as_u64(&start.value).unwrap_or(0) / limit * limit,
		};

		self.state.set("list.limit", limit);
		self.state.set("list.start", start);
		self.state.set("list.ordering", ordering);
		self.state.set("list.direction", direction);

		tracing::debug!(
			context = %context,
			filters_changed,
			start,
			limit,
			"populated list state"
		);
		Ok(())
	}

	/// Identifier of the current list configuration: component, state
	/// filters and page window, hashed.
	pub fn store_id(&self, prefix: &str) -> String {
		let mut id = prefix.to_string();
		for field in &self.config.state_fields {
			id.push(':');
			id.push_str(&self.state.get_string(&format!("filter.{field}")));
		}
		for key in ["list.start", "list.limit", "list.ordering", "list.direction"] {
			id.push(':');
			id.push_str(&self.state.get_string(key));
		}
		let digest = Sha256::digest(format!("{}:{id}", self.context()).as_bytes());
		digest.iter().map(|b| format!("{b:02x}")).collect()
	}

	/// WHERE fragments of the current state, one per state field that has a
	/// filter producing one.
	pub fn state_conditions(&self) -> Vec<(String, Condition)> {
		self.config
			.state_fields
			.iter()
			.filter_map(|field| {
				let filter = self.config.filters.get(field)?;
				let condition = filter.condition(field, &self.state)?;
				Some((field.clone(), condition))
			})
			.collect()
	}

	/// `SELECT <list.select> FROM <table> AS a WHERE ... ORDER BY ...`
	pub fn list_query(&self) -> SelectStatement {
		let select = match self.state.get_string("list.select") {
			s if s.trim().is_empty() => format!("{TABLE_ALIAS}.*"),
			s => s,
		};

		let mut query = Query::select();
		query
			.expr(Expr::cust(select))
			.from_as(Alias::new(&self.config.table), Alias::new(TABLE_ALIAS));

		let conditions = self.state_conditions();
		if !conditions.is_empty() {
			let all = conditions
				.into_iter()
				.fold(Cond::all(), |all, (_, condition)| all.add(condition));
			query.cond_where(all);
		}

		let ordering = self.state.get_string("list.ordering");
		let order = match self.state.get_string("list.direction").as_str() {
			"DESC" => Order::Desc,
			_ => Order::Asc,
		};
		match ordering.split_once('.') {
			Some((table, column)) => {
				query.order_by((Alias::new(table), Alias::new(column)), order);
			}
			None => {
				query.order_by(Alias::new(ordering.as_str()), order);
			}
		}

		query
	}

	fn page(&self) -> (u64, u64) {
		let start = self.state.get_int("list.start").unwrap_or(0).max(0) as u64;
		let limit = self.state.get_int("list.limit").unwrap_or(0).max(0) as u64;
		(start, limit)
	}

	/// Rows of the current page. A start past the last row is first moved to
	/// the last page. Failures are recorded in [`errors`](Self::errors).
	pub async fn items(&mut self) -> Vec<Record> {
		let query = self.list_query();
		let (start, limit) = self.page();
		let start = if start > 0 && limit > 0 {
			let total = match self.executor.count(&query).await {
				Ok(total) => total,
				Err(err) => {
					tracing::warn!(table = %self.config.table, error = %err, "list count failed");
					self.errors.push(err.to_string());
					return Vec::new();
				}
			};
			let clamped = Pagination::new(start, limit, total).start;
			if clamped != start {
				self.state.set("list.start", clamped);
			}
			clamped
		} else {
			start
		};
		tracing::debug!(
			table = %self.config.table,
			store_id = %self.store_id(""),
			start,
			limit,
			"fetching list items"
		);
		match self.executor.fetch(&query, start, limit).await {
			Ok(items) => items,
			Err(err) => {
				tracing::warn!(table = %self.config.table, error = %err, "list query failed");
				self.errors.push(err.to_string());
				Vec::new()
			}
		}
	}

	/// Rows matching the list query. Failures are recorded in [`errors`](Self::errors).
	pub async fn total(&mut self) -> u64 {
		let query = self.list_query();
		match self.executor.count(&query).await {
			Ok(total) => total,
			Err(err) => {
				tracing::warn!(table = %self.config.table, error = %err, "list count failed");
				self.errors.push(err.to_string());
				0
			}
		}
	}

	pub async fn pagination(&mut self) -> Pagination {
		let total = self.total().await;
		let (start, limit) = self.page();
		Pagination::new(start, limit, total)
	}

	/// State fields with their current values
	pub fn filter_form(&self) -> Vec<FilterField> {
		self.config
			.state_fields
			.iter()
			.map(|field| FilterField {
				name: field.clone(),
				value: self
					.state
					.get(&format!("filter.{field}"))
					.cloned()
					.unwrap_or(Value::Null),
			})
			.collect()
	}

	/// State fields holding a non-blank value
	pub fn active_filters(&self) -> BTreeMap<String, Value> {
		self.filter_form()
			.into_iter()
			.filter(|f| !stringify(&f.value).is_empty())
			.map(|f| (f.name, f.value))
			.collect()
	}
}

fn normalize_direction(raw: &str) -> Option<&'static str> {
	match raw.trim().to_ascii_uppercase().as_str() {
		"ASC" => Some("ASC"),
		"DESC" => Some("DESC"),
		_ => None,
	}
}

fn as_u64(value: &Value) -> Option<u64> {
	match value {
		Value::Number(n) => n.as_u64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}
