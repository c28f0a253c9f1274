//! Per-user state persisted across requests
//!
//! List screens remember filters, ordering and page size per user. Keys are
//! namespaced by component and view, e.g. `com_f90.fields.filter.published`.

use crate::types::AdminResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Session-scoped key/value store for one user
#[async_trait]
pub trait UserStateStore: Send + Sync {
	/// Value stored under `key`, if any
	async fn get(&self, key: &str) -> AdminResult<Option<Value>>;

	/// Store `value` under `key`, replacing any previous value
	async fn set(&self, key: &str, value: Value) -> AdminResult<()>;
}

/// In-memory user state
///
/// Suitable for tests and single-process hosts; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserState {
	values: RwLock<HashMap<String, Value>>,
}

impl InMemoryUserState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored keys
	pub fn len(&self) -> usize {
		self.values.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.read().is_empty()
	}
}

#[async_trait]
impl UserStateStore for InMemoryUserState {
	async fn get(&self, key: &str) -> AdminResult<Option<Value>> {
		Ok(self.values.read().get(key).cloned())
	}

	async fn set(&self, key: &str, value: Value) -> AdminResult<()> {
		self.values.write().insert(key.to_string(), value);
		Ok(())
	}
}

/// Parameters of the current request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
	params: BTreeMap<String, String>,
}

impl RequestParams {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.params.insert(name.into(), value.into());
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set(name, value);
		self
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			params: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Result of [`get_user_state_from_request`]
#[derive(Debug, Clone, PartialEq)]
pub struct StateLookup {
	pub value: Value,
	/// The request carried a value different from the persisted one
	pub changed: bool,
}

/// Resolve a state value: the request parameter wins and is persisted,
/// otherwise the previously persisted value, otherwise `default`.
pub async fn get_user_state_from_request(
	store: &dyn UserStateStore,
	key: &str,
	request: &RequestParams,
	param: &str,
	default: Value,
) -> AdminResult<StateLookup> {
	let current = store.get(key).await?.unwrap_or(default);
	match request.get(param) {
		Some(raw) => {
			let value = Value::String(raw.to_string());
			let changed = value != current;
			store.set(key, value.clone()).await?;
			Ok(StateLookup { value, changed })
		}
		None => Ok(StateLookup {
			value: current,
			changed: false,
		}),
	}
}
