//! In-memory host ports

use adminkit_admin::core::{AdminUser, ListQueryExecutor, RecordStore};
use adminkit_admin::{AdminError, AdminResult, Record};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use sea_query::{PostgresQueryBuilder, SelectStatement};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Record store keeping rows in a map keyed by id
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
	rows: RwLock<BTreeMap<i64, Record>>,
	failing: RwLock<Option<String>>,
}

impl MemoryRecordStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store with the given rows already inserted
	pub fn with_rows(rows: impl IntoIterator<Item = Record>) -> Self {
		let store = Self::new();
		for row in rows {
			store.insert(row);
		}
		store
	}

	/// Insert or replace a row as-is, keyed by its `id`.
	pub fn insert(&self, record: Record) {
		self.rows.write().insert(record.id(), record);
	}

	pub fn row(&self, pk: i64) -> Option<Record> {
		self.rows.read().get(&pk).cloned()
	}

	pub fn len(&self) -> usize {
		self.rows.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.read().is_empty()
	}

	/// Make every following call fail with `message`.
	pub fn fail_with(&self, message: impl Into<String>) {
		*self.failing.write() = Some(message.into());
	}

	fn check(&self) -> AdminResult<()> {
		match self.failing.read().as_ref() {
			Some(message) => Err(AdminError::Store(message.clone())),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
	async fn load(&self, pk: i64) -> AdminResult<Option<Record>> {
		self.check()?;
		Ok(self.row(pk))
	}

	async fn store(&self, mut record: Record) -> AdminResult<i64> {
		self.check()?;
		let mut rows = self.rows.write();
		let id = match record.id() {
			0 => rows.keys().next_back().copied().unwrap_or(0) + 1,
			id => id,
		};
		record.set("id", id);
		rows.insert(id, record);
		Ok(id)
	}

	async fn delete(&self, pk: i64) -> AdminResult<()> {
		self.check()?;
		self.rows
			.write()
			.remove(&pk)
			.map(|_| ())
			.ok_or_else(|| AdminError::NotFound(pk.to_string()))
	}

	async fn publish(&self, pks: &[i64], value: i64) -> AdminResult<u64> {
		self.check()?;
		let mut rows = self.rows.write();
		let mut changed = 0;
		for pk in pks {
			if let Some(row) = rows.get_mut(pk) {
				let column = if row.get("state").is_some() {
					"state"
				} else {
					"published"
				};
				row.set(column, value);
				changed += 1;
			}
		}
		Ok(changed)
	}
}

/// List executor serving fixed rows and recording the SQL it was given
#[derive(Debug, Default)]
pub struct MemoryListExecutor {
	rows: Vec<Record>,
	queries: Mutex<Vec<String>>,
	failing: Option<String>,
}

impl MemoryListExecutor {
	pub fn new(rows: impl IntoIterator<Item = Record>) -> Self {
		Self {
			rows: rows.into_iter().collect(),
			..Self::default()
		}
	}

	/// Executor whose every call fails with `message`
	pub fn failing(message: impl Into<String>) -> Self {
		Self {
			failing: Some(message.into()),
			..Self::default()
		}
	}

	/// PostgreSQL rendering of every query received, oldest first
	pub fn queries(&self) -> Vec<String> {
		self.queries.lock().clone()
	}

	pub fn last_query(&self) -> Option<String> {
		self.queries.lock().last().cloned()
	}

	fn receive(&self, query: &SelectStatement) -> AdminResult<()> {
		self.queries.lock().push(query.to_string(PostgresQueryBuilder));
		match &self.failing {
			Some(message) => Err(AdminError::Store(message.clone())),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl ListQueryExecutor for MemoryListExecutor {
	async fn fetch(
		&self,
		query: &SelectStatement,
		start: u64,
		limit: u64,
	) -> AdminResult<Vec<Record>> {
		self.receive(query)?;
		let rows = self.rows.iter().skip(start as usize);
		Ok(match limit {
			0 => rows.cloned().collect(),
			limit => rows.take(limit as usize).cloned().collect(),
		})
	}

	async fn count(&self, query: &SelectStatement) -> AdminResult<u64> {
		self.receive(query)?;
		Ok(self.rows.len() as u64)
	}
}

/// User granted an explicit set of `(action, asset)` pairs
#[derive(Debug, Clone, Default)]
pub struct TestUser {
	id: i64,
	granted: BTreeSet<(String, String)>,
	categories: HashMap<(String, String), Vec<i64>>,
}

impl TestUser {
	pub fn new(id: i64) -> Self {
		Self {
			id,
			..Self::default()
		}
	}

	pub fn grant(mut self, action: &str, asset: &str) -> Self {
		self.granted.insert((action.to_string(), asset.to_string()));
		self
	}

	/// Grant each action on `asset`.
	pub fn grant_all<'a>(mut self, actions: impl IntoIterator<Item = &'a str>, asset: &str) -> Self {
		for action in actions {
			self = self.grant(action, asset);
		}
		self
	}

	/// Categories in which `action` is allowed within `component`.
	pub fn categories(mut self, component: &str, action: &str, ids: impl IntoIterator<Item = i64>) -> Self {
		self.categories
			.insert((component.to_string(), action.to_string()), ids.into_iter().collect());
		self
	}
}

impl AdminUser for TestUser {
	fn id(&self) -> i64 {
		self.id
	}

	fn authorise(&self, action: &str, asset: &str) -> bool {
		self.granted
			.contains(&(action.to_string(), asset.to_string()))
	}

	fn authorised_categories(&self, component: &str, action: &str) -> Vec<i64> {
		self.categories
			.get(&(component.to_string(), action.to_string()))
			.cloned()
			.unwrap_or_default()
	}
}
