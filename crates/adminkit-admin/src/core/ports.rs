//! Storage ports implemented by the host application

use crate::types::{AdminResult, Record};
use async_trait::async_trait;
use sea_query::SelectStatement;

/// Single-record storage for one table
#[async_trait]
pub trait RecordStore: Send + Sync {
	/// Load a record by primary key. `Ok(None)` when the row does not exist.
	async fn load(&self, pk: i64) -> AdminResult<Option<Record>>;

	/// Insert (`id` missing or 0) or update a record, returning its id.
	async fn store(&self, record: Record) -> AdminResult<i64>;

	/// Remove a record permanently.
	async fn delete(&self, pk: i64) -> AdminResult<()>;

	/// Set the publish state of the given records, returning how many changed.
	async fn publish(&self, pks: &[i64], value: i64) -> AdminResult<u64>;
}

/// Runs list queries built by [`ListModel`](super::ListModel)
#[async_trait]
pub trait ListQueryExecutor: Send + Sync {
	/// Fetch one page of rows. `limit == 0` means no limit.
	async fn fetch(
		&self,
		query: &SelectStatement,
		start: u64,
		limit: u64,
	) -> AdminResult<Vec<Record>>;

	/// Count every row the query matches.
	async fn count(&self, query: &SelectStatement) -> AdminResult<u64>;
}
