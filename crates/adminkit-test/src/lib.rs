//! # adminkit-test
//!
//! Testing utilities for adminkit screens.
//!
//! - **[`mock`]**: in-memory implementations of every host port
//! - **[`fixtures`]**: rstest fixtures wiring those ports into models
//!
//! ```rust,ignore
//! use adminkit_test::fixtures::*;
//! use rstest::*;
//!
//! #[rstest]
//! #[tokio::test]
//! async fn test_item(record_store: Arc<MemoryRecordStore>) {
//!     record_store.insert(Record::new().with("id", 3).with("title", "Hello"));
//!     let mut model = field_model(record_store.clone());
//!     assert!(model.get_item(Some(3)).await.is_some());
//! }
//! ```

pub mod fixtures;
pub mod mock;

pub use mock::{MemoryListExecutor, MemoryRecordStore, TestUser};
