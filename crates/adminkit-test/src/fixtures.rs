//! rstest fixtures for adminkit screens
//!
//! Models are built for component `f90`, item `field`, list `fields` and
//! table `#__f90_fields`.

pub use crate::mock::{MemoryListExecutor, MemoryRecordStore, TestUser};
pub use adminkit_admin::core::access::ACTIONS;
pub use adminkit_admin::core::{RequestParams, UserStateStore};
pub use adminkit_admin::{
	AdminModel, AdminModelConfig, Cast, FieldCasts, InMemoryUserState, ListModel, ListModelConfig,
	Record,
};
pub use adminkit_conf::AdminSettings;
use rstest::fixture;
pub use std::sync::Arc;

pub const COMPONENT: &str = "f90";
pub const ITEM: &str = "field";
pub const LIST: &str = "fields";
pub const TABLE: &str = "#__f90_fields";

/// Default settings
#[fixture]
pub fn admin_settings() -> AdminSettings {
	AdminSettings::default()
}

#[fixture]
pub fn user_state() -> InMemoryUserState {
	InMemoryUserState::new()
}

/// Store holding one published, one trashed and one checked-out row
#[fixture]
pub fn record_store() -> Arc<MemoryRecordStore> {
	Arc::new(MemoryRecordStore::with_rows([
		Record::new()
			.with("id", 1)
			.with("title", "Published")
			.with("published", 1)
			.with("params", r#"{"width":"40"}"#)
			.with("created_by", 7),
		Record::new()
			.with("id", 2)
			.with("title", "Trashed")
			.with("published", -2)
			.with("created_by", 7),
		Record::new()
			.with("id", 3)
			.with("title", "Locked")
			.with("published", 0)
			.with("checked_out", 99)
			.with("created_by", 7),
	]))
}

/// Rows served to list models
#[fixture]
pub fn list_rows() -> Vec<Record> {
	(1..=5)
		.map(|id| {
			Record::new()
				.with("id", id)
				.with("title", format!("Field {id}"))
				.with("published", 1)
		})
		.collect()
}

#[fixture]
pub fn list_executor(list_rows: Vec<Record>) -> Arc<MemoryListExecutor> {
	Arc::new(MemoryListExecutor::new(list_rows))
}

/// Declarations of the `fields` list
#[fixture]
pub fn list_config() -> ListModelConfig {
	ListModelConfig::new(COMPONENT, LIST, TABLE)
		.filter_fields(["a.id", "a.title", "a.published", "a.ordering"])
		.state_fields(["published", "search"])
}

#[fixture]
pub fn list_model(
	list_config: ListModelConfig,
	list_executor: Arc<MemoryListExecutor>,
	admin_settings: AdminSettings,
) -> ListModel {
	ListModel::new(list_config, list_executor, &admin_settings).unwrap()
}

/// Model for `field` records with `params` cast as a settings blob
pub fn field_model(store: Arc<MemoryRecordStore>) -> AdminModel {
	let config = AdminModelConfig::new(COMPONENT, ITEM)
		.casts(FieldCasts::new([("params", Cast::Array)]).unwrap());
	AdminModel::new(config, store).unwrap()
}

#[fixture]
pub fn admin_model(record_store: Arc<MemoryRecordStore>) -> AdminModel {
	field_model(record_store)
}

/// User 7 holding every core action on the component and its records
#[fixture]
pub fn manager() -> TestUser {
	let mut user = TestUser::new(7).grant_all(ACTIONS, "com_f90");
	for id in 1..=3 {
		user = user.grant_all(ACTIONS, &format!("com_f90.field.{id}"));
	}
	user.grant("core.create", "com_menus.menu")
		.categories("com_f90", "core.create", [1])
}

/// User 8 without any permission
#[fixture]
pub fn visitor() -> TestUser {
	TestUser::new(8)
}
