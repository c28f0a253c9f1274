//! Integration tests for AdminModel
//!
//! Tests cover:
//! - Loading records with settings blobs cast to maps
//! - Saving with sanitizers and casts applied
//! - Form data coming from a failed save or from the current item
//! - Delete and publish permission rules

use adminkit_admin::core::ClientContext;
use adminkit_admin::{AdminError, AdminModelConfig};
use adminkit_test::fixtures::*;
use rstest::*;
use serde_json::json;

#[rstest]
#[tokio::test]
async fn test_get_item_decodes_settings_blob(mut admin_model: AdminModel) {
	let item = admin_model.get_item(Some(1)).await.unwrap();

	assert_eq!(item.get("title"), Some(&json!("Published")));
	assert_eq!(item.get("params"), Some(&json!({ "width": "40" })));
	assert!(admin_model.errors().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_get_item_uses_state_id(mut admin_model: AdminModel) {
	assert!(admin_model.get_item(None).await.unwrap().is_new());

	admin_model.set_state("field.id", 2);
	assert_eq!(admin_model.get_item(None).await.unwrap().id(), 2);
}

#[rstest]
#[tokio::test]
async fn test_missing_item_is_accumulated(mut admin_model: AdminModel) {
	assert!(admin_model.get_item(Some(42)).await.is_none());
	assert_eq!(admin_model.errors().len(), 1);
	assert!(admin_model.errors()[0].contains("com_f90.field.42"));
}

#[rstest]
#[tokio::test]
async fn test_malformed_blob_is_accumulated(record_store: Arc<MemoryRecordStore>) {
	record_store.insert(Record::new().with("id", 9).with("params", "{oops"));
	let mut model = field_model(record_store);

	assert!(model.get_item(Some(9)).await.is_none());
	assert!(model.errors()[0].contains("params"));
}

#[rstest]
#[tokio::test]
async fn test_save_encodes_blob_and_cleans_input(record_store: Arc<MemoryRecordStore>) {
	let settings = AdminSettings::from_toml_str(
		r#"
[models.field]
casts = { params = "array" }
clean = { title = "string", ordering = "int", name = "cmd" }
"#,
	)
	.unwrap();
	let config = AdminModelConfig::from_settings(COMPONENT, ITEM, &settings).unwrap();
	let mut model = AdminModel::new(config, record_store.clone()).unwrap();

	let data = Record::new()
		.with("title", "<b>New</b> field")
		.with("ordering", "3rd")
		.with("name", ".field-name!")
		.with("params", json!({ "width": "60", "show": true }));
	let id = model.save(data).await.unwrap();

	assert_eq!(id, 4);
	assert_eq!(model.state().get_int("field.id"), Some(4));

	let row = record_store.row(id).unwrap();
	assert_eq!(row.get("title"), Some(&json!("New field")));
	assert_eq!(row.get("ordering"), Some(&json!(3)));
	assert_eq!(row.get("name"), Some(&json!("field-name")));
	let stored = row.get("params").and_then(|v| v.as_str()).unwrap();
	assert_eq!(
		serde_json::from_str::<serde_json::Value>(stored).unwrap(),
		json!({ "width": "60", "show": true })
	);

	let reloaded = model.get_item(Some(id)).await.unwrap();
	assert_eq!(reloaded.get("params"), Some(&json!({ "width": "60", "show": true })));
}

#[rstest]
#[tokio::test]
async fn test_save_cleans_blob_before_encoding(record_store: Arc<MemoryRecordStore>) {
	let settings = AdminSettings::from_toml_str(
		r#"
[models.field]
casts = { params = "array" }
clean = { params = "string" }
"#,
	)
	.unwrap();
	let config = AdminModelConfig::from_settings(COMPONENT, ITEM, &settings).unwrap();
	let mut model = AdminModel::new(config, record_store.clone()).unwrap();

	let id = model
		.save(Record::new().with("params", json!({ "w": "<b>1</b>" })))
		.await
		.unwrap();

	let row = record_store.row(id).unwrap();
	let stored = row.get("params").and_then(|v| v.as_str()).unwrap();
	assert_eq!(
		serde_json::from_str::<serde_json::Value>(stored).unwrap(),
		json!({ "w": "1" })
	);
}

#[rstest]
#[case::cast("casts", "number")]
#[case::sanitizer("clean", "shout")]
fn test_unknown_declaration_names_are_rejected(#[case] table: &str, #[case] name: &str) {
	let settings =
		AdminSettings::from_toml_str(&format!("[models.field]\n{table} = {{ title = \"{name}\" }}\n"))
			.unwrap();
	let result = AdminModelConfig::from_settings(COMPONENT, ITEM, &settings);
	assert!(matches!(result, Err(AdminError::Config(_))));
}

#[rstest]
#[tokio::test]
async fn test_store_failure_propagates_from_save(record_store: Arc<MemoryRecordStore>) {
	record_store.fail_with("disk full");
	let mut model = field_model(record_store);

	let err = model.save(Record::new().with("title", "x")).await.unwrap_err();
	assert!(matches!(err, AdminError::Store(ref m) if m == "disk full"));
}

#[rstest]
#[tokio::test]
async fn test_form_data_prefers_pending_submission(
	mut admin_model: AdminModel,
	user_state: InMemoryUserState,
) {
	user_state
		.set(
			"com_f90.edit.field.data",
			json!({ "title": "Draft", "params": "{\"width\":\"10\"}" }),
		)
		.await
		.unwrap();
	admin_model.set_state("field.id", 1);

	let form = admin_model.get_form(&user_state, true).await.unwrap();

	assert_eq!(form.name, "com_f90.field");
	assert_eq!(form.source, "field");
	assert_eq!(form.control, "jform");
	let data = form.data.unwrap();
	assert_eq!(data.get("title"), Some(&json!("Draft")));
	assert_eq!(data.get("params"), Some(&json!({ "width": "10" })));
}

#[rstest]
#[tokio::test]
async fn test_form_data_falls_back_to_item(mut admin_model: AdminModel, user_state: InMemoryUserState) {
	admin_model.set_state("field.id", 1);

	let data = admin_model.load_form_data(&user_state).await.unwrap();
	assert_eq!(data.get("title"), Some(&json!("Published")));
	assert_eq!(data.get("params"), Some(&json!({ "width": "40" })));

	let bare = admin_model.get_form(&user_state, false).await.unwrap();
	assert!(bare.data.is_none());
}

#[rstest]
#[case::trashed_with_permission(2, ClientContext::Administrator, true, true)]
#[case::published_with_permission(1, ClientContext::Administrator, true, false)]
#[case::published_from_api(1, ClientContext::Api, true, true)]
#[case::trashed_without_permission(2, ClientContext::Administrator, false, false)]
#[case::new_record(0, ClientContext::Api, true, false)]
#[tokio::test]
async fn test_can_delete(
	record_store: Arc<MemoryRecordStore>,
	manager: TestUser,
	visitor: TestUser,
	#[case] id: i64,
	#[case] client: ClientContext,
	#[case] granted: bool,
	#[case] expected: bool,
) {
	let config = AdminModelConfig::new(COMPONENT, ITEM).client(client);
	let model = AdminModel::new(config, record_store.clone()).unwrap();
	let record = record_store.row(id).unwrap_or_else(Record::blank);
	let user = if granted { manager } else { visitor };

	assert_eq!(model.can_delete(&record, &user), expected);
}

#[rstest]
fn test_can_delete_falls_back_to_state_column(admin_model: AdminModel, manager: TestUser) {
	let record = Record::new().with("id", 1).with("state", -2).with("published", 1);
	assert!(admin_model.can_delete(&record, &manager));

	let record = Record::new().with("id", 1).with("state", 1).with("published", -2);
	assert!(!admin_model.can_delete(&record, &manager));
}

#[rstest]
#[tokio::test]
async fn test_delete_reports_each_record(record_store: Arc<MemoryRecordStore>, manager: TestUser) {
	let mut model = field_model(record_store.clone());

	let outcome = model.delete(&[1, 2, 42], &manager).await.unwrap();

	assert_eq!(outcome.deleted, vec![2]);
	assert_eq!(outcome.denied, vec![1]);
	assert_eq!(outcome.missing, vec![42]);
	assert!(record_store.row(2).is_none());
	assert!(record_store.row(1).is_some());
}

#[rstest]
#[tokio::test]
async fn test_publish_changes_permitted_records(record_store: Arc<MemoryRecordStore>, manager: TestUser) {
	let mut model = field_model(record_store.clone());

	let changed = model.publish(&[1, 3], 0, &manager).await.unwrap();

	assert_eq!(changed, 2);
	assert_eq!(record_store.row(1).unwrap().published(), Some(0));
	assert_eq!(record_store.row(3).unwrap().published(), Some(0));
}

#[rstest]
#[case::unknown_value(5)]
#[case::below_trash(-3)]
#[tokio::test]
async fn test_publish_rejects_unknown_state(
	mut admin_model: AdminModel,
	manager: TestUser,
	#[case] value: i64,
) {
	let err = admin_model.publish(&[1], value, &manager).await.unwrap_err();
	assert!(matches!(err, AdminError::InvalidState(v) if v == value));
	assert_eq!(err.code(), 400);
}

#[rstest]
#[tokio::test]
async fn test_publish_without_permission(mut admin_model: AdminModel, visitor: TestUser) {
	let err = admin_model.publish(&[1, 2], 2, &visitor).await.unwrap_err();
	assert!(matches!(err, AdminError::PermissionDenied(_)));

	assert_eq!(admin_model.publish(&[], 1, &visitor).await.unwrap(), 0);
}

#[rstest]
fn test_names(admin_model: AdminModel) {
	assert_eq!(admin_model.option(), "com_f90");
	assert_eq!(admin_model.type_alias(), "com_f90.field");
	assert_eq!(admin_model.text_prefix(), "COM_F90");
	assert_eq!(admin_model.edit_context(), "com_f90.edit.field.data");
}
