//! Integration tests for ListModel
//!
//! Tests cover:
//! - State population from the request and from persisted user state
//! - Ordering, direction and page window normalization
//! - WHERE fragments produced by the published filter
//! - Fields without a registered filter
//! - Error accumulation when the executor fails

use adminkit_admin::core::filters::column;
use adminkit_admin::core::{FilterRegistry, StateFilter};
use adminkit_admin::types::ModelState;
use adminkit_test::fixtures::*;
use rstest::*;
use sea_query::{Cond, Condition, PostgresQueryBuilder};
use serde_json::{Value, json};

fn sql(model: &ListModel) -> String {
	model.list_query().to_string(PostgresQueryBuilder)
}

#[rstest]
fn test_new_model_uses_settings_defaults(list_model: ListModel) {
	let state = list_model.state();
	assert_eq!(state.get_string("list.ordering"), "a.id");
	assert_eq!(state.get_string("list.direction"), "ASC");
	assert_eq!(state.get_int("list.start"), Some(0));
	assert_eq!(state.get_int("list.limit"), Some(20));
	assert_eq!(list_model.context(), "com_f90.fields");
}

#[rstest]
#[case::empty_component(ListModelConfig::new("", LIST, TABLE).filter_fields(["a.id"]))]
#[case::no_filter_fields(ListModelConfig::new(COMPONENT, LIST, TABLE))]
#[case::duplicate_state_field(
	ListModelConfig::new(COMPONENT, LIST, TABLE)
		.filter_fields(["a.id"])
		.state_fields(["published", "published"])
)]
fn test_invalid_declarations_are_rejected(
	#[case] config: ListModelConfig,
	list_executor: Arc<MemoryListExecutor>,
	admin_settings: AdminSettings,
) {
	let result = ListModel::new(config, list_executor, &admin_settings);
	assert!(matches!(result, Err(adminkit_admin::AdminError::Config(_))));
}

#[rstest]
#[tokio::test]
async fn test_populate_state_reads_request(mut list_model: ListModel, user_state: InMemoryUserState) {
	let request = RequestParams::new()
		.with("filter_published", "1")
		.with("limit", "10")
		.with("filter_order", "a.title")
		.with("filter_order_Dir", "desc");

	list_model.populate_state(&request, &user_state).await.unwrap();

	let state = list_model.state();
	assert_eq!(state.get_string("filter.published"), "1");
	assert_eq!(state.get_int("list.limit"), Some(10));
	assert_eq!(state.get_string("list.ordering"), "a.title");
	assert_eq!(state.get_string("list.direction"), "DESC");
	assert_eq!(state.get_int("list.start"), Some(0));

	// Choices persist for the next request
	assert_eq!(
		user_state.get("com_f90.fields.filter.published").await.unwrap(),
		Some(json!("1"))
	);
	assert_eq!(
		user_state.get("com_f90.fields.ordercol").await.unwrap(),
		Some(json!("a.title"))
	);
}

#[rstest]
#[tokio::test]
async fn test_populate_state_falls_back_to_persisted_values(
	mut list_model: ListModel,
	user_state: InMemoryUserState,
) {
	user_state
		.set("com_f90.fields.filter.published", json!("0"))
		.await
		.unwrap();
	user_state.set("com_f90.fields.list.limit", json!(5)).await.unwrap();

	list_model
		.populate_state(&RequestParams::new(), &user_state)
		.await
		.unwrap();

	assert_eq!(list_model.state().get_string("filter.published"), "0");
	assert_eq!(list_model.state().get_int("list.limit"), Some(5));
}

#[rstest]
#[case::unknown_column("a.secret", "DESC", "a.id", "DESC")]
#[case::bad_direction("a.title", "sideways", "a.title", "ASC")]
#[case::injection("a.id; DROP TABLE x", "ASC", "a.id", "ASC")]
#[tokio::test]
async fn test_ordering_is_restricted(
	mut list_model: ListModel,
	user_state: InMemoryUserState,
	#[case] order: &str,
	#[case] direction: &str,
	#[case] expected_order: &str,
	#[case] expected_direction: &str,
) {
	let request = RequestParams::new()
		.with("filter_order", order)
		.with("filter_order_Dir", direction);

	list_model.populate_state(&request, &user_state).await.unwrap();

	assert_eq!(list_model.state().get_string("list.ordering"), expected_order);
	assert_eq!(list_model.state().get_string("list.direction"), expected_direction);
	assert!(sql(&list_model).contains(&format!(
		"ORDER BY \"a\".\"{}\" {expected_direction}",
		expected_order.trim_start_matches("a.")
	)));
}

#[rstest]
#[case::floored("10", "25", 20)]
#[case::aligned("10", "30", 30)]
#[case::no_limit("0", "25", 0)]
#[tokio::test]
async fn test_start_is_aligned_to_limit(
	mut list_model: ListModel,
	user_state: InMemoryUserState,
	#[case] limit: &str,
	#[case] start: &str,
	#[case] expected: i64,
) {
	let request = RequestParams::new()
		.with("limit", limit)
		.with("limitstart", start);

	list_model.populate_state(&request, &user_state).await.unwrap();

	assert_eq!(list_model.state().get_int("list.start"), Some(expected));
}

#[rstest]
#[tokio::test]
async fn test_changed_filter_resets_start(mut list_model: ListModel, user_state: InMemoryUserState) {
	user_state
		.set("com_f90.fields.filter.published", json!("1"))
		.await
		.unwrap();
	let request = RequestParams::new()
		.with("filter_published", "0")
		.with("limit", "10")
		.with("limitstart", "40");

	list_model.populate_state(&request, &user_state).await.unwrap();

	assert_eq!(list_model.state().get_int("list.start"), Some(0));
}

#[rstest]
#[tokio::test]
async fn test_store_id_follows_state(mut list_model: ListModel, user_state: InMemoryUserState) {
	let before = list_model.store_id("getItems");
	assert_eq!(before.len(), 64);
	assert_eq!(before, list_model.store_id("getItems"));
	assert_ne!(before, list_model.store_id("getTotal"));

	let request = RequestParams::new().with("filter_published", "1");
	list_model.populate_state(&request, &user_state).await.unwrap();

	assert_ne!(before, list_model.store_id("getItems"));
}

#[rstest]
#[case::numeric(json!("1"), Some("WHERE \"a\".\"published\" = 1"))]
#[case::trashed(json!("-2"), Some("WHERE \"a\".\"published\" = -2"))]
#[case::integer_value(json!(0), Some("WHERE \"a\".\"published\" = 0"))]
#[case::blank(json!(""), Some("\"a\".\"published\" = 0 OR \"a\".\"published\" = 1"))]
#[case::unset(Value::Null, Some("\"a\".\"published\" = 0 OR \"a\".\"published\" = 1"))]
#[case::all(json!("*"), None)]
fn test_published_filter_fragment(
	mut list_model: ListModel,
	#[case] value: Value,
	#[case] expected: Option<&str>,
) {
	list_model.set_state("filter.published", value);

	let sql = sql(&list_model);

	match expected {
		Some(fragment) => assert!(sql.contains(fragment), "{sql}"),
		None => assert!(!sql.contains("WHERE"), "{sql}"),
	}
	assert!(sql.starts_with("SELECT a.* FROM \"#__f90_fields\" AS \"a\""), "{sql}");
}

#[rstest]
fn test_state_field_without_filter_adds_nothing(mut list_model: ListModel) {
	list_model.set_state("filter.search", "needle");
	list_model.set_state("filter.published", "*");

	assert!(list_model.state_conditions().is_empty());
	assert!(!sql(&list_model).contains("needle"));
}

#[rstest]
fn test_custom_filter_is_combined(
	list_executor: Arc<MemoryListExecutor>,
	admin_settings: AdminSettings,
) {
	let search = |field: &str, state: &ModelState| -> Option<Condition> {
		let needle = state.get_string(&format!("filter.{field}"));
		(!needle.is_empty()).then(|| Cond::all().add(column("title").like(format!("%{needle}%"))))
	};
	let config = ListModelConfig::new(COMPONENT, LIST, TABLE)
		.filter_fields(["a.id"])
		.state_fields(["published", "search"])
		.filter("search", search);
	let mut model = ListModel::new(config, list_executor, &admin_settings).unwrap();
	model.set_state("filter.published", "1");
	model.set_state("filter.search", "width");

	let fields: Vec<String> = model.state_conditions().into_iter().map(|(f, _)| f).collect();
	assert_eq!(fields, vec!["published", "search"]);

	let sql = sql(&model);
	assert!(sql.contains("\"a\".\"published\" = 1"), "{sql}");
	assert!(sql.contains("\"a\".\"title\" LIKE '%width%'"), "{sql}");
}

#[rstest]
fn test_empty_registry_disables_published_filter(
	list_executor: Arc<MemoryListExecutor>,
	admin_settings: AdminSettings,
) {
	let config = ListModelConfig::new(COMPONENT, LIST, TABLE)
		.filter_fields(["a.id"])
		.state_fields(["published"])
		.filters(FilterRegistry::empty());
	let model = ListModel::new(config, list_executor, &admin_settings).unwrap();

	assert!(!sql(&model).contains("WHERE"));
}

#[rstest]
fn test_custom_select_list(mut list_model: ListModel) {
	list_model.set_state("list.select", "a.id, a.title");
	assert!(sql(&list_model).starts_with("SELECT a.id, a.title FROM"));
}

#[rstest]
#[tokio::test]
async fn test_items_and_pagination(
	list_config: ListModelConfig,
	list_executor: Arc<MemoryListExecutor>,
	admin_settings: AdminSettings,
) {
	let mut model = ListModel::new(list_config, list_executor.clone(), &admin_settings).unwrap();
	model.set_state("list.limit", 2);
	model.set_state("list.start", 2);

	let items = model.items().await;
	let pagination = model.pagination().await;

	let ids: Vec<i64> = items.iter().map(Record::id).collect();
	assert_eq!(ids, vec![3, 4]);
	assert_eq!(pagination.total, 5);
	assert_eq!(pagination.pages_total(), 3);
	assert_eq!(pagination.pages_current(), 2);
	// count for the page window, rows, count for pagination
	assert_eq!(list_executor.queries().len(), 3);
	assert!(model.errors().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_start_past_end_shows_last_page(mut list_model: ListModel, user_state: InMemoryUserState) {
	let request = RequestParams::new().with("limit", "2").with("limitstart", "10");
	list_model.populate_state(&request, &user_state).await.unwrap();

	let items = list_model.items().await;
	let pagination = list_model.pagination().await;

	let ids: Vec<i64> = items.iter().map(Record::id).collect();
	assert_eq!(ids, vec![5]);
	assert_eq!(list_model.state().get_int("list.start"), Some(4));
	assert_eq!(pagination.start, 4);
	assert_eq!(pagination.pages_current(), 3);
	assert_eq!(pagination.pages_total(), 3);
}

#[rstest]
#[tokio::test]
async fn test_executor_failure_is_accumulated(list_config: ListModelConfig, admin_settings: AdminSettings) {
	let executor = Arc::new(MemoryListExecutor::failing("connection lost"));
	let mut model = ListModel::new(list_config, executor, &admin_settings).unwrap();

	assert!(model.items().await.is_empty());
	assert_eq!(model.total().await, 0);
	assert_eq!(model.errors().len(), 2);
	assert!(model.errors()[0].contains("connection lost"));
}

#[rstest]
fn test_filter_form_and_active_filters(mut list_model: ListModel) {
	list_model.set_state("filter.published", "1");
	list_model.set_state("filter.search", "");

	let form = list_model.filter_form();
	assert_eq!(form.len(), 2);
	assert_eq!(form[0].name, "published");

	let active = list_model.active_filters();
	assert_eq!(active.len(), 1);
	assert_eq!(active["published"], json!("1"));
}

#[rstest]
fn test_state_filter_trait_object(list_model: ListModel) {
	let filter: &dyn StateFilter = &adminkit_admin::PublishedFilter::new();
	assert!(filter.condition("published", list_model.state()).is_some());
}
