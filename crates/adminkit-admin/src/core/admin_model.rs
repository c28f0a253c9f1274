//! Single-record admin model
//!
//! Loads one record for an edit screen, casting stored columns into their
//! in-memory form, and writes submitted data back after cleaning it and
//! reversing the casts. Delete and publish go through the permission checks
//! in [`AdminModel::can_delete`] and [`AdminModel::can_edit_state`].

use super::access::{AdminUser, CORE_DELETE, CORE_EDIT_STATE, ClientContext};
use super::cast::FieldCasts;
use super::ports::RecordStore;
use super::sanitize::FieldSanitizers;
use super::user_state::UserStateStore;
use crate::types::{
	ARCHIVED, AdminError, AdminResult, ModelState, PUBLISHED, Record, TRASHED, UNPUBLISHED,
};
use adminkit_conf::AdminSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Form control name wrapping submitted fields (`jform[title]`)
pub const FORM_CONTROL: &str = "jform";

/// Declarations of one record type
#[derive(Debug, Clone)]
pub struct AdminModelConfig {
	component: String,
	name: String,
	casts: FieldCasts,
	sanitizers: FieldSanitizers,
	client: ClientContext,
}

impl AdminModelConfig {
	pub fn new(component: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			component: component.into(),
			name: name.into(),
			casts: FieldCasts::default(),
			sanitizers: FieldSanitizers::default(),
			client: ClientContext::default(),
		}
	}

	/// Declarations taken from `[models.<name>]` in the settings
	pub fn from_settings(
		component: impl Into<String>,
		name: impl Into<String>,
		settings: &AdminSettings,
	) -> AdminResult<Self> {
		let name = name.into();
		let model = settings.model(&name);
		Ok(Self::new(component, name)
			.casts(FieldCasts::from_settings(&model.casts)?)
			.sanitizers(FieldSanitizers::from_settings(&model.clean)?))
	}

	pub fn casts(mut self, casts: FieldCasts) -> Self {
		self.casts = casts;
		self
	}

	pub fn sanitizers(mut self, sanitizers: FieldSanitizers) -> Self {
		self.sanitizers = sanitizers;
		self
	}

	/// Client the current request comes from
	pub fn client(mut self, client: ClientContext) -> Self {
		self.client = client;
		self
	}
}

/// Edit form descriptor handed to the host's form renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
	/// `com_<component>.<name>`
	pub name: String,
	/// Form definition to load, i.e. the item name
	pub source: String,
	pub control: String,
	/// Values to bind, when the form was asked to load its data
	pub data: Option<Record>,
}

/// Result of [`AdminModel::delete`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
	pub deleted: Vec<i64>,
	pub denied: Vec<i64>,
	pub missing: Vec<i64>,
}

/// Model for a single record of one admin screen
pub struct AdminModel {
	config: AdminModelConfig,
	store: Arc<dyn RecordStore>,
	state: ModelState,
	errors: Vec<String>,
}

impl AdminModel {
	pub fn new(config: AdminModelConfig, store: Arc<dyn RecordStore>) -> AdminResult<Self> {
		if config.component.trim().is_empty() || config.name.trim().is_empty() {
			return Err(AdminError::Config(
				"admin model needs a component and a name".to_string(),
			));
		}
		Ok(Self {
			config,
			store,
			state: ModelState::new(),
			errors: Vec::new(),
		})
	}

	pub fn component(&self) -> &str {
		&self.config.component
	}

	pub fn name(&self) -> &str {
		&self.config.name
	}

	pub fn casts(&self) -> &FieldCasts {
		&self.config.casts
	}

	/// `com_<component>`
	pub fn option(&self) -> String {
		format!("com_{}", self.config.component)
	}

	/// `com_<component>.<name>`, also the asset prefix of records
	pub fn type_alias(&self) -> String {
		format!("{}.{}", self.option(), self.config.name)
	}

	/// Language key prefix, `COM_<COMPONENT>`
	pub fn text_prefix(&self) -> String {
		self.option().to_uppercase()
	}

	/// User state key holding form data from a failed save
	pub fn edit_context(&self) -> String {
		format!("{}.edit.{}.data", self.option(), self.config.name)
	}

	pub fn state(&self) -> &ModelState {
		&self.state
	}

	pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.state.set(key, value);
	}

	/// Data-retrieval errors accumulated so far
	pub fn errors(&self) -> &[String] {
		&self.errors
	}

	/// Identical messages are kept once; the form and the item of one edit
	/// screen read the same record.
	pub(crate) fn record_error(&mut self, message: String) {
		if self.errors.contains(&message) {
			return;
		}
		tracing::warn!(model = %self.type_alias(), error = %message, "record retrieval failed");
		self.errors.push(message);
	}

	/// Load a record with casts applied. `pk` defaults to the `<name>.id`
	/// state value; `0` yields a blank record. Failures are recorded in
	/// [`errors`](Self::errors).
	pub async fn get_item(&mut self, pk: Option<i64>) -> Option<Record> {
		let pk = pk
			.or_else(|| self.state.get_int(&format!("{}.id", self.config.name)))
			.unwrap_or(0);
		if pk == 0 {
			return Some(Record::blank());
		}

		let mut record = match self.store.load(pk).await {
			Ok(Some(record)) => record,
			Ok(None) => {
				self.record_error(AdminError::NotFound(format!("{}.{pk}", self.type_alias())).to_string());
				return None;
			}
			Err(err) => {
				self.record_error(err.to_string());
				return None;
			}
		};

		if let Err(err) = self.config.casts.apply_read(&mut record) {
			self.record_error(err.to_string());
			return None;
		}
		Some(record)
	}

	/// Clean, un-cast and store submitted data, returning the record id.
	pub async fn save(&mut self, mut data: Record) -> AdminResult<i64> {
		self.config.sanitizers.apply(&mut data);
		self.config.casts.apply_write(&mut data)?;

		let id = self.store.store(data).await?;
		self.state.set(format!("{}.id", self.config.name), id);
		tracing::info!(model = %self.type_alias(), id, "record saved");
		Ok(id)
	}

	/// Data to bind to the edit form: whatever a failed save left in user
	/// state, else the current item. Array-cast columns are returned as maps.
	pub async fn load_form_data(&mut self, user_state: &dyn UserStateStore) -> AdminResult<Record> {
		let pending = match user_state.get(&self.edit_context()).await? {
			Some(Value::Object(map)) if !map.is_empty() => Some(Record::from(map)),
			_ => None,
		};

		let mut data = match pending {
			Some(data) => data,
			None => self.get_item(None).await.unwrap_or_default(),
		};
		self.config.casts.apply_read(&mut data)?;
		Ok(data)
	}

	/// Descriptor of the edit form, optionally bound to its data.
	pub async fn get_form(
		&mut self,
		user_state: &dyn UserStateStore,
		load_data: bool,
	) -> AdminResult<Form> {
		let data = if load_data {
			Some(self.load_form_data(user_state).await?)
		} else {
			None
		};
		Ok(Form {
			name: self.type_alias(),
			source: self.config.name.clone(),
			control: FORM_CONTROL.to_string(),
			data,
		})
	}

	/// Only stored, trashed records may be deleted, unless the request comes
	/// from the API client. The user must also hold `core.delete` on the record.
	pub fn can_delete(&self, record: &Record, user: &dyn AdminUser) -> bool {
		let id = record.id();
		if id == 0 {
			return false;
		}
		let state = record.state().or_else(|| record.published());
		if state != Some(TRASHED) && !self.config.client.is_api() {
			return false;
		}
		user.authorise(CORE_DELETE, &format!("{}.{id}", self.type_alias()))
	}

	/// `core.edit.state` on the record, or on the component for new records.
	pub fn can_edit_state(&self, record: &Record, user: &dyn AdminUser) -> bool {
		match record.id() {
			0 => user.authorise(CORE_EDIT_STATE, &self.option()),
			id => user.authorise(CORE_EDIT_STATE, &format!("{}.{id}", self.type_alias())),
		}
	}

	/// Delete every record `user` may delete.
	pub async fn delete(&mut self, pks: &[i64], user: &dyn AdminUser) -> AdminResult<DeleteOutcome> {
		let mut outcome = DeleteOutcome::default();
		for &pk in pks {
			let record = match self.store.load(pk).await? {
				Some(record) => record,
				None => {
					outcome.missing.push(pk);
					continue;
				}
			};
			if !self.can_delete(&record, user) {
				tracing::warn!(model = %self.type_alias(), pk, user = user.id(), "delete not permitted");
				outcome.denied.push(pk);
				continue;
			}
			self.store.delete(pk).await?;
			outcome.deleted.push(pk);
		}
		tracing::info!(
			model = %self.type_alias(),
			deleted = outcome.deleted.len(),
			denied = outcome.denied.len(),
			missing = outcome.missing.len(),
			"delete finished"
		);
		Ok(outcome)
	}

	/// Change the publish state of every record `user` may edit the state of.
	/// Returns how many records the store changed.
	pub async fn publish(&mut self, pks: &[i64], value: i64, user: &dyn AdminUser) -> AdminResult<u64> {
		if ![PUBLISHED, UNPUBLISHED, ARCHIVED, TRASHED].contains(&value) {
			return Err(AdminError::InvalidState(value));
		}

		let mut allowed = Vec::with_capacity(pks.len());
		for &pk in pks {
			match self.store.load(pk).await? {
				Some(record) if self.can_edit_state(&record, user) => allowed.push(pk),
				Some(_) => {
					tracing::warn!(model = %self.type_alias(), pk, user = user.id(), "state change not permitted")
				}
				None => tracing::warn!(model = %self.type_alias(), pk, "record to publish not found"),
			}
		}
		if allowed.is_empty() {
			return if pks.is_empty() {
				Ok(0)
			} else {
				Err(AdminError::PermissionDenied(format!(
					"{} state change",
					self.type_alias()
				)))
			};
		}

		let changed = self.store.publish(&allowed, value).await?;
		tracing::info!(model = %self.type_alias(), value, changed, "publish state changed");
		Ok(changed)
	}
}
