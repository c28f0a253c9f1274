//! List screen view

use super::toolbar::{Toolbar, ToolbarButton};
use crate::controller::{AdminFormController, FormController};
use crate::core::access::{CORE_CREATE, CORE_DELETE, CORE_EDIT_STATE};
use crate::core::{Actions, AdminUser, FilterField, ListModel};
use crate::types::{AdminError, AdminResult, ModelState, Pagination, Record, TRASHED};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Data a list view pulls from its model
#[async_trait]
pub trait ListSource: Send {
	async fn items(&mut self) -> Vec<Record>;
	async fn pagination(&mut self) -> Pagination;
	fn state(&self) -> &ModelState;
	fn filter_form(&self) -> Vec<FilterField>;
	fn active_filters(&self) -> BTreeMap<String, Value>;
	fn errors(&self) -> &[String];
}

#[async_trait]
impl ListSource for ListModel {
	async fn items(&mut self) -> Vec<Record> {
		ListModel::items(self).await
	}

	async fn pagination(&mut self) -> Pagination {
		ListModel::pagination(self).await
	}

	fn state(&self) -> &ModelState {
		ListModel::state(self)
	}

	fn filter_form(&self) -> Vec<FilterField> {
		ListModel::filter_form(self)
	}

	fn active_filters(&self) -> BTreeMap<String, Value> {
		ListModel::active_filters(self)
	}

	fn errors(&self) -> &[String] {
		ListModel::errors(self)
	}
}

/// Everything the host needs to render a list screen
#[derive(Debug, Clone)]
pub struct ListDisplay {
	pub items: Vec<Record>,
	pub pagination: Pagination,
	pub state: ModelState,
	pub filter_form: Vec<FilterField>,
	pub active_filters: BTreeMap<String, Value>,
	pub toolbar: Toolbar,
}

/// View of one list screen
#[derive(Debug, Clone)]
pub struct ListView {
	controller: FormController,
}

impl ListView {
	/// View for list `name`; its items are named `name` without a trailing `s`.
	///
	/// Lists whose item name is not a plain `s` plural (`categories`,
	/// `statuses`) must use [`for_controller`](Self::for_controller) with an
	/// explicit [`FormController`].
	pub fn new(component: impl Into<String>, name: impl Into<String>) -> Self {
		let name = name.into();
		let item = name.strip_suffix('s').unwrap_or(&name).to_string();
		Self {
			controller: FormController::new(component, item).with_list_name(name),
		}
	}

	/// View whose task names come from `controller`
	pub fn for_controller(controller: FormController) -> Self {
		Self { controller }
	}

	/// Language key prefix, `COM_<COMPONENT>_<NAME>`
	pub fn context(&self) -> String {
		format!(
			"COM_{}_{}",
			self.controller.component().to_uppercase(),
			self.controller.list_name().to_uppercase()
		)
	}

	/// Collect list data and build the toolbar. Fails with
	/// [`AdminError::GenericData`] when the model reported errors.
	pub async fn display(
		&self,
		source: &mut dyn ListSource,
		user: &dyn AdminUser,
	) -> AdminResult<ListDisplay> {
		let items = source.items().await;
		let pagination = source.pagination().await;
		let state = source.state().clone();
		let filter_form = source.filter_form();
		let active_filters = source.active_filters();

		let errors = source.errors();
		if !errors.is_empty() {
			tracing::warn!(view = %self.context(), errors = errors.len(), "list data has errors");
			return Err(AdminError::generic_data(errors));
		}

		let actions = Actions::for_asset(user, &self.controller.option());
		let toolbar = self.toolbar(&state, &actions);

		Ok(ListDisplay {
			items,
			pagination,
			state,
			filter_form,
			active_filters,
			toolbar,
		})
	}

	/// Title and buttons for the given state and permissions
	pub fn toolbar(&self, state: &ModelState, actions: &Actions) -> Toolbar {
		let mut toolbar = Toolbar::new("toolbar");
		toolbar.set_title(
			format!("{}_PAGE_TITLE", self.context()),
			self.controller.component(),
		);

		let viewing_trash = state.get_int("filter.published") == Some(TRASHED);

		if actions.get(CORE_CREATE) {
			toolbar.push(ToolbarButton::add_new(self.controller.task("add")));
		}

		if actions.get(CORE_EDIT_STATE) {
			let mut dropdown = ToolbarButton::dropdown("status-group")
				.text("JTOOLBAR_CHANGE_STATUS")
				.toggle_split(false)
				.icon("fa fa-globe")
				.button_class("btn btn-info")
				.list_check(true)
				.child(ToolbarButton::publish(self.controller.list_task("publish")).list_check(true))
				.child(
					ToolbarButton::unpublish(self.controller.list_task("unpublish")).list_check(true),
				);
			if !viewing_trash {
				dropdown = dropdown
					.child(ToolbarButton::trash(self.controller.list_task("trash")).list_check(true));
			}
			toolbar.push(dropdown);
		}

		if viewing_trash && actions.get(CORE_DELETE) {
			toolbar.push(
				ToolbarButton::delete(self.controller.list_task("delete"))
					.text("JTOOLBAR_EMPTY_TRASH")
					.message("JGLOBAL_CONFIRM_DELETE")
					.list_check(true),
			);
		}

		toolbar
	}
}
