//! Edit screen view

use super::toolbar::{Toolbar, ToolbarButton};
use crate::controller::{AdminFormController, FormController};
use crate::core::access::{CORE_CREATE, CORE_EDIT, CORE_EDIT_OWN};
use crate::core::{Actions, AdminModel, AdminUser, Form, UserStateStore};
use crate::types::{AdminError, AdminResult, ModelState, Record};
use adminkit_conf::AdminSettings;
use async_trait::async_trait;

/// Default help screen key
pub const DEFAULT_HELP_KEY: &str = "JHELP_CONTENT_ARTICLE_MANAGER_EDIT";

/// Asset of the menu manager; creating there allows "save to menu"
const MENU_ASSET: &str = "com_menus.menu";

/// Data an edit view pulls from its model
#[async_trait]
pub trait EditSource: Send {
	/// Edit form bound to its data; `None` when loading failed
	async fn form(&mut self, user_state: &dyn UserStateStore) -> Option<Form>;
	async fn item(&mut self) -> Option<Record>;
	fn state(&self) -> &ModelState;
	fn errors(&self) -> &[String];
}

#[async_trait]
impl EditSource for AdminModel {
	async fn form(&mut self, user_state: &dyn UserStateStore) -> Option<Form> {
		match self.get_form(user_state, true).await {
			Ok(form) => Some(form),
			Err(err) => {
				self.record_error(err.to_string());
				None
			}
		}
	}

	async fn item(&mut self) -> Option<Record> {
		self.get_item(None).await
	}

	fn state(&self) -> &ModelState {
		AdminModel::state(self)
	}

	fn errors(&self) -> &[String] {
		AdminModel::errors(self)
	}
}

/// Everything the host needs to render an edit screen
#[derive(Debug, Clone)]
pub struct EditDisplay {
	pub form: Option<Form>,
	pub item: Record,
	pub state: ModelState,
	pub actions: Actions,
	pub toolbar: Toolbar,
}

/// View of one edit screen
#[derive(Debug, Clone)]
pub struct EditView {
	controller: FormController,
	help_key: String,
}

impl EditView {
	/// View for item `name`
	pub fn new(component: impl Into<String>, name: impl Into<String>) -> Self {
		Self::for_controller(FormController::new(component, name))
	}

	pub fn for_controller(controller: FormController) -> Self {
		Self {
			controller,
			help_key: DEFAULT_HELP_KEY.to_string(),
		}
	}

	/// View whose help key comes from `settings`
	pub fn from_settings(
		component: impl Into<String>,
		name: impl Into<String>,
		settings: &AdminSettings,
	) -> Self {
		Self::new(component, name).help_key(settings.help_key.clone())
	}

	/// Help screen key shown at the end of the toolbar
	pub fn help_key(mut self, key: impl Into<String>) -> Self {
		self.help_key = key.into();
		self
	}

	/// Collect the form and item and build the toolbar. Fails with
	/// [`AdminError::GenericData`] when the model reported errors.
	pub async fn display(
		&self,
		source: &mut dyn EditSource,
		user_state: &dyn UserStateStore,
		user: &dyn AdminUser,
	) -> AdminResult<EditDisplay> {
		let form = source.form(user_state).await;
		let item = source.item().await;
		let state = source.state().clone();

		let errors = source.errors();
		if !errors.is_empty() {
			tracing::warn!(
				view = %self.controller.task("edit"),
				errors = errors.len(),
				"edit data has errors"
			);
			return Err(AdminError::generic_data(errors));
		}

		let item = item.unwrap_or_else(Record::blank);
		let actions = Actions::for_asset(user, &self.asset(&item));
		let toolbar = self.toolbar(&item, &actions, user);

		Ok(EditDisplay {
			form,
			item,
			state,
			actions,
			toolbar,
		})
	}

	/// `com_<component>.<name>.<id>`, or the component for new records
	pub fn asset(&self, item: &Record) -> String {
		match item.id() {
			0 => self.controller.option(),
			id => format!("{}.{}.{id}", self.controller.option(), self.controller.item_name()),
		}
	}

	/// Title and buttons for `item` as seen by `user`
	pub fn toolbar(&self, item: &Record, actions: &Actions, user: &dyn AdminUser) -> Toolbar {
		let option = self.controller.option();
		let name = self.controller.item_name();
		let user_id = user.id();
		let is_new = item.is_new();
		let checked_out = item
			.checked_out()
			.is_some_and(|holder| holder != 0 && holder != user_id);

		let mut toolbar = Toolbar::new("toolbar");
		toolbar.hide_main_menu = true;

		let name_key = name.to_uppercase();
		let mode = if checked_out {
			"VIEW_"
		} else if is_new {
			"ADD_"
		} else {
			"EDIT_"
		};
		toolbar.set_title(
			format!("{}_PAGE_{mode}{name_key}", option.to_uppercase()),
			format!("pencil-2 {name}-add"),
		);

		if is_new && !user.authorised_categories(&option, CORE_CREATE).is_empty() {
			toolbar.push(ToolbarButton::apply(self.controller.task("apply")));

			let mut save_group =
				ToolbarButton::dropdown("save-group").child(ToolbarButton::save(self.controller.task("save")));
			if user.authorise(CORE_CREATE, MENU_ASSET) {
				save_group = save_group.child(
					ToolbarButton::save(self.controller.task("save2menu")).text("JTOOLBAR_SAVE_TO_MENU"),
				);
			}
			save_group = save_group.child(ToolbarButton::save2new(self.controller.task("save2new")));
			toolbar.push(save_group);
		} else {
			let editable = actions.get(CORE_EDIT)
				|| (actions.get(CORE_EDIT_OWN) && item.created_by() == Some(user_id));

			if !checked_out && editable {
				toolbar.push(ToolbarButton::apply(self.controller.task("apply")));
			}

			let mut save_group = ToolbarButton::dropdown("save-group");
			if !checked_out && editable {
				save_group = save_group.child(ToolbarButton::save(self.controller.task("save")));
				if actions.get(CORE_CREATE) {
					save_group =
						save_group.child(ToolbarButton::save2new(self.controller.task("save2new")));
				}
			}
			if actions.get(CORE_CREATE) {
				save_group = save_group.child(ToolbarButton::save2copy(self.controller.task("save2copy")));
			}
			if !save_group.children.is_empty() {
				toolbar.push(save_group);
			}
		}

		toolbar.push(ToolbarButton::cancel(
			self.controller.task("cancel"),
			"JTOOLBAR_CLOSE",
		));
		toolbar.push(ToolbarButton::divider());
		toolbar.push(ToolbarButton::help(self.help_key.clone()));

		toolbar
	}
}
