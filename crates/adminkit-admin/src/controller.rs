//! Form controller specialization point
//!
//! Request dispatch belongs to the host. A form controller only carries the
//! identity of one edit screen and the task names derived from it
//! (`field.save`, `fields.publish`, ...), which views use for their buttons.

/// Capabilities expected from a form controller
pub trait AdminFormController {
	/// Extension name without the `com_` prefix
	fn component(&self) -> &str;

	/// Singular name of the edited item (`field`)
	fn item_name(&self) -> &str;

	/// Plural name of the list screen (`fields`)
	fn list_name(&self) -> &str;

	fn option(&self) -> String {
		format!("com_{}", self.component())
	}

	/// Task on a single item, `<item>.<action>`
	fn task(&self, action: &str) -> String {
		format!("{}.{action}", self.item_name())
	}

	/// Task on list selections, `<list>.<action>`
	fn list_task(&self, action: &str) -> String {
		format!("{}.{action}", self.list_name())
	}
}

/// Plain form controller; override nothing, or wrap it to customize tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
	component: String,
	item_name: String,
	list_name: String,
}

impl FormController {
	/// Controller whose list name is the item name plus `s`.
	pub fn new(component: impl Into<String>, item_name: impl Into<String>) -> Self {
		let item_name = item_name.into();
		Self {
			component: component.into(),
			list_name: format!("{item_name}s"),
			item_name,
		}
	}

	pub fn with_list_name(mut self, list_name: impl Into<String>) -> Self {
		self.list_name = list_name.into();
		self
	}
}

impl AdminFormController for FormController {
	fn component(&self) -> &str {
		&self.component
	}

	fn item_name(&self) -> &str {
		&self.item_name
	}

	fn list_name(&self) -> &str {
		&self.list_name
	}
}
