//! Toolbar description
//!
//! Buttons are plain data. Text values are language keys; translating and
//! rendering them is up to the host.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
	AddNew,
	Dropdown,
	Publish,
	Unpublish,
	Trash,
	Delete,
	Apply,
	Save,
	Save2New,
	Save2Copy,
	Cancel,
	Divider,
	Help,
}

/// One toolbar button; dropdowns hold their children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarButton {
	pub kind: ButtonKind,
	/// Dropdown name or task submitted on click
	pub task: Option<String>,
	pub text: Option<String>,
	/// Confirmation prompt
	pub message: Option<String>,
	pub icon: Option<String>,
	pub button_class: Option<String>,
	/// Requires at least one selected row
	pub list_check: bool,
	pub toggle_split: bool,
	pub children: Vec<ToolbarButton>,
}

impl ToolbarButton {
	pub fn new(kind: ButtonKind) -> Self {
		Self {
			kind,
			task: None,
			text: None,
			message: None,
			icon: None,
			button_class: None,
			list_check: false,
			toggle_split: true,
			children: Vec::new(),
		}
	}

	pub fn with_task(kind: ButtonKind, task: impl Into<String>) -> Self {
		let mut button = Self::new(kind);
		button.task = Some(task.into());
		button
	}

	pub fn add_new(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::AddNew, task)
	}

	pub fn dropdown(name: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Dropdown, name)
	}

	pub fn publish(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Publish, task)
	}

	pub fn unpublish(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Unpublish, task)
	}

	pub fn trash(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Trash, task)
	}

	pub fn delete(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Delete, task)
	}

	pub fn apply(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Apply, task)
	}

	pub fn save(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Save, task)
	}

	pub fn save2new(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Save2New, task)
	}

	pub fn save2copy(task: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Save2Copy, task)
	}

	pub fn cancel(task: impl Into<String>, text: impl Into<String>) -> Self {
		Self::with_task(ButtonKind::Cancel, task).text(text)
	}

	pub fn divider() -> Self {
		Self::new(ButtonKind::Divider)
	}

	pub fn help(key: impl Into<String>) -> Self {
		Self::new(ButtonKind::Help).text(key)
	}

	pub fn text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	pub fn button_class(mut self, class: impl Into<String>) -> Self {
		self.button_class = Some(class.into());
		self
	}

	pub fn list_check(mut self, list_check: bool) -> Self {
		self.list_check = list_check;
		self
	}

	pub fn toggle_split(mut self, toggle_split: bool) -> Self {
		self.toggle_split = toggle_split;
		self
	}

	pub fn child(mut self, child: ToolbarButton) -> Self {
		self.children.push(child);
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarTitle {
	/// Language key
	pub text: String,
	pub icon: String,
}

/// Page title and buttons of one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolbar {
	pub name: String,
	pub title: Option<ToolbarTitle>,
	pub buttons: Vec<ToolbarButton>,
	/// Hide the main menu while the screen is open (edit screens)
	pub hide_main_menu: bool,
}

impl Default for Toolbar {
	fn default() -> Self {
		Self::new("toolbar")
	}
}

impl Toolbar {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			title: None,
			buttons: Vec::new(),
			hide_main_menu: false,
		}
	}

	pub fn set_title(&mut self, text: impl Into<String>, icon: impl Into<String>) {
		self.title = Some(ToolbarTitle {
			text: text.into(),
			icon: icon.into(),
		});
	}

	pub fn push(&mut self, button: ToolbarButton) {
		self.buttons.push(button);
	}

	/// Every button, dropdown children included, depth first
	pub fn flatten(&self) -> Vec<&ToolbarButton> {
		fn walk<'a>(buttons: &'a [ToolbarButton], out: &mut Vec<&'a ToolbarButton>) {
			for button in buttons {
				out.push(button);
				walk(&button.children, out);
			}
		}
		let mut out = Vec::new();
		walk(&self.buttons, &mut out);
		out
	}

	/// Tasks of every button, dropdown children included
	pub fn tasks(&self) -> Vec<&str> {
		self.flatten()
			.into_iter()
			.filter_map(|b| b.task.as_deref())
			.collect()
	}

	pub fn has_task(&self, task: &str) -> bool {
		self.tasks().contains(&task)
	}

	pub fn has_kind(&self, kind: ButtonKind) -> bool {
		self.flatten().iter().any(|b| b.kind == kind)
	}
}
