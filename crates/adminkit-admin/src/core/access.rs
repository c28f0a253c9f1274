//! Permission checks and caller context
//!
//! Authorization itself belongs to the host. This module only names the
//! actions admin screens ask about and bundles the answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CORE_ADMIN: &str = "core.admin";
pub const CORE_MANAGE: &str = "core.manage";
pub const CORE_CREATE: &str = "core.create";
pub const CORE_EDIT: &str = "core.edit";
pub const CORE_EDIT_OWN: &str = "core.edit.own";
pub const CORE_EDIT_STATE: &str = "core.edit.state";
pub const CORE_DELETE: &str = "core.delete";

/// Every action resolved by [`Actions::for_asset`]
pub const ACTIONS: [&str; 7] = [
	CORE_ADMIN,
	CORE_MANAGE,
	CORE_CREATE,
	CORE_EDIT,
	CORE_EDIT_OWN,
	CORE_EDIT_STATE,
	CORE_DELETE,
];

/// The acting user, as seen through the host's permission service
pub trait AdminUser: Send + Sync {
	/// User id; `0` for guests
	fn id(&self) -> i64;

	/// Whether the user may perform `action` on `asset`
	/// (`com_f90`, `com_f90.field.12`, ...).
	fn authorise(&self, action: &str, asset: &str) -> bool;

	/// Category ids of `component` in which the user may perform `action`
	fn authorised_categories(&self, component: &str, action: &str) -> Vec<i64>;
}

/// Which kind of client issued the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientContext {
	Site,
	#[default]
	Administrator,
	Api,
}

impl ClientContext {
	pub fn is_api(self) -> bool {
		matches!(self, ClientContext::Api)
	}
}

/// Answers to every [`ACTIONS`] entry for one asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
	granted: BTreeMap<String, bool>,
}

impl Actions {
	/// Ask `user` about each known action on `asset`.
	pub fn for_asset(user: &dyn AdminUser, asset: &str) -> Self {
		let granted = ACTIONS
			.iter()
			.map(|action| (action.to_string(), user.authorise(action, asset)))
			.collect();
		Self { granted }
	}

	/// Build from explicit grants; every other action is denied.
	pub fn granting<'a>(actions: impl IntoIterator<Item = &'a str>) -> Self {
		Self {
			granted: actions
				.into_iter()
				.map(|action| (action.to_string(), true))
				.collect(),
		}
	}

	pub fn get(&self, action: &str) -> bool {
		self.granted.get(action).copied().unwrap_or(false)
	}
}
