//! # adminkit
//!
//! Building blocks for CRUD administration screens.
//!
//! A screen is a list of records plus an edit form for one record. adminkit
//! supplies the models behind both (filter state, list queries, casts,
//! sanitizing, permission checks) and the views that turn them into toolbar
//! descriptions. Everything the host owns, such as storage, per-user state
//! and access control, sits behind small async traits.
//!
//! ## Feature Flags
//!
//! - `admin` - models, views and ports ([`admin`])
//! - `conf` - settings loading ([`conf`])
//! - `test` - in-memory ports and rstest fixtures ([`test`])
//! - `full` (default) - `admin` and `conf`
//!
//! ## Example
//!
//! ```rust,ignore
//! use adminkit::prelude::*;
//!
//! let settings = AdminSettings::load("adminkit.toml")?;
//! let config = ListModelConfig::new("f90", "fields", "#__f90_fields")
//!     .filter_fields(["a.id", "a.title", "a.published"])
//!     .state_fields(["published"]);
//! let mut model = ListModel::new(config, executor, &settings)?;
//! model.populate_state(&request, &user_state).await?;
//!
//! let display = ListView::new("f90", "fields").display(&mut model, &user).await?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "admin")]
pub mod admin;

#[cfg(feature = "conf")]
pub use adminkit_conf as conf;

#[cfg(feature = "test")]
pub use adminkit_test as test;

#[cfg(feature = "admin")]
pub use adminkit_admin::{AdminError, AdminResult};

#[cfg(feature = "conf")]
pub use adminkit_conf::{AdminSettings, SettingsError};

/// Common imports for building a screen
pub mod prelude {
	#[cfg(feature = "admin")]
	pub use crate::admin::{
		Actions, AdminError, AdminFormController, AdminModel, AdminModelConfig, AdminResult,
		AdminUser, EditView, FieldCasts, FieldSanitizers, FormController, ListModel,
		ListModelConfig, ListQueryExecutor, ListView, Record, RecordStore, RequestParams,
		UserStateStore,
	};
	#[cfg(feature = "conf")]
	pub use adminkit_conf::AdminSettings;
}
