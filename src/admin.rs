//! Models, views and ports for admin screens
//!
//! Unified imports from the `adminkit::admin` namespace.
//!
//! - **core**: list and record models, filters, casts and sanitizers
//! - **views**: list and edit views with their toolbars
//! - **controller**: task naming of form controllers
//! - **types**: records, model state and errors
//!
//! ```rust,ignore
//! use adminkit::admin::*;
//!
//! let config = AdminModelConfig::new("f90", "field");
//! let mut model = AdminModel::new(config, store)?;
//! let item = model.get_item(Some(3)).await;
//! ```

pub use adminkit_admin::controller;
pub use adminkit_admin::core;
pub use adminkit_admin::types;
pub use adminkit_admin::views;

pub use adminkit_admin::core::{
	Actions, AdminModel, AdminModelConfig, AdminUser, Cast, ClientContext, FieldCasts,
	FieldSanitizers, FilterRegistry, InMemoryUserState, ListModel, ListModelConfig,
	ListQueryExecutor, PublishedFilter, RecordStore, RequestParams, Sanitizer, StateFilter,
	UserStateStore,
};
pub use adminkit_admin::types::{AdminError, AdminResult, ModelState, Pagination, Record};
pub use adminkit_admin::views::{EditView, ListView, Toolbar, ToolbarButton};
pub use adminkit_admin::{AdminFormController, FormController};
