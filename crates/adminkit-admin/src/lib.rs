//! # adminkit-admin
//!
//! Reusable pieces for CRUD administration screens.
//!
//! - **types**: records, the settings-blob codec, model state and errors
//! - **core**: list and single-record models plus the ports they talk to
//! - **views**: list and edit views producing toolbars
//! - **controller**: form controller specialization point
//!
//! Host services (record storage, list query execution, per-user state and
//! permission checks) are traits in [`core::ports`], [`core::access`] and
//! [`core::user_state`]. A host implements them once; every screen then only
//! declares its component, table, fields, casts and sanitizers.
//!
//! ## Example
//!
//! ```ignore
//! use adminkit_admin::core::{ListModel, ListModelConfig};
//!
//! let config = ListModelConfig::new("f90", "fields", "#__f90_fields")
//!     .filter_fields(["a.id", "a.title", "a.published"])
//!     .state_fields(["published"]);
//! let mut model = ListModel::new(config, executor, &settings)?;
//! model.populate_state(&request, &user_state).await?;
//! let items = model.items().await;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod controller;
pub mod core;
pub mod types;
pub mod views;

pub use crate::controller::{AdminFormController, FormController};
pub use crate::core::{
	Actions, AdminModel, AdminModelConfig, AdminUser, Cast, ClientContext, FieldCasts,
	FieldSanitizers, InMemoryUserState, ListModel, ListModelConfig, ListQueryExecutor,
	PublishedFilter, RecordStore, Sanitizer, StateFilter, UserStateStore,
};
pub use crate::types::{AdminError, AdminResult, ModelState, Pagination, Record};
pub use crate::views::{EditView, ListView, Toolbar, ToolbarButton};
