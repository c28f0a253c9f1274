//! Admin models and the host ports they depend on

pub mod access;
pub mod admin_model;
pub mod cast;
pub mod filters;
pub mod list_model;
pub mod ports;
pub mod sanitize;
pub mod user_state;

pub use access::{Actions, AdminUser, ClientContext};
pub use admin_model::{AdminModel, AdminModelConfig, DeleteOutcome, Form};
pub use cast::{Cast, FieldCasts};
pub use filters::{FilterRegistry, PublishedFilter, StateFilter};
pub use list_model::{FilterField, ListModel, ListModelConfig};
pub use ports::{ListQueryExecutor, RecordStore};
pub use sanitize::{FieldSanitizers, Sanitizer};
pub use user_state::{
	InMemoryUserState, RequestParams, StateLookup, UserStateStore, get_user_state_from_request,
};
