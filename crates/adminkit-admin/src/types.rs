//! Shared types for admin models and views

pub mod blob;
pub mod errors;
pub mod record;
pub mod state;

pub use blob::SettingsBlob;
pub use errors::{AdminError, AdminResult};
pub use record::{ARCHIVED, PUBLISHED, Record, TRASHED, UNPUBLISHED};
pub use state::{ModelState, Pagination};
