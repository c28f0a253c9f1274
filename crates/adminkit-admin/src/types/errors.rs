//! Error types for admin models and views

use thiserror::Error;

/// Status code carried by [`AdminError::GenericData`]
pub const GENERIC_DATA_CODE: u16 = 500;

/// Admin error type
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AdminError {
	/// Data retrieval failed while preparing a view; fatal for the render
	#[error("{message}")]
	GenericData { message: String, code: u16 },

	/// A stored value could not be cast to or from its in-memory form
	#[error("Cannot cast column '{column}': {reason}")]
	Cast { column: String, reason: String },

	/// Model or view declarations are inconsistent
	#[error("Configuration error: {0}")]
	Config(String),

	/// Record storage failed
	#[error("Store error: {0}")]
	Store(String),

	/// Per-user state could not be read or written
	#[error("User state error: {0}")]
	State(String),

	/// Record does not exist
	#[error("Record not found: {0}")]
	NotFound(String),

	/// Permission denied
	#[error("Permission denied: {0}")]
	PermissionDenied(String),

	/// Publish value outside the known set of states
	#[error("Invalid publish state: {0}")]
	InvalidState(i64),
}

impl AdminError {
	/// Build the fatal display error from accumulated messages.
	pub fn generic_data<S: AsRef<str>>(errors: &[S]) -> Self {
		let message = errors
			.iter()
			.map(AsRef::as_ref)
			.collect::<Vec<_>>()
			.join("\n");
		AdminError::GenericData {
			message,
			code: GENERIC_DATA_CODE,
		}
	}

	/// Status code for the host's error page.
	pub fn code(&self) -> u16 {
		match self {
			AdminError::GenericData { code, .. } => *code,
			AdminError::NotFound(_) => 404,
			AdminError::PermissionDenied(_) => 403,
			AdminError::Cast { .. } | AdminError::InvalidState(_) => 400,
			AdminError::Config(_) | AdminError::Store(_) | AdminError::State(_) => 500,
		}
	}
}

/// Result type for admin operations
pub type AdminResult<T> = Result<T, AdminError>;
