//! Error types for the availability list.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading or writing the persisted availability list.
#[derive(Debug, Error)]
pub enum AvailabilityError {
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path of the list file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for availability list operations.
pub type Result<T> = std::result::Result<T, AvailabilityError>;
