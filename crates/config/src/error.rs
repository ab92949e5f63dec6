//! Error types for option loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving options.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an option of the wrong type.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error serializing options back to TOML.
	#[error("TOML serialize error: {0}")]
	Serialize(#[from] toml::ser::Error),

	/// Error reading or writing an options file.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path to the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// An option parsed but holds an unusable value.
	#[error("invalid value for {option}: {reason}")]
	InvalidValue {
		/// Dotted option name, e.g. `search.max_visible_results`.
		option: &'static str,
		/// What is wrong with it.
		reason: String,
	},
}

/// Result type for option operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
