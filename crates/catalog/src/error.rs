//! Error types for catalog loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// Error parsing the TOML catalog document.
	#[error("catalog parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a catalog file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Two records share a shortname.
	#[error("duplicate shortname: {0}")]
	DuplicateShortname(String),

	/// A shortname is empty or contains whitespace.
	#[error("invalid shortname: {0:?}")]
	InvalidShortname(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
