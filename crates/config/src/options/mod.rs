use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// File name of the persisted availability list inside `ui_path`.
pub const AVAILABLE_LIST_FILE: &str = "available.ini";

/// All options read by the selection menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiOptions {
	pub paths: PathsOptions,
	pub search: SearchOptions,
	pub session: SessionOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsOptions {
	/// `;`-separated directories searched for the title file.
	pub history_path: String,
	/// Title file name; empty disables the overlay.
	pub system_names: String,
	/// `;`-separated media directories.
	pub media_path: String,
	pub ui_path: String,
}

impl Default for PathsOptions {
	fn default() -> Self {
		Self {
			history_path: "history;dats;.".to_string(),
			system_names: String::new(),
			media_path: "roms".to_string(),
			ui_path: "ui".to_string(),
		}
	}
}

/// Distance used by the search ranker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMetric {
	#[default]
	JaroWinkler,
	Levenshtein,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
	pub metric: SearchMetric,
	/// Upper bound on ranked entries shown while searching.
	pub max_visible_results: usize,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			metric: SearchMetric::default(),
			max_visible_results: 200,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOptions {
	/// Reselect the last used machine when the menu opens.
	pub remember_last: bool,
	pub last_used_machine: String,
	/// Filter config string, `"<Filter Name>[,<value>]"`.
	pub last_used_filter: String,
	/// Do not count systems without required media as available.
	pub hide_romless: bool,
}

impl Default for SessionOptions {
	fn default() -> Self {
		Self {
			remember_last: true,
			last_used_machine: String::new(),
			last_used_filter: String::new(),
			hide_romless: false,
		}
	}
}

impl UiOptions {
	/// Parses and validates options from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		let options: Self = toml::from_str(text)?;
		options.validate()?;
		Ok(options)
	}

	/// Reads options from `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	/// Reads options from `path`, falling back to defaults when it does not exist.
	pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if path.exists() { Self::load(path) } else { Ok(Self::default()) }
	}

	pub fn to_toml_string(&self) -> Result<String> {
		Ok(toml::to_string(self)?)
	}

	/// Writes options to `path`, creating parent directories.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let io_error = |error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		};
		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent).map_err(io_error)?;
		}
		std::fs::write(path, self.to_toml_string()?).map_err(io_error)
	}

	fn validate(&self) -> Result<()> {
		if self.search.max_visible_results == 0 {
			return Err(ConfigError::InvalidValue {
				option: "search.max_visible_results",
				reason: "must be at least 1".to_string(),
			});
		}
		Ok(())
	}

	/// Title search path and file name, as passed to the cache build.
	pub fn title_source(&self) -> (&str, &str) {
		(&self.paths.history_path, &self.paths.system_names)
	}

	/// Media directories from `media_path`, in search order.
	pub fn media_dirs(&self) -> Vec<PathBuf> {
		split_search_path(&self.paths.media_path)
	}

	pub fn available_list_path(&self) -> PathBuf {
		Path::new(&self.paths.ui_path).join(AVAILABLE_LIST_FILE)
	}
}

fn split_search_path(path: &str) -> Vec<PathBuf> {
	path.split(';').map(str::trim).filter(|dir| !dir.is_empty()).map(PathBuf::from).collect()
}
