use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::record::{MachineFlags, RomEntry, SystemRecord};
use crate::source::CatalogSource;

/// Shortname of the empty placeholder record every catalog carries.
pub const PLACEHOLDER_NAME: &str = "___empty";

/// In-memory catalog ordered by shortname.
#[derive(Debug, Clone)]
pub struct Catalog {
	records: Vec<Arc<SystemRecord>>,
	placeholder: usize,
}

impl Catalog {
	/// Builds a catalog, sorting by shortname and adding the placeholder record.
	pub fn new(records: impl IntoIterator<Item = SystemRecord>) -> Result<Self> {
		let mut records: Vec<SystemRecord> = records.into_iter().collect();
		for record in &records {
			if record.name.is_empty() || record.name.chars().any(char::is_whitespace) {
				return Err(CatalogError::InvalidShortname(record.name.clone()));
			}
		}

		if !records.iter().any(|record| record.name == PLACEHOLDER_NAME) {
			records.push(SystemRecord::new(PLACEHOLDER_NAME, "Empty driver"));
		}

		records.sort_by(|a, b| a.name.cmp(&b.name));
		if let Some(pair) = records.windows(2).find(|pair| pair[0].name == pair[1].name) {
			return Err(CatalogError::DuplicateShortname(pair[0].name.clone()));
		}

		let placeholder = records
			.binary_search_by(|record| record.name.as_str().cmp(PLACEHOLDER_NAME))
			.map_err(|_| CatalogError::InvalidShortname(PLACEHOLDER_NAME.to_string()))?;

		Ok(Self {
			records: records.into_iter().map(Arc::new).collect(),
			placeholder,
		})
	}

	/// Parses a TOML catalog document made of `[[system]]` tables.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		let document: CatalogDocument = toml::from_str(text)?;
		Self::new(document.systems.into_iter().map(SystemDef::into_record))
	}

	/// Reads and parses a TOML catalog file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| CatalogError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	/// Iterates all records in shortname order, placeholder included.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<SystemRecord>> {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl CatalogSource for Catalog {
	fn total_count(&self) -> usize {
		self.records.len()
	}

	fn record_at(&self, index: usize) -> &Arc<SystemRecord> {
		&self.records[index]
	}

	fn find_by_shortname(&self, name: &str) -> Option<usize> {
		self.records.binary_search_by(|record| record.name.as_str().cmp(name)).ok()
	}

	fn placeholder_index(&self) -> Option<usize> {
		Some(self.placeholder)
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
	#[serde(default, rename = "system")]
	systems: Vec<SystemDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct SystemDef {
	name: String,
	description: String,
	#[serde(default)]
	manufacturer: String,
	#[serde(default)]
	year: String,
	#[serde(default)]
	parent: Option<String>,
	#[serde(default)]
	bios: bool,
	#[serde(default)]
	not_working: bool,
	#[serde(default)]
	mechanical: bool,
	#[serde(default)]
	supports_save: bool,
	#[serde(default)]
	vertical: bool,
	#[serde(default, rename = "rom")]
	roms: Vec<RomEntry>,
}

impl SystemDef {
	fn into_record(self) -> SystemRecord {
		let mut flags = MachineFlags::empty();
		flags.set(MachineFlags::IS_BIOS_ROOT, self.bios);
		flags.set(MachineFlags::NOT_WORKING, self.not_working);
		flags.set(MachineFlags::MECHANICAL, self.mechanical);
		flags.set(MachineFlags::SUPPORTS_SAVE, self.supports_save);
		flags.set(MachineFlags::SWAP_XY, self.vertical);

		SystemRecord {
			name: self.name,
			description: self.description,
			manufacturer: self.manufacturer,
			year: self.year,
			parent: self.parent.filter(|parent| !parent.is_empty() && parent != "0"),
			flags,
			roms: self.roms,
		}
	}
}

#[cfg(test)]
mod tests;
