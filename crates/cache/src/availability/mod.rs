//! Media availability pass.
//!
//! Availability is not part of the staged build: it is computed separately
//! (by scanning media directories or loading a persisted list) and stored
//! into the already published entries through their atomic flag.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use marquee_catalog::CatalogSource;
use rustc_hash::FxHashSet;

use crate::error::{AvailabilityError, Result};
use crate::info::SystemInfo;

/// Version tag written to availability lists; lists with another tag are rescanned.
pub const AVAILABLE_LIST_VERSION: &str = concat!("marquee-", env!("CARGO_PKG_VERSION"));

const AVAILABLE_LIST_HEADER: &str = "# marquee available systems";

/// Marks catalog indices whose media can be found, indexed like the catalog.
///
/// Every directory entry name up to its first `.` is lowercased and matched
/// against shortnames. Unless `hide_romless` is set, systems that need no
/// media, and clones whose required media is all shared with an available
/// parent, are marked too.
pub fn scan_media(catalog: &dyn CatalogSource, dirs: &[PathBuf], hide_romless: bool) -> Vec<bool> {
	let total = catalog.total_count();
	let mut included = vec![false; total];

	for dir in dirs {
		let entries = match std::fs::read_dir(dir) {
			Ok(entries) => entries,
			Err(error) => {
				tracing::debug!(dir = %dir.display(), %error, "availability.scan.skip_dir");
				continue;
			}
		};
		for entry in entries.flatten() {
			let file_name = entry.file_name();
			let file_name = file_name.to_string_lossy();
			let stem = file_name.split('.').next().unwrap_or_default().to_lowercase();
			if let Some(index) = catalog.find_by_shortname(&stem) {
				included[index] = true;
			}
		}
	}

	if !hide_romless {
		let placeholder = catalog.placeholder_index();
		for index in 0..total {
			if !included[index] && Some(index) != placeholder && needs_no_own_media(catalog, index, &included) {
				included[index] = true;
			}
		}
	}

	tracing::debug!(dirs = dirs.len(), available = included.iter().filter(|&&found| found).count(), "availability.scan.complete");
	included
}

fn needs_no_own_media(catalog: &dyn CatalogSource, index: usize, included: &[bool]) -> bool {
	let record = catalog.record_at(index);
	let mut required = record.required_roms().peekable();
	if required.peek().is_none() {
		return true;
	}

	let Some(parent) = catalog.clone_of(index).filter(|&parent| included[parent]) else {
		return false;
	};
	let parent = catalog.record_at(parent);
	if record.roms == parent.roms {
		return true;
	}
	required.all(|rom| parent.required_roms().any(|candidate| candidate.same_dump(rom)))
}

/// Copies scan results onto the entries, looked up by catalog index.
pub fn apply_included(list: &[SystemInfo], included: &[bool]) {
	for info in list {
		info.set_available(included.get(info.index()).copied().unwrap_or(false));
	}
}

/// Copies a loaded shortname set onto the entries.
pub fn apply_names(list: &[SystemInfo], names: &FxHashSet<String>) {
	for info in list {
		info.set_available(names.contains(info.shortname()));
	}
}

/// Loads a persisted availability list.
///
/// Returns `Ok(None)` when the file does not exist or was written with a
/// different version tag, in which case the caller should rescan.
pub fn load_available_list(path: &Path, version: &str) -> Result<Option<FxHashSet<String>>> {
	let io_error = |error| AvailabilityError::Io {
		path: path.to_path_buf(),
		error,
	};
	let file = match File::open(path) {
		Ok(file) => file,
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(error) => return Err(io_error(error)),
	};

	let mut lines = BufReader::new(file).lines();
	let _header = lines.next().transpose().map_err(io_error)?;
	let tag = lines.next().transpose().map_err(io_error)?.unwrap_or_default();
	if tag.trim_end() != version {
		tracing::debug!(path = %path.display(), found = %tag, expected = version, "availability.list.version_mismatch");
		return Ok(None);
	}

	let mut names = FxHashSet::default();
	for line in lines {
		let line = line.map_err(io_error)?;
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		if line.starts_with('[') {
			break;
		}
		names.insert(line.to_string());
	}
	Ok(Some(names))
}

/// Persists the shortnames of every available entry.
pub fn save_available_list(path: &Path, version: &str, list: &[SystemInfo]) -> Result<()> {
	let io_error = |error| AvailabilityError::Io {
		path: path.to_path_buf(),
		error,
	};
	let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
	writeln!(writer, "{AVAILABLE_LIST_HEADER}").map_err(io_error)?;
	writeln!(writer, "{version}").map_err(io_error)?;
	for info in list.iter().filter(|info| info.is_available()) {
		writeln!(writer, "{}", info.shortname()).map_err(io_error)?;
	}
	writer.flush().map_err(io_error)
}

#[cfg(test)]
mod tests;
