//! Localized title overlay.
//!
//! A title file holds one system per line as
//! `shortname<TAB>description[<TAB>reading]`. The overlay must be applied
//! while the working list is still ordered by shortname because entries are
//! located by binary search.

use std::io::BufRead;
use std::path::PathBuf;

use marquee_primitives::{search_key, search_key_joined};

use crate::info::SystemInfo;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Outcome counters for one overlay pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OverlayReport {
	pub descriptions: usize,
	pub readings: usize,
	pub unknown: usize,
	pub malformed: usize,
	pub duplicates: usize,
	pub empty: usize,
}

/// Finds `file_name` in the first directory of a `;`-separated search path that has it.
pub(crate) fn locate_titles(search_path: &str, file_name: &str) -> Option<PathBuf> {
	if file_name.is_empty() {
		return None;
	}
	search_path
		.split(';')
		.map(str::trim)
		.filter(|dir| !dir.is_empty())
		.map(|dir| PathBuf::from(dir).join(file_name))
		.find(|candidate| candidate.is_file())
}

/// Applies title lines to `list`, which must be sorted by shortname.
///
/// Entries left without a description afterwards get the catalog's own
/// description.
pub(crate) fn load_titles(mut reader: impl BufRead, list: &mut [SystemInfo]) -> OverlayReport {
	let mut report = OverlayReport::default();
	let mut buf = Vec::new();
	let mut first = true;

	loop {
		buf.clear();
		match reader.read_until(b'\n', &mut buf) {
			Ok(0) => break,
			Ok(_) => {}
			Err(error) => {
				tracing::warn!(%error, "overlay.read_failed");
				break;
			}
		}

		let text = String::from_utf8_lossy(&buf);
		let mut line = text.trim_end_matches(['\n', '\r']);
		if first {
			line = line.trim_start_matches(BYTE_ORDER_MARK);
			first = false;
		}
		apply_line(line, list, &mut report);
	}

	for info in list.iter_mut().filter(|info| info.description.is_empty()) {
		info.description = info.record().description.clone();
	}

	report
}

fn apply_line(line: &str, list: &mut [SystemInfo], report: &mut OverlayReport) {
	let Some((shortname, rest)) = line.split_once('\t') else {
		report.malformed += 1;
		return;
	};

	let Ok(position) = list.binary_search_by(|info| info.shortname().cmp(shortname)) else {
		report.unknown += 1;
		return;
	};
	let found = &mut list[position];

	let (description, reading) = match rest.split_once('\t') {
		Some((description, tail)) => (description, Some(tail.split('\t').next().unwrap_or_default())),
		None => (rest, None),
	};

	let description = description.trim();
	if description.is_empty() {
		report.empty += 1;
		tracing::warn!(shortname, "overlay.empty_description");
	} else if !found.description.is_empty() {
		report.duplicates += 1;
		tracing::warn!(shortname, kept = %found.description, ignored = description, "overlay.duplicate_description");
	} else {
		found.description = description.to_string();
		report.descriptions += 1;
	}

	let Some(reading) = reading.map(str::trim) else {
		return;
	};
	if reading.is_empty() {
		report.empty += 1;
		tracing::warn!(shortname, "overlay.empty_reading");
	} else if !found.reading.is_empty() {
		report.duplicates += 1;
		tracing::warn!(shortname, kept = %found.reading, ignored = reading, "overlay.duplicate_reading");
	} else {
		found.reading = reading.to_string();
		found.reading_key = search_key(reading);
		found.manufacturer_reading_key = search_key_joined(&found.record().manufacturer, reading);
		report.readings += 1;
	}
}

/// Copies each parent's (possibly localized) description and reading onto its clones.
///
/// Must run after [`load_titles`] and while `list` is still sorted by shortname.
pub(crate) fn populate_parents(list: &mut [SystemInfo]) {
	for position in 0..list.len() {
		let Some(parent) = list[position].record().parent.clone() else {
			continue;
		};
		let (description, reading) = match list.binary_search_by(|info| info.shortname().cmp(parent.as_str())) {
			Ok(found) => (list[found].description.clone(), list[found].reading.clone()),
			Err(_) => (parent, String::new()),
		};
		let info = &mut list[position];
		info.parent = description;
		info.parent_reading = reading;
	}
}

#[cfg(test)]
mod tests;
