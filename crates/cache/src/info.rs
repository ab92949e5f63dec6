use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use marquee_catalog::SystemRecord;

use crate::stage::Stages;

/// Normalized search forms cached per system, each published by its own stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedField {
	Shortname,
	Description,
	ManufacturerDescription,
	DefaultDescription,
	ManufacturerDefaultDescription,
}

impl NormalizedField {
	/// All fields in build (and search) order.
	pub const ALL: [Self; 5] = [
		Self::Shortname,
		Self::Description,
		Self::ManufacturerDescription,
		Self::DefaultDescription,
		Self::ManufacturerDefaultDescription,
	];

	/// Stage whose publication makes this field readable.
	pub const fn stage(self) -> Stages {
		match self {
			Self::Shortname => Stages::NORMALIZED_SHORTNAME,
			Self::Description => Stages::NORMALIZED_DESCRIPTION,
			Self::ManufacturerDescription => Stages::NORMALIZED_MANUFACTURER_DESCRIPTION,
			Self::DefaultDescription => Stages::NORMALIZED_DEFAULT_DESCRIPTION,
			Self::ManufacturerDefaultDescription => Stages::NORMALIZED_MANUFACTURER_DEFAULT_DESCRIPTION,
		}
	}

	const fn slot(self) -> usize {
		self as usize
	}
}

/// Cached, display-ready view of one catalog record.
///
/// Text fields are written by the build thread before the sorted list is
/// published and never change afterwards. Normalized search forms are
/// set-once slots filled after publication; each becomes readable once its
/// [`NormalizedField::stage`] is available.
#[derive(Debug)]
pub struct SystemInfo {
	record: Arc<SystemRecord>,
	index: usize,
	pub(crate) is_clone: bool,
	pub(crate) description: String,
	pub(crate) parent: String,
	pub(crate) reading: String,
	pub(crate) parent_reading: String,
	pub(crate) reading_key: String,
	pub(crate) manufacturer_reading_key: String,
	normalized: [OnceLock<Box<str>>; NormalizedField::ALL.len()],
	available: AtomicBool,
}

impl SystemInfo {
	pub(crate) fn new(record: Arc<SystemRecord>, index: usize) -> Self {
		Self {
			record,
			index,
			is_clone: false,
			description: String::new(),
			parent: String::new(),
			reading: String::new(),
			parent_reading: String::new(),
			reading_key: String::new(),
			manufacturer_reading_key: String::new(),
			normalized: Default::default(),
			available: AtomicBool::new(false),
		}
	}

	/// Catalog record this entry wraps.
	pub fn record(&self) -> &SystemRecord {
		&self.record
	}

	/// Ordinal index of the record in the catalog.
	pub fn index(&self) -> usize {
		self.index
	}

	pub fn shortname(&self) -> &str {
		&self.record.name
	}

	/// True when the parent exists and is not a BIOS root.
	pub fn is_clone(&self) -> bool {
		self.is_clone
	}

	/// Description shown in menus, possibly localized by a title overlay.
	pub fn description(&self) -> &str {
		&self.description
	}

	/// Parent's description, or the parent shortname when it is not catalogued.
	pub fn parent_description(&self) -> &str {
		&self.parent
	}

	/// Phonetic reading of the description, empty unless supplied by an overlay.
	pub fn reading(&self) -> &str {
		&self.reading
	}

	pub fn parent_reading(&self) -> &str {
		&self.parent_reading
	}

	/// Name used as the primary sort key: the reading when present.
	pub fn display_name(&self) -> &str {
		if self.reading.is_empty() { &self.description } else { &self.reading }
	}

	/// Parent name used when grouping clones: the parent reading when present.
	pub fn parent_display_name(&self) -> &str {
		if self.parent_reading.is_empty() {
			&self.parent
		} else {
			&self.parent_reading
		}
	}

	/// Normalized reading, available together with the sorted list.
	pub fn reading_key(&self) -> Option<&str> {
		(!self.reading_key.is_empty()).then_some(self.reading_key.as_str())
	}

	/// Normalized `"<manufacturer> <reading>"`, available together with the sorted list.
	pub fn manufacturer_reading_key(&self) -> Option<&str> {
		(!self.manufacturer_reading_key.is_empty()).then_some(self.manufacturer_reading_key.as_str())
	}

	/// Returns a normalized search form, or `None` before its stage is published.
	pub fn normalized(&self, field: NormalizedField) -> Option<&str> {
		self.normalized[field.slot()].get().map(|value| &**value)
	}

	pub(crate) fn set_normalized(&self, field: NormalizedField, value: String) {
		if self.normalized[field.slot()].set(value.into_boxed_str()).is_err() {
			tracing::debug!(shortname = self.shortname(), ?field, "cache.normalized.already_set");
		}
	}

	/// Whether required media is present; filled by a separate availability pass.
	pub fn is_available(&self) -> bool {
		self.available.load(Ordering::Acquire)
	}

	pub fn set_available(&self, available: bool) {
		self.available.store(available, Ordering::Release);
	}
}
