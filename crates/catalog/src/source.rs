use std::sync::Arc;

use crate::record::SystemRecord;

/// Read-only access to an enumerable catalog snapshot.
///
/// Records must be ordered by shortname in byte order and indices must stay
/// stable for the lifetime of the source.
pub trait CatalogSource: Send + Sync + 'static {
	/// Number of records, including the placeholder.
	fn total_count(&self) -> usize;

	/// Returns the record at `index`.
	///
	/// # Panics
	///
	/// Panics if `index >= total_count()`.
	fn record_at(&self, index: usize) -> &Arc<SystemRecord>;

	/// Looks up a record index by exact shortname.
	fn find_by_shortname(&self, name: &str) -> Option<usize>;

	/// Index of the empty placeholder record that consumers must skip.
	fn placeholder_index(&self) -> Option<usize>;

	/// Returns the parent index when `index` is a clone of a non-BIOS system.
	fn clone_of(&self, index: usize) -> Option<usize> {
		let parent = self.record_at(index).parent.as_deref()?;
		let parent_index = self.find_by_shortname(parent)?;
		(!self.record_at(parent_index).is_bios_root()).then_some(parent_index)
	}
}
