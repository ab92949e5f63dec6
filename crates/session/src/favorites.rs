use marquee_cache::FavoriteLookup;
use marquee_primitives::CollationKey;
use parking_lot::RwLock;

use crate::entry::FavoriteEntry;

/// Shared favorites store.
///
/// Entries are unique by shortname and software item.
#[derive(Debug, Default)]
pub struct Favorites {
	entries: RwLock<Vec<FavoriteEntry>>,
}

impl Favorites {
	pub fn new(entries: impl IntoIterator<Item = FavoriteEntry>) -> Self {
		let favorites = Self::default();
		for entry in entries {
			favorites.add(entry);
		}
		favorites
	}

	/// Adds `entry`; returns false if it was already present.
	pub fn add(&self, entry: FavoriteEntry) -> bool {
		let mut entries = self.entries.write();
		if entries.iter().any(|existing| same_item(existing, &entry.shortname, entry.software.as_deref())) {
			return false;
		}
		tracing::debug!(shortname = %entry.shortname, software = ?entry.software, "favorites.add");
		entries.push(entry);
		true
	}

	/// Removes the favorite for `shortname` and `software`; returns whether one existed.
	pub fn remove(&self, shortname: &str, software: Option<&str>) -> bool {
		let mut entries = self.entries.write();
		let before = entries.len();
		entries.retain(|existing| !same_item(existing, shortname, software));
		before != entries.len()
	}

	pub fn contains(&self, shortname: &str, software: Option<&str>) -> bool {
		self.entries.read().iter().any(|existing| same_item(existing, shortname, software))
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Snapshot of all favorites in display order: collated description, then shortname.
	pub fn sorted(&self) -> Vec<FavoriteEntry> {
		let mut entries = self.entries.read().clone();
		entries.sort_by_cached_key(|entry| (CollationKey::new(&entry.description), entry.shortname.clone(), entry.software.clone()));
		entries
	}
}

impl FavoriteLookup for Favorites {
	fn is_favorite(&self, shortname: &str) -> bool {
		self.contains(shortname, None)
	}
}

fn same_item(entry: &FavoriteEntry, shortname: &str, software: Option<&str>) -> bool {
	entry.shortname == shortname && entry.software.as_deref() == software
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn add_is_unique_per_item() {
		let favorites = Favorites::default();
		assert!(favorites.add(FavoriteEntry::machine("nes", "Nintendo Entertainment System")));
		assert!(!favorites.add(FavoriteEntry::machine("nes", "NES again")));
		assert!(favorites.add(FavoriteEntry::software("nes", "smb", "Super Mario Bros.")));
		assert_eq!(favorites.len(), 2);

		assert!(favorites.is_favorite("nes"));
		assert!(favorites.contains("nes", Some("smb")));
		assert!(favorites.remove("nes", None));
		assert!(!favorites.is_favorite("nes"));
		assert!(!favorites.remove("nes", None));
	}

	#[test]
	fn sorted_uses_collated_descriptions() {
		let favorites = Favorites::new([
			FavoriteEntry::machine("xevious", "Xevious"),
			FavoriteEntry::machine("1942", "1942"),
			FavoriteEntry::machine("galaga", "galaga"),
			FavoriteEntry::machine("digdug", "Dig Dug"),
		]);
		let order: Vec<String> = favorites.sorted().into_iter().map(|entry| entry.shortname).collect();
		assert_eq!(order, vec!["1942", "digdug", "galaga", "xevious"]);
	}
}
