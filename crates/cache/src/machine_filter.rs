use marquee_catalog::MachineFlags;

use crate::filter_index::manufacturer_names;
use crate::info::SystemInfo;

/// Answers whether a system is marked as a favorite.
pub trait FavoriteLookup {
	fn is_favorite(&self, shortname: &str) -> bool;
}

/// Lookup for contexts without a favorites store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFavorites;

impl FavoriteLookup for NoFavorites {
	fn is_favorite(&self, _shortname: &str) -> bool {
		false
	}
}

/// Predicate selecting which systems a menu lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MachineFilter {
	#[default]
	All,
	Available,
	Unavailable,
	Working,
	NotWorking,
	Mechanical,
	NotMechanical,
	Favorites,
	Bios,
	NotBios,
	Parents,
	Clones,
	Manufacturer(String),
	Year(String),
	SaveSupported,
	SaveUnsupported,
	Vertical,
	Horizontal,
}

impl MachineFilter {
	/// Filters that take no value, in menu order.
	pub const SIMPLE: [MachineFilter; 16] = [
		Self::All,
		Self::Available,
		Self::Unavailable,
		Self::Working,
		Self::NotWorking,
		Self::Mechanical,
		Self::NotMechanical,
		Self::Favorites,
		Self::Bios,
		Self::NotBios,
		Self::Parents,
		Self::Clones,
		Self::SaveSupported,
		Self::SaveUnsupported,
		Self::Vertical,
		Self::Horizontal,
	];

	/// Stable name used in option strings.
	pub const fn config_name(&self) -> &'static str {
		match self {
			Self::All => "All",
			Self::Available => "Available",
			Self::Unavailable => "Unavailable",
			Self::Working => "Working",
			Self::NotWorking => "Not Working",
			Self::Mechanical => "Mechanical",
			Self::NotMechanical => "Not Mechanical",
			Self::Favorites => "Favorites",
			Self::Bios => "BIOS",
			Self::NotBios => "Not BIOS",
			Self::Parents => "Parents",
			Self::Clones => "Clones",
			Self::Manufacturer(_) => "Manufacturer",
			Self::Year(_) => "Year",
			Self::SaveSupported => "Save Supported",
			Self::SaveUnsupported => "Save Unsupported",
			Self::Vertical => "Vertical Screen",
			Self::Horizontal => "Horizontal Screen",
		}
	}

	/// Parses `"<name>[,<value>]"`; value filters require a non-empty value.
	pub fn from_config_string(text: &str) -> Option<Self> {
		let (name, value) = match text.split_once(',') {
			Some((name, value)) => (name.trim(), Some(value.trim())),
			None => (text.trim(), None),
		};
		let value = value.filter(|value| !value.is_empty()).map(str::to_string);

		match name {
			"Manufacturer" => value.map(Self::Manufacturer),
			"Year" => value.map(Self::Year),
			_ => Self::SIMPLE.into_iter().find(|filter| filter.config_name() == name),
		}
	}

	/// Formats the filter the way [`Self::from_config_string`] reads it.
	pub fn config_string(&self) -> String {
		match self {
			Self::Manufacturer(value) | Self::Year(value) => format!("{},{value}", self.config_name()),
			_ => self.config_name().to_string(),
		}
	}

	/// Whether `info` passes the filter.
	pub fn apply(&self, info: &SystemInfo, favorites: &impl FavoriteLookup) -> bool {
		let flags = info.record().flags;
		match self {
			Self::All => true,
			Self::Available => info.is_available(),
			Self::Unavailable => !info.is_available(),
			Self::Working => !flags.contains(MachineFlags::NOT_WORKING),
			Self::NotWorking => flags.contains(MachineFlags::NOT_WORKING),
			Self::Mechanical => flags.contains(MachineFlags::MECHANICAL),
			Self::NotMechanical => !flags.contains(MachineFlags::MECHANICAL),
			Self::Favorites => favorites.is_favorite(info.shortname()),
			Self::Bios => flags.contains(MachineFlags::IS_BIOS_ROOT),
			Self::NotBios => !flags.contains(MachineFlags::IS_BIOS_ROOT),
			Self::Parents => !info.is_clone(),
			Self::Clones => info.is_clone(),
			Self::Manufacturer(value) => manufacturer_names(&info.record().manufacturer).any(|name| name == value),
			Self::Year(value) => info.record().year == *value,
			Self::SaveSupported => flags.contains(MachineFlags::SUPPORTS_SAVE),
			Self::SaveUnsupported => !flags.contains(MachineFlags::SUPPORTS_SAVE),
			Self::Vertical => flags.contains(MachineFlags::SWAP_XY),
			Self::Horizontal => !flags.contains(MachineFlags::SWAP_XY),
		}
	}
}
