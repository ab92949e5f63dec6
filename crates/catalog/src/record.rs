use bitflags::bitflags;
use serde::Deserialize;

bitflags! {
	/// Static properties of a catalogued system.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct MachineFlags: u32 {
		/// The system is a BIOS set that other systems hang off.
		const IS_BIOS_ROOT = 1 << 0;
		/// Emulation is known not to work.
		const NOT_WORKING = 1 << 1;
		/// The system has mechanical parts that cannot be emulated.
		const MECHANICAL = 1 << 2;
		/// Save states are supported.
		const SUPPORTS_SAVE = 1 << 3;
		/// The primary screen is mounted vertically.
		const SWAP_XY = 1 << 4;
	}
}

/// One media file a system may need.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RomEntry {
	pub name: String,
	pub length: u64,
	/// Hash descriptor, e.g. `"CRC(c1e6ab10) SHA1(e87e059c...)"`.
	#[serde(default)]
	pub hashes: String,
	#[serde(default)]
	pub optional: bool,
	#[serde(default)]
	pub no_dump: bool,
}

impl RomEntry {
	/// Whether the file must be present for the system to run.
	pub fn is_required(&self) -> bool {
		!self.optional && !self.no_dump
	}

	/// Whether both entries describe the same dump.
	pub fn same_dump(&self, other: &RomEntry) -> bool {
		self.length == other.length && self.hashes.trim().eq_ignore_ascii_case(other.hashes.trim())
	}
}

/// Immutable description of one system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRecord {
	/// Unique short name (the lookup key).
	pub name: String,
	/// Full default description.
	pub description: String,
	pub manufacturer: String,
	pub year: String,
	/// Shortname of the parent set, if any.
	pub parent: Option<String>,
	pub flags: MachineFlags,
	pub roms: Vec<RomEntry>,
}

impl SystemRecord {
	pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
			manufacturer: String::new(),
			year: String::new(),
			parent: None,
			flags: MachineFlags::empty(),
			roms: Vec::new(),
		}
	}

	pub fn with_manufacturer(mut self, manufacturer: impl Into<String>, year: impl Into<String>) -> Self {
		self.manufacturer = manufacturer.into();
		self.year = year.into();
		self
	}

	pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	pub fn with_flags(mut self, flags: MachineFlags) -> Self {
		self.flags |= flags;
		self
	}

	pub fn with_rom(mut self, rom: RomEntry) -> Self {
		self.roms.push(rom);
		self
	}

	pub fn is_bios_root(&self) -> bool {
		self.flags.contains(MachineFlags::IS_BIOS_ROOT)
	}

	pub fn has_parent(&self) -> bool {
		self.parent.is_some()
	}

	/// Iterates the files that must be present for the system to run.
	pub fn required_roms(&self) -> impl Iterator<Item = &RomEntry> {
		self.roms.iter().filter(|rom| rom.is_required())
	}
}
