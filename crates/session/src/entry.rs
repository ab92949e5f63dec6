/// Menu items that are not systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigAction {
	ConfigureOptions,
	ConfigureMachine,
}

impl ConfigAction {
	pub const ALL: [Self; 2] = [Self::ConfigureOptions, Self::ConfigureMachine];

	pub const fn label(self) -> &'static str {
		match self {
			Self::ConfigureOptions => "Configure Options",
			Self::ConfigureMachine => "Configure Machine",
		}
	}
}

/// A favorited system, optionally with a software item to start it with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FavoriteEntry {
	pub shortname: String,
	pub description: String,
	/// Software list item; `None` starts the system without software.
	pub software: Option<String>,
}

impl FavoriteEntry {
	pub fn machine(shortname: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			shortname: shortname.into(),
			description: description.into(),
			software: None,
		}
	}

	pub fn software(shortname: impl Into<String>, software: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			shortname: shortname.into(),
			description: description.into(),
			software: Some(software.into()),
		}
	}

	/// Whether the favorite starts the bare system.
	pub fn starts_empty(&self) -> bool {
		self.software.is_none()
	}
}

/// One row of the selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
	Config(ConfigAction),
	/// Position in the sorted system list.
	System(usize),
	Software(FavoriteEntry),
}
