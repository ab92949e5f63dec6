use super::*;

const DOCUMENT: &str = r#"
[[system]]
name = "pacman"
description = "Pac-Man (Midway)"
manufacturer = "Namco (Midway license)"
year = "1980"
parent = "puckman"
supports-save = true

[[system.rom]]
name = "pacman.6e"
length = 4096
hashes = "CRC(c1e6ab10)"

[[system]]
name = "puckman"
description = "Puck Man (Japan set 1)"
manufacturer = "Namco"
year = "1980"

[[system]]
name = "neogeo"
description = "Neo-Geo"
manufacturer = "SNK"
year = "1990"
bios = true
parent = "0"
"#;

#[test]
fn sorts_by_shortname_and_adds_placeholder() {
	let catalog = Catalog::from_toml_str(DOCUMENT).expect("parse catalog");
	let names: Vec<&str> = catalog.iter().map(|record| record.name.as_str()).collect();
	assert_eq!(names, vec![PLACEHOLDER_NAME, "neogeo", "pacman", "puckman"]);
	assert_eq!(catalog.placeholder_index(), Some(0));
	assert_eq!(catalog.total_count(), 4);
}

#[test]
fn parses_flags_parent_and_roms() {
	let catalog = Catalog::from_toml_str(DOCUMENT).expect("parse catalog");
	let pacman = catalog.record_at(catalog.find_by_shortname("pacman").expect("pacman"));
	assert_eq!(pacman.parent.as_deref(), Some("puckman"));
	assert!(pacman.flags.contains(MachineFlags::SUPPORTS_SAVE));
	assert_eq!(pacman.required_roms().count(), 1);

	let neogeo = catalog.record_at(catalog.find_by_shortname("neogeo").expect("neogeo"));
	assert!(neogeo.is_bios_root());
	assert_eq!(neogeo.parent, None, "\"0\" parent means no parent");
}

#[test]
fn clone_of_skips_bios_parents() {
	let catalog = Catalog::new([
		SystemRecord::new("neogeo", "Neo-Geo").with_flags(MachineFlags::IS_BIOS_ROOT),
		SystemRecord::new("mslug", "Metal Slug").with_parent("neogeo"),
		SystemRecord::new("puckman", "Puck Man"),
		SystemRecord::new("pacman", "Pac-Man").with_parent("puckman"),
	])
	.expect("build catalog");

	let mslug = catalog.find_by_shortname("mslug").expect("mslug");
	let pacman = catalog.find_by_shortname("pacman").expect("pacman");
	assert_eq!(catalog.clone_of(mslug), None);
	assert_eq!(catalog.clone_of(pacman), catalog.find_by_shortname("puckman"));
}

#[test]
fn rejects_duplicates_and_bad_names() {
	let err = Catalog::new([SystemRecord::new("a", "A"), SystemRecord::new("a", "A again")]).unwrap_err();
	assert!(matches!(err, CatalogError::DuplicateShortname(name) if name == "a"));

	let err = Catalog::new([SystemRecord::new("has space", "Bad")]).unwrap_err();
	assert!(matches!(err, CatalogError::InvalidShortname(_)));
}

#[test]
fn load_reports_missing_file() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let err = Catalog::load(dir.path().join("missing.toml")).unwrap_err();
	assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn load_reads_file() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let path = dir.path().join("catalog.toml");
	std::fs::write(&path, DOCUMENT).expect("write catalog");
	let catalog = Catalog::load(&path).expect("load catalog");
	assert_eq!(catalog.len(), 4);
}

#[test]
fn demo_catalog_parses() {
	let catalog = Catalog::from_toml_str(include_str!("../../../../demos/catalog.toml")).expect("parse demo catalog");
	assert_eq!(catalog.len(), 9);
	let galaxiana = catalog.find_by_shortname("galaxiana").expect("galaxiana");
	assert_eq!(catalog.clone_of(galaxiana), catalog.find_by_shortname("galaxian"));
}
