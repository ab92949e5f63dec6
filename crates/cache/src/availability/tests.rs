use std::path::PathBuf;

use marquee_catalog::{Catalog, CatalogSource, MachineFlags, RomEntry, SystemRecord};
use pretty_assertions::assert_eq;

use super::*;
use crate::build::populate_list;
use crate::filter_index::FilterIndex;

fn rom(name: &str, length: u64, hashes: &str) -> RomEntry {
	RomEntry {
		name: name.to_string(),
		length,
		hashes: hashes.to_string(),
		optional: false,
		no_dump: false,
	}
}

fn catalog() -> Catalog {
	Catalog::new(vec![
		SystemRecord::new("galaxian", "Galaxian").with_rom(rom("g1", 2048, "CRC(1)")),
		SystemRecord::new("galaxiana", "Galaxian (set 2)")
			.with_parent("galaxian")
			.with_rom(rom("g1", 2048, "CRC(1)")),
		SystemRecord::new("galaxianb", "Galaxian (bootleg)")
			.with_parent("galaxian")
			.with_rom(rom("g1", 2048, "CRC(1)"))
			.with_rom(rom("b1", 1024, "CRC(b)")),
		SystemRecord::new("neogeo", "Neo-Geo").with_flags(MachineFlags::IS_BIOS_ROOT).with_rom(rom("sp", 128, "CRC(n)")),
		SystemRecord::new("mslug", "Metal Slug").with_parent("neogeo").with_rom(rom("sp", 128, "CRC(n)")),
		SystemRecord::new("pong", "Pong"),
		SystemRecord::new("undumped", "Undumped").with_rom(RomEntry {
			no_dump: true,
			..rom("u1", 16, "")
		}),
	])
	.expect("build catalog")
}

fn available_names(catalog: &Catalog, included: &[bool]) -> Vec<String> {
	(0..catalog.total_count()).filter(|&index| included[index]).map(|index| catalog.record_at(index).name.clone()).collect()
}

fn media_dir(files: &[&str]) -> tempfile::TempDir {
	let dir = tempfile::tempdir().expect("create tempdir");
	for file in files {
		std::fs::write(dir.path().join(file), b"").expect("write media file");
	}
	dir
}

#[test]
fn scan_matches_file_stems_case_insensitively() {
	let catalog = catalog();
	let dir = media_dir(&["GALAXIAN.zip", "neogeo.7z", "unrelated.zip"]);
	let included = scan_media(&catalog, &[dir.path().to_path_buf()], true);

	assert_eq!(available_names(&catalog, &included), vec!["galaxian", "neogeo"]);
}

#[test]
fn romless_and_shared_media_systems_count_as_available() {
	let catalog = catalog();
	let dir = media_dir(&["galaxian.zip"]);
	let included = scan_media(&catalog, &[dir.path().to_path_buf()], false);

	assert_eq!(available_names(&catalog, &included), vec!["galaxian", "galaxiana", "pong", "undumped"]);
}

#[test]
fn scan_ignores_missing_directories() {
	let catalog = catalog();
	let dir = media_dir(&["pong"]);
	let dirs = vec![PathBuf::from("/nonexistent/media/dir"), dir.path().to_path_buf()];
	let included = scan_media(&catalog, &dirs, true);

	assert_eq!(available_names(&catalog, &included), vec!["pong"]);
	assert!(!included[catalog.placeholder_index().expect("placeholder")]);
}

#[test]
fn available_list_round_trips() {
	let catalog = catalog();
	let (list, _) = populate_list(&catalog, true, &mut FilterIndex::default());
	let dir = media_dir(&["galaxian.zip", "pong.zip"]);
	apply_included(&list, &scan_media(&catalog, &[dir.path().to_path_buf()], true));

	let path = dir.path().join("available.ini");
	save_available_list(&path, AVAILABLE_LIST_VERSION, &list).expect("save list");
	let names = load_available_list(&path, AVAILABLE_LIST_VERSION).expect("load list").expect("version matches");

	let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
	sorted.sort_unstable();
	assert_eq!(sorted, vec!["galaxian", "pong"]);

	for info in &list {
		info.set_available(false);
	}
	apply_names(&list, &names);
	assert!(list.iter().find(|info| info.shortname() == "pong").is_some_and(SystemInfo::is_available));
	assert!(!list.iter().find(|info| info.shortname() == "mslug").is_some_and(SystemInfo::is_available));
}

#[test]
fn stale_or_missing_lists_request_a_rescan() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let path = dir.path().join("available.ini");
	assert!(load_available_list(&path, AVAILABLE_LIST_VERSION).expect("missing file is not an error").is_none());

	std::fs::write(&path, "# header\nmarquee-0.0.1\npong\n").expect("write list");
	assert!(load_available_list(&path, AVAILABLE_LIST_VERSION).expect("load list").is_none());
}

#[test]
fn list_reader_skips_comments_and_stops_at_sections() {
	let dir = tempfile::tempdir().expect("create tempdir");
	let path = dir.path().join("available.ini");
	std::fs::write(&path, "# header\nv1\r\npong\n# comment\n\ngalaxian\n[ROOT_FOLDER]\nmslug\n").expect("write list");

	let names = load_available_list(&path, "v1").expect("load list").expect("version matches");
	assert_eq!(names.len(), 2);
	assert!(names.contains("pong") && names.contains("galaxian"));
}
