use std::io::Cursor;

use marquee_catalog::{Catalog, CatalogSource, SystemRecord};
use pretty_assertions::assert_eq;

use super::*;
use crate::build::populate_list;
use crate::filter_index::FilterIndex;

fn bare_list() -> Vec<SystemInfo> {
	let catalog = Catalog::new(vec![
		SystemRecord::new("bar", "Bar Default").with_manufacturer("Acme", "1985"),
		SystemRecord::new("foo", "Foo Default").with_manufacturer("Acme", "1984"),
		SystemRecord::new("foo2", "Foo Default II").with_parent("foo"),
		SystemRecord::new("orphan", "Orphan").with_parent("missing"),
	])
	.expect("build catalog");
	let (mut list, _) = populate_list(&catalog, false, &mut FilterIndex::default());
	list.remove(catalog.placeholder_index().expect("placeholder"));
	list
}

fn find<'a>(list: &'a [SystemInfo], shortname: &str) -> &'a SystemInfo {
	list.iter().find(|info| info.shortname() == shortname).expect("entry present")
}

#[test]
fn applies_description_and_reading() {
	let mut list = bare_list();
	let report = load_titles(Cursor::new("foo\tFoo Description\tふー\n"), &mut list);

	let foo = find(&list, "foo");
	assert_eq!(foo.description(), "Foo Description");
	assert_eq!(foo.reading(), "ふー");
	assert_eq!(foo.reading_key(), Some(search_key("ふー").as_str()));
	assert_eq!(foo.manufacturer_reading_key(), Some(search_key_joined("Acme", "ふー").as_str()));
	assert_eq!(report.descriptions, 1);
	assert_eq!(report.readings, 1);
}

#[test]
fn missing_descriptions_fall_back_to_catalog() {
	let mut list = bare_list();
	load_titles(Cursor::new("foo\tFoo Description\n"), &mut list);

	assert_eq!(find(&list, "bar").description(), "Bar Default");
	assert_eq!(find(&list, "bar").reading_key(), None);
	assert!(list.iter().all(|info| !info.description().is_empty()));
}

#[test]
fn first_value_wins_on_duplicates() {
	let mut list = bare_list();
	let report = load_titles(Cursor::new("foo\tFirst\tいち\nfoo\tSecond\tに\n"), &mut list);

	let foo = find(&list, "foo");
	assert_eq!(foo.description(), "First");
	assert_eq!(foo.reading(), "いち");
	assert_eq!(report.duplicates, 2);
}

#[test]
fn skips_malformed_unknown_and_empty_values() {
	let mut list = bare_list();
	let text = "no tab here\nzzz\tNobody\n\nbar\t\t\nfoo\tFoo\r\n";
	let report = load_titles(Cursor::new(text), &mut list);

	assert_eq!(report.malformed, 2);
	assert_eq!(report.unknown, 1);
	assert_eq!(report.empty, 2);
	assert_eq!(find(&list, "bar").description(), "Bar Default");
	assert_eq!(find(&list, "foo").description(), "Foo");
}

#[test]
fn strips_byte_order_mark_and_tolerates_invalid_utf8() {
	let mut list = bare_list();
	let mut bytes = "\u{feff}bar\tBar Title\n".as_bytes().to_vec();
	bytes.extend_from_slice(b"foo\tF\xffoo\n");
	load_titles(Cursor::new(bytes), &mut list);

	assert_eq!(find(&list, "bar").description(), "Bar Title");
	assert_eq!(find(&list, "foo").description(), "F\u{fffd}oo");
}

#[test]
fn parents_take_localized_names() {
	let mut list = bare_list();
	load_titles(Cursor::new("foo\tFoo Title\tふー\n"), &mut list);
	populate_parents(&mut list);

	let clone = find(&list, "foo2");
	assert_eq!(clone.parent_description(), "Foo Title");
	assert_eq!(clone.parent_reading(), "ふー");
	assert_eq!(clone.parent_display_name(), "ふー");
	assert_eq!(find(&list, "orphan").parent_description(), "missing");
	assert_eq!(find(&list, "bar").parent_description(), "");
}

#[test]
fn locates_titles_in_first_matching_directory() {
	let first = tempfile::tempdir().expect("create tempdir");
	let second = tempfile::tempdir().expect("create tempdir");
	let third = tempfile::tempdir().expect("create tempdir");
	std::fs::write(second.path().join("Japanese.lst"), "").expect("write titles");
	std::fs::write(third.path().join("Japanese.lst"), "").expect("write titles");

	let search_path = format!("{};{}; {}", first.path().display(), second.path().display(), third.path().display());
	assert_eq!(locate_titles(&search_path, "Japanese.lst"), Some(second.path().join("Japanese.lst")));
	assert_eq!(locate_titles(&search_path, "Missing.lst"), None);
	assert_eq!(locate_titles(&search_path, ""), None);
}
