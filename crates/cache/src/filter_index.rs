use rustc_hash::FxHashSet;

/// Splits a manufacturer credit into individual company names.
///
/// Combined credits are separated by `" / "` and a trailing parenthesised
/// qualifier such as `"(Midway license)"` is dropped.
pub fn manufacturer_names(credit: &str) -> impl Iterator<Item = &str> {
	credit.split(" / ").map(strip_qualifier).filter(|name| !name.is_empty())
}

fn strip_qualifier(name: &str) -> &str {
	let name = name.trim();
	if name.ends_with(')')
		&& let Some(open) = name.rfind(" (")
	{
		return name[..open].trim_end();
	}
	name
}

/// Distinct manufacturer and year values offered by the filter menus.
#[derive(Debug, Default, Clone)]
pub struct FilterIndex {
	pending_manufacturers: FxHashSet<String>,
	pending_years: FxHashSet<String>,
	manufacturers: Vec<String>,
	years: Vec<String>,
}

impl FilterIndex {
	/// Records every company named in a manufacturer credit.
	pub fn add_manufacturer(&mut self, credit: &str) {
		for name in manufacturer_names(credit) {
			if !self.pending_manufacturers.contains(name) {
				self.pending_manufacturers.insert(name.to_string());
			}
		}
	}

	pub fn add_year(&mut self, year: &str) {
		let year = year.trim();
		if !year.is_empty() && !self.pending_years.contains(year) {
			self.pending_years.insert(year.to_string());
		}
	}

	/// Moves accumulated values into the sorted, deduplicated lists.
	///
	/// Manufacturers are collated, years are ordered by code point so that
	/// partial years like `"198?"` sort after complete ones of the decade.
	pub fn finalize(&mut self) {
		self.manufacturers.extend(self.pending_manufacturers.drain());
		self.manufacturers.sort_by_cached_key(|name| marquee_primitives::CollationKey::new(name));
		self.manufacturers.dedup();

		self.years.extend(self.pending_years.drain());
		self.years.sort();
		self.years.dedup();
	}

	pub fn manufacturers(&self) -> &[String] {
		&self.manufacturers
	}

	pub fn years(&self) -> &[String] {
		&self.years
	}
}
