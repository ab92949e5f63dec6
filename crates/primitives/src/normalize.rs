use unicode_normalization::UnicodeNormalization;

const FULLWIDTH_FIRST: u32 = 0xFF01;
const FULLWIDTH_LAST: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFEE0;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Maps fullwidth ASCII variants and the ideographic space onto their narrow forms.
pub fn fold_width(c: char) -> char {
	let code = c as u32;
	if (FULLWIDTH_FIRST..=FULLWIDTH_LAST).contains(&code) {
		char::from_u32(code - FULLWIDTH_OFFSET).unwrap_or(c)
	} else if c == IDEOGRAPHIC_SPACE {
		' '
	} else {
		c
	}
}

/// Folds one already-decomposed character for case- and width-insensitive matching.
pub fn fold_char(c: char) -> impl Iterator<Item = char> {
	fold_width(c).to_lowercase()
}

/// Builds the normalized search form of `text`.
///
/// The text is put in canonical decomposition form (NFD), then each scalar is
/// width-folded and lowercased. Queries and cached fields must both go through
/// this function for edit distances to be meaningful.
pub fn search_key(text: &str) -> String {
	text.nfd().flat_map(fold_char).collect()
}

/// Builds the normalized search form of `"<prefix> <text>"` without an
/// intermediate allocation for the joined string.
pub fn search_key_joined(prefix: &str, text: &str) -> String {
	prefix.nfd().chain(std::iter::once(' ')).chain(text.nfd()).flat_map(fold_char).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decomposes_and_lowercases() {
		assert_eq!(search_key("Éclair"), "e\u{301}clair");
		assert_eq!(search_key("PAC-MAN"), "pac-man");
	}

	#[test]
	fn folds_fullwidth_ascii() {
		assert_eq!(search_key("ＰＡＣ　ＭＡＮ"), "pac man");
	}

	#[test]
	fn joined_matches_manual_join() {
		assert_eq!(search_key_joined("Namco", "Pac-Man"), search_key("Namco Pac-Man"));
	}

	#[test]
	fn kana_survives_normalization() {
		let key = search_key("ぱっくまん");
		assert!(!key.is_empty());
		assert_eq!(key, "ぱっくまん".nfd().collect::<String>());
	}
}
