use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::normalize::fold_char;

/// Precomputed multi-level sort key for display strings.
///
/// Strings are compared the way a dictionary orders them rather than by code
/// point: base letters first without regard to case or accents, then accents,
/// then case (lowercase first), and finally the raw text so that distinct
/// strings never compare equal.
///
/// Keys are built once per string so that sorting large lists does not
/// re-normalize on every comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
	primary: String,
	secondary: String,
	tertiary: Vec<bool>,
	identical: Box<str>,
}

impl CollationKey {
	pub fn new(text: &str) -> Self {
		let mut primary = String::with_capacity(text.len());
		let mut secondary = String::with_capacity(text.len());
		let mut tertiary = Vec::with_capacity(text.len());

		for c in text.nfd() {
			secondary.extend(fold_char(c));
			if is_combining_mark(c) {
				continue;
			}
			primary.extend(fold_char(c));
			tertiary.push(c.is_uppercase());
		}

		Self {
			primary,
			secondary,
			tertiary,
			identical: text.into(),
		}
	}

	/// Returns the original text this key was built from.
	pub fn text(&self) -> &str {
		&self.identical
	}

	/// Returns true when both keys are equal ignoring accents and case.
	pub fn primary_eq(&self, other: &Self) -> bool {
		self.primary == other.primary
	}
}

/// Collates two strings without keeping the keys around.
pub fn compare(lhs: &str, rhs: &str) -> Ordering {
	CollationKey::new(lhs).cmp(&CollationKey::new(rhs))
}
