/// String distance used to score candidates, in `0.0..=1.0` with `0.0` an exact match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
	/// `1 - jaro_winkler`; favors shared prefixes, which suits incremental typing.
	#[default]
	JaroWinkler,
	/// `1 - normalized_levenshtein`.
	Levenshtein,
}

impl DistanceMetric {
	pub fn distance(self, query: &str, candidate: &str) -> f64 {
		if query == candidate {
			return 0.0;
		}
		let similarity = match self {
			Self::JaroWinkler => strsim::jaro_winkler(query, candidate),
			Self::Levenshtein => strsim::normalized_levenshtein(query, candidate),
		};
		// distinct strings never count as exact
		(1.0 - similarity).clamp(f64::EPSILON, 1.0)
	}
}
