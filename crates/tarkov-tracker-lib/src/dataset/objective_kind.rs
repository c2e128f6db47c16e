use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Deserialize};

/// What a player physically has to do for an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
	Kill,
	Retrieve,
	Mark,
	Survive,
}

static KIND_PATTERNS: Lazy<Vec<(ObjectiveKind, Regex)>> = Lazy::new(|| {
	[
		(ObjectiveKind::Kill, r"(?i)\b(kill|eliminate|neutrali[sz]e|shoot)\b"),
		(ObjectiveKind::Retrieve, r"(?i)\b(hand over|find|obtain|retrieve|collect|stash|deliver)\b"),
		(ObjectiveKind::Mark, r"(?i)\b(mark|place|plant|install)\b"),
		(ObjectiveKind::Survive, r"(?i)\b(survive|extract)\b"),
	]
	.into_iter()
	.filter_map(|(kind, pattern)| match Regex::new(pattern) {
		Ok(re) => Some((kind, re)),
		Err(e) => {
			log::error!("Objective kind pattern for {:?} failed to compile: {}", kind, e);
			None
		},
	})
	.collect()
});

impl ObjectiveKind {
	/// Every kind whose keywords appear in `text`.
	pub fn derive_from_text(text: &str) -> Vec<ObjectiveKind> {
		KIND_PATTERNS.iter()
			.filter(|(_, re)| re.is_match(text))
			.map(|(kind, _)| *kind)
			.collect()
	}
}

impl std::fmt::Display for ObjectiveKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ObjectiveKind::Kill => "kill",
			ObjectiveKind::Retrieve => "retrieve",
			ObjectiveKind::Mark => "mark",
			ObjectiveKind::Survive => "survive",
		};
		write!(f, "{}", s)
	}
}
