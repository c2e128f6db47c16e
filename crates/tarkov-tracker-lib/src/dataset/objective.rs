use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use super::{ItemRequirement, ObjectiveKind};

/// A quest as given by a trader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveDef {
	pub id: String,
	pub name: String,
	/// Trader giving the objective.
	#[serde(default)]
	pub trader: String,
	#[serde(default)]
	pub min_player_level: u32,
	/// Node ids which must be completed first, objectives or station levels.
	#[serde(default)]
	pub prerequisites: Vec<String>,
	#[serde(default)]
	pub requirements: Vec<ItemRequirement>,
	/// Hand-ins which are not needed to complete the objective.
	#[serde(default)]
	pub optional_requirements: Vec<ItemRequirement>,
	/// Maps the objective takes place on.
	#[serde(default)]
	pub locations: Vec<String>,
	/// Task text, used to derive [`ObjectiveKind`] tags.
	#[serde(default)]
	pub descriptions: Vec<String>,
	/// Kinds declared by the dataset, merged with the derived ones.
	#[serde(default)]
	pub kinds: Vec<ObjectiveKind>,
}

impl ObjectiveDef {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			..Default::default()
		}
	}

	pub fn trader(mut self, trader: impl Into<String>) -> Self {
		self.trader = trader.into();
		self
	}

	pub fn min_player_level(mut self, level: u32) -> Self {
		self.min_player_level = level;
		self
	}

	pub fn prerequisite(mut self, id: impl Into<String>) -> Self {
		self.prerequisites.push(id.into());
		self
	}

	pub fn requirement(mut self, requirement: ItemRequirement) -> Self {
		self.requirements.push(requirement);
		self
	}

	pub fn optional_requirement(mut self, requirement: ItemRequirement) -> Self {
		self.optional_requirements.push(requirement);
		self
	}

	pub fn location(mut self, location: impl Into<String>) -> Self {
		self.locations.push(location.into());
		self
	}

	pub fn description(mut self, text: impl Into<String>) -> Self {
		self.descriptions.push(text.into());
		self
	}

	pub fn kind(mut self, kind: ObjectiveKind) -> Self {
		self.kinds.push(kind);
		self
	}

	/// Declared kinds plus every kind recognised in the descriptions.
	pub fn resolved_kinds(&self) -> BTreeSet<ObjectiveKind> {
		let mut kinds: BTreeSet<ObjectiveKind> = self.kinds.iter().copied().collect();
		for text in &self.descriptions {
			kinds.extend(ObjectiveKind::derive_from_text(text));
		}
		kinds
	}
}
