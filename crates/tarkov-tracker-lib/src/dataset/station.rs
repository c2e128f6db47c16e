use serde::{Serialize, Deserialize};

use super::ItemRequirement;

/// A hideout station and all of its upgrade levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDef {
	pub id: String,
	pub name: String,
	/// Levels in any order, each level implicitly requires the one below it.
	#[serde(default)]
	pub levels: Vec<StationLevelDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLevelDef {
	pub id: String,
	pub level: u32,
	#[serde(default)]
	pub requirements: Vec<ItemRequirement>,
	/// Levels of other stations that must be built first.
	#[serde(default)]
	pub station_requirements: Vec<StationLevelRequirement>,
	/// Any other node ids that must be completed first, e.g. a trader quest.
	#[serde(default)]
	pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationLevelRequirement {
	pub station: String,
	pub level: u32,
}

impl StationDef {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self { id: id.into(), name: name.into(), levels: Default::default() }
	}

	pub fn level(mut self, level: StationLevelDef) -> Self {
		self.levels.push(level);
		self
	}
}

impl StationLevelDef {
	pub fn new(id: impl Into<String>, level: u32) -> Self {
		Self { id: id.into(), level, ..Default::default() }
	}

	pub fn requirement(mut self, requirement: ItemRequirement) -> Self {
		self.requirements.push(requirement);
		self
	}

	pub fn requires_station(mut self, station: impl Into<String>, level: u32) -> Self {
		self.station_requirements.push(StationLevelRequirement { station: station.into(), level });
		self
	}

	pub fn prerequisite(mut self, id: impl Into<String>) -> Self {
		self.prerequisites.push(id.into());
		self
	}
}
