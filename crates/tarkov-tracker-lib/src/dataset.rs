//! # Static objective and hideout definitions
//! 
//! These are the plain records a dataset loader hands to the engine.
//! They are only validated when turned into a [`DependencyGraph`] with [`Dataset::build_graph`] or [`GraphBuilder`].

use serde::{Serialize, Deserialize};

use crate::dependency_graph::{DependencyGraph, GraphBuilder};

mod objective;
pub use objective::ObjectiveDef;

mod objective_kind;
pub use objective_kind::ObjectiveKind;

mod station;
pub use station::StationDef;
pub use station::StationLevelDef;
pub use station::StationLevelRequirement;

/// An item that has to be handed in to complete a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRequirement {
	pub item: String,
	pub count: u32,
	/// Item must be found in raid, bought or crafted copies don't count.
	#[serde(default)]
	pub found_in_raid: bool,
}

impl ItemRequirement {
	pub fn new(item: impl Into<String>, count: u32) -> Self {
		Self { item: item.into(), count, found_in_raid: false }
	}

	pub fn found_in_raid(item: impl Into<String>, count: u32) -> Self {
		Self { item: item.into(), count, found_in_raid: true }
	}
}

/// Display information for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
	pub id: String,
	pub name: String,
}

/// A complete set of definitions as shipped by the dataset provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
	#[serde(default)]
	pub objectives: Vec<ObjectiveDef>,
	#[serde(default)]
	pub stations: Vec<StationDef>,
	#[serde(default)]
	pub items: Vec<ItemDef>,
}

impl Dataset {
	pub fn from_json(json: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		log::trace!("Reading dataset from {}", path.display());
		let data = std::fs::read_to_string(path)?;
		let dataset = Self::from_json(&data)?;
		log::info!("Loaded dataset with {} objectives and {} stations from {}", dataset.objectives.len(), dataset.stations.len(), path.display());
		Ok(dataset)
	}

	/// Validates the definitions and builds the graph.
	/// 
	/// `max_player_level` is the highest level a player can reach, objectives gated above it are reported as unreachable by [`crate::find_path`].
	pub fn build_graph(&self, max_player_level: u32) -> crate::Result<DependencyGraph> {
		GraphBuilder::new()
			.objectives(self.objectives.iter().cloned())
			.stations(self.stations.iter().cloned())
			.items(self.items.iter().cloned())
			.max_player_level(max_player_level)
			.build()
	}
}
