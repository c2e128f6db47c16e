//! The joint graph of objectives and hideout station levels.
//!
//! Edges point from a node to each of its prerequisites.
//! The graph is validated once when built and never changes afterwards,
//! so it can be shared freely between threads and recomputation passes.

use std::collections::{BTreeSet, HashMap};

use petgraph::prelude::*;
use serde::Serialize;

use crate::dataset::{ItemRequirement, ObjectiveKind};

mod graph_builder;
pub use graph_builder::GraphBuilder;
pub use graph_builder::DEFAULT_MAX_PLAYER_LEVEL;

pub type NodeId = String;

/// A single objective or station level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
	pub id: NodeId,
	pub name: String,
	/// Resolved prerequisite ids in declaration order without duplicates.
	pub prerequisites: Vec<NodeId>,
	pub requirements: Vec<ItemRequirement>,
	/// Shown to the player but never needed for completion.
	pub optional_requirements: Vec<ItemRequirement>,
	pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
	Objective(ObjectiveData),
	StationLevel(StationLevelData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectiveData {
	pub trader: String,
	pub min_player_level: u32,
	pub locations: BTreeSet<String>,
	pub kinds: BTreeSet<ObjectiveKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationLevelData {
	pub station: String,
	pub station_name: String,
	pub level: u32,
}

impl Node {
	/// Trader name for objectives, station name for station levels.
	pub fn group_tag(&self) -> &str {
		match &self.kind {
			NodeKind::Objective(data) => &data.trader,
			NodeKind::StationLevel(data) => &data.station_name,
		}
	}

	/// Minimum player level before the node can be unlocked, station levels have none.
	pub fn level_gate(&self) -> u32 {
		match &self.kind {
			NodeKind::Objective(data) => data.min_player_level,
			NodeKind::StationLevel(_) => 0,
		}
	}

	pub fn as_objective(&self) -> Option<&ObjectiveData> {
		match &self.kind {
			NodeKind::Objective(data) => Some(data),
			NodeKind::StationLevel(_) => None,
		}
	}

	pub fn as_station_level(&self) -> Option<&StationLevelData> {
		match &self.kind {
			NodeKind::Objective(_) => None,
			NodeKind::StationLevel(data) => Some(data),
		}
	}

	pub fn is_objective(&self) -> bool {
		matches!(self.kind, NodeKind::Objective(_))
	}
}

/// Why an edge exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeData {
	/// Declared in the definition's prerequisite list.
	Prerequisite,
	/// Station level N requires level N-1 of the same station.
	PreviousLevel,
	/// Station level requires a level of another station.
	StationLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct DependencyGraph {
	graph: DiGraph<Node, EdgeData>,
	max_player_level: u32,
	item_names: HashMap<String, String>,

	#[serde(skip)]
	indices: HashMap<NodeId, NodeIndex>,
	/* Both indexed by `NodeIndex::index()` */
	#[serde(skip)]
	prerequisites: Vec<Vec<NodeIndex>>,
	#[serde(skip)]
	dependents: Vec<Vec<NodeIndex>>,
}

impl DependencyGraph {
	/// Builds a graph from objective and station definitions using default [`GraphBuilder`] settings.
	///
	/// # Errors
	/// - [`crate::MalformedDataError`] if a prerequisite is unknown or the definitions contain a cycle.
	pub fn build(objectives: &[crate::dataset::ObjectiveDef], stations: &[crate::dataset::StationDef]) -> crate::Result<Self> {
		GraphBuilder::new()
			.objectives(objectives.iter().cloned())
			.stations(stations.iter().cloned())
			.build()
	}

	pub fn get_node(&self, id: &str) -> Option<&Node> {
		self.indices.get(id).map(|i| &self.graph[*i])
	}

	/// Like [`Self::get_node`] but unknown ids are an error.
	pub fn node(&self, id: &str) -> crate::Result<&Node> {
		self.get_node(id).ok_or_else(|| crate::Error::UnknownNode(id.to_owned()))
	}

	pub fn contains(&self, id: &str) -> bool {
		self.indices.contains_key(id)
	}

	/// Direct prerequisites of `id` in declaration order, `None` if `id` is unknown.
	pub fn get_prerequisites(&self, id: &str) -> Option<impl Iterator<Item = &Node> + '_> {
		let i = self.index_of(id)?;
		Some(self.prerequisites[i.index()].iter().map(|p| &self.graph[*p]))
	}

	/// Nodes which list `id` as a direct prerequisite, `None` if `id` is unknown.
	pub fn get_dependents(&self, id: &str) -> Option<impl Iterator<Item = &Node> + '_> {
		let i = self.index_of(id)?;
		Some(self.dependents[i.index()].iter().map(|d| &self.graph[*d]))
	}

	/// Every node in the order they were defined.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
		self.graph.node_weights()
	}

	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	pub fn is_empty(&self) -> bool {
		self.graph.node_count() == 0
	}

	/// Highest level a player can reach with this dataset.
	pub fn max_player_level(&self) -> u32 {
		self.max_player_level
	}

	/// Display name of an item if the dataset provided one.
	pub fn item_name(&self, item: &str) -> Option<&str> {
		self.item_names.get(item).map(String::as_str)
	}

	pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
		self.indices.get(id).copied()
	}

	pub(crate) fn node_at(&self, i: NodeIndex) -> &Node {
		&self.graph[i]
	}

	pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
		self.graph.node_indices()
	}

	pub(crate) fn prerequisite_indices(&self, i: NodeIndex) -> &[NodeIndex] {
		&self.prerequisites[i.index()]
	}

	pub(crate) fn dependent_indices(&self, i: NodeIndex) -> &[NodeIndex] {
		&self.dependents[i.index()]
	}

	/// Edge kind between a node and one of its prerequisites.
	pub fn edge_kind(&self, id: &str, prerequisite: &str) -> Option<EdgeData> {
		let a = self.index_of(id)?;
		let b = self.index_of(prerequisite)?;
		self.graph.find_edge(a, b).map(|e| self.graph[e])
	}
}
