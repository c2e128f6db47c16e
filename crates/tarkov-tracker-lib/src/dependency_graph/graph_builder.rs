use std::collections::{BTreeMap, HashMap};

use petgraph::prelude::*;

use super::*;
use crate::dataset::{ItemDef, ObjectiveDef, StationDef, StationLevelDef};
use crate::error::MalformedDataError;

/// Level cap used when none is given.
pub const DEFAULT_MAX_PLAYER_LEVEL: u32 = 79;

/// Collects definitions and validates them into a [`DependencyGraph`].
///
/// # Usage
/// 1. Create a [`GraphBuilder`]
/// 1. Add objectives, stations and optionally item display names.
/// 1. [`GraphBuilder::build()`] to get a validated [`DependencyGraph`].
#[derive(Debug, Clone)]
pub struct GraphBuilder {
	objectives: Vec<ObjectiveDef>,
	stations: Vec<StationDef>,
	items: Vec<ItemDef>,
	max_player_level: u32,
}

impl Default for GraphBuilder {
	fn default() -> Self {
		Self {
			objectives: Default::default(),
			stations: Default::default(),
			items: Default::default(),
			max_player_level: DEFAULT_MAX_PLAYER_LEVEL,
		}
	}
}

impl GraphBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn objectives(mut self, objectives: impl IntoIterator<Item = ObjectiveDef>) -> Self {
		self.objectives.extend(objectives);
		self
	}

	pub fn stations(mut self, stations: impl IntoIterator<Item = StationDef>) -> Self {
		self.stations.extend(stations);
		self
	}

	pub fn items(mut self, items: impl IntoIterator<Item = ItemDef>) -> Self {
		self.items.extend(items);
		self
	}

	pub fn max_player_level(mut self, level: u32) -> Self {
		self.max_player_level = level;
		self
	}

	/// Validates every definition and builds the graph.
	///
	/// # Errors
	/// [`MalformedDataError`] when:
	/// - Two nodes share an id, or a station defines a level twice.
	/// - A prerequisite, station or station level can't be found.
	/// - A requirement has a count of zero.
	/// - The prerequisites form a cycle.
	pub fn build(self) -> crate::Result<DependencyGraph> {
		/* Nodes with their unresolved prerequisite ids */
		let mut pending = Vec::<(Node, Vec<(String, EdgeData)>)>::with_capacity(self.objectives.len());

		for def in &self.objectives {
			check_requirement_counts(&def.id, &def.requirements)?;
			check_requirement_counts(&def.id, &def.optional_requirements)?;

			let node = Node {
				id: def.id.clone(),
				name: def.name.clone(),
				prerequisites: Default::default(),
				requirements: def.requirements.clone(),
				optional_requirements: def.optional_requirements.clone(),
				kind: NodeKind::Objective(ObjectiveData {
					trader: def.trader.clone(),
					min_player_level: def.min_player_level,
					locations: def.locations.iter().cloned().collect(),
					kinds: def.resolved_kinds(),
				}),
			};
			let edges = def.prerequisites.iter().map(|p| (p.clone(), EdgeData::Prerequisite)).collect();
			pending.push((node, edges));
		}

		/* Station id -> level -> node id, needed before any cross-station requirement can be resolved */
		let mut station_levels = HashMap::<&str, BTreeMap<u32, &str>>::new();
		for station in &self.stations {
			let mut levels = BTreeMap::new();
			for level in &station.levels {
				if levels.insert(level.level, level.id.as_str()).is_some() {
					return Err(MalformedDataError::DuplicateStationLevel { station: station.id.clone(), level: level.level }.into());
				}
			}
			if station_levels.insert(station.id.as_str(), levels).is_some() {
				return Err(MalformedDataError::DuplicateId(station.id.clone()).into());
			}
		}

		for station in &self.stations {
			let mut levels: Vec<&StationLevelDef> = station.levels.iter().collect();
			levels.sort_by_key(|l| l.level);

			let mut previous: Option<&str> = None;
			for level in levels {
				check_requirement_counts(&level.id, &level.requirements)?;

				let mut edges = Vec::<(String, EdgeData)>::new();
				if let Some(previous) = previous {
					edges.push((previous.to_owned(), EdgeData::PreviousLevel));
				}
				for req in &level.station_requirements {
					let other = station_levels.get(req.station.as_str())
						.ok_or_else(|| MalformedDataError::UnknownStation { node: level.id.clone(), station: req.station.clone() })?;
					let id = other.get(&req.level)
						.ok_or_else(|| MalformedDataError::UnknownStationLevel { node: level.id.clone(), station: req.station.clone(), level: req.level })?;
					edges.push(((*id).to_owned(), EdgeData::StationLevel));
				}
				edges.extend(level.prerequisites.iter().map(|p| (p.clone(), EdgeData::Prerequisite)));

				let node = Node {
					id: level.id.clone(),
					name: format!("{} {}", station.name, level.level),
					prerequisites: Default::default(),
					requirements: level.requirements.clone(),
					optional_requirements: Default::default(),
					kind: NodeKind::StationLevel(StationLevelData {
						station: station.id.clone(),
						station_name: station.name.clone(),
						level: level.level,
					}),
				};
				pending.push((node, edges));
				previous = Some(level.id.as_str());
			}
		}

		let mut graph = DiGraph::<Node, EdgeData>::with_capacity(pending.len(), pending.len());
		let mut indices = HashMap::<NodeId, NodeIndex>::with_capacity(pending.len());
		let mut pending_edges = Vec::<(NodeIndex, Vec<(String, EdgeData)>)>::with_capacity(pending.len());
		for (node, edges) in pending {
			if indices.contains_key(&node.id) {
				log::warn!("Node id `{}` is defined more than once", node.id);
				return Err(MalformedDataError::DuplicateId(node.id).into());
			}
			let id = node.id.clone();
			let i = graph.add_node(node);
			indices.insert(id, i);
			pending_edges.push((i, edges));
		}

		let mut prerequisites = vec![Vec::<NodeIndex>::new(); graph.node_count()];
		let mut dependents = vec![Vec::<NodeIndex>::new(); graph.node_count()];
		for (i, edges) in pending_edges {
			for (prerequisite, kind) in edges {
				let p = match indices.get(&prerequisite) {
					Some(p) => *p,
					None => {
						log::warn!("`{}` requires unknown node `{}`", graph[i].id, prerequisite);
						return Err(MalformedDataError::UnknownPrerequisite { node: graph[i].id.clone(), prerequisite }.into());
					},
				};
				/* Listed twice, or declared explicitly as well as implied by the station chain */
				if prerequisites[i.index()].contains(&p) { continue; }

				graph.add_edge(i, p, kind);
				prerequisites[i.index()].push(p);
				dependents[p.index()].push(i);
				graph[i].prerequisites.push(prerequisite);
			}
		}

		if let Err(cycle) = petgraph::algo::toposort(&graph, None) {
			let node = graph[cycle.node_id()].id.clone();
			log::warn!("Prerequisite cycle detected through `{}`", node);
			return Err(MalformedDataError::Cycle { node }.into());
		}

		log::info!("Built dependency graph with {} nodes and {} edges", graph.node_count(), graph.edge_count());

		Ok(DependencyGraph {
			graph,
			max_player_level: self.max_player_level,
			item_names: self.items.iter().map(|i| (i.id.clone(), i.name.clone())).collect(),
			indices,
			prerequisites,
			dependents,
		})
	}
}

fn check_requirement_counts(node: &str, requirements: &[crate::dataset::ItemRequirement]) -> Result<(), MalformedDataError> {
	match requirements.iter().find(|r| r.count == 0) {
		Some(r) => Err(MalformedDataError::ZeroQuantity { node: node.to_owned(), item: r.item.clone() }),
		None => Ok(()),
	}
}
