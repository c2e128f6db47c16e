//! Suggesting objectives that can be done together in one raid.
//!
//! This is a grouping heuristic only. A node appears in every group it qualifies for
//! and no attempt is made to pick an optimal set of raids.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::dataset::ObjectiveKind;
use crate::dependency_graph::{DependencyGraph, Node, NodeId};
use crate::unlock::NodeStatuses;

/// Unlocked objectives sharing a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
	pub location: String,
	/// Member ids in graph order.
	pub nodes: Vec<NodeId>,
	/// Members bucketed by each kind they have.
	pub kind_breakdown: BTreeMap<ObjectiveKind, Vec<NodeId>>,
	/// Members without any recognised kind.
	pub untagged: Vec<NodeId>,
}

/// Unlocked objectives sharing a kind, across locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCluster {
	pub kind: ObjectiveKind,
	pub nodes: Vec<NodeId>,
	/// Member ids grouped by location, members without a location are left out.
	pub locations: BTreeMap<String, Vec<NodeId>>,
}

/// Groups actionable objectives by location.
///
/// Only unlocked objectives the player's level allows are considered. Groups of one are dropped and the rest are
/// sorted largest first, ties by location name.
///
/// # Errors
/// - [`crate::Error::InvalidArgument`] if `player_level` is negative.
pub fn find_clusters(graph: &DependencyGraph, statuses: &NodeStatuses, player_level: i32) -> crate::Result<Vec<Cluster>> {
	let candidates = actionable_objectives(graph, statuses, player_level)?;

	let mut by_location = BTreeMap::<&str, Vec<&Node>>::new();
	for node in candidates {
		if let Some(objective) = node.as_objective() {
			for location in &objective.locations {
				by_location.entry(location.as_str()).or_default().push(node);
			}
		}
	}

	let mut clusters: Vec<Cluster> = by_location.into_iter()
		.filter(|(_, members)| members.len() > 1)
		.map(|(location, members)| {
			let mut kind_breakdown = BTreeMap::<ObjectiveKind, Vec<NodeId>>::new();
			let mut untagged = Vec::new();
			for node in &members {
				match node.as_objective() {
					Some(objective) if !objective.kinds.is_empty() => {
						for kind in &objective.kinds {
							kind_breakdown.entry(*kind).or_default().push(node.id.clone());
						}
					},
					_ => untagged.push(node.id.clone()),
				}
			}

			Cluster {
				location: location.to_owned(),
				nodes: members.iter().map(|n| n.id.clone()).collect(),
				kind_breakdown,
				untagged,
			}
		})
		.collect();

	/* `by_location` iterates in name order so a stable sort keeps names ascending within equal sizes */
	clusters.sort_by(|a, b| b.nodes.len().cmp(&a.nodes.len()));

	log::debug!("Found {} location cluster(s)", clusters.len());
	Ok(clusters)
}

/// Groups actionable objectives by kind, e.g. every unlocked kill task regardless of map.
///
/// Groups of one are dropped, sorted largest first then by kind.
///
/// # Errors
/// - [`crate::Error::InvalidArgument`] if `player_level` is negative.
pub fn find_kind_clusters(graph: &DependencyGraph, statuses: &NodeStatuses, player_level: i32) -> crate::Result<Vec<KindCluster>> {
	let candidates = actionable_objectives(graph, statuses, player_level)?;

	let mut by_kind = BTreeMap::<ObjectiveKind, Vec<&Node>>::new();
	for node in candidates {
		if let Some(objective) = node.as_objective() {
			for kind in &objective.kinds {
				by_kind.entry(*kind).or_default().push(node);
			}
		}
	}

	let mut clusters: Vec<KindCluster> = by_kind.into_iter()
		.filter(|(_, members)| members.len() > 1)
		.map(|(kind, members)| {
			let mut locations = BTreeMap::<String, Vec<NodeId>>::new();
			for node in &members {
				if let Some(objective) = node.as_objective() {
					for location in &objective.locations {
						locations.entry(location.clone()).or_default().push(node.id.clone());
					}
				}
			}
			KindCluster { kind, nodes: members.iter().map(|n| n.id.clone()).collect(), locations }
		})
		.collect();

	clusters.sort_by(|a, b| b.nodes.len().cmp(&a.nodes.len()));
	Ok(clusters)
}

fn actionable_objectives<'g>(graph: &'g DependencyGraph, statuses: &NodeStatuses, player_level: i32) -> crate::Result<Vec<&'g Node>> {
	if player_level < 0 {
		return Err(crate::Error::InvalidArgument(format!("player level must not be negative, got {}", player_level)));
	}
	let player_level = player_level as u32;

	Ok(graph.nodes()
		.filter(|node| node.is_objective())
		.filter(|node| statuses.is_unlocked(&node.id))
		.filter(|node| node.level_gate() <= player_level)
		.collect())
}
