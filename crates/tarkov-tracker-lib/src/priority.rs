//! Ranking items by how soon the player will need them.
//!
//! Every incomplete node gets a dependency depth:
//! - Unlocked nodes are at depth 0.
//! - A locked node is one layer deeper than its deepest incomplete prerequisite.
//! - A locked node whose prerequisites are all completed is only waiting on player level and sits at depth 1.
//!
//! Put another way, depth `k` nodes become unlocked once every node at depth `< k` is completed.
//! An item's depth is the lowest depth of any incomplete node needing it, which is then mapped to a [`PriorityTier`].

use std::collections::{BTreeMap, VecDeque};

use serde::{Serialize, Deserialize};

use crate::dependency_graph::{DependencyGraph, NodeId};
use crate::requirements::AggregatedRequirement;
use crate::unlock::{NodeStatus, NodeStatuses};

/// Urgency of an item, ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
	/// Needed by something that can be completed right now.
	NeedNow,
	/// Needed within the next few layers of unlocks.
	NeedSoon,
	NeedLater,
}

/// Depth boundaries between tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
	/// Deepest depth still classed as [`PriorityTier::NeedSoon`].
	pub soon_max_depth: u32,
}

impl Default for TierThresholds {
	fn default() -> Self {
		Self { soon_max_depth: 2 }
	}
}

impl PriorityTier {
	pub fn from_depth(depth: u32, thresholds: TierThresholds) -> Self {
		if depth == 0 {
			PriorityTier::NeedNow
		} else if depth <= thresholds.soon_max_depth {
			PriorityTier::NeedSoon
		} else {
			PriorityTier::NeedLater
		}
	}
}

impl std::fmt::Display for PriorityTier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			PriorityTier::NeedNow => "NEED_NOW",
			PriorityTier::NeedSoon => "NEED_SOON",
			PriorityTier::NeedLater => "NEED_LATER",
		};
		write!(f, "{}", s)
	}
}

/// Dependency depth of every incomplete node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyDepths(BTreeMap<NodeId, u32>);

impl DependencyDepths {
	/// `None` for completed or unknown nodes.
	pub fn get(&self, id: &str) -> Option<u32> {
		self.0.get(id).copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&NodeId, u32)> + '_ {
		self.0.iter().map(|(id, depth)| (id, *depth))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Layers incomplete nodes outward from the unlock frontier.
///
/// A topological walk over the dependents of each node, a node is assigned its depth once the last of its incomplete prerequisites has been.
pub fn dependency_depths(graph: &DependencyGraph, statuses: &NodeStatuses) -> DependencyDepths {
	let is_completed = |id: &str| statuses.get(id) == Some(NodeStatus::Completed);

	let mut remaining = vec![0usize; graph.node_count()];
	let mut candidate = vec![0u32; graph.node_count()];
	let mut depths = BTreeMap::<NodeId, u32>::new();
	let mut queue = VecDeque::new();

	for i in graph.node_indices() {
		let node = graph.node_at(i);
		if is_completed(&node.id) { continue; }

		remaining[i.index()] = graph.prerequisite_indices(i).iter()
			.filter(|p| !is_completed(&graph.node_at(**p).id))
			.count();

		if remaining[i.index()] == 0 {
			/* Ready except for level, the player has to level up before it opens */
			let depth = if statuses.get(&node.id) == Some(NodeStatus::Unlocked) { 0 } else { 1 };
			queue.push_back((i, depth));
		}
	}

	while let Some((i, depth)) = queue.pop_front() {
		depths.insert(graph.node_at(i).id.clone(), depth);

		for d in graph.dependent_indices(i) {
			if is_completed(&graph.node_at(*d).id) { continue; }

			let slot = d.index();
			candidate[slot] = candidate[slot].max(depth + 1);
			remaining[slot] -= 1;
			if remaining[slot] == 0 {
				queue.push_back((*d, candidate[slot]));
			}
		}
	}

	DependencyDepths(depths)
}

/// Annotates each requirement with a [`PriorityTier`] and depth using the default [`TierThresholds`].
pub fn classify(graph: &DependencyGraph, statuses: &NodeStatuses, requirements: Vec<AggregatedRequirement>) -> Vec<AggregatedRequirement> {
	classify_with_thresholds(graph, statuses, requirements, TierThresholds::default())
}

/// Required sources decide the depth. An item only wanted by optional hand-ins falls back to those sources.
/// Items only needed by completed nodes are marked `already_satisfied` at [`PriorityTier::NeedLater`] with no depth.
pub fn classify_with_thresholds(graph: &DependencyGraph, statuses: &NodeStatuses, mut requirements: Vec<AggregatedRequirement>, thresholds: TierThresholds) -> Vec<AggregatedRequirement> {
	if requirements.is_empty() {
		return requirements;
	}

	let depths = dependency_depths(graph, statuses);

	for req in &mut requirements {
		let depth_of = |optional: bool| req.sources.iter()
			.filter(|s| s.optional == optional)
			.filter_map(|s| depths.get(&s.node))
			.min();

		let depth = depth_of(false).or_else(|| depth_of(true));

		match depth {
			Some(depth) => {
				req.priority_tier = Some(PriorityTier::from_depth(depth, thresholds));
				req.priority_depth = Some(depth);
				req.already_satisfied = false;
			},
			None => {
				req.priority_tier = Some(PriorityTier::NeedLater);
				req.priority_depth = None;
				req.already_satisfied = true;
			},
		}
	}

	log::trace!("Classified {} item(s)", requirements.len());
	requirements
}
