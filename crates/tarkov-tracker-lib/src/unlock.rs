//! Derives the status of every node from a [`CompletionState`].

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use crate::completion::CompletionState;
use crate::dependency_graph::{DependencyGraph, Node, NodeId};

/// State of a node, always derived and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
	/// Every prerequisite is completed and the player meets the level gate.
	Unlocked,
	/// Missing a prerequisite or the player's level is too low.
	Locked,
	/// Present in the completion state.
	Completed,
}

/// Status of every node in a graph, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeStatuses(BTreeMap<NodeId, NodeStatus>);

impl NodeStatuses {
	pub fn get(&self, id: &str) -> Option<NodeStatus> {
		self.0.get(id).copied()
	}

	pub fn is_completed(&self, id: &str) -> bool {
		self.get(id) == Some(NodeStatus::Completed)
	}

	pub fn is_unlocked(&self, id: &str) -> bool {
		self.get(id) == Some(NodeStatus::Unlocked)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&NodeId, NodeStatus)> + '_ {
		self.0.iter().map(|(id, status)| (id, *status))
	}

	/// Ids of every unlocked node, the unlock frontier.
	pub fn frontier(&self) -> impl Iterator<Item = &NodeId> + '_ {
		self.with_status(NodeStatus::Unlocked)
	}

	pub fn with_status(&self, status: NodeStatus) -> impl Iterator<Item = &NodeId> + '_ {
		self.0.iter().filter(move |(_, s)| **s == status).map(|(id, _)| id)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn summary(&self) -> StatusSummary {
		let mut summary = StatusSummary::default();
		for status in self.0.values() {
			match status {
				NodeStatus::Completed => summary.completed += 1,
				NodeStatus::Unlocked => summary.unlocked += 1,
				NodeStatus::Locked => summary.locked += 1,
			}
		}
		summary
	}

	pub fn into_inner(self) -> BTreeMap<NodeId, NodeStatus> {
		self.0
	}
}

/// Counts of nodes per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
	pub completed: usize,
	pub unlocked: usize,
	pub locked: usize,
}

/// Computes the status of every node in `graph`.
///
/// Ids in `state` which aren't part of the graph are ignored.
///
/// # Errors
/// - [`crate::Error::InvalidArgument`] if the player level is negative.
pub fn compute_status(graph: &DependencyGraph, state: &CompletionState) -> crate::Result<NodeStatuses> {
	let player_level = state.checked_player_level()?;

	let statuses = graph.nodes()
		.map(|node| (node.id.clone(), node_status(node, state, player_level)))
		.collect::<BTreeMap<_, _>>();

	log::trace!("Computed status for {} nodes at player level {}", statuses.len(), player_level);
	Ok(NodeStatuses(statuses))
}

/// Status of a single node without computing the rest of the graph.
pub(crate) fn node_status(node: &Node, state: &CompletionState, player_level: u32) -> NodeStatus {
	if state.is_completed(&node.id) {
		NodeStatus::Completed
	} else if node.prerequisites.iter().all(|p| state.is_completed(p)) && player_level >= node.level_gate() {
		NodeStatus::Unlocked
	} else {
		NodeStatus::Locked
	}
}
