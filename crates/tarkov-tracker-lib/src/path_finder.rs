//! Finding the ordered list of nodes a player still has to complete to reach a target.
//!
//! # Usage
//! 1. Call [`find_path()`] with the target id and current [`CompletionState`].
//! 1. On [`PathOutcome::Path`] the nodes are ordered so each one comes after all of its incomplete prerequisites,
//! the target is always last.
//!
//! Level gates don't add nodes to the path. A path can contain locked objectives the player is
//! currently too low level for, the status of each node tells the caller why.
//! Only a gate above the dataset's level cap makes the target unreachable.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use serde::{Serialize, Deserialize};

use crate::completion::CompletionState;
use crate::dependency_graph::{DependencyGraph, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathOutcome {
	/// Incomplete nodes in completion order ending with the target.
	Path(Vec<NodeId>),
	/// The target is already completed, nothing to do.
	AlreadyCompleted,
	/// `node` on the way to the target needs a level higher than any player can reach.
	Unreachable { node: NodeId, required_level: u32 },
}

impl PathOutcome {
	/// The path if one exists.
	pub fn nodes(&self) -> Option<&[NodeId]> {
		match self {
			PathOutcome::Path(nodes) => Some(nodes),
			PathOutcome::AlreadyCompleted | PathOutcome::Unreachable { .. } => None,
		}
	}

	pub fn into_nodes(self) -> Option<Vec<NodeId>> {
		match self {
			PathOutcome::Path(nodes) => Some(nodes),
			PathOutcome::AlreadyCompleted | PathOutcome::Unreachable { .. } => None,
		}
	}
}

/// Computes the incomplete nodes required to complete `target`.
///
/// Independent branches are ordered by ascending level gate then id so the output is stable.
///
/// # Errors
/// - [`crate::Error::UnknownNode`] if `target` isn't in the graph.
/// - [`crate::Error::InvalidArgument`] if the player level is negative.
pub fn find_path(graph: &DependencyGraph, target: &str, state: &CompletionState) -> crate::Result<PathOutcome> {
	state.validate()?;
	let target_index = graph.index_of(target).ok_or_else(|| crate::Error::UnknownNode(target.to_owned()))?;

	if state.is_completed(target) {
		log::trace!("Path requested to completed node `{}`", target);
		return Ok(PathOutcome::AlreadyCompleted);
	}

	let required = collect_incomplete_ancestors(graph, target_index, state);

	/* Pick the lowest id among offending nodes so the reported reason doesn't depend on traversal order */
	let unreachable = required.iter()
		.map(|i| graph.node_at(*i))
		.filter(|node| node.level_gate() > graph.max_player_level())
		.min_by(|a, b| a.id.cmp(&b.id));
	if let Some(node) = unreachable {
		log::debug!("`{}` is unreachable, `{}` requires level {}", target, node.id, node.level_gate());
		return Ok(PathOutcome::Unreachable { node: node.id.clone(), required_level: node.level_gate() });
	}

	let path = order_prerequisites_first(graph, target_index, &required);
	log::trace!("Path to `{}` has {} node(s)", target, path.len());
	Ok(PathOutcome::Path(path))
}

/// Breadth first search through prerequisites collecting every incomplete node, including `target`.
///
/// Completed nodes end the search along their branch, anything behind them is completed or irrelevant.
fn collect_incomplete_ancestors(graph: &DependencyGraph, target: NodeIndex, state: &CompletionState) -> HashSet<NodeIndex> {
	let mut collected = HashSet::from([target]);
	let mut queue = VecDeque::from([target]);

	while let Some(i) = queue.pop_front() {
		for p in graph.prerequisite_indices(i) {
			if state.is_completed(&graph.node_at(*p).id) { continue; }
			if collected.insert(*p) {
				queue.push_back(*p);
			}
		}
	}

	collected
}

/// Depth first post-order over `required` starting at `target`.
fn order_prerequisites_first(graph: &DependencyGraph, target: NodeIndex, required: &HashSet<NodeIndex>) -> Vec<NodeId> {
	/* Children are sorted descending so popping yields the lowest level gate and id first */
	let pending_children = |i: NodeIndex| -> Vec<NodeIndex> {
		let mut children: Vec<NodeIndex> = graph.prerequisite_indices(i).iter()
			.copied()
			.filter(|p| required.contains(p))
			.collect();
		children.sort_by(|a, b| {
			let (a, b) = (graph.node_at(*a), graph.node_at(*b));
			(b.level_gate(), &b.id).cmp(&(a.level_gate(), &a.id))
		});
		children
	};

	let mut order = Vec::<NodeId>::with_capacity(required.len());
	let mut visited = HashSet::from([target]);
	let mut stack = vec![(target, pending_children(target))];

	loop {
		let next = match stack.last_mut() {
			Some((_, children)) => children.pop(),
			None => break,
		};

		match next {
			Some(child) => {
				if visited.insert(child) {
					stack.push((child, pending_children(child)));
				}
			},
			None => {
				if let Some((i, _)) = stack.pop() {
					order.push(graph.node_at(i).id.clone());
				}
			},
		}
	}

	order
}
