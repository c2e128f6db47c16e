//! Merging the item requirements of many nodes into one shopping list.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Deserialize};

use crate::dependency_graph::{DependencyGraph, NodeId};
use crate::priority::PriorityTier;
use crate::unlock::{NodeStatus, NodeStatuses};

/// Which nodes contribute their requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeMode {
	/// Only nodes that can be completed right now.
	ActiveOnly,
	/// Unlocked and locked nodes, everything still to be done.
	#[default]
	AllIncomplete,
	/// Every node, including completed ones. Useful for seeing what has already been spent.
	IncludeCompleted,
}

impl ScopeMode {
	pub fn includes(&self, status: NodeStatus) -> bool {
		match self {
			ScopeMode::ActiveOnly => status == NodeStatus::Unlocked,
			ScopeMode::AllIncomplete => status != NodeStatus::Completed,
			ScopeMode::IncludeCompleted => true,
		}
	}
}

/// One node's contribution to an [`AggregatedRequirement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementSource {
	pub node: NodeId,
	pub quantity: u32,
	pub found_in_raid: bool,
	/// Optional hand-ins are counted in `optional_quantity` instead of `total_quantity`.
	pub optional: bool,
}

/// Everything in scope that needs a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRequirement {
	pub item: String,
	pub total_quantity: u32,
	pub optional_quantity: u32,
	/// Supplied by the host, e.g. from stash detection. Never computed by the engine.
	pub collected_quantity: u32,
	pub sources: Vec<RequirementSource>,
	/// Set if any source needs the item found in raid.
	pub found_in_raid: bool,
	/// Filled in by [`crate::classify`].
	pub priority_tier: Option<PriorityTier>,
	/// Filled in by [`crate::classify`], `None` if nothing incomplete needs the item.
	pub priority_depth: Option<u32>,
	/// Only completed nodes need the item, it is shown for reference only.
	pub already_satisfied: bool,
}

impl AggregatedRequirement {
	fn new(item: String) -> Self {
		Self {
			item,
			total_quantity: 0,
			optional_quantity: 0,
			collected_quantity: 0,
			sources: Default::default(),
			found_in_raid: false,
			priority_tier: None,
			priority_depth: None,
			already_satisfied: false,
		}
	}

	/// How many are still needed after the collected amount.
	pub fn remaining(&self) -> u32 {
		self.total_quantity.saturating_sub(self.collected_quantity)
	}

	pub fn is_collected(&self) -> bool {
		self.remaining() == 0
	}

	/// Sources that gate completion of their node.
	pub fn required_sources(&self) -> impl Iterator<Item = &RequirementSource> + '_ {
		self.sources.iter().filter(|s| !s.optional)
	}
}

/// Settings for [`aggregate_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
	pub scope: ScopeMode,
	/// Include optional hand-ins as informational sources.
	pub include_optional: bool,
}

impl Default for AggregateOptions {
	fn default() -> Self {
		Self { scope: Default::default(), include_optional: true }
	}
}

/// Merges the requirements of every node in `scope` by item, optional hand-ins included.
///
/// Quantities saturate at `u32::MAX`.
///
/// Results are ordered by item id, sort them with [`sort_for_display`] once classified.
pub fn aggregate(graph: &DependencyGraph, statuses: &NodeStatuses, scope: ScopeMode) -> Vec<AggregatedRequirement> {
	aggregate_with_options(graph, statuses, AggregateOptions { scope, include_optional: true })
}

pub fn aggregate_with_options(graph: &DependencyGraph, statuses: &NodeStatuses, options: AggregateOptions) -> Vec<AggregatedRequirement> {
	let mut merged = BTreeMap::<&str, AggregatedRequirement>::new();

	for node in graph.nodes() {
		let Some(status) = statuses.get(&node.id) else {
			log::warn!("No status for `{}` while aggregating, statuses are from a different graph", node.id);
			continue;
		};
		if !options.scope.includes(status) { continue; }

		let optional = node.optional_requirements.iter().filter(|_| options.include_optional);
		let entries = node.requirements.iter().map(|r| (r, false)).chain(optional.map(|r| (r, true)));

		for (req, is_optional) in entries {
			let entry = merged.entry(req.item.as_str()).or_insert_with(|| AggregatedRequirement::new(req.item.clone()));
			if is_optional {
				entry.optional_quantity = entry.optional_quantity.saturating_add(req.count);
			} else {
				entry.total_quantity = entry.total_quantity.saturating_add(req.count);
			}
			entry.found_in_raid |= req.found_in_raid;
			entry.sources.push(RequirementSource {
				node: node.id.clone(),
				quantity: req.count,
				found_in_raid: req.found_in_raid,
				optional: is_optional,
			});
		}
	}

	log::trace!("Aggregated {} item(s) for scope {:?}", merged.len(), options.scope);
	merged.into_values().collect()
}

/// Copies externally observed item counts onto the requirements, items absent from `collected` are set to zero.
pub fn apply_collected(requirements: &mut [AggregatedRequirement], collected: &HashMap<String, u32>) {
	for req in requirements {
		req.collected_quantity = collected.get(&req.item).copied().unwrap_or(0);
	}
}

/// Sorts by tier, then depth with unknown depths last, then item name, then item id.
pub fn sort_for_display(graph: &DependencyGraph, requirements: &mut [AggregatedRequirement]) {
	requirements.sort_by(|a, b| {
		let tier = |r: &AggregatedRequirement| r.priority_tier.unwrap_or(PriorityTier::NeedLater);
		let depth = |r: &AggregatedRequirement| r.priority_depth.unwrap_or(u32::MAX);
		let name = |r: &AggregatedRequirement| graph.item_name(&r.item).unwrap_or(&r.item).to_lowercase();

		tier(a).cmp(&tier(b))
			.then_with(|| depth(a).cmp(&depth(b)))
			.then_with(|| name(a).cmp(&name(b)))
			.then_with(|| a.item.cmp(&b.item))
	});
}
