//! The recomputation pipeline a host runs after every change to a [`CompletionState`].
//!
//! # Usage
//! 1. Build a [`DependencyGraph`] once.
//! 1. Create a [`ProgressTracker`] borrowing it.
//! 1. After each user action call [`ProgressTracker::recompute()`] with the new state to get a [`ProgressSnapshot`].
//!
//! Statuses are memoized by completion set and level, so asking about an unchanged state doesn't recompute them.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Deserialize};

use crate::clusters::{self, Cluster};
use crate::completion::CompletionState;
use crate::dependency_graph::DependencyGraph;
use crate::path_finder::{self, PathOutcome};
use crate::priority::{self, TierThresholds};
use crate::requirements::{self, AggregateOptions, AggregatedRequirement};
use crate::unlock::{self, NodeStatuses, StatusSummary};

/// Memoized result of [`unlock::compute_status`] for the last state seen.
///
/// Only valid for a single graph.
#[derive(Debug, Default)]
pub struct StatusCache {
	entry: Option<CacheEntry>,
	hits: usize,
	misses: usize,
}

impl StatusCache {
	/// Returns cached statuses if `state` matches the last computed state, otherwise recomputes.
	pub fn get_or_compute(&mut self, graph: &DependencyGraph, state: &CompletionState) -> crate::Result<&NodeStatuses> {
		let key = state_key(state);

		/* A failed computation leaves the cache empty */
		let entry = match self.entry.take() {
			/* The hash only filters, equal hashes can still be different states */
			Some(entry) if entry.key == key && entry.state == *state => {
				self.hits += 1;
				entry
			},
			_ => {
				self.misses += 1;
				let statuses = unlock::compute_status(graph, state)?;
				CacheEntry { key, state: state.clone(), statuses }
			},
		};

		Ok(&self.entry.insert(entry).statuses)
	}

	pub fn invalidate(&mut self) {
		log::trace!("Status cache invalidated");
		self.entry = None;
	}

	pub fn hits(&self) -> usize {
		self.hits
	}

	pub fn misses(&self) -> usize {
		self.misses
	}
}

#[derive(Debug)]
struct CacheEntry {
	key: u64,
	state: CompletionState,
	statuses: NodeStatuses,
}

fn state_key(state: &CompletionState) -> u64 {
	let mut hasher = std::collections::hash_map::DefaultHasher::new();
	state.hash(&mut hasher);
	hasher.finish()
}

/// Settings for each stage of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerOptions {
	pub aggregate: AggregateOptions,
	pub thresholds: TierThresholds,
}

impl From<&crate::TrackerConfig> for TrackerOptions {
	fn from(config: &crate::TrackerConfig) -> Self {
		Self { aggregate: config.aggregate_options(), thresholds: config.tier_thresholds() }
	}
}

/// Everything the presentation layer needs after one recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
	pub statuses: NodeStatuses,
	pub summary: StatusSummary,
	/// Classified and sorted for display.
	pub requirements: Vec<AggregatedRequirement>,
	pub clusters: Vec<Cluster>,
}

/// Runs status → aggregation → classification → clustering in that order.
#[derive(Debug)]
pub struct ProgressTracker<'g> {
	graph: &'g DependencyGraph,
	options: TrackerOptions,
	cache: StatusCache,
}

impl<'g> ProgressTracker<'g> {
	pub fn new(graph: &'g DependencyGraph) -> Self {
		Self { graph, options: Default::default(), cache: Default::default() }
	}

	pub fn with_options(mut self, options: TrackerOptions) -> Self {
		self.options = options;
		self
	}

	pub fn graph(&self) -> &'g DependencyGraph {
		self.graph
	}

	pub fn options(&self) -> &TrackerOptions {
		&self.options
	}

	pub fn cache(&self) -> &StatusCache {
		&self.cache
	}

	/// Statuses for `state`, from the cache when possible.
	pub fn statuses(&mut self, state: &CompletionState) -> crate::Result<&NodeStatuses> {
		self.cache.get_or_compute(self.graph, state)
	}

	/// Runs the full pipeline.
	///
	/// `collected` holds externally observed item counts, see [`requirements::apply_collected`].
	pub fn recompute(&mut self, state: &CompletionState, collected: Option<&HashMap<String, u32>>) -> crate::Result<ProgressSnapshot> {
		let graph = self.graph;
		let options = self.options;
		let statuses = self.cache.get_or_compute(graph, state)?.clone();

		let aggregated = requirements::aggregate_with_options(graph, &statuses, options.aggregate);
		let mut classified = priority::classify_with_thresholds(graph, &statuses, aggregated, options.thresholds);
		if let Some(collected) = collected {
			requirements::apply_collected(&mut classified, collected);
		}
		requirements::sort_for_display(graph, &mut classified);

		let clusters = clusters::find_clusters(graph, &statuses, state.player_level())?;

		log::debug!("Recomputed progress: {} item(s), {} cluster(s)", classified.len(), clusters.len());

		Ok(ProgressSnapshot {
			summary: statuses.summary(),
			statuses,
			requirements: classified,
			clusters,
		})
	}

	/// See [`path_finder::find_path`], the status cache isn't used.
	pub fn path_to(&self, target: &str, state: &CompletionState) -> crate::Result<PathOutcome> {
		path_finder::find_path(self.graph, target, state)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::ObjectiveDef;

	fn graph() -> DependencyGraph {
		let objectives = vec![ObjectiveDef::new("a", "A"), ObjectiveDef::new("b", "B").prerequisite("a")];
		DependencyGraph::build(&objectives, &[]).unwrap()
	}

	#[test]
	fn equal_state_hits() {
		let graph = graph();
		let state = CompletionState::default();
		let mut cache = StatusCache::default();

		cache.get_or_compute(&graph, &state).unwrap();
		cache.get_or_compute(&graph, &state.clone()).unwrap();
		assert_eq!((cache.hits(), cache.misses()), (1, 1));
	}

	#[test]
	fn colliding_key_with_other_state_misses() {
		let graph = graph();
		let stale = CompletionState::default();
		let current = CompletionState::default().with_completed(["a"]);
		let mut cache = StatusCache::default();

		/* Entry filed under the current state's key but holding another state's statuses */
		cache.entry = Some(CacheEntry {
			key: state_key(&current),
			statuses: unlock::compute_status(&graph, &stale).unwrap(),
			state: stale,
		});

		let statuses = cache.get_or_compute(&graph, &current).unwrap();
		assert!(statuses.is_completed("a"));
		assert!(statuses.is_unlocked("b"));
		assert_eq!((cache.hits(), cache.misses()), (0, 1));
	}
}
