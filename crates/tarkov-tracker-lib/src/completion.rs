//! Player progress as supplied by the host application.

use std::collections::{BTreeSet, VecDeque};

use serde::{Serialize, Deserialize};

use crate::dependency_graph::{DependencyGraph, NodeId};

/// Which nodes the player has completed and their current level.
///
/// This is the only input to the engine that changes over time.
/// The engine never mutates it, hosts change it in response to user actions and recompute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionState {
	#[serde(default)]
	completed: BTreeSet<NodeId>,
	player_level: i32,
}

impl Default for CompletionState {
	fn default() -> Self {
		Self { completed: Default::default(), player_level: 1 }
	}
}

impl CompletionState {
	/// # Errors
	/// - [`crate::Error::InvalidArgument`] if `player_level` is negative.
	pub fn new(player_level: i32) -> crate::Result<Self> {
		check_player_level(player_level)?;
		Ok(Self { completed: Default::default(), player_level })
	}

	/// Builder style helper for marking several nodes completed at once.
	pub fn with_completed<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<NodeId>,
	{
		self.completed.extend(ids.into_iter().map(Into::into));
		self
	}

	pub fn player_level(&self) -> i32 {
		self.player_level
	}

	/// # Errors
	/// - [`crate::Error::InvalidArgument`] if `player_level` is negative, the state is left unchanged.
	pub fn set_player_level(&mut self, player_level: i32) -> crate::Result<()> {
		check_player_level(player_level)?;
		log::trace!("Player level changed from {} to {}", self.player_level, player_level);
		self.player_level = player_level;
		Ok(())
	}

	/// Fails if the state was deserialized or constructed with a negative level.
	pub fn validate(&self) -> crate::Result<()> {
		check_player_level(self.player_level)
	}

	/// The level as an unsigned value after validation.
	pub(crate) fn checked_player_level(&self) -> crate::Result<u32> {
		self.validate()?;
		Ok(self.player_level as u32)
	}

	pub fn completed(&self) -> &BTreeSet<NodeId> {
		&self.completed
	}

	pub fn is_completed(&self, id: &str) -> bool {
		self.completed.contains(id)
	}

	/// Marks or unmarks a node, returns if anything changed.
	pub fn set_completed(&mut self, id: impl Into<NodeId>, completed: bool) -> bool {
		let id = id.into();
		log::trace!("Setting `{}` completed: {}", id, completed);
		if completed {
			self.completed.insert(id)
		} else {
			self.completed.remove(&id)
		}
	}

	/// Flips the completion of a node and returns the new value.
	pub fn toggle(&mut self, id: impl Into<NodeId>) -> bool {
		let id = id.into();
		let completed = !self.completed.contains(&id);
		self.set_completed(id, completed);
		completed
	}

	/// Marks `id` and every node it transitively depends on as completed.
	///
	/// Returns the number of nodes which were not already completed.
	///
	/// # Errors
	/// - [`crate::Error::UnknownNode`] if `id` isn't in the graph.
	pub fn complete_with_prerequisites(&mut self, graph: &DependencyGraph, id: &str) -> crate::Result<usize> {
		let start = graph.index_of(id).ok_or_else(|| crate::Error::UnknownNode(id.to_owned()))?;

		let mut added = 0;
		let mut visited = vec![false; graph.node_count()];
		let mut queue = VecDeque::from([start]);
		while let Some(i) = queue.pop_front() {
			if visited[i.index()] { continue; }
			visited[i.index()] = true;

			if self.completed.insert(graph.node_at(i).id.clone()) {
				added += 1;
			}
			queue.extend(graph.prerequisite_indices(i).iter().copied());
		}

		log::debug!("Marked {} node(s) completed for `{}`", added, id);
		Ok(added)
	}

	/// Drops completed ids which no longer exist in `graph`, e.g. after a dataset update.
	///
	/// Returns the removed ids.
	pub fn prune_unknown(&mut self, graph: &DependencyGraph) -> Vec<NodeId> {
		let (kept, removed): (BTreeSet<NodeId>, BTreeSet<NodeId>) = std::mem::take(&mut self.completed)
			.into_iter()
			.partition(|id| graph.contains(id));
		self.completed = kept;
		if !removed.is_empty() {
			log::info!("Pruned {} completed id(s) not present in the dataset", removed.len());
		}
		removed.into_iter().collect()
	}

	pub fn load_from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let data = std::fs::read_to_string(path.as_ref())?;
		let state: Self = serde_json::from_str(&data)?;
		state.validate()?;
		Ok(state)
	}

	pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, serde_json::to_string_pretty(self)?)?;
		log::trace!("Saved progress to {}", path.display());
		Ok(())
	}
}

fn check_player_level(player_level: i32) -> crate::Result<()> {
	if player_level < 0 {
		Err(crate::Error::InvalidArgument(format!("player level must not be negative, got {}", player_level)))
	} else {
		Ok(())
	}
}
