//! Subcommands of the terminal host.
//!
//! Every command reads the saved progress, and the ones that change it save it back before returning.

use std::io::Write;

use tarkov_tracker::tracker::TrackerOptions;
use tarkov_tracker::{CompletionState, Dataset, DependencyGraph, PathOutcome, ProgressTracker, ScopeMode, TrackerConfig};

/// A loaded graph and the player's progress.
pub struct Session {
	graph: DependencyGraph,
	state: CompletionState,
	progress_path: std::path::PathBuf,
	options: TrackerOptions,
}

impl Session {
	/// Loads the dataset and the progress file, a missing progress file starts fresh.
	pub fn open(config: &TrackerConfig, dataset_path: impl AsRef<std::path::Path>, progress_path: std::path::PathBuf) -> Result<Self, Error> {
		let graph = Dataset::load_from_file(dataset_path)?.build_graph(config.max_player_level())?;
		let state = load_progress(&progress_path)?;
		Ok(Self::new(graph, state, progress_path, TrackerOptions::from(config)))
	}

	pub fn new(graph: DependencyGraph, mut state: CompletionState, progress_path: std::path::PathBuf, options: TrackerOptions) -> Self {
		for id in state.prune_unknown(&graph) {
			log::warn!("Dropping progress for `{}`, it is no longer in the dataset", id);
		}
		Self { graph, state, progress_path, options }
	}

	pub fn set_scope(&mut self, scope: ScopeMode) {
		self.options.aggregate.scope = scope;
	}

	pub fn state(&self) -> &CompletionState {
		&self.state
	}

	/// Runs the command named by the first argument, writing its report to `out`.
	pub fn run(&mut self, args: &[String], out: &mut impl Write) -> Result<(), Error> {
		let command = args.first().ok_or(Error::MissingArgument("command"))?;
		let argument = args.get(1).map(String::as_str);
		log::trace!("Running command `{}`", command);

		match command.as_str() {
			"status" => self.status(out),
			"path" => self.path(argument.ok_or(Error::MissingArgument("node id"))?, out),
			"needs" => self.needs(out),
			"clusters" => self.clusters(out),
			"complete" => {
				let id = self.known_node(argument)?;
				if self.state.set_completed(id.as_str(), true) {
					writeln!(out, "Completed {}", id)?;
				} else {
					writeln!(out, "{} was already completed", id)?;
				}
				self.save()
			},
			"complete-chain" => {
				let id = self.known_node(argument)?;
				let added = self.state.complete_with_prerequisites(&self.graph, &id)?;
				writeln!(out, "Completed {} and {} node(s) before it", id, added.saturating_sub(1))?;
				self.save()
			},
			"uncomplete" => {
				let id = self.known_node(argument)?;
				if self.state.set_completed(id.as_str(), false) {
					writeln!(out, "Marked {} not completed", id)?;
				} else {
					writeln!(out, "{} was not completed", id)?;
				}
				self.save()
			},
			"level" => {
				let level = argument.ok_or(Error::MissingArgument("level"))?;
				let level: i32 = level.parse().map_err(|_| Error::InvalidArgument(format!("`{}` is not a level", level)))?;
				self.state.set_player_level(level)?;
				writeln!(out, "Player level set to {}", level)?;
				self.save()
			},
			"export" => {
				let statuses = ProgressTracker::new(&self.graph).statuses(&self.state)?.clone();
				serde_json::to_writer_pretty(&mut *out, &statuses)?;
				writeln!(out)?;
				Ok(())
			},
			other => Err(Error::UnknownCommand(other.to_owned())),
		}
	}

	fn known_node(&self, id: Option<&str>) -> Result<String, Error> {
		let id = id.ok_or(Error::MissingArgument("node id"))?;
		Ok(self.graph.node(id)?.id.clone())
	}

	fn save(&self) -> Result<(), Error> {
		self.state.save_to_file(&self.progress_path)?;
		log::debug!("Saved progress to {}", self.progress_path.display());
		Ok(())
	}

	fn status(&mut self, out: &mut impl Write) -> Result<(), Error> {
		let mut tracker = ProgressTracker::new(&self.graph).with_options(self.options);
		let statuses = tracker.statuses(&self.state)?;
		let summary = statuses.summary();

		writeln!(out, "Level {}: {} completed, {} available, {} locked", self.state.player_level(), summary.completed, summary.unlocked, summary.locked)?;
		for id in statuses.frontier() {
			let node = self.graph.node(id)?;
			writeln!(out, "\t[{}] {} ({})", node.group_tag(), node.name, node.id)?;
		}
		Ok(())
	}

	fn path(&self, target: &str, out: &mut impl Write) -> Result<(), Error> {
		match tarkov_tracker::find_path(&self.graph, target, &self.state)? {
			PathOutcome::Path(nodes) => {
				for (i, id) in nodes.iter().enumerate() {
					let node = self.graph.node(id)?;
					writeln!(out, "{}) {} ({})", i + 1, node.name, node.id)?;
				}
			},
			PathOutcome::AlreadyCompleted => writeln!(out, "{} is already completed", target)?,
			PathOutcome::Unreachable { node, required_level } => {
				writeln!(out, "{} can't be reached, {} requires level {}", target, node, required_level)?
			},
		}
		Ok(())
	}

	fn needs(&mut self, out: &mut impl Write) -> Result<(), Error> {
		let mut tracker = ProgressTracker::new(&self.graph).with_options(self.options);
		let snapshot = tracker.recompute(&self.state, None)?;

		for req in &snapshot.requirements {
			let tier = req.priority_tier.map(|t| t.to_string()).unwrap_or_default();
			let name = self.graph.item_name(&req.item).unwrap_or(&req.item);
			let fir = if req.found_in_raid { " (found in raid)" } else { "" };
			write!(out, "{:<10} {} x{}{}", tier, name, req.remaining(), fir)?;
			if req.optional_quantity > 0 {
				write!(out, " +{} optional", req.optional_quantity)?;
			}
			if req.already_satisfied {
				write!(out, " [done]")?;
			}
			writeln!(out)?;
		}
		Ok(())
	}

	fn clusters(&mut self, out: &mut impl Write) -> Result<(), Error> {
		let mut tracker = ProgressTracker::new(&self.graph).with_options(self.options);
		let snapshot = tracker.recompute(&self.state, None)?;

		if snapshot.clusters.is_empty() {
			writeln!(out, "No two available objectives share a location")?;
		}
		for cluster in &snapshot.clusters {
			writeln!(out, "{} ({} objectives)", cluster.location, cluster.nodes.len())?;
			for (kind, nodes) in &cluster.kind_breakdown {
				writeln!(out, "\t{}: {}", kind, nodes.join(", "))?;
			}
			if !cluster.untagged.is_empty() {
				writeln!(out, "\tother: {}", cluster.untagged.join(", "))?;
			}
		}
		Ok(())
	}
}

fn load_progress(path: &std::path::Path) -> Result<CompletionState, Error> {
	match CompletionState::load_from_file(path) {
		Ok(state) => Ok(state),
		Err(tarkov_tracker::Error::IO(e)) if e.kind() == std::io::ErrorKind::NotFound => {
			log::info!("No progress at {}, starting fresh", path.display());
			Ok(CompletionState::default())
		},
		Err(e) => Err(e.into()),
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Tracker error: {0}")]
	Tracker(#[from] tarkov_tracker::Error),
	#[error("Output error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("Missing argument: {0}")]
	MissingArgument(&'static str),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Unknown command `{0}`")]
	UnknownCommand(String),
}
