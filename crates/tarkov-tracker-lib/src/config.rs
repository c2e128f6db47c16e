//! Host configuration.
//!
//! The engine functions never read this themselves, hosts pass the relevant values in.

use serde::{Serialize, Deserialize};

use crate::dependency_graph::DEFAULT_MAX_PLAYER_LEVEL;
use crate::priority::TierThresholds;
use crate::requirements::{AggregateOptions, ScopeMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
	data_dir: std::path::PathBuf,
	max_player_level: u32,
	soon_max_depth: u32,
	default_scope: ScopeMode,
	include_optional: bool,
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			data_dir: default_base_dir("XDG_DATA_HOME", ".local/share").join("tarkov-tracker"),
			max_player_level: DEFAULT_MAX_PLAYER_LEVEL,
			soon_max_depth: TierThresholds::default().soon_max_depth,
			default_scope: Default::default(),
			include_optional: true,
		}
	}
}

/// Platform base directory, falls back to the working directory when no home can be found.
fn default_base_dir(xdg_var: &str, home_fallback: &str) -> std::path::PathBuf {
	#[cfg(target_os = "windows")]
	let path = {
		let _ = (xdg_var, home_fallback);
		std::env::var("APPDATA").map(std::path::PathBuf::from).unwrap_or_default()
	};

	#[cfg(not(target_os = "windows"))]
	let path = if let Ok(e) = std::env::var(xdg_var) {
		std::path::PathBuf::from(e)
	} else if let Ok(home) = std::env::var("HOME") {
		std::path::PathBuf::from(home).join(home_fallback)
	} else {
		std::path::PathBuf::default()
	};

	path
}

impl TrackerConfig {
	/// Location of the config file on this platform.
	pub fn config_path() -> std::path::PathBuf {
		default_base_dir("XDG_CONFIG_HOME", ".config").join("tarkov-tracker").join("config.json")
	}

	/// Loads the config from [`Self::config_path`].
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_path(Self::config_path())
	}

	/// Loads the config file at `path`, a missing file gives the default config.
	pub fn load_from_path(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		match std::fs::read_to_string(path) {
			Ok(data) => {
				let config: Self = serde_json::from_str(&data)?;
				log::trace!("Loaded config from {}", path.display());
				Ok(config)
			},
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				log::info!("No config file at {}, using defaults", path.display());
				Ok(Self::default())
			},
			Err(e) => Err(e.into()),
		}
	}

	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_path(Self::config_path())
	}

	pub fn save_to_path(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, serde_json::to_string_pretty(self)?)?;
		log::trace!("Saved config to {}", path.display());
		Ok(())
	}

	pub fn data_dir(&self) -> &std::path::PathBuf {
		&self.data_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_data_dir(&mut self, data_dir: std::path::PathBuf) -> bool {
		if data_dir.is_dir() {
			self.data_dir = data_dir;
			true
		} else {
			false
		}
	}

	/// Dataset file inside the data directory.
	pub fn dataset_path(&self) -> std::path::PathBuf {
		self.data_dir.join("dataset.json")
	}

	/// Progress file inside the data directory.
	pub fn progress_path(&self) -> std::path::PathBuf {
		self.data_dir.join("progress.json")
	}

	pub fn max_player_level(&self) -> u32 {
		self.max_player_level
	}
	pub fn set_max_player_level(&mut self, max_player_level: u32) {
		self.max_player_level = max_player_level;
	}

	pub fn tier_thresholds(&self) -> TierThresholds {
		TierThresholds { soon_max_depth: self.soon_max_depth }
	}
	pub fn set_soon_max_depth(&mut self, soon_max_depth: u32) {
		self.soon_max_depth = soon_max_depth;
	}

	pub fn default_scope(&self) -> ScopeMode {
		self.default_scope
	}
	pub fn set_default_scope(&mut self, scope: ScopeMode) {
		self.default_scope = scope;
	}

	pub fn include_optional(&self) -> bool {
		self.include_optional
	}
	pub fn set_include_optional(&mut self, include_optional: bool) {
		self.include_optional = include_optional;
	}

	pub fn aggregate_options(&self) -> AggregateOptions {
		AggregateOptions { scope: self.default_scope, include_optional: self.include_optional }
	}
}
