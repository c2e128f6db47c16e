//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("malformed data: {0}")]
	MalformedData(#[from] MalformedDataError),
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	#[error("unknown node `{0}`")]
	UnknownNode(String),
}

/// Problems found in objective or station definitions while building a [`crate::DependencyGraph`].
/// 
/// These are fatal to the build, a graph is never returned partially built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDataError {
	/// Two definitions share the same identifier.
	#[error("identifier `{0}` is defined more than once.")]
	DuplicateId(String),
	/// A prerequisite names a node that was never defined.
	#[error("`{node}` requires unknown node `{prerequisite}`.")]
	UnknownPrerequisite { node: String, prerequisite: String },
	/// A station level requires a station that was never defined.
	#[error("`{node}` requires unknown station `{station}`.")]
	UnknownStation { node: String, station: String },
	/// A station level requires a level the station doesn't have.
	#[error("`{node}` requires level {level} of station `{station}` which does not exist.")]
	UnknownStationLevel { node: String, station: String, level: u32 },
	/// A station defines the same level twice.
	#[error("station `{station}` defines level {level} more than once.")]
	DuplicateStationLevel { station: String, level: u32 },
	/// A requirement asks for nothing.
	#[error("`{node}` requires zero of item `{item}`.")]
	ZeroQuantity { node: String, item: String },
	/// The prerequisite relation loops back on itself through this node.
	#[error("prerequisite cycle detected through `{node}`.")]
	Cycle { node: String },
}
