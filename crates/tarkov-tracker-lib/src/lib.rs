pub mod error;
pub use error::Result;
pub use error::Error;
pub use error::MalformedDataError;

pub mod config;
pub use config::TrackerConfig;

pub mod dataset;
pub use dataset::Dataset;

pub mod dependency_graph;
pub use dependency_graph::DependencyGraph;
pub use dependency_graph::GraphBuilder;
pub use dependency_graph::Node;
pub use dependency_graph::NodeId;

pub mod completion;
pub use completion::CompletionState;

pub mod unlock;
pub use unlock::NodeStatus;
pub use unlock::NodeStatuses;
pub use unlock::compute_status;

pub mod path_finder;
pub use path_finder::PathOutcome;
pub use path_finder::find_path;

pub mod requirements;
pub use requirements::AggregatedRequirement;
pub use requirements::ScopeMode;
pub use requirements::aggregate;

pub mod priority;
pub use priority::PriorityTier;
pub use priority::classify;

pub mod clusters;
pub use clusters::Cluster;
pub use clusters::find_clusters;

pub mod tracker;
pub use tracker::ProgressTracker;
