use thiserror::Error;

use super::types::StepIndex;

/// Problems found while building a [`Timeline`](super::Timeline).
#[derive(Debug, Error)]
pub enum TimelineError {
	/// The document is not valid JSON or does not have the expected shape.
	#[error("malformed timeline document: {0}")]
	Json(#[from] serde_json::Error),

	/// There is nothing to animate.
	#[error("timeline has no time steps")]
	NoSteps,

	/// Two global nodes share an id.
	#[error("node `{0}` is declared more than once")]
	DuplicateNode(String),

	/// A position or link names a node outside the node set.
	#[error("step {step} references unknown node `{id}`")]
	UnknownNode {
		/// Step containing the reference.
		step: StepIndex,
		/// The undeclared id.
		id: String,
	},

	/// A snapshot lists the same node twice.
	#[error("step {step} positions node `{id}` more than once")]
	DuplicatePosition {
		/// Step with the duplicate.
		step: StepIndex,
		/// The repeated id.
		id: String,
	},

	/// A snapshot leaves a node out.
	#[error("step {step} has no position for node `{id}`")]
	MissingPosition {
		/// Incomplete step.
		step: StepIndex,
		/// The node without a position.
		id: String,
	},

	/// A coordinate is NaN or infinite.
	#[error("step {step} has a non-finite position for node `{id}`")]
	NonFinitePosition {
		/// Step with the bad coordinate.
		step: StepIndex,
		/// The affected node.
		id: String,
	},
}

/// Rejected engine requests.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
	/// The step index is past the end of the timeline.
	#[error("step {step} is out of range (timeline has {len} steps)")]
	InvalidStep {
		/// Requested step.
		step: StepIndex,
		/// Number of steps in the timeline.
		len: usize,
	},

	/// Another transition has not finished yet.
	#[error("a transition from step {from} to step {to} is still running")]
	Busy {
		/// Start of the running transition.
		from: StepIndex,
		/// Target of the running transition.
		to: StepIndex,
	},

	/// [`EngineConfig::validate`](super::EngineConfig::validate) failed.
	#[error("invalid engine configuration: {0}")]
	InvalidConfig(String),
}
