//! Animation core: validated timelines and the engine interpolating between
//! their snapshots.

#![deny(missing_docs)]

mod config;
mod engine;
mod error;
mod state;
mod timeline;
mod types;

pub use config::{
	DEFAULT_DISTANCE_LIMIT, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TICKS, EngineConfig, LinkSwap,
	MAX_TICK_INTERVAL_MS,
};
pub use engine::{InterpolationEngine, TickOutcome, Transition};
pub use error::{EngineError, TimelineError};
pub use state::{AnimationState, LinkSegment, is_link_hidden};
pub use timeline::{NodeSet, Snapshot, Step, StepRecord, Timeline};
pub use types::{
	GraphNode, Link, LinkRecord, LinkSet, NodeFrame, NodeKey, NodePosition, StepIndex, interpolate,
};
