use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Ticks per transition unless configured otherwise.
pub const DEFAULT_TICKS: u32 = 200;
/// Delay between ticks unless configured otherwise.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 25;
/// Longest drawn link unless configured otherwise.
pub const DEFAULT_DISTANCE_LIMIT: f64 = 220.0;
/// Longest delay a browser timer accepts.
pub const MAX_TICK_INTERVAL_MS: u64 = i32::MAX as u64;

/// When the links of the target step replace the current ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSwap {
	/// As soon as the transition starts.
	OnStart,
	/// After the final tick, together with the snap to the target snapshot.
	#[default]
	OnFinish,
}

/// Timing and rendering knobs of the interpolation engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Ticks per transition.
	pub ticks: u32,
	/// Wall-clock delay between two ticks.
	pub tick_interval_ms: u64,
	/// Links longer than this are not drawn.
	pub distance_limit: f64,
	/// When the target step's links become active.
	pub link_swap: LinkSwap,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			ticks: DEFAULT_TICKS,
			tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
			distance_limit: DEFAULT_DISTANCE_LIMIT,
			link_swap: LinkSwap::default(),
		}
	}
}

impl EngineConfig {
	/// Delay between ticks.
	pub fn tick_interval(&self) -> Duration {
		Duration::from_millis(self.tick_interval_ms)
	}

	/// Checks the values an engine cannot run with.
	pub fn validate(&self) -> Result<(), EngineError> {
		if self.ticks == 0 {
			return Err(EngineError::InvalidConfig(
				"a transition needs at least one tick".into(),
			));
		}
		if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
			return Err(EngineError::InvalidConfig(format!(
				"tick interval must be at most {MAX_TICK_INTERVAL_MS}ms, got {}ms",
				self.tick_interval_ms
			)));
		}
		if !self.distance_limit.is_finite() || self.distance_limit < 0.0 {
			return Err(EngineError::InvalidConfig(format!(
				"distance limit must be a finite, non-negative number, got {}",
				self.distance_limit
			)));
		}
		Ok(())
	}
}
