//! Tick-driven interpolation between timeline snapshots.
//!
//! A transition is a counter running from 1 to `ticks`. Every call to
//! [`InterpolationEngine::tick`] advances it by one and rewrites the animation
//! state; the last tick snaps to the target snapshot exactly. Whoever owns the
//! engine decides how ticks are scheduled.

use log::{debug, warn};

use super::config::{EngineConfig, LinkSwap};
use super::error::EngineError;
use super::state::{AnimationState, LinkSegment};
use super::timeline::Timeline;
use super::types::{LinkSet, StepIndex};

/// An in-flight transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
	/// Step the interpolation starts from.
	pub from: StepIndex,
	/// Step the interpolation ends on.
	pub to: StepIndex,
	/// Ticks already applied.
	pub tick: u32,
	/// Ticks in the whole transition.
	pub ticks: u32,
}

impl Transition {
	/// Share of the transition already applied, in `0.0..=1.0`.
	pub fn progress(&self) -> f64 {
		f64::from(self.tick) / f64::from(self.ticks)
	}
}

/// What a call to [`InterpolationEngine::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
	/// No transition is running.
	Idle,
	/// An intermediate frame was written.
	Advanced {
		/// Tick just applied, starting at 1.
		tick: u32,
		/// Ticks in the whole transition.
		ticks: u32,
	},
	/// The final tick ran; the state now equals the snapshot of `step`.
	Completed {
		/// The step reached.
		step: StepIndex,
	},
}

impl TickOutcome {
	/// Whether more ticks follow.
	pub fn is_running(&self) -> bool {
		matches!(self, TickOutcome::Advanced { .. })
	}
}

/// Owns the animation state and moves it between time steps.
#[derive(Debug)]
pub struct InterpolationEngine {
	timeline: Timeline,
	config: EngineConfig,
	state: AnimationState,
	current: StepIndex,
	links_step: StepIndex,
	transition: Option<Transition>,
}

impl InterpolationEngine {
	/// Creates an engine showing the first step of `timeline`.
	pub fn new(timeline: Timeline, config: EngineConfig) -> Result<Self, EngineError> {
		config.validate()?;
		let first = timeline
			.step(0)
			.ok_or(EngineError::InvalidStep { step: 0, len: 0 })?;
		let state = AnimationState::from_snapshot(&first.snapshot);
		Ok(Self {
			timeline,
			config,
			state,
			current: 0,
			links_step: 0,
			transition: None,
		})
	}

	/// The data being animated.
	pub fn timeline(&self) -> &Timeline {
		&self.timeline
	}

	/// Settings the engine was built with.
	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Current frame of every node.
	pub fn state(&self) -> &AnimationState {
		&self.state
	}

	/// Step the state last settled on.
	pub fn current_step(&self) -> StepIndex {
		self.current
	}

	/// The running transition, if any.
	pub fn in_flight(&self) -> Option<Transition> {
		self.transition
	}

	/// Whether a transition is running.
	pub fn is_running(&self) -> bool {
		self.transition.is_some()
	}

	/// Links currently on display.
	pub fn active_links(&self) -> &LinkSet {
		&self.timeline.steps()[self.links_step].links
	}

	/// Active links resolved against the current state, with the hidden flag set
	/// for links longer than the configured distance limit.
	pub fn link_segments(&self) -> impl Iterator<Item = LinkSegment> + '_ {
		let limit = self.config.distance_limit;
		self.active_links()
			.iter()
			.map(move |&link| self.state.segment(link, limit))
	}

	fn check_step(&self, step: StepIndex) -> Result<(), EngineError> {
		if step < self.timeline.len() {
			Ok(())
		} else {
			Err(EngineError::InvalidStep {
				step,
				len: self.timeline.len(),
			})
		}
	}

	fn check_idle(&self) -> Result<(), EngineError> {
		match self.transition {
			Some(running) => {
				warn!(
					"Rejecting request while transition {} -> {} is at tick {}/{}",
					running.from, running.to, running.tick, running.ticks
				);
				Err(EngineError::Busy {
					from: running.from,
					to: running.to,
				})
			}
			None => Ok(()),
		}
	}

	/// Sets the state to the snapshot of `to` without interpolating.
	pub fn jump_to(&mut self, to: StepIndex) -> Result<(), EngineError> {
		self.check_step(to)?;
		self.check_idle()?;
		self.state.snap_to(&self.timeline.steps()[to].snapshot);
		self.current = to;
		self.links_step = to;
		debug!("Jumped to step {to}");
		Ok(())
	}

	/// Starts moving the state from the snapshot of `from` to the snapshot of
	/// `to`. Returns `Ok(false)` when both are the same step.
	///
	/// Nothing moves until [`tick`](Self::tick) is called.
	pub fn transition(&mut self, from: StepIndex, to: StepIndex) -> Result<bool, EngineError> {
		self.check_step(from)?;
		self.check_step(to)?;
		self.check_idle()?;
		if from == to {
			return Ok(false);
		}

		let ticks = self.config.ticks;
		self.transition = Some(Transition {
			from,
			to,
			tick: 0,
			ticks,
		});
		if self.config.link_swap == LinkSwap::OnStart {
			self.links_step = to;
		}
		debug!("Transition {from} -> {to} started ({ticks} ticks)");
		Ok(true)
	}

	/// Starts a transition from the current step.
	pub fn transition_to(&mut self, to: StepIndex) -> Result<bool, EngineError> {
		self.transition(self.current, to)
	}

	/// Applies the next tick of the running transition.
	pub fn tick(&mut self) -> TickOutcome {
		let Some(transition) = self.transition.as_mut() else {
			return TickOutcome::Idle;
		};
		transition.tick += 1;
		let Transition {
			from,
			to,
			tick,
			ticks,
		} = *transition;

		let steps = self.timeline.steps();
		if tick < ticks {
			self.state
				.blend(&steps[from].snapshot, &steps[to].snapshot, tick, ticks);
			return TickOutcome::Advanced { tick, ticks };
		}

		// Snap instead of evaluating the last tick to avoid accumulated drift.
		self.state.snap_to(&steps[to].snapshot);
		self.links_step = to;
		self.current = to;
		self.transition = None;
		debug!("Transition {from} -> {to} completed");
		TickOutcome::Completed { step: to }
	}

	/// Runs the remaining ticks of the current transition immediately.
	pub fn finish(&mut self) -> TickOutcome {
		let mut outcome = self.tick();
		while outcome.is_running() {
			outcome = self.tick();
		}
		outcome
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::animation::timeline::StepRecord;
	use crate::animation::types::{GraphNode, LinkRecord, NodeFrame, NodePosition};

	fn two_steps() -> Timeline {
		Timeline::new(
			vec![GraphNode::new("X")],
			vec![
				StepRecord {
					label: None,
					positions: vec![NodePosition::new("X", 0.0, 0.0, 0)],
					links: vec![],
				},
				StepRecord {
					label: None,
					positions: vec![NodePosition::new("X", 100.0, 0.0, 9)],
					links: vec![],
				},
			],
		)
		.unwrap()
	}

	fn drifting() -> Timeline {
		let step = |x: f64, y: f64, d: u32, links: Vec<LinkRecord>| StepRecord {
			label: None,
			positions: vec![
				NodePosition::new("a", x, y, d),
				NodePosition::new("b", y, x, d + 2),
				NodePosition::new("c", 7.0, 7.0, 3),
			],
			links,
		};
		Timeline::new(
			vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")],
			vec![
				step(0.1, 0.3, 1, vec![LinkRecord::new("a", "b")]),
				step(0.7, -1.9, 6, vec![LinkRecord::new("b", "c")]),
				step(-333.3, 1e-3, 40, vec![]),
			],
		)
		.unwrap()
	}

	fn frame(engine: &InterpolationEngine, id: &str) -> NodeFrame {
		let key = engine.timeline().node_set().key(id).unwrap();
		engine.state().get(key)
	}

	#[test]
	fn starts_on_first_step() {
		let engine = InterpolationEngine::new(two_steps(), EngineConfig::default()).unwrap();
		assert_eq!(engine.current_step(), 0);
		assert!(!engine.is_running());
		assert_eq!(
			frame(&engine, "X"),
			NodeFrame {
				x: 0.0,
				y: 0.0,
				scale: 1.0
			}
		);
	}

	#[test]
	fn halfway_and_final_frames() {
		let mut engine = InterpolationEngine::new(two_steps(), EngineConfig::default()).unwrap();
		assert_eq!(engine.transition(0, 1), Ok(true));

		for _ in 0..100 {
			assert!(engine.tick().is_running());
		}
		let mid = frame(&engine, "X");
		assert_eq!(mid.x, 50.0);
		assert_eq!(mid.scale, 1.5);
		assert_eq!(engine.in_flight().map(|t| t.progress()), Some(0.5));

		for _ in 100..199 {
			engine.tick();
		}
		assert_eq!(engine.tick(), TickOutcome::Completed { step: 1 });
		let end = frame(&engine, "X");
		assert_eq!(end.x, 100.0);
		assert_eq!(end.scale, 2.0);
		assert_eq!(engine.current_step(), 1);
		assert_eq!(engine.tick(), TickOutcome::Idle);
	}

	#[test]
	fn runs_exactly_the_configured_ticks() {
		let config = EngineConfig {
			ticks: 7,
			..EngineConfig::default()
		};
		let mut engine = InterpolationEngine::new(two_steps(), config).unwrap();
		engine.transition(0, 1).unwrap();
		let mut outcomes = Vec::new();
		loop {
			let outcome = engine.tick();
			outcomes.push(outcome);
			if !outcome.is_running() {
				break;
			}
		}
		assert_eq!(outcomes.len(), 7);
		assert_eq!(outcomes[0], TickOutcome::Advanced { tick: 1, ticks: 7 });
		assert_eq!(outcomes[6], TickOutcome::Completed { step: 1 });
	}

	#[test]
	fn jump_to_matches_snapshot_exactly() {
		let mut engine = InterpolationEngine::new(drifting(), EngineConfig::default()).unwrap();
		for step in [2, 0, 1] {
			engine.jump_to(step).unwrap();
			let snapshot = &engine.timeline().steps()[step].snapshot;
			for key in engine.timeline().node_set().keys() {
				assert_eq!(engine.state().get(key), snapshot.frame(key));
			}
			assert_eq!(engine.current_step(), step);
			assert_eq!(engine.active_links(), &engine.timeline().steps()[step].links);
		}
	}

	#[test]
	fn completed_transition_has_no_drift() {
		let mut engine = InterpolationEngine::new(drifting(), EngineConfig::default()).unwrap();
		for (from, to) in [(0, 2), (2, 1), (1, 0)] {
			engine.transition(from, to).unwrap();
			assert_eq!(engine.finish(), TickOutcome::Completed { step: to });
			let expected = &engine.timeline().steps()[to].snapshot;
			for key in engine.timeline().node_set().keys() {
				assert_eq!(engine.state().get(key), expected.frame(key));
			}
		}
	}

	#[test]
	fn intermediate_frames_stay_between_snapshots() {
		let config = EngineConfig {
			ticks: 50,
			..EngineConfig::default()
		};
		let mut engine = InterpolationEngine::new(drifting(), config).unwrap();
		let timeline = engine.timeline().clone();
		let (from, to) = (&timeline.steps()[0].snapshot, &timeline.steps()[1].snapshot);
		engine.transition(0, 1).unwrap();

		let between = |v: f64, a: f64, b: f64| {
			if a == b {
				v == a
			} else {
				v > a.min(b) && v < a.max(b)
			}
		};
		while engine.tick().is_running() {
			for key in timeline.node_set().keys() {
				let (a, b, v) = (from.frame(key), to.frame(key), engine.state().get(key));
				assert!(between(v.x, a.x, b.x));
				assert!(between(v.y, a.y, b.y));
				assert!(between(v.scale, a.scale, b.scale));
			}
		}
	}

	#[test]
	fn links_swap_after_final_tick() {
		let config = EngineConfig {
			ticks: 3,
			..EngineConfig::default()
		};
		let mut engine = InterpolationEngine::new(drifting(), config).unwrap();
		let before = engine.timeline().steps()[0].links.clone();
		let after = engine.timeline().steps()[1].links.clone();

		engine.transition(0, 1).unwrap();
		engine.tick();
		engine.tick();
		assert_eq!(engine.active_links(), &before);
		engine.tick();
		assert_eq!(engine.active_links(), &after);
	}

	#[test]
	fn links_swap_on_start_when_configured() {
		let config = EngineConfig {
			link_swap: LinkSwap::OnStart,
			..EngineConfig::default()
		};
		let mut engine = InterpolationEngine::new(drifting(), config).unwrap();
		engine.transition(0, 1).unwrap();
		assert_eq!(engine.active_links(), &engine.timeline().steps()[1].links);
		assert_eq!(engine.current_step(), 0);
	}

	#[test]
	fn rejects_overlapping_and_invalid_requests() {
		let mut engine = InterpolationEngine::new(drifting(), EngineConfig::default()).unwrap();
		assert_eq!(
			engine.transition(0, 3),
			Err(EngineError::InvalidStep { step: 3, len: 3 })
		);
		assert_eq!(
			engine.jump_to(9),
			Err(EngineError::InvalidStep { step: 9, len: 3 })
		);

		engine.transition(0, 2).unwrap();
		engine.tick();
		assert_eq!(
			engine.transition(2, 1),
			Err(EngineError::Busy { from: 0, to: 2 })
		);
		assert_eq!(engine.jump_to(1), Err(EngineError::Busy { from: 0, to: 2 }));

		engine.finish();
		assert_eq!(engine.transition_to(1), Ok(true));
	}

	#[test]
	fn same_step_request_is_ignored() {
		let mut engine = InterpolationEngine::new(drifting(), EngineConfig::default()).unwrap();
		assert_eq!(engine.transition_to(0), Ok(false));
		assert!(!engine.is_running());
		assert_eq!(engine.tick(), TickOutcome::Idle);
	}

	#[test]
	fn hides_long_links() {
		let timeline = Timeline::new(
			vec![GraphNode::new("a"), GraphNode::new("b")],
			vec![StepRecord {
				label: None,
				positions: vec![
					NodePosition::new("a", 0.0, 0.0, 0),
					NodePosition::new("b", 221.0, 0.0, 0),
				],
				links: vec![LinkRecord::new("a", "b"), LinkRecord::new("b", "a")],
			}],
		)
		.unwrap();
		let engine = InterpolationEngine::new(timeline, EngineConfig::default()).unwrap();
		assert!(engine.link_segments().all(|segment| segment.hidden));

		let relaxed = InterpolationEngine::new(
			engine.timeline().clone(),
			EngineConfig {
				distance_limit: 221.0,
				..EngineConfig::default()
			},
		)
		.unwrap();
		assert!(relaxed.link_segments().all(|segment| !segment.hidden));
	}

	#[test]
	fn rejects_invalid_config() {
		let config = EngineConfig {
			ticks: 0,
			..EngineConfig::default()
		};
		assert!(matches!(
			InterpolationEngine::new(two_steps(), config),
			Err(EngineError::InvalidConfig(_))
		));
	}
}
