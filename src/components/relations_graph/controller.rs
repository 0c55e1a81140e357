//! Rules tying the step buttons to the engine.

use crate::animation::{EngineError, InterpolationEngine, StepIndex, TickOutcome};

/// What became of a step button click.
#[derive(Clone, Debug, PartialEq)]
pub enum StepRequest {
	/// Same step, or a transition is still running.
	Ignored,
	Started,
	Rejected(EngineError),
}

/// Whether the tick timer should keep firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickAction {
	Continue,
	Stop,
}

/// Tracks the pressed button and whether the buttons are locked.
///
/// The pressed step moves to the target as soon as a transition starts; the
/// buttons unlock once the engine completes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepController {
	pressed: StepIndex,
	running: bool,
}

impl StepController {
	pub fn pressed(&self) -> StepIndex {
		self.pressed
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn request(&mut self, engine: &mut InterpolationEngine, to: StepIndex) -> StepRequest {
		if self.running || to == self.pressed {
			return StepRequest::Ignored;
		}
		match engine.transition_to(to) {
			Ok(true) => {
				self.running = true;
				self.pressed = to;
				StepRequest::Started
			}
			Ok(false) => StepRequest::Ignored,
			Err(err) => StepRequest::Rejected(err),
		}
	}

	pub fn tick(&mut self, engine: &mut InterpolationEngine) -> TickAction {
		match engine.tick() {
			TickOutcome::Advanced { .. } => TickAction::Continue,
			TickOutcome::Completed { step } => {
				self.pressed = step;
				self.running = false;
				TickAction::Stop
			}
			TickOutcome::Idle => {
				self.running = false;
				TickAction::Stop
			}
		}
	}

	/// No timer could be started: jump straight to the end.
	pub fn scheduling_failed(&mut self, engine: &mut InterpolationEngine) {
		engine.finish();
		self.pressed = engine.current_step();
		self.running = false;
	}
}
