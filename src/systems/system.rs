use std::time::Duration;

/// It provides the per-tick logic operating on the entities a
/// [SystemBase](crate::systems::SystemBase) is watching.
pub trait System {
	/// Initialises the [System].
	/// **This function should not be called by user code.**
	fn setup(&mut self) {}

	/// Executes the system for one tick.
	fn update(&mut self, tick: &Tick);
}

/// Timing information for one update of the main loop.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tick {
	/// Number of ticks before this one.
	pub frame: u64,
	/// Time elapsed since the previous tick.
	pub delta: Duration,
	/// Time elapsed since the first tick.
	pub total: Duration,
}

impl Tick {
	/// The first tick of a run.
	pub fn first(delta: Duration) -> Self {
		Self {
			frame: 0,
			delta,
			total: delta,
		}
	}

	/// The tick following this one, `delta` later.
	pub fn next(&self, delta: Duration) -> Self {
		Self {
			frame: self.frame + 1,
			delta,
			total: self.total + delta,
		}
	}
}
