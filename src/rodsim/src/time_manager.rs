use std::time::Instant;

use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeModel {
	// one fixed step per frame, wall time ignored
	VideoRender,
	// as many fixed steps as the elapsed wall time covers
	Realtime,
}

pub struct FixedStepper {
	dt: f32,
	model: TimeModel,
	max_steps: usize,
	accumulated: f32,
	paused: bool,
	last: Instant,
}

impl FixedStepper {
	pub fn new(dt: f32) -> Self {
		Self {
			dt,
			model: TimeModel::Realtime,
			max_steps: 8,
			accumulated: 0.,
			paused: false,
			last: Instant::now(),
		}
	}

	pub fn with_model(mut self, model: TimeModel) -> Self {
		self.model = model;
		self
	}

	pub fn with_max_steps(mut self, max_steps: usize) -> Self {
		self.max_steps = max_steps;
		self
	}

	pub fn dt(&self) -> f32 {
		self.dt
	}

	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Play (`true`) or pause. Time spent paused is dropped.
	pub fn set(&mut self, on: bool) {
		if on == !self.paused {
			return;
		}
		self.paused = !on;
		self.accumulated = 0.;
		self.last = Instant::now();
	}

	/// Steps owed for `elapsed` seconds. Backlog beyond `max_steps` is
	/// discarded.
	pub fn advance(&mut self, elapsed: f32) -> usize {
		if self.paused {
			return 0;
		}
		if self.model == TimeModel::VideoRender {
			return 1;
		}
		self.accumulated += elapsed;
		let steps = (self.accumulated / self.dt).floor() as usize;
		self.accumulated -= steps as f32 * self.dt;
		if steps > self.max_steps {
			warn!(steps, max = self.max_steps, "falling behind, steps dropped");
			self.accumulated = 0.;
			return self.max_steps;
		}
		steps
	}

	pub fn take_time(&mut self) -> usize {
		let now = Instant::now();
		let elapsed = now.duration_since(self.last).as_secs_f32();
		self.last = now;
		self.advance(elapsed)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_accumulates() {
		let mut s = FixedStepper::new(0.01);
		assert_eq!(s.advance(0.004), 0);
		assert_eq!(s.advance(0.004), 0);
		assert_eq!(s.advance(0.004), 1);
		assert_eq!(s.advance(0.025), 2);
	}

	#[test]
	fn test_backlog_capped() {
		let mut s = FixedStepper::new(0.01).with_max_steps(3);
		assert_eq!(s.advance(1.0), 3);
		assert_eq!(s.advance(0.0), 0);
	}

	#[test]
	fn test_pause() {
		let mut s = FixedStepper::new(0.01);
		s.set(false);
		assert!(s.is_paused());
		assert_eq!(s.advance(1.0), 0);
		s.set(true);
		assert_eq!(s.advance(0.015), 1);
	}

	#[test]
	fn test_video_render() {
		let mut s = FixedStepper::new(0.01).with_model(TimeModel::VideoRender);
		assert_eq!(s.advance(10.0), 1);
		assert_eq!(s.take_time(), 1);
	}
}
