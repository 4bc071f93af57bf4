use crate::V3;
use protocol::pr_model::PrParticle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pin {
	Free,
	// tracks an external point, refreshed every step
	Anchored(V3),
}

#[derive(Clone, Debug)]
pub struct Particle {
	pub mass: f32,
	pub pos: V3,
	pub ppos: V3, // predicted
	pub vel: V3,
	pub pin: Pin,
}

impl Particle {
	pub fn new(mass: f32, pos: V3) -> Self {
		Self {
			mass,
			pos,
			ppos: pos,
			vel: V3::zeros(),
			pin: Pin::Free,
		}
	}

	pub fn anchored(mut self) -> Self {
		self.pin = Pin::Anchored(self.pos);
		self
	}

	pub fn get_pos(&self) -> V3 {
		self.pos
	}

	pub fn get_imass(&self) -> f32 {
		1.0 / self.mass
	}

	pub fn is_anchored(&self) -> bool {
		matches!(self.pin, Pin::Anchored(_))
	}

	pub fn set_anchor(&mut self, anchor: V3) {
		if let Pin::Anchored(ref mut a) = self.pin {
			*a = anchor;
		}
	}

	pub fn accelerate(&mut self, accel: V3, dt: f32) {
		self.vel += accel * dt;
		if self.is_anchored() {
			self.vel = V3::zeros();
		}
	}

	/// Explicit Euler position update. The predicted position is kept
	/// before the anchor snaps `pos`, constraint projection reads it.
	pub fn integrate(&mut self, dt: f32) {
		self.ppos = self.pos + self.vel * dt;
		self.pos = self.ppos;
		if let Pin::Anchored(anchor) = self.pin {
			self.pos = anchor;
		}
	}

	pub fn render(&self) -> PrParticle {
		PrParticle {
			pos: self.pos.into(),
		}
	}
}
