use tracing::warn;

use crate::constraint::{CRef, Constraint};
use crate::particle::Particle;

#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
	ps: [usize; 2],
	l0: f32,
}

impl DistanceConstraint {
	pub fn new(particles: &[Particle], p1: usize, p2: usize) -> Self {
		let l0 = (particles[p1].get_pos() - particles[p2].get_pos()).magnitude();
		Self::new_with_l0(p1, p2, l0)
	}

	pub fn new_with_l0(p1: usize, p2: usize, l0: f32) -> Self {
		Self { ps: [p1, p2], l0 }
	}

	pub fn rest_length(&self) -> f32 {
		self.l0
	}

	pub fn build(self) -> CRef {
		Box::new(self)
	}
}

impl Constraint for DistanceConstraint {
	fn project(&self, particles: &mut [Particle], stiffness: f32, dt: f32) {
		let [i, j] = self.ps;
		let imass1 = particles[i].get_imass();
		let imass2 = particles[j].get_imass();
		let imass = imass1 + imass2;
		let dp = particles[i].ppos - particles[j].ppos;
		let l = dp.magnitude();
		if l == 0.0 {
			warn!(i, j, "coincident particles, constraint skipped");
			return;
		}
		let correct = stiffness * (l - self.l0) * dp / l / imass;
		particles[i].vel += -correct * imass1 / dt;
		particles[j].vel += correct * imass2 / dt;
	}

	fn particles(&self) -> Vec<usize> {
		self.ps.to_vec()
	}
}
