use tracing::{debug, info};

use crate::constraint::distance::DistanceConstraint;
use crate::constraint::CRef;
use crate::damping::{velocity_damping, SingularPolicy};
use crate::particle::Particle;
use crate::V3;
use protocol::pr_model::PrParticle;

#[derive(Clone, Debug, PartialEq)]
pub struct RodParams {
	pub dt: f32,
	pub gravity: V3,
	// both in [0, 1]
	pub stiffness: f32,
	pub damping: f32,
	pub singular: SingularPolicy,
}

impl Default for RodParams {
	fn default() -> Self {
		Self {
			dt: 0.01,
			gravity: V3::zeros(),
			stiffness: 0.5,
			damping: 0.03,
			singular: SingularPolicy::default(),
		}
	}
}

impl RodParams {
	pub fn with_dt(mut self, dt: f32) -> Self {
		self.dt = dt;
		self
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_stiffness(mut self, k: f32) -> Self {
		self.stiffness = k;
		self
	}

	pub fn with_damping(mut self, k: f32) -> Self {
		self.damping = k;
		self
	}

	pub fn with_singular_policy(mut self, policy: SingularPolicy) -> Self {
		self.singular = policy;
		self
	}
}

#[derive(Clone)]
pub struct Rod {
	particles: Vec<Particle>,
	constraints: Vec<CRef>,
}

impl Rod {
	pub fn new(n: usize, start: V3, end: V3) -> Self {
		assert!(n >= 2, "a rod needs at least two particles");
		let mut particles: Vec<Particle> = (0..n)
			.map(|i| {
				let t = i as f32 / (n - 1) as f32;
				Particle::new(1.0, start.lerp(&end, t))
			})
			.collect();
		particles[0] = particles[0].clone().anchored();
		particles[n - 1] = particles[n - 1].clone().anchored();
		let constraints = (1..n)
			.map(|i| DistanceConstraint::new(&particles, i - 1, i).build())
			.collect();
		info!(n, length = (end - start).magnitude(), "rod created");
		Self {
			particles,
			constraints,
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	pub fn constraints(&self) -> &[CRef] {
		&self.constraints
	}

	pub fn positions(&self) -> Vec<V3> {
		self.particles.iter().map(|p| p.get_pos()).collect()
	}

	/// Advances one fixed step. `start` and `end` are the anchor
	/// positions for this step.
	pub fn step(&mut self, params: &RodParams, start: V3, end: V3) {
		let dt = params.dt;
		let n = self.particles.len();
		self.particles[0].set_anchor(start);
		self.particles[n - 1].set_anchor(end);

		for p in self.particles.iter_mut() {
			p.accelerate(params.gravity, dt);
		}
		velocity_damping(&mut self.particles, params.damping, params.singular);
		for p in self.particles.iter_mut() {
			p.integrate(dt);
		}
		for constraint in self.constraints.iter() {
			constraint.project(&mut self.particles, params.stiffness, dt);
		}
		debug!(
			head = ?self.particles[0].pos,
			tail = ?self.particles[n - 1].pos,
			"rod stepped"
		);
	}

	pub fn stepped(mut self, params: &RodParams, start: V3, end: V3) -> Self {
		self.step(params, start, end);
		self
	}

	pub fn pr_particles(&self) -> Vec<PrParticle> {
		self.particles.iter().map(|p| p.render()).collect()
	}
}
