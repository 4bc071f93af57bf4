pub mod distance;

use dyn_clone::DynClone;

use crate::particle::Particle;

pub trait Constraint: DynClone + Send + Sync {
	/// Single projection pass. Corrections are written into particle
	/// velocities, so they only show up in the next integration.
	fn project(&self, particles: &mut [Particle], stiffness: f32, dt: f32);

	fn particles(&self) -> Vec<usize>;
}

dyn_clone::clone_trait_object!(Constraint);

pub type CRef = Box<dyn Constraint>;
