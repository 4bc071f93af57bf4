use tracing::warn;

use crate::particle::Particle;
use crate::square_matrix::SquareMatrix;
use crate::V3;

// det below this fraction of (trace / 3)^3 counts as a collinear chain
const SINGULAR_RATIO: f32 = 1e-5;
// singular values below this fraction of the trace are dropped
const PINV_RATIO: f32 = 1e-5;

/// The inertia tensor is singular whenever every particle lies on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularPolicy {
	PseudoInverse,
	Propagate,
}

impl Default for SingularPolicy {
	fn default() -> Self {
		Self::PseudoInverse
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RigidMotion {
	pub xcm: V3,
	pub vcm: V3,
	pub momentum: V3,
	pub omega: V3,
}

pub fn center_of_mass(particles: &[Particle]) -> (V3, V3) {
	let mut xcm = V3::zeros();
	let mut vcm = V3::zeros();
	let mut total_mass = 0f32;
	for p in particles.iter() {
		xcm += p.mass * p.pos;
		vcm += p.mass * p.vel;
		total_mass += p.mass;
	}
	(xcm / total_mass, vcm / total_mass)
}

pub fn inertia_tensor(particles: &[Particle], xcm: V3) -> SquareMatrix {
	let mut inertia = SquareMatrix::zeros(3);
	for p in particles.iter() {
		let r = SquareMatrix::cross_matrix(p.pos - xcm);
		let rrt = &r * &r.transpose();
		inertia = inertia + rrt * p.mass;
	}
	inertia
}

fn is_degenerate(inertia: &SquareMatrix) -> bool {
	let scale = (inertia.trace() / 3.0).powi(3);
	!inertia.inverse().is_finite()
		|| inertia.determinant().abs() <= SINGULAR_RATIO * scale
}

pub fn rigid_motion(particles: &[Particle], policy: SingularPolicy) -> RigidMotion {
	let (xcm, vcm) = center_of_mass(particles);
	let momentum = particles
		.iter()
		.fold(V3::zeros(), |l, p| l + (p.pos - xcm).cross(&(p.mass * p.vel)));
	let inertia = inertia_tensor(particles, xcm);
	let inverse = match policy {
		SingularPolicy::Propagate => inertia.inverse(),
		SingularPolicy::PseudoInverse if is_degenerate(&inertia) => {
			let eps = (PINV_RATIO * inertia.trace()).max(f32::MIN_POSITIVE);
			inertia.pseudo_inverse(eps).unwrap_or_else(|| {
				warn!("pseudo-inverse failed, rotation dropped");
				SquareMatrix::zeros(3)
			})
		}
		SingularPolicy::PseudoInverse => inertia.inverse(),
	};
	if !inverse.is_finite() {
		warn!("singular inertia tensor, velocities will be NaN");
	}
	let omega = &inverse * momentum;
	RigidMotion {
		xcm,
		vcm,
		momentum,
		omega,
	}
}

pub fn velocity_damping(particles: &mut [Particle], k: f32, policy: SingularPolicy) {
	if particles.is_empty() {
		return;
	}
	let motion = rigid_motion(particles, policy);
	for p in particles.iter_mut() {
		let r = p.pos - motion.xcm;
		let dv = motion.vcm + motion.omega.cross(&r) - p.vel;
		p.vel += k * dv;
	}
}
