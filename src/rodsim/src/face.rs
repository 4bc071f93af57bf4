use crate::affine::{rotate, RotateAxis};
use crate::V3;

/// Two rings are kept: `vertices` starts at (+r, 0, 0), `mirrored` at
/// the antipodal (-r, 0, 0). Both walk clockwise seen from +Z. The sweep
/// switches between them to undo a half-turn ambiguity of the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
	sides: usize,
	radius: f32,
	vertices: Vec<V3>,
	mirrored: Vec<V3>,
}

fn ring(sides: usize, start: V3) -> Vec<V3> {
	let step = -360.0 / sides as f32;
	(0..sides)
		.map(|i| rotate(start, step * i as f32, RotateAxis::Z))
		.collect()
}

impl Face {
	pub fn new(sides: usize, radius: f32) -> Self {
		assert!(sides > 0, "a face needs at least one vertex");
		let start = V3::new(radius, 0., 0.);
		Self {
			sides,
			radius,
			vertices: ring(sides, start),
			mirrored: ring(sides, -start),
		}
	}

	pub fn sides(&self) -> usize {
		self.sides
	}

	pub fn radius(&self) -> f32 {
		self.radius
	}

	pub fn vertices(&self) -> &[V3] {
		&self.vertices
	}

	pub fn mirrored(&self) -> &[V3] {
		&self.mirrored
	}

	pub fn ring(&self, mirrored: bool) -> &[V3] {
		if mirrored {
			&self.mirrored
		} else {
			&self.vertices
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;
	use std::f32::consts::PI;

	#[test]
	fn test_on_circle() {
		for sides in [2, 3, 6, 17, 64] {
			let face = Face::new(sides, 1.5);
			assert_eq!(face.vertices().len(), sides);
			assert_eq!(face.mirrored().len(), sides);
			for v in face.vertices().iter().chain(face.mirrored()) {
				assert_relative_eq!(v.magnitude(), 1.5, epsilon = 1e-5);
				assert_eq!(v[2], 0.0);
			}
		}
	}

	#[test]
	fn test_clockwise_from_x() {
		let face = Face::new(4, 1.0);
		let vs = face.vertices();
		assert_relative_eq!(vs[0], V3::new(1., 0., 0.), epsilon = 1e-6);
		assert_relative_eq!(vs[1], V3::new(0., -1., 0.), epsilon = 1e-6);
		assert_relative_eq!(vs[2], V3::new(-1., 0., 0.), epsilon = 1e-6);
	}

	#[test]
	fn test_mirrored_is_half_turn() {
		let face = Face::new(5, 2.0);
		for (v, m) in face.vertices().iter().zip(face.mirrored()) {
			assert_relative_eq!(*m, -*v, epsilon = 1e-5);
		}
	}

	#[test]
	fn test_odd_mirrored_offset_half_step() {
		// for odd sides the mirrored ring is the primary one turned by pi / n
		let n = 7;
		let face = Face::new(n, 1.0);
		let half_step = PI / n as f32;
		for m in face.mirrored() {
			let turned = V3::new(
				m[0] * half_step.cos() - m[1] * half_step.sin(),
				m[0] * half_step.sin() + m[1] * half_step.cos(),
				0.,
			);
			let hit = face
				.vertices()
				.iter()
				.any(|v| (v - turned).magnitude() < 1e-4);
			assert!(hit);
		}
	}

	#[test]
	fn test_even_mirrored_same_set() {
		// for even sides the half turn maps the ring onto itself
		for n in [2, 4, 6] {
			let face = Face::new(n, 1.0);
			let vs = face.vertices();
			for (i, m) in face.mirrored().iter().enumerate() {
				assert_relative_eq!(*m, vs[(i + n / 2) % n], epsilon = 1e-5);
			}
		}
	}
}
