use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::SwarmConfig;
use crate::pos_box::PosBox;
use crate::V3;
use protocol::pr_model::PrParticle;

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
	pub pos: V3,
	pub vel: V3,
}

#[derive(Clone, Debug)]
pub struct BodySwarm {
	bodies: Vec<Body>,
	gravity: V3,
	min_separation: f32,
	bound: PosBox,
}

const MAX_PASSES: usize = 64;
// relative to min_separation
const SLOP: f32 = 1e-4;

fn separation_pass(positions: &mut [V3], min_separation: f32, bound: &PosBox) -> usize {
	let mut overlaps = 0;
	let n = positions.len();
	for i in 0..n.saturating_sub(1) {
		for j in i + 1..n {
			let mut a = positions[i];
			let mut b = positions[j];
			let ab = b - a;
			let l = ab.magnitude();
			let dir = ab.try_normalize(0.0).unwrap_or_else(V3::y);
			if l < min_separation * (1. - SLOP) {
				let push = (min_separation - l) * dir / 2.;
				a -= push;
				b += push;
				overlaps += 1;
			}
			bound.apply(&mut a);
			bound.apply(&mut b);
			positions[i] = a;
			positions[j] = b;
		}
	}
	overlaps
}

/// Pushes overlapping pairs apart and clamps them into `bound`, repeating
/// in-order passes until none overlaps. Returns the first pass's count.
pub fn resolve_overlaps(
	positions: &mut [V3],
	min_separation: f32,
	bound: &PosBox,
) -> usize {
	let first = separation_pass(positions, min_separation, bound);
	let mut remaining = first;
	let mut passes = 1;
	while remaining > 0 && passes < MAX_PASSES {
		remaining = separation_pass(positions, min_separation, bound);
		passes += 1;
	}
	if remaining > 0 {
		debug!(remaining, passes, "overlaps left");
	}
	first
}

impl BodySwarm {
	pub fn new(positions: Vec<V3>) -> Self {
		let config = SwarmConfig::default();
		let bodies = positions
			.into_iter()
			.map(|pos| Body {
				pos,
				vel: V3::zeros(),
			})
			.collect();
		Self {
			bodies,
			gravity: config.gravity.into(),
			min_separation: config.min_separation,
			bound: PosBox::cube(config.bound),
		}
	}

	pub fn scattered(config: &SwarmConfig) -> Self {
		let mut rng = StdRng::seed_from_u64(config.seed);
		let e = config.extent;
		let positions = (0..config.count)
			.map(|_| {
				V3::new(
					rng.gen_range(-e..=e),
					rng.gen_range(-e..=e),
					rng.gen_range(-e..=e),
				)
			})
			.collect();
		info!(count = config.count, seed = config.seed, "swarm scattered");
		Self::new(positions)
			.with_gravity(config.gravity.into())
			.with_min_separation(config.min_separation)
			.with_bound(config.bound)
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_min_separation(mut self, d: f32) -> Self {
		self.min_separation = d;
		self
	}

	pub fn with_bound(mut self, half: f32) -> Self {
		self.bound = PosBox::cube(half);
		self
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn positions(&self) -> Vec<V3> {
		self.bodies.iter().map(|b| b.pos).collect()
	}

	pub fn step(&mut self, dt: f32) {
		let old = self.positions();
		let gravity = self.gravity;
		let mut positions: Vec<V3> = self
			.bodies
			.iter_mut()
			.map(|b| {
				b.vel += gravity * dt;
				b.pos + b.vel * dt
			})
			.collect();
		let overlaps =
			resolve_overlaps(&mut positions, self.min_separation, &self.bound);
		for ((b, pos), prev) in self.bodies.iter_mut().zip(positions).zip(old) {
			b.pos = pos;
			b.vel = (pos - prev) / dt;
		}
		debug!(overlaps, "swarm stepped");
	}

	pub fn pr_bodies(&self) -> Vec<PrParticle> {
		self.bodies
			.iter()
			.map(|b| PrParticle { pos: b.pos.into() })
			.collect()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn test_pair_separated() {
		let mut ps = vec![V3::new(0., 0., 0.), V3::new(0.4, 0., 0.)];
		let n = resolve_overlaps(&mut ps, 1.0, &PosBox::cube(2.0));
		assert_eq!(n, 1);
		assert_relative_eq!((ps[1] - ps[0]).magnitude(), 1.0, epsilon = 1e-6);
		assert_relative_eq!(ps[0], V3::new(-0.3, 0., 0.), epsilon = 1e-6);
	}

	#[test]
	fn test_coincident_pushed_vertically() {
		let mut ps = vec![V3::zeros(), V3::zeros()];
		resolve_overlaps(&mut ps, 1.0, &PosBox::cube(2.0));
		assert_relative_eq!(ps[0], V3::new(0., -0.5, 0.));
		assert_relative_eq!(ps[1], V3::new(0., 0.5, 0.));
	}

	#[test]
	fn test_wall_body_stays_free_body_moves() {
		let mut ps = vec![V3::new(1.9, 0., 0.), V3::new(2.0, 0., 0.)];
		resolve_overlaps(&mut ps, 1.0, &PosBox::cube(2.0));
		assert_relative_eq!(ps[1][0], 2.0);
		assert_relative_eq!(ps[0][0], 1.0, epsilon = 1e-3);
	}

	#[test]
	fn test_clamp_blocks_separation() {
		// the box is narrower than the separation
		let mut ps = vec![V3::zeros(), V3::new(0.1, 0., 0.)];
		let n = resolve_overlaps(&mut ps, 1.0, &PosBox::cube(0.25));
		assert_eq!(n, 1);
		assert_relative_eq!(ps[0], V3::new(-0.25, 0., 0.));
		assert_relative_eq!(ps[1], V3::new(0.25, 0., 0.));
	}

	#[test]
	fn test_chain_of_three_separated() {
		let mut ps = vec![
			V3::new(0., 0., 0.),
			V3::new(0.5, 0., 0.),
			V3::new(1., 0., 0.),
		];
		let n = resolve_overlaps(&mut ps, 1.0, &PosBox::cube(2.0));
		assert_eq!(n, 2);
		assert!((ps[1] - ps[0]).magnitude() >= 1. - 1e-3);
		assert!((ps[2] - ps[1]).magnitude() >= 1. - 1e-3);
		// equal and opposite pushes keep the centroid
		assert_relative_eq!(ps[0] + ps[1] + ps[2], V3::new(1.5, 0., 0.), epsilon = 1e-4);
	}

	#[test]
	fn test_scattered_overlaps_separated() {
		let config = SwarmConfig::default();
		let before = BodySwarm::scattered(&config).positions();
		let mut after = before.clone();
		resolve_overlaps(&mut after, config.min_separation, &PosBox::cube(config.bound));
		let on_wall =
			|p: &V3| p.iter().any(|x| (x.abs() - config.bound).abs() < 1e-6);
		for i in 0..before.len() {
			for j in i + 1..before.len() {
				if (before[j] - before[i]).magnitude() >= config.min_separation {
					continue;
				}
				if on_wall(&after[i]) || on_wall(&after[j]) {
					continue;
				}
				assert!(
					(after[j] - after[i]).magnitude() >= config.min_separation - 1e-3,
					"pair ({}, {}) still overlaps",
					i,
					j
				);
			}
		}
	}

	#[test]
	fn test_far_pairs_only_clamped() {
		let mut ps = vec![V3::new(-3., 0., 0.), V3::new(1., 0., 0.)];
		let n = resolve_overlaps(&mut ps, 1.0, &PosBox::cube(2.0));
		assert_eq!(n, 0);
		assert_eq!(ps[0], V3::new(-2., 0., 0.));
	}

	#[test]
	fn test_scattered_deterministic() {
		let config = SwarmConfig::default();
		let a = BodySwarm::scattered(&config);
		let b = BodySwarm::scattered(&config);
		assert_eq!(a.bodies().len(), 20);
		assert_eq!(a.positions(), b.positions());
		assert!(a
			.positions()
			.iter()
			.all(|p| p.iter().all(|x| x.abs() <= config.extent)));
	}

	#[test]
	fn test_bodies_settle_in_bound() {
		let mut swarm = BodySwarm::scattered(&SwarmConfig::default())
			.with_gravity(V3::new(0., -9.8, 0.));
		for _ in 0..200 {
			swarm.step(0.02);
		}
		let bound = PosBox::cube(2.0);
		for b in swarm.bodies() {
			assert!(bound.contains(&b.pos));
			assert!(b.vel.iter().all(|x| x.is_finite()));
		}
	}

	#[test]
	fn test_falls_with_gravity() {
		let mut swarm =
			BodySwarm::new(vec![V3::zeros()]).with_gravity(V3::new(0., -10., 0.));
		swarm.step(0.1);
		assert_relative_eq!(swarm.bodies()[0].pos, V3::new(0., -0.1, 0.), epsilon = 1e-6);
		assert_relative_eq!(swarm.bodies()[0].vel, V3::new(0., -1., 0.), epsilon = 1e-5);
	}
}
