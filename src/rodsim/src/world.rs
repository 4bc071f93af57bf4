use tracing::{debug, info};

use crate::config::{ConfigError, RodConfig, SwarmConfig};
use crate::extrude::{sweep_mesh, SweptMesh};
use crate::face::Face;
use crate::rod::{Rod, RodParams};
use crate::spline::Spline;
use crate::swarm::BodySwarm;
use crate::time_manager::FixedStepper;
use crate::V3;
use protocol::pr_model::PrModel;
use protocol::Message;

fn centerline(rod: &Rod, config: &RodConfig) -> Vec<V3> {
	Spline::with_offset(&rod.positions(), config.knot_offset)
		.sample(config.curve_accuracy)
		.collect()
}

pub struct RodWorld {
	config: RodConfig,
	params: RodParams,
	face: Face,
	rod: Rod,
	mesh: SweptMesh,
	swarm: Option<BodySwarm>,
	stepper: FixedStepper,
	frame: usize,
}

impl RodWorld {
	pub fn new(config: RodConfig, start: V3, end: V3) -> Result<Self, ConfigError> {
		config.validate()?;
		let rod = Rod::new(config.particles, start, end);
		let face = config.face();
		let params = config.params();
		let stepper = FixedStepper::new(config.dt);
		info!(
			particles = config.particles,
			sides = config.sides,
			"world created"
		);
		let mesh = sweep_mesh(&centerline(&rod, &config), &face);
		Ok(Self {
			config,
			params,
			face,
			rod,
			mesh,
			swarm: None,
			stepper,
			frame: 0,
		})
	}

	pub fn with_swarm(mut self, config: &SwarmConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		self.swarm = Some(BodySwarm::scattered(config));
		Ok(self)
	}

	pub fn with_stepper(mut self, stepper: FixedStepper) -> Self {
		self.stepper = stepper;
		self
	}

	pub fn config(&self) -> &RodConfig {
		&self.config
	}

	pub fn rod(&self) -> &Rod {
		&self.rod
	}

	pub fn mesh(&self) -> &SweptMesh {
		&self.mesh
	}

	pub fn swarm(&self) -> Option<&BodySwarm> {
		self.swarm.as_ref()
	}

	pub fn frame(&self) -> usize {
		self.frame
	}

	pub fn curve(&self) -> Vec<V3> {
		centerline(&self.rod, &self.config)
	}

	fn rebuild_mesh(&mut self) {
		self.mesh = sweep_mesh(&self.curve(), &self.face);
	}

	pub fn fixed_update(&mut self, start: V3, end: V3) {
		self.rod.step(&self.params, start, end);
		if let Some(swarm) = self.swarm.as_mut() {
			swarm.step(self.params.dt);
		}
		self.rebuild_mesh();
		self.frame += 1;
		debug!(frame = self.frame, vertices = self.mesh.vertices.len(), "fixed update");
	}

	/// Runs the fixed steps owed for `elapsed` seconds, returns how many.
	pub fn update(&mut self, elapsed: f32, start: V3, end: V3) -> usize {
		let steps = self.stepper.advance(elapsed);
		for _ in 0..steps {
			self.fixed_update(start, end);
		}
		steps
	}

	pub fn pr_model(&self) -> PrModel {
		PrModel {
			particles: self.rod.pr_particles(),
			bodies: self
				.swarm
				.as_ref()
				.map(|s| s.pr_bodies())
				.unwrap_or_default(),
			mesh: self.mesh.render(),
		}
	}

	pub fn message(&self) -> Message {
		Message::WorldUpdate(self.pr_model())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn world() -> RodWorld {
		let config = RodConfig {
			particles: 6,
			sides: 4,
			curve_accuracy: 3,
			gravity: [0., -9.8, 0.],
			..Default::default()
		};
		RodWorld::new(config, V3::zeros(), V3::new(5., 0., 0.)).unwrap()
	}

	#[test]
	fn test_mesh_sizes() {
		let w = world();
		// 6 points padded by 3 + 3 gives 9 segments of 3 samples
		assert_eq!(w.curve().len(), 27);
		assert_eq!(w.mesh().vertices.len(), 27 * 4);
		assert_eq!(w.mesh().triangles.len(), 26 * 4 * 2);
	}

	#[test]
	fn test_fixed_update() {
		let mut w = world();
		let end = V3::new(5., 1., 0.);
		for _ in 0..5 {
			w.fixed_update(V3::zeros(), end);
		}
		assert_eq!(w.frame(), 5);
		assert_eq!(w.rod().particles()[5].pos, end);
		let model = w.pr_model();
		assert_eq!(model.particles.len(), 6);
		assert_eq!(model.mesh.vertices.len(), 27 * 4);
		assert!(model.bodies.is_empty());
		assert!(model.mesh.vertices.iter().flatten().all(|x| x.is_finite()));
	}

	#[test]
	fn test_swarm_exported() {
		let mut w = world().with_swarm(&SwarmConfig::default()).unwrap();
		w.fixed_update(V3::zeros(), V3::new(5., 0., 0.));
		assert_eq!(w.pr_model().bodies.len(), 20);
	}

	#[test]
	fn test_update_steps() {
		let mut w = world();
		assert_eq!(w.update(0.035, V3::zeros(), V3::new(5., 0., 0.)), 3);
		assert_eq!(w.frame(), 3);
	}

	#[test]
	fn test_invalid_swarm_config() {
		let config = SwarmConfig {
			extent: -1.,
			..Default::default()
		};
		assert!(world().with_swarm(&config).is_err());
	}

	#[test]
	fn test_invalid_config() {
		let config = RodConfig {
			radius: 0.,
			..Default::default()
		};
		assert!(RodWorld::new(config, V3::zeros(), V3::x()).is_err());
	}

	#[test]
	fn test_message_bytes() {
		let w = world();
		let bytes = w.message().to_bytes().unwrap();
		match Message::from_bytes(&bytes).unwrap() {
			Message::WorldUpdate(model) => assert_eq!(model, w.pr_model()),
			Message::Nop => panic!("wrong message"),
		}
	}
}
