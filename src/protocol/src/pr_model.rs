// pr_model: Physical model for rendering

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrParticle {
	pub pos: [f32; 3],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrMesh {
	pub vertices: Vec<[f32; 3]>,
	pub normals: Vec<[f32; 3]>,
	pub triangles: Vec<[u32; 3]>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	// rod particles, in chain order
	pub particles: Vec<PrParticle>,
	pub bodies: Vec<PrParticle>,
	pub mesh: PrMesh,
}
