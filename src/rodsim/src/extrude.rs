use nalgebra::Quaternion;
use tracing::debug;

use crate::face::Face;
use crate::pos_box::PosBox;
use crate::{Quat, V3};
use protocol::pr_model::PrMesh;

// tangents shorter than this count as zero
const TANGENT_EPS: f32 = 1e-5;

#[derive(Clone, Debug, PartialEq)]
pub struct SweptMesh {
	// ring-major, `sides` vertices per ring
	pub vertices: Vec<V3>,
	pub triangles: Vec<[u32; 3]>,
	pub normals: Vec<V3>,
	pub bounds: Option<PosBox>,
}

/// Rotation taking local +Z to `forward` while keeping local +Y as close
/// to world +Y as possible. Straight up or down uses +X as the right
/// axis. The sign of the result follows the usual trace-branch
/// matrix-to-quaternion conversion, which the winding flip depends on.
pub fn look_rotation(forward: V3) -> Quat {
	let f = match forward.try_normalize(0.0) {
		Some(f) => f,
		None => return Quat::identity(),
	};
	let right = V3::y().cross(&f).try_normalize(1e-6).unwrap_or_else(V3::x);
	let up = f.cross(&right);

	// columns: right, up, forward
	let (m00, m01, m02) = (right[0], up[0], f[0]);
	let (m10, m11, m12) = (right[1], up[1], f[1]);
	let (m20, m21, m22) = (right[2], up[2], f[2]);
	let tr = m00 + m11 + m22;
	let (w, x, y, z) = if tr > 0. {
		let s = (tr + 1.).sqrt() * 2.;
		(0.25 * s, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
	} else if m00 >= m11 && m00 >= m22 {
		let s = (1. + m00 - m11 - m22).sqrt() * 2.;
		((m21 - m12) / s, 0.25 * s, (m01 + m10) / s, (m02 + m20) / s)
	} else if m11 > m22 {
		let s = (1. + m11 - m00 - m22).sqrt() * 2.;
		((m02 - m20) / s, (m01 + m10) / s, 0.25 * s, (m12 + m21) / s)
	} else {
		let s = (1. + m22 - m00 - m11).sqrt() * 2.;
		((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, 0.25 * s)
	};
	Quat::from_quaternion(Quaternion::new(w, x, y, z))
}

pub fn flips_winding(prev: &Quat, current: &Quat) -> bool {
	let (p, c) = (prev.quaternion(), current.quaternion());
	c.i < 0. && c.w > 0. && p.i > 0. && p.j > 0. && p.k > 0.
}

pub fn tangent(points: &[V3], i: usize) -> V3 {
	let last = points.len() - 1;
	let prior = points[i.saturating_sub(1)];
	let post = points[(i + 1).min(last)];
	let pos = points[i];
	let avg = ((pos - prior) + (post - pos)) / 2.;
	avg.try_normalize(TANGENT_EPS).unwrap_or_else(V3::zeros)
}

pub fn ring_frames(points: &[V3]) -> Vec<(Quat, bool)> {
	let mut prev = Quat::identity();
	let mut mirrored = false;
	let mut flips = 0;
	let frames = (0..points.len())
		.map(|i| {
			let q = look_rotation(tangent(points, i));
			if flips_winding(&prev, &q) {
				mirrored = !mirrored;
				flips += 1;
			}
			prev = q;
			(q, mirrored)
		})
		.collect();
	debug!(points = points.len(), flips, "ring frames");
	frames
}

fn place_ring(face: &Face, pos: &V3, frame: &(Quat, bool)) -> Vec<V3> {
	let (q, mirrored) = frame;
	face.ring(*mirrored).iter().map(|v| q * v + pos).collect()
}

#[cfg(not(debug_assertions))]
fn place_rings(points: &[V3], frames: &[(Quat, bool)], face: &Face) -> Vec<V3> {
	use rayon::prelude::*;
	let rings: Vec<Vec<V3>> = points
		.par_iter()
		.zip(frames.par_iter())
		.map(|(pos, frame)| place_ring(face, pos, frame))
		.collect();
	rings.concat()
}

#[cfg(debug_assertions)]
fn place_rings(points: &[V3], frames: &[(Quat, bool)], face: &Face) -> Vec<V3> {
	points
		.iter()
		.zip(frames.iter())
		.flat_map(|(pos, frame)| place_ring(face, pos, frame))
		.collect()
}

pub fn ring_triangles(rings: usize, sides: usize) -> Vec<[u32; 3]> {
	let mut triangles = Vec::with_capacity(rings.saturating_sub(1) * sides * 2);
	for r in 0..rings.saturating_sub(1) {
		let j = r * sides;
		for k in 0..sides {
			let a = (j + k) as u32;
			let b = (j + sides + k) as u32;
			let c = (j + (k + 1) % sides) as u32;
			let d = (j + sides + (k + 1) % sides) as u32;
			triangles.push([a, b, c]);
			triangles.push([b, d, c]);
		}
	}
	triangles
}

pub fn vertex_normals(vertices: &[V3], triangles: &[[u32; 3]]) -> Vec<V3> {
	let mut normals = vec![V3::zeros(); vertices.len()];
	for tri in triangles.iter() {
		let [a, b, c] = tri.map(|i| i as usize);
		let n = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
		normals[a] += n;
		normals[b] += n;
		normals[c] += n;
	}
	normals
		.into_iter()
		.map(|n| n.try_normalize(0.0).unwrap_or_else(V3::zeros))
		.collect()
}

pub fn sweep_mesh(points: &[V3], face: &Face) -> SweptMesh {
	let frames = ring_frames(points);
	let vertices = place_rings(points, &frames, face);
	let triangles = ring_triangles(points.len(), face.sides());
	let normals = vertex_normals(&vertices, &triangles);
	let bounds = PosBox::from_points(&vertices);
	SweptMesh {
		vertices,
		triangles,
		normals,
		bounds,
	}
}

impl SweptMesh {
	pub fn render(&self) -> PrMesh {
		PrMesh {
			vertices: self.vertices.iter().map(|&v| v.into()).collect(),
			normals: self.normals.iter().map(|&n| n.into()).collect(),
			triangles: self.triangles.clone(),
		}
	}
}
