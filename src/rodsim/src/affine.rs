//! Angles are in degrees.

use nalgebra::{Matrix3, Vector3};

use crate::{Quat, V3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkewAxis {
	// x += tan(a) * y
	XyPlaneY,
	// x += tan(a) * z
	XzPlaneZ,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotateAxis {
	X,
	Y,
	Z,
}

fn skew_matrix(degree: f32, axis: SkewAxis) -> Matrix3<f32> {
	let t = degree.to_radians().tan();
	match axis {
		SkewAxis::XyPlaneY => Matrix3::new(1., t, 0., 0., 1., 0., 0., 0., 1.),
		SkewAxis::XzPlaneZ => Matrix3::new(1., 0., t, 0., 1., 0., 0., 0., 1.),
	}
}

pub fn skew(pos: V3, degree: f32, axis: SkewAxis) -> V3 {
	skew_matrix(degree, axis) * pos
}

pub fn skew_points(ps: &[V3], degree: f32, axis: SkewAxis) -> Vec<V3> {
	let m = skew_matrix(degree, axis);
	ps.iter().map(|p| m * p).collect()
}

pub fn rotation(degree: f32, axis: RotateAxis) -> Quat {
	let axis = match axis {
		RotateAxis::X => Vector3::x_axis(),
		RotateAxis::Y => Vector3::y_axis(),
		RotateAxis::Z => Vector3::z_axis(),
	};
	Quat::from_axis_angle(&axis, degree.to_radians())
}

pub fn rotate(pos: V3, degree: f32, axis: RotateAxis) -> V3 {
	rotation(degree, axis) * pos
}

pub fn rotate_points(ps: &[V3], degree: f32, axis: RotateAxis) -> Vec<V3> {
	let q = rotation(degree, axis);
	ps.iter().map(|p| q * p).collect()
}
