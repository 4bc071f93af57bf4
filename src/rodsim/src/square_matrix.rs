use std::ops::{Add, Index, IndexMut, Mul};

use nalgebra::DMatrix;

use crate::V3;

/// Inverting a singular matrix does not fail: every entry of the result
/// is NaN, and the NaN propagates through whatever consumes it.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareMatrix {
	data: DMatrix<f32>,
}

impl SquareMatrix {
	pub fn zeros(n: usize) -> Self {
		Self {
			data: DMatrix::zeros(n, n),
		}
	}

	pub fn identity(n: usize) -> Self {
		Self {
			data: DMatrix::identity(n, n),
		}
	}

	pub fn from_row_slice(n: usize, rows: &[f32]) -> Self {
		Self {
			data: DMatrix::from_row_slice(n, n, rows),
		}
	}

	/// Skew-symmetric matrix R with R * v == r x v.
	pub fn cross_matrix(r: V3) -> Self {
		Self::from_row_slice(
			3,
			&[0., -r[2], r[1], r[2], 0., -r[0], -r[1], r[0], 0.],
		)
	}

	pub fn size(&self) -> usize {
		self.data.nrows()
	}

	pub fn transpose(&self) -> Self {
		Self {
			data: self.data.transpose(),
		}
	}

	pub fn inverse(&self) -> Self {
		let n = self.size();
		match self.data.clone().try_inverse() {
			Some(data) => Self { data },
			None => Self {
				data: DMatrix::from_element(n, n, f32::NAN),
			},
		}
	}

	pub fn pseudo_inverse(&self, eps: f32) -> Option<Self> {
		self.data
			.clone()
			.pseudo_inverse(eps)
			.ok()
			.map(|data| Self { data })
	}

	pub fn determinant(&self) -> f32 {
		self.data.determinant()
	}

	pub fn trace(&self) -> f32 {
		self.data.trace()
	}

	pub fn is_finite(&self) -> bool {
		self.data.iter().all(|x| x.is_finite())
	}
}

impl Index<(usize, usize)> for SquareMatrix {
	type Output = f32;
	fn index(&self, idx: (usize, usize)) -> &Self::Output {
		&self.data[idx]
	}
}

impl IndexMut<(usize, usize)> for SquareMatrix {
	fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
		&mut self.data[idx]
	}
}

impl Add for SquareMatrix {
	type Output = SquareMatrix;
	fn add(self, rhs: SquareMatrix) -> Self::Output {
		assert_eq!(self.size(), rhs.size(), "matrix size mismatch");
		Self {
			data: self.data + rhs.data,
		}
	}
}

impl Mul for SquareMatrix {
	type Output = SquareMatrix;
	fn mul(self, rhs: SquareMatrix) -> Self::Output {
		&self * &rhs
	}
}

impl Mul for &SquareMatrix {
	type Output = SquareMatrix;
	fn mul(self, rhs: &SquareMatrix) -> Self::Output {
		assert_eq!(self.size(), rhs.size(), "matrix size mismatch");
		SquareMatrix {
			data: &self.data * &rhs.data,
		}
	}
}

impl Mul<f32> for SquareMatrix {
	type Output = SquareMatrix;
	fn mul(self, k: f32) -> Self::Output {
		Self {
			data: self.data * k,
		}
	}
}

// only meaningful for 3 x 3
impl Mul<V3> for &SquareMatrix {
	type Output = V3;
	fn mul(self, v: V3) -> Self::Output {
		assert_eq!(self.size(), 3, "matrix-vector product needs a 3x3 matrix");
		let mut result = V3::zeros();
		for i in 0..3 {
			for j in 0..3 {
				result[i] += self[(i, j)] * v[j];
			}
		}
		result
	}
}
