use crate::V3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PosBox {
	pub min: V3,
	pub max: V3,
}

impl PosBox {
	pub fn cube(half: f32) -> Self {
		Self {
			min: V3::repeat(-half),
			max: V3::repeat(half),
		}
	}

	pub fn from_points(points: &[V3]) -> Option<Self> {
		let first = *points.first()?;
		let mut result = Self {
			min: first,
			max: first,
		};
		for p in points.iter().skip(1) {
			result.min = result.min.inf(p);
			result.max = result.max.sup(p);
		}
		Some(result)
	}

	/// Clamps `pos` into the box, true when it had to move.
	pub fn apply(&self, pos: &mut V3) -> bool {
		let mut flag = false;
		for i in 0..3 {
			if pos[i] < self.min[i] {
				pos[i] = self.min[i];
				flag = true;
			} else if pos[i] > self.max[i] {
				pos[i] = self.max[i];
				flag = true;
			}
		}
		flag
	}

	pub fn contains(&self, pos: &V3) -> bool {
		(0..3).all(|i| self.min[i] <= pos[i] && pos[i] <= self.max[i])
	}

	pub fn center(&self) -> V3 {
		(self.min + self.max) / 2.0
	}

	pub fn size(&self) -> V3 {
		self.max - self.min
	}
}
