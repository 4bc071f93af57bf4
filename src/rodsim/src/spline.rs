use crate::V3;

pub const DEFAULT_OFFSET: usize = 3;

pub fn basis(t: f32) -> [f32; 4] {
	let t2 = t * t;
	let t3 = t2 * t;
	[
		(1. - t).powi(3) / 6.,
		(3. * t3 - 6. * t2 + 4.) / 6.,
		(-3. * t3 + 3. * t2 + 3. * t + 1.) / 6.,
		t3 / 6.,
	]
}

pub fn cubic_ubs(t: f32, c: &[V3]) -> V3 {
	let b = basis(t);
	c[0] * b[0] + c[1] * b[1] + c[2] * b[2] + c[3] * b[3]
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spline {
	knots: Vec<V3>,
}

impl Spline {
	pub fn new(cps: &[V3]) -> Self {
		Self::with_offset(cps, DEFAULT_OFFSET)
	}

	/// Panics when the padded sequence is shorter than one segment.
	pub fn with_offset(cps: &[V3], offset: usize) -> Self {
		assert!(!cps.is_empty(), "no control points");
		let first = cps[0];
		let last = cps[cps.len() - 1];
		let mut knots = Vec::with_capacity(cps.len() + 2 * offset);
		knots.extend(std::iter::repeat(first).take(offset));
		knots.extend_from_slice(cps);
		knots.extend(std::iter::repeat(last).take(offset));
		assert!(knots.len() >= 4, "cubic spline needs at least 4 knots");
		Self { knots }
	}

	pub fn knots(&self) -> &[V3] {
		&self.knots
	}

	pub fn segment_count(&self) -> usize {
		self.knots.len() - 3
	}

	pub fn sample(&self, accuracy: usize) -> Samples<'_> {
		Samples {
			knots: &self.knots,
			accuracy,
			segment: 0,
			step: 0,
		}
	}

	/// Samples grouped per segment. Every segment but the last also gets
	/// the first sample of the following one, so consecutive groups
	/// share an end point.
	pub fn segments(&self, accuracy: usize) -> Vec<Vec<V3>> {
		let count = self.segment_count();
		(0..count)
			.map(|i| {
				let window = &self.knots[i..i + 4];
				let mut points: Vec<V3> = (0..accuracy)
					.map(|c| cubic_ubs(c as f32 / accuracy as f32, window))
					.collect();
				if i + 1 < count {
					points.push(cubic_ubs(0., &self.knots[i + 1..i + 5]));
				}
				points
			})
			.collect()
	}
}

#[derive(Clone, Debug)]
pub struct Samples<'a> {
	knots: &'a [V3],
	accuracy: usize,
	segment: usize,
	step: usize,
}

impl Iterator for Samples<'_> {
	type Item = V3;

	fn next(&mut self) -> Option<V3> {
		if self.accuracy == 0 || self.segment + 4 > self.knots.len() {
			return None;
		}
		let t = self.step as f32 / self.accuracy as f32;
		let result = cubic_ubs(t, &self.knots[self.segment..self.segment + 4]);
		self.step += 1;
		if self.step == self.accuracy {
			self.step = 0;
			self.segment += 1;
		}
		Some(result)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let segments = (self.knots.len() + 1).saturating_sub(self.segment + 4);
		let len = if self.accuracy == 0 {
			0
		} else {
			segments * self.accuracy - self.step
		};
		(len, Some(len))
	}
}

impl ExactSizeIterator for Samples<'_> {}

pub fn sample_spline(cps: &[V3], accuracy: usize) -> Vec<V3> {
	Spline::new(cps).sample(accuracy).collect()
}
