use crate::V3;

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
	Lagrangian { x: V3 },
	Interpolated,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	pub u: f32,
	pub kind: NodeKind,
	pub prev: Option<NodeId>,
	pub next: Option<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct NodeChain {
	nodes: Vec<Node>,
}

impl NodeChain {
	pub fn from_samples(us: &[f32], xs: &[V3]) -> Self {
		let mut chain = Self::default();
		for (&u, &x) in us.iter().zip(xs) {
			chain.push(u, NodeKind::Lagrangian { x });
		}
		chain
	}

	pub fn push(&mut self, u: f32, kind: NodeKind) -> NodeId {
		let id = self.nodes.len();
		let prev = id.checked_sub(1);
		if let Some(p) = prev {
			self.nodes[p].next = Some(id);
		}
		self.nodes.push(Node {
			u,
			kind,
			prev,
			next: None,
		});
		id
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id)
	}

	fn neighbors(&self, id: NodeId) -> Option<(&Node, &Node)> {
		let node = self.nodes.get(id)?;
		let a = self.nodes.get(node.prev?)?;
		let c = self.nodes.get(node.next?)?;
		Some((a, c))
	}

	/// Material position. `None` when an interpolated node lacks a
	/// neighbor or the links loop back without reaching a Lagrangian node.
	pub fn position(&self, id: NodeId) -> Option<V3> {
		self.position_bounded(id, self.nodes.len())
	}

	fn position_bounded(&self, id: NodeId, depth: usize) -> Option<V3> {
		let node = self.nodes.get(id)?;
		match node.kind {
			NodeKind::Lagrangian { x } => Some(x),
			NodeKind::Interpolated => {
				let depth = depth.checked_sub(1)?;
				let (a, c) = self.neighbors(id)?;
				let xa = self.position_bounded(node.prev?, depth)?;
				let xc = self.position_bounded(node.next?, depth)?;
				Some(((c.u - node.u) * xa + (node.u - a.u) * xc) / (c.u - a.u))
			}
		}
	}

	/// Turns a node interpolated, `u` becomes the parameter of its
	/// position projected onto the neighbor chord, clamped to the
	/// neighbors' range. Returns the new `u`.
	pub fn to_interpolated(&mut self, id: NodeId) -> Option<f32> {
		let x = self.position(id)?;
		let node = *self.nodes.get(id)?;
		let (a, c) = self.neighbors(id)?;
		let (ua, uc) = (a.u, c.u);
		let xa = self.position(node.prev?)?;
		let xc = self.position(node.next?)?;
		let x_ab = xa - x;
		let x_bc = x - xc;
		let x_ac = xa - xc;
		let projected =
			(x_ac.dot(&x_bc) * ua + x_ac.dot(&x_ab) * uc) / x_ac.dot(&x_ac);
		let u = projected.clamp(ua.min(uc), ua.max(uc));
		let n = &mut self.nodes[id];
		n.u = u;
		n.kind = NodeKind::Interpolated;
		Some(u)
	}

	pub fn to_lagrangian(&mut self, id: NodeId) -> Option<f32> {
		let x = self.position(id)?;
		let node = *self.nodes.get(id)?;
		let (a, c) = self.neighbors(id)?;
		let (ua, uc) = (a.u, c.u);
		let ab = (self.position(node.prev?)? - x).magnitude();
		let bc = (x - self.position(node.next?)?).magnitude();
		let u = (bc * ua + ab * uc) / (ab + bc);
		let n = &mut self.nodes[id];
		n.u = u;
		n.kind = NodeKind::Lagrangian { x };
		Some(u)
	}
}
