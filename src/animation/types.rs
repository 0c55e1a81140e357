use serde::{Deserialize, Serialize};

/// Index of one discrete snapshot in a [`Timeline`](super::Timeline).
pub type StepIndex = usize;

/// Dense key of a node inside its [`NodeSet`](super::NodeSet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub(crate) usize);

impl NodeKey {
	/// Position of the node in the global node order.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Global node record, shared by every time step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique id, referenced by positions and links.
	pub id: String,
	/// Display name; the id is shown when absent.
	#[serde(default)]
	pub label: Option<String>,
	/// CSS fill color; a palette entry is used when absent.
	#[serde(default)]
	pub color: Option<String>,
}

impl GraphNode {
	/// Node without label or color.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			color: None,
		}
	}
}

/// Precomputed position of one node at one time step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
	/// Id of the positioned node.
	pub id: String,
	/// World x coordinate.
	pub x: f64,
	/// World y coordinate.
	pub y: f64,
	/// Number of outgoing relations at this step.
	pub outdegree: u32,
}

impl NodePosition {
	/// Position of node `id` at `(x, y)`.
	pub fn new(id: impl Into<String>, x: f64, y: f64, outdegree: u32) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			outdegree,
		}
	}

	/// `log10(outdegree + 1) + 1`, never below 1.
	pub fn scale(&self) -> f64 {
		(f64::from(self.outdegree) + 1.0).log10() + 1.0
	}

	/// Rendered state at exactly this position.
	pub fn frame(&self) -> NodeFrame {
		NodeFrame {
			x: self.x,
			y: self.y,
			scale: self.scale(),
		}
	}
}

/// Rendered state of a node: where it is and how large it is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
	/// World x coordinate.
	pub x: f64,
	/// World y coordinate.
	pub y: f64,
	/// Size multiplier applied to the node radius.
	pub scale: f64,
}

impl NodeFrame {
	/// Frame at tick `tick` of `ticks` on the straight path from `self` to `to`.
	/// Each component is interpolated independently.
	pub fn lerp(&self, to: &NodeFrame, tick: u32, ticks: u32) -> NodeFrame {
		NodeFrame {
			x: interpolate(self.x, to.x, tick, ticks),
			y: interpolate(self.y, to.y, tick, ticks),
			scale: interpolate(self.scale, to.scale, tick, ticks),
		}
	}

	/// Euclidean distance between the two centres.
	pub fn distance(&self, other: &NodeFrame) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// `from + (to - from) * tick / ticks`.
pub fn interpolate(from: f64, to: f64, tick: u32, ticks: u32) -> f64 {
	from + (to - from) * f64::from(tick) / f64::from(ticks)
}

/// Directed relation between two node ids, as found in the input document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
	/// Id of the node the relation starts from.
	pub source: String,
	/// Id of the node the relation points to.
	pub target: String,
}

impl LinkRecord {
	/// Relation from `source` to `target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Directed relation resolved against the node set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
	/// Node the relation starts from.
	pub source: NodeKey,
	/// Node the relation points to.
	pub target: NodeKey,
}

/// Ordered links active at one time step.
pub type LinkSet = Vec<Link>;
