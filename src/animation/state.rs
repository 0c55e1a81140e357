use super::timeline::Snapshot;
use super::types::{Link, NodeFrame, NodeKey};

/// Current frame of every node, indexed by [`NodeKey`].
///
/// Only the engine mutates it; renderers get a shared reference.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
	frames: Vec<NodeFrame>,
}

impl AnimationState {
	pub(crate) fn from_snapshot(snapshot: &Snapshot) -> Self {
		Self {
			frames: snapshot.positions().iter().map(|p| p.frame()).collect(),
		}
	}

	pub(crate) fn snap_to(&mut self, snapshot: &Snapshot) {
		for (frame, position) in self.frames.iter_mut().zip(snapshot.positions()) {
			*frame = position.frame();
		}
	}

	/// Writes the frame at `tick` of `ticks` between two snapshots.
	pub(crate) fn blend(&mut self, from: &Snapshot, to: &Snapshot, tick: u32, ticks: u32) {
		let pairs = from.positions().iter().zip(to.positions());
		for (frame, (a, b)) in self.frames.iter_mut().zip(pairs) {
			*frame = a.frame().lerp(&b.frame(), tick, ticks);
		}
	}

	/// Panics if `key` does not belong to this state's node set.
	pub fn get(&self, key: NodeKey) -> NodeFrame {
		self.frames[key.0]
	}

	/// Every node's frame in node order.
	pub fn iter(&self) -> impl ExactSizeIterator<Item = (NodeKey, NodeFrame)> + '_ {
		self.frames
			.iter()
			.enumerate()
			.map(|(i, frame)| (NodeKey(i), *frame))
	}

	/// Resolves a link against the current frames.
	pub fn segment(&self, link: Link, distance_limit: f64) -> LinkSegment {
		let (source, target) = (self.get(link.source), self.get(link.target));
		LinkSegment {
			link,
			source,
			target,
			hidden: is_link_hidden(&source, &target, distance_limit),
		}
	}
}

/// A link with both endpoints resolved to their current frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
	/// The resolved link.
	pub link: Link,
	/// Current frame of the source node.
	pub source: NodeFrame,
	/// Current frame of the target node.
	pub target: NodeFrame,
	/// Endpoints are further apart than the distance limit.
	pub hidden: bool,
}

/// Links strictly longer than `limit` are not drawn.
pub fn is_link_hidden(source: &NodeFrame, target: &NodeFrame, limit: f64) -> bool {
	source.distance(target) > limit
}
