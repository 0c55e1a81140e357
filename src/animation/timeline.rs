//! Validated input data: the closed node set and one snapshot plus link set per
//! time step.

use std::collections::HashMap;

use log::info;
use serde::Deserialize;

use super::error::TimelineError;
use super::types::{
	GraphNode, Link, LinkRecord, LinkSet, NodeFrame, NodeKey, NodePosition, StepIndex,
};

/// Closed set of node ids, fixed when the timeline is built.
#[derive(Clone, Debug, Default)]
pub struct NodeSet {
	ids: Vec<String>,
	keys: HashMap<String, NodeKey>,
}

impl NodeSet {
	fn insert(&mut self, id: &str) -> Option<NodeKey> {
		if self.keys.contains_key(id) {
			return None;
		}
		let key = NodeKey(self.ids.len());
		self.ids.push(id.to_owned());
		self.keys.insert(id.to_owned(), key);
		Some(key)
	}

	/// Key of `id`, if it belongs to the set.
	pub fn key(&self, id: &str) -> Option<NodeKey> {
		self.keys.get(id).copied()
	}

	/// Id behind `key`.
	pub fn id(&self, key: NodeKey) -> &str {
		&self.ids[key.0]
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// Whether the set has no nodes.
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Keys in declaration order.
	pub fn keys(&self) -> impl ExactSizeIterator<Item = NodeKey> + '_ {
		(0..self.ids.len()).map(NodeKey)
	}
}

/// Every node's position at one time step, indexed by [`NodeKey`].
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
	positions: Vec<NodePosition>,
}

impl Snapshot {
	/// Exact frame of `key` at this step.
	pub fn frame(&self, key: NodeKey) -> NodeFrame {
		self.positions[key.0].frame()
	}

	/// Positions in node order.
	pub fn positions(&self) -> &[NodePosition] {
		&self.positions
	}
}

/// One discrete time step.
#[derive(Clone, Debug)]
pub struct Step {
	/// Button caption, `"Step n"` unless the document names it.
	pub label: String,
	/// Where every node sits.
	pub snapshot: Snapshot,
	/// Relations shown at this step.
	pub links: LinkSet,
}

/// Unvalidated step, as it appears in the input document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StepRecord {
	/// Optional caption.
	#[serde(default)]
	pub label: Option<String>,
	/// One entry per node, in any order.
	pub positions: Vec<NodePosition>,
	/// Directed relations at this step.
	#[serde(default)]
	pub links: Vec<LinkRecord>,
}

#[derive(Deserialize)]
struct TimelineDocument {
	nodes: Vec<GraphNode>,
	timeseries: Vec<StepRecord>,
}

/// Nodes plus their per-step snapshots and links.
#[derive(Clone, Debug)]
pub struct Timeline {
	nodes: Vec<GraphNode>,
	node_set: NodeSet,
	steps: Vec<Step>,
}

impl Timeline {
	/// Validates `records` against the closed node set built from `nodes`.
	pub fn new(nodes: Vec<GraphNode>, records: Vec<StepRecord>) -> Result<Self, TimelineError> {
		if records.is_empty() {
			return Err(TimelineError::NoSteps);
		}

		let mut node_set = NodeSet::default();
		for node in &nodes {
			node_set
				.insert(&node.id)
				.ok_or_else(|| TimelineError::DuplicateNode(node.id.clone()))?;
		}

		let steps = records
			.into_iter()
			.enumerate()
			.map(|(step, record)| resolve_step(&node_set, step, record))
			.collect::<Result<Vec<_>, _>>()?;

		info!(
			"Loaded timeline with {} nodes across {} steps",
			node_set.len(),
			steps.len()
		);
		Ok(Self {
			nodes,
			node_set,
			steps,
		})
	}

	/// Parses the `{ "nodes": [..], "timeseries": [..] }` document.
	pub fn from_json(json: &str) -> Result<Self, TimelineError> {
		let document: TimelineDocument = serde_json::from_str(json)?;
		Self::new(document.nodes, document.timeseries)
	}

	/// The closed set of node ids.
	pub fn node_set(&self) -> &NodeSet {
		&self.node_set
	}

	/// Metadata of `key`.
	pub fn node(&self, key: NodeKey) -> &GraphNode {
		&self.nodes[key.0]
	}

	/// Node metadata in node order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// All time steps in order.
	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	/// Step `index`, if it exists.
	pub fn step(&self, index: StepIndex) -> Option<&Step> {
		self.steps.get(index)
	}

	/// Number of time steps.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Always false for a validated timeline.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}
}

fn resolve_step(
	node_set: &NodeSet,
	step: StepIndex,
	record: StepRecord,
) -> Result<Step, TimelineError> {
	let mut slots: Vec<Option<NodePosition>> = vec![None; node_set.len()];
	for position in record.positions {
		let key = node_set
			.key(&position.id)
			.ok_or_else(|| TimelineError::UnknownNode {
				step,
				id: position.id.clone(),
			})?;
		if !position.x.is_finite() || !position.y.is_finite() {
			return Err(TimelineError::NonFinitePosition {
				step,
				id: position.id,
			});
		}
		let slot = &mut slots[key.0];
		if slot.is_some() {
			return Err(TimelineError::DuplicatePosition {
				step,
				id: position.id,
			});
		}
		*slot = Some(position);
	}

	let positions = slots
		.into_iter()
		.zip(node_set.keys())
		.map(|(slot, key)| {
			slot.ok_or_else(|| TimelineError::MissingPosition {
				step,
				id: node_set.id(key).to_owned(),
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	let resolve = |id: &str| {
		node_set.key(id).ok_or_else(|| TimelineError::UnknownNode {
			step,
			id: id.to_owned(),
		})
	};
	let links = record
		.links
		.iter()
		.map(|link| -> Result<Link, TimelineError> {
			Ok(Link {
				source: resolve(&link.source)?,
				target: resolve(&link.target)?,
			})
		})
		.collect::<Result<LinkSet, _>>()?;

	Ok(Step {
		label: record.label.unwrap_or_else(|| format!("Step {}", step + 1)),
		snapshot: Snapshot { positions },
		links,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes(ids: &[&str]) -> Vec<GraphNode> {
		ids.iter().map(|id| GraphNode::new(*id)).collect()
	}

	fn record(positions: &[(&str, f64, f64, u32)], links: &[(&str, &str)]) -> StepRecord {
		StepRecord {
			label: None,
			positions: positions
				.iter()
				.map(|&(id, x, y, d)| NodePosition::new(id, x, y, d))
				.collect(),
			links: links
				.iter()
				.map(|&(s, t)| LinkRecord::new(s, t))
				.collect(),
		}
	}

	#[test]
	fn positions_are_reordered_by_node_key() {
		let timeline = Timeline::new(
			nodes(&["a", "b"]),
			vec![record(&[("b", 2.0, 2.0, 1), ("a", 1.0, 1.0, 0)], &[("a", "b")])],
		)
		.unwrap();

		let set = timeline.node_set();
		let (a, b) = (set.key("a").unwrap(), set.key("b").unwrap());
		let step = timeline.step(0).unwrap();
		assert_eq!(step.label, "Step 1");
		assert_eq!(step.snapshot.frame(a).x, 1.0);
		assert_eq!(step.snapshot.frame(b).x, 2.0);
		assert_eq!(step.links, vec![Link { source: a, target: b }]);
		assert_eq!(set.id(b), "b");
	}

	#[test]
	fn rejects_unknown_and_missing_nodes() {
		let unknown_position = Timeline::new(
			nodes(&["a"]),
			vec![record(&[("a", 0.0, 0.0, 0), ("z", 0.0, 0.0, 0)], &[])],
		);
		assert!(matches!(
			unknown_position,
			Err(TimelineError::UnknownNode { step: 0, ref id }) if id == "z"
		));

		let unknown_link = Timeline::new(
			nodes(&["a"]),
			vec![
				record(&[("a", 0.0, 0.0, 0)], &[]),
				record(&[("a", 0.0, 0.0, 0)], &[("a", "q")]),
			],
		);
		assert!(matches!(
			unknown_link,
			Err(TimelineError::UnknownNode { step: 1, ref id }) if id == "q"
		));

		let missing = Timeline::new(nodes(&["a", "b"]), vec![record(&[("a", 0.0, 0.0, 0)], &[])]);
		assert!(matches!(
			missing,
			Err(TimelineError::MissingPosition { step: 0, ref id }) if id == "b"
		));
	}

	#[test]
	fn rejects_duplicates_and_bad_numbers() {
		assert!(matches!(
			Timeline::new(nodes(&["a", "a"]), vec![record(&[("a", 0.0, 0.0, 0)], &[])]),
			Err(TimelineError::DuplicateNode(_))
		));
		assert!(matches!(
			Timeline::new(
				nodes(&["a"]),
				vec![record(&[("a", 0.0, 0.0, 0), ("a", 1.0, 0.0, 0)], &[])]
			),
			Err(TimelineError::DuplicatePosition { .. })
		));
		assert!(matches!(
			Timeline::new(nodes(&["a"]), vec![record(&[("a", f64::NAN, 0.0, 0)], &[])]),
			Err(TimelineError::NonFinitePosition { .. })
		));
		assert!(matches!(
			Timeline::new(nodes(&["a"]), vec![]),
			Err(TimelineError::NoSteps)
		));
	}

	#[test]
	fn parses_document() {
		let json = r##"{
			"nodes": [{ "id": "France", "color": "#1f77b4" }, { "id": "Greece" }],
			"timeseries": [
				{
					"label": "1896",
					"positions": [
						{ "id": "France", "x": 1.5, "y": -2.0, "outdegree": 3 },
						{ "id": "Greece", "x": 0.0, "y": 0.0, "outdegree": 0 }
					],
					"links": [{ "source": "France", "target": "Greece" }]
				},
				{
					"positions": [
						{ "id": "France", "x": 0.0, "y": 0.0, "outdegree": 0 },
						{ "id": "Greece", "x": 5.0, "y": 5.0, "outdegree": 9 }
					]
				}
			]
		}"##;
		let timeline = Timeline::from_json(json).unwrap();
		assert_eq!(timeline.len(), 2);
		assert_eq!(timeline.steps()[0].label, "1896");
		assert_eq!(timeline.steps()[1].label, "Step 2");
		assert!(timeline.steps()[1].links.is_empty());
		assert_eq!(timeline.nodes()[0].color.as_deref(), Some("#1f77b4"));

		let greece = timeline.node_set().key("Greece").unwrap();
		assert_eq!(timeline.steps()[1].snapshot.frame(greece).scale, 2.0);
	}

	#[test]
	fn reports_malformed_json() {
		assert!(matches!(
			Timeline::from_json("{ \"nodes\": [] }"),
			Err(TimelineError::Json(_))
		));
	}
}
