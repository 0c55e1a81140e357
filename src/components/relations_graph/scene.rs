//! Drawable shapes derived from the engine's current frame.

use crate::animation::{InterpolationEngine, NodeFrame};

pub const NODE_RADIUS: f64 = 10.0;
pub const MARKER_SIZE: f64 = 10.0;
/// Side of the square world viewport, centred on the origin.
pub const WORLD_SIZE: f64 = 1500.0;
pub const LABEL_FONT_PX: f64 = 12.0;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

/// Triangle marking the source end of a link, pointing at the source node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
	pub tip: Point,
	pub left: Point,
	pub right: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkShape {
	pub from: Point,
	pub to: Point,
	pub arrow: Option<ArrowHead>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape<'a> {
	pub text: &'a str,
	pub at: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape<'a> {
	pub center: Point,
	pub radius: f64,
	pub fill: &'a str,
	pub label: Option<LabelShape<'a>>,
}

/// Everything to draw for one frame, in painting order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene<'a> {
	pub links: Vec<LinkShape>,
	pub nodes: Vec<NodeShape<'a>>,
}

impl<'a> Scene<'a> {
	pub fn build(engine: &'a InterpolationEngine, show_labels: bool) -> Self {
		let timeline = engine.timeline();

		let links = engine
			.link_segments()
			.filter(|segment| !segment.hidden)
			.map(|segment| LinkShape {
				from: center(&segment.source),
				to: center(&segment.target),
				arrow: arrow_head(&segment.source, &segment.target),
			})
			.collect();

		let nodes = engine
			.state()
			.iter()
			.map(|(key, frame)| {
				let node = timeline.node(key);
				let radius = NODE_RADIUS * frame.scale;
				NodeShape {
					center: center(&frame),
					radius,
					fill: node
						.color
						.as_deref()
						.unwrap_or(COLORS[key.index() % COLORS.len()]),
					label: show_labels.then(|| LabelShape {
						text: node.label.as_deref().unwrap_or(&node.id),
						at: Point {
							x: frame.x + radius + 1.0,
							y: frame.y + 0.31 * LABEL_FONT_PX,
						},
					}),
				}
			})
			.collect();

		Self { links, nodes }
	}
}

fn center(frame: &NodeFrame) -> Point {
	Point {
		x: frame.x,
		y: frame.y,
	}
}

/// Tip sits on the source disc's rim; the base lies `MARKER_SIZE` further
/// along the link.
pub fn arrow_head(source: &NodeFrame, target: &NodeFrame) -> Option<ArrowHead> {
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return None;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let rim = NODE_RADIUS * source.scale;
	let tip = Point {
		x: source.x + ux * rim,
		y: source.y + uy * rim,
	};
	let (back_x, back_y) = (tip.x + ux * MARKER_SIZE, tip.y + uy * MARKER_SIZE);
	let (px, py) = (-uy * MARKER_SIZE * 0.5, ux * MARKER_SIZE * 0.5);
	Some(ArrowHead {
		tip,
		left: Point {
			x: back_x + px,
			y: back_y + py,
		},
		right: Point {
			x: back_x - px,
			y: back_y - py,
		},
	})
}

/// Maps world coordinates onto the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	/// Fits the whole world viewport into a `width` x `height` canvas.
	pub fn fit(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: width.min(height).max(1.0) / WORLD_SIZE,
		}
	}
}
