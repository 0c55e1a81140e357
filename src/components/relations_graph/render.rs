use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{LABEL_FONT_PX, Scene, ViewTransform};

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "gray";
const TEXT_COLOR: &str = "#222222";

pub fn render(
	scene: &Scene,
	view: &ViewTransform,
	width: f64,
	height: f64,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);
	draw_links(scene, ctx);
	draw_nodes(scene, ctx);
	ctx.restore();
}

fn draw_links(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(LINK_COLOR);
	ctx.set_fill_style_str(LINK_COLOR);
	ctx.set_line_width(1.0);

	for link in &scene.links {
		ctx.begin_path();
		ctx.move_to(link.from.x, link.from.y);
		ctx.line_to(link.to.x, link.to.y);
		ctx.stroke();

		if let Some(arrow) = link.arrow {
			ctx.begin_path();
			ctx.move_to(arrow.tip.x, arrow.tip.y);
			ctx.line_to(arrow.left.x, arrow.left.y);
			ctx.line_to(arrow.right.x, arrow.right.y);
			ctx.close_path();
			ctx.fill();
		}
	}
}

fn draw_nodes(scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_line_join("round");
	ctx.set_line_cap("round");

	for node in &scene.nodes {
		ctx.begin_path();
		let _ = ctx.arc(node.center.x, node.center.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.fill);
		ctx.fill();
		ctx.set_stroke_style_str("white");
		ctx.set_line_width(1.0);
		ctx.stroke();
	}

	// Labels go on top of every disc, with a white halo for contrast
	ctx.set_font(&format!("{}px sans-serif", LABEL_FONT_PX));
	for label in scene.nodes.iter().filter_map(|node| node.label.as_ref()) {
		ctx.set_stroke_style_str("white");
		ctx.set_line_width(3.0);
		let _ = ctx.stroke_text(label.text, label.at.x, label.at.y);
		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(label.text, label.at.x, label.at.y);
	}
}
