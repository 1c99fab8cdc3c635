use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::Point;
use super::state::{DiagramState, NODE_HEIGHT, NODE_WIDTH};
use super::types::EdgeKind;

const BACKGROUND: &str = "#111827";
const NODE_FILL: &str = "#1f2937";
const NODE_BORDER: &str = "#4b5563";
const HUB_FILL: &str = "#1e3a8a";
const HUB_BORDER: &str = "#0ea5e9";
const DIRECT_COLOR: &str = "#3b82f6";
const INDIRECT_COLOR: &str = "#9ca3af";
const LABEL_FILL: &str = "#111827";
const LABEL_BORDER: &str = "#374151";
const LABEL_TEXT: &str = "#9ca3af";
const LAYER_TITLE_COLOR: &str = "#6b7280";

const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 6.0;
const CORNER_RADIUS: f64 = 12.0;
/// Horizontal gap between a layer's band and its vertical title.
const LAYER_TITLE_INSET: f64 = 100.0;

/// Draw the whole diagram for the current state. Skips all edges until the
/// first layout pass has filled the position cache.
pub fn render(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	draw_layer_titles(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_layer_titles(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LAYER_TITLE_COLOR);
	ctx.set_font("600 13px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for layer in &state.config.layers {
		let x = layer.x_percent / 100.0 * state.width - LAYER_TITLE_INSET;
		ctx.save();
		let _ = ctx.translate(x, state.height / 2.0);
		let _ = ctx.rotate(-PI / 2.0);
		let _ = ctx.fill_text(&layer.title.to_uppercase(), 0.0, 0.0);
		ctx.restore();
	}
}

fn draw_edges(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	for (edge, geom) in state.edge_geometries() {
		if geom.length <= 0.0 {
			continue;
		}

		let (color, line_width) = match edge.kind {
			EdgeKind::Direct => (DIRECT_COLOR, 3.0),
			EdgeKind::Indirect => (INDIRECT_COLOR, 2.0),
		};

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(line_width);
		if edge.kind == EdgeKind::Indirect {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0),
				&JsValue::from_f64(6.0),
			));
		}

		// Leave room for the arrowhead so the line doesn't poke past its tip.
		let angle_rad = geom.angle_deg.to_radians();
		let (ux, uy) = (angle_rad.cos(), angle_rad.sin());
		ctx.begin_path();
		ctx.move_to(geom.start.x, geom.start.y);
		ctx.line_to(geom.end.x - ux * ARROW_LENGTH, geom.end.y - uy * ARROW_LENGTH);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		draw_arrowhead(ctx, geom.end, ux, uy, color);
		draw_edge_label(ctx, &edge.label, geom.label_pos, geom.label_angle_deg);
	}
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip: Point, ux: f64, uy: f64, color: &str) {
	let (back_x, back_y) = (tip.x - ux * ARROW_LENGTH, tip.y - uy * ARROW_LENGTH);
	let (px, py) = (-uy * ARROW_HALF_WIDTH, ux * ARROW_HALF_WIDTH);
	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_label(ctx: &CanvasRenderingContext2d, label: &str, at: Point, angle_deg: f64) {
	ctx.save();
	let _ = ctx.translate(at.x, at.y);
	let _ = ctx.rotate(angle_deg.to_radians());

	ctx.set_font("12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let text_width = ctx
		.measure_text(label)
		.map(|m| m.width())
		.unwrap_or(label.len() as f64 * 7.0);
	let (w, h) = (text_width + 16.0, 20.0);

	ctx.set_fill_style_str(LABEL_FILL);
	ctx.set_stroke_style_str(LABEL_BORDER);
	ctx.set_line_width(1.0);
	rounded_rect(ctx, -w / 2.0, -h / 2.0, w, h, 6.0);
	ctx.fill();
	ctx.stroke();

	ctx.set_fill_style_str(LABEL_TEXT);
	let _ = ctx.fill_text(label, 0.0, 0.0);
	ctx.restore();
}

fn draw_nodes(state: &DiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	for node in &state.config.nodes {
		let Some(center) = state.node_position(&node.id) else {
			continue;
		};
		let (x, y) = (center.x - NODE_WIDTH / 2.0, center.y - NODE_HEIGHT / 2.0);

		let (fill, border) = if node.is_hub {
			(HUB_FILL, HUB_BORDER)
		} else {
			(NODE_FILL, NODE_BORDER)
		};
		ctx.set_fill_style_str(fill);
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(if node.is_hub { 2.0 } else { 1.0 });
		rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER_RADIUS);
		ctx.fill();
		ctx.stroke();

		ctx.set_font("28px sans-serif");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str("#ffffff");
		let _ = ctx.fill_text(&node.icon, center.x, center.y - 18.0);

		ctx.set_font("600 13px sans-serif");
		ctx.set_fill_style_str(if node.is_hub { "#ffffff" } else { "#d1d5db" });
		let _ = ctx.fill_text(&node.label, center.x, center.y + 20.0);
	}
}

/// Rounded-rectangle path via `arcTo`; avoids depending on `roundRect`
/// browser support.
fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
