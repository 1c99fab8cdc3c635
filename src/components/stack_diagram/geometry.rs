//! Pure layout math: percentage coordinates to pixels, and connector
//! trimming/rotation so lines meet node borders instead of centers.

use std::collections::HashMap;

use super::types::DiagramConfig;

/// Pixel inset pulling a connector's drawn endpoint back from the node center
/// to roughly the node's visual border. Applied symmetrically at both ends.
pub const CLEARANCE_RADIUS: f64 = 70.0;

/// Perpendicular distance from the line midpoint to its label.
pub const LABEL_OFFSET: f64 = 15.0;

/// A pixel-space coordinate on the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_to(self, other: Point) -> f64 {
		((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
	}
}

/// Everything the renderer needs to draw one connector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// Trimmed start of the visible segment.
	pub start: Point,
	/// Trimmed end of the visible segment; the arrowhead tip sits here.
	pub end: Point,
	/// Length of the visible segment, clamped to zero when the clearances
	/// swallow the whole span.
	pub length: f64,
	/// Rotation from source toward target, in degrees, as `atan2` yields it.
	pub angle_deg: f64,
	/// Midpoint of the visible segment pushed [`LABEL_OFFSET`] px to the side.
	pub label_pos: Point,
	/// `angle_deg` folded into [-90, 90] so label text never reads upside-down.
	pub label_angle_deg: f64,
}

/// Map every node to its absolute pixel position for the given container size.
///
/// x comes from the node's layer percentage, y from the node's own `pos`
/// percentage. The result is rebuilt from scratch on every call; callers
/// replace their cache wholesale rather than patching it. Zero-sized
/// containers yield degenerate but finite positions.
pub fn resolve_node_positions(
	config: &DiagramConfig,
	width: f64,
	height: f64,
) -> HashMap<String, Point> {
	config
		.nodes
		.iter()
		.filter_map(|node| {
			// Validation guarantees the layer exists; a miss here just drops
			// the node from the cache and its edges are skipped downstream.
			let x_percent = config.layer_x_percent(node.layer)?;
			let position = Point::new(x_percent / 100.0 * width, node.pos / 100.0 * height);
			Some((node.id.clone(), position))
		})
		.collect()
}

/// Derive the drawn segment, rotation and label placement for one connector.
///
/// Both endpoints are pulled inward by `clearance` along the line so the
/// segment spans only the gap between node borders. Coincident endpoints
/// would make the angle indeterminate; they fall back to 0 degrees.
pub fn resolve_edge_geometry(from: Point, to: Point, clearance: f64) -> EdgeGeometry {
	let center_distance = from.distance_to(to);
	let angle_rad = if center_distance == 0.0 {
		0.0
	} else {
		(to.y - from.y).atan2(to.x - from.x)
	};
	let angle_deg = angle_rad.to_degrees();

	let (dir_x, dir_y) = (angle_rad.cos(), angle_rad.sin());
	let start = Point::new(from.x + dir_x * clearance, from.y + dir_y * clearance);
	let end = Point::new(to.x - dir_x * clearance, to.y - dir_y * clearance);
	let length = (center_distance - 2.0 * clearance).max(0.0);

	let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
	let label_pos = Point::new(
		mid.x + dir_y * LABEL_OFFSET,
		mid.y - dir_x * LABEL_OFFSET,
	);

	EdgeGeometry {
		start,
		end,
		length,
		angle_deg,
		label_pos,
		label_angle_deg: fold_label_angle(angle_deg),
	}
}

/// Fold an angle into [-90, 90] by flipping the far half-circle.
fn fold_label_angle(angle_deg: f64) -> f64 {
	if angle_deg > 90.0 {
		angle_deg - 180.0
	} else if angle_deg < -90.0 {
		angle_deg + 180.0
	} else {
		angle_deg
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::stack_diagram::config;

	const EPS: f64 = 1e-9;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < EPS
	}

	#[test]
	fn positions_follow_percentages_exactly() {
		let cfg = config::builtin_stack().unwrap();
		let positions = resolve_node_positions(&cfg, 1000.0, 1200.0);
		assert_eq!(positions.len(), cfg.nodes.len());
		for node in &cfg.nodes {
			let p = positions[&node.id];
			let x_percent = cfg.layer_x_percent(node.layer).unwrap();
			assert!(approx(p.x, x_percent / 100.0 * 1000.0));
			assert!(approx(p.y, node.pos / 100.0 * 1200.0));
		}
	}

	#[test]
	fn horizontal_edge_end_to_end() {
		// Container 1000x1200: layer-percent 20 / pos 25 lands at (200, 300),
		// layer-percent 50 / pos 25 at (500, 300).
		let from = Point::new(200.0, 300.0);
		let to = Point::new(500.0, 300.0);
		let geom = resolve_edge_geometry(from, to, 70.0);
		assert!(approx(geom.angle_deg, 0.0));
		assert!(approx(geom.start.x, 270.0) && approx(geom.start.y, 300.0));
		assert!(approx(geom.end.x, 430.0) && approx(geom.end.y, 300.0));
		assert!(approx(geom.length, 160.0));
	}

	#[test]
	fn clearance_shortens_the_segment() {
		let from = Point::new(10.0, 20.0);
		let to = Point::new(310.0, 420.0);
		let full = from.distance_to(to);
		let geom = resolve_edge_geometry(from, to, 70.0);
		assert!(geom.length < full);
		assert!(approx(geom.length, full - 140.0));

		let untrimmed = resolve_edge_geometry(from, to, 0.0);
		assert!(approx(untrimmed.length, full));
		assert_eq!(untrimmed.start, from);
		assert_eq!(untrimmed.end, to);
	}

	#[test]
	fn angle_is_translation_invariant() {
		let from = Point::new(100.0, 250.0);
		let to = Point::new(400.0, 50.0);
		let base = resolve_edge_geometry(from, to, 70.0).angle_deg;
		for (dx, dy) in [(37.0, -91.5), (-400.0, 1200.0), (0.25, 0.25)] {
			let shifted = resolve_edge_geometry(
				Point::new(from.x + dx, from.y + dy),
				Point::new(to.x + dx, to.y + dy),
				70.0,
			);
			assert!(approx(shifted.angle_deg, base));
		}
	}

	#[test]
	fn swapping_endpoints_flips_angle_by_half_turn() {
		let a = Point::new(100.0, 250.0);
		let b = Point::new(400.0, 50.0);
		let forward = resolve_edge_geometry(a, b, 70.0).angle_deg;
		let backward = resolve_edge_geometry(b, a, 70.0).angle_deg;
		let diff = (forward - backward).abs() % 360.0;
		assert!(approx(diff, 180.0));
	}

	#[test]
	fn label_angle_stays_readable() {
		let origin = Point::new(500.0, 500.0);
		for i in 0..72 {
			let theta = (i as f64) * 5.0_f64.to_radians();
			let target = Point::new(origin.x + 300.0 * theta.cos(), origin.y + 300.0 * theta.sin());
			let geom = resolve_edge_geometry(origin, target, 70.0);
			assert!(
				geom.label_angle_deg >= -90.0 - EPS && geom.label_angle_deg <= 90.0 + EPS,
				"label angle {} out of range for edge angle {}",
				geom.label_angle_deg,
				geom.angle_deg
			);
		}
	}

	#[test]
	fn label_sits_beside_the_midpoint() {
		let geom = resolve_edge_geometry(Point::new(0.0, 0.0), Point::new(400.0, 0.0), 70.0);
		// Horizontal edge: the label offset is straight up.
		assert!(approx(geom.label_pos.x, 200.0));
		assert!(approx(geom.label_pos.y, -LABEL_OFFSET));
	}

	#[test]
	fn overlong_clearance_clamps_length_to_zero() {
		let geom = resolve_edge_geometry(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 70.0);
		assert_eq!(geom.length, 0.0);
	}

	#[test]
	fn coincident_endpoints_fall_back_to_angle_zero() {
		let p = Point::new(50.0, 50.0);
		let geom = resolve_edge_geometry(p, p, 70.0);
		assert!(approx(geom.angle_deg, 0.0));
		assert_eq!(geom.length, 0.0);
		assert!(geom.label_pos.x.is_finite() && geom.label_pos.y.is_finite());
	}

	#[test]
	fn resize_rebuilds_every_position() {
		let cfg = config::builtin_stack().unwrap();
		let before = resolve_node_positions(&cfg, 1000.0, 1200.0);
		let after = resolve_node_positions(&cfg, 500.0, 600.0);
		assert_eq!(before.len(), after.len());
		for (id, p) in &after {
			let prev = before[id];
			assert!(approx(p.x, prev.x / 2.0));
			assert!(approx(p.y, prev.y / 2.0));
		}
		// Output depends only on the latest dimensions.
		let again = resolve_node_positions(&cfg, 1000.0, 1200.0);
		assert_eq!(again, before);
	}

	#[test]
	fn zero_sized_container_degenerates_safely() {
		let cfg = config::builtin_stack().unwrap();
		let positions = resolve_node_positions(&cfg, 0.0, 0.0);
		assert_eq!(positions.len(), cfg.nodes.len());
		for p in positions.values() {
			assert_eq!((p.x, p.y), (0.0, 0.0));
		}
	}
}
