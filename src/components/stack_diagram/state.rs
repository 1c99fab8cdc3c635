use std::collections::HashMap;

use log::warn;

use super::geometry::{self, CLEARANCE_RADIUS, EdgeGeometry, Point};
use super::types::{DiagramConfig, EdgeSpec};

pub const NODE_WIDTH: f64 = 144.0;
pub const NODE_HEIGHT: f64 = 112.0;

/// Layout state for one diagram instance.
///
/// The configuration is immutable for the life of the component; the only
/// mutable piece is the resolved-position cache, which starts empty and is
/// wholly replaced by [`DiagramState::layout`] on mount and on every resize.
pub struct DiagramState {
	pub config: DiagramConfig,
	pub width: f64,
	pub height: f64,
	positions: Option<HashMap<String, Point>>,
}

impl DiagramState {
	pub fn new(config: DiagramConfig, width: f64, height: f64) -> Self {
		Self {
			config,
			width,
			height,
			positions: None,
		}
	}

	/// Run a layout pass for the current dimensions, replacing the cache.
	pub fn layout(&mut self) {
		self.positions = Some(geometry::resolve_node_positions(
			&self.config,
			self.width,
			self.height,
		));
	}

	/// Record new container dimensions and recompute all positions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.layout();
	}

	/// Whether a layout pass has run yet.
	pub fn has_positions(&self) -> bool {
		self.positions.is_some()
	}

	/// Resolved pixel position of a node, if the cache holds one.
	pub fn node_position(&self, id: &str) -> Option<Point> {
		self.positions.as_ref()?.get(id).copied()
	}

	/// Geometry for every drawable edge, skipping any whose endpoints have no
	/// resolved position. Before the first layout pass this yields nothing.
	pub fn edge_geometries(&self) -> impl Iterator<Item = (&EdgeSpec, EdgeGeometry)> {
		let ready = self.has_positions();
		self.config.edges.iter().filter_map(move |edge| {
			if !ready {
				return None;
			}
			let (Some(from), Some(to)) =
				(self.node_position(&edge.from), self.node_position(&edge.to))
			else {
				warn!("skipping edge {} -> {}: endpoint not resolved", edge.from, edge.to);
				return None;
			};
			Some((edge, geometry::resolve_edge_geometry(from, to, CLEARANCE_RADIUS)))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::stack_diagram::config;

	fn state() -> DiagramState {
		DiagramState::new(config::builtin_stack().unwrap(), 1000.0, 1200.0)
	}

	#[test]
	fn no_edges_before_first_layout_pass() {
		let s = state();
		assert!(!s.has_positions());
		assert_eq!(s.edge_geometries().count(), 0);
		assert!(s.node_position("crm").is_none());
	}

	#[test]
	fn layout_pass_resolves_every_node_and_edge() {
		let mut s = state();
		s.layout();
		assert!(s.has_positions());
		assert_eq!(s.edge_geometries().count(), s.config.edges.len());
		let crm = s.node_position("crm").unwrap();
		assert_eq!((crm.x, crm.y), (200.0, 300.0));
	}

	#[test]
	fn resize_replaces_the_cache() {
		let mut s = state();
		s.layout();
		let before = s.node_position("crm").unwrap();
		s.resize(2000.0, 2400.0);
		let after = s.node_position("crm").unwrap();
		assert_eq!((after.x, after.y), (before.x * 2.0, before.y * 2.0));
		assert_eq!(s.edge_geometries().count(), s.config.edges.len());
	}
}
