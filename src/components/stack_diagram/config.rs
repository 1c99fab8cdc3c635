//! Loading and validation of the diagram configuration asset.
//!
//! The diagram contents live in `assets/tech_stack.json`, not in code; swapping
//! the depicted stack means editing that file only. Everything referential is
//! checked here at load time so the renderer never sees a dangling id.

use std::collections::HashSet;

use thiserror::Error;

use super::types::DiagramConfig;

/// The stack configuration shipped with the app.
const TECH_STACK_JSON: &str = include_str!("../../../assets/tech_stack.json");

/// A reason the diagram configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid diagram JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),
	#[error("duplicate layer id {0}")]
	DuplicateLayer(u8),
	#[error("node `{node}` references undeclared layer {layer}")]
	UnknownLayer { node: String, layer: u8 },
	#[error("edge `{from}` -> `{to}` references undeclared node `{missing}`")]
	UnknownEndpoint {
		from: String,
		to: String,
		missing: String,
	},
	#[error("node `{node}` has out-of-range pos {pos} (expected 0-100)")]
	PosOutOfRange { node: String, pos: f64 },
	#[error("layer {layer} has out-of-range x_percent {x_percent} (expected 0-100)")]
	LayerOutOfRange { layer: u8, x_percent: f64 },
}

/// Parse and validate a diagram configuration from JSON.
pub fn parse(json: &str) -> Result<DiagramConfig, ConfigError> {
	let config: DiagramConfig = serde_json::from_str(json)?;
	validate(&config)?;
	Ok(config)
}

/// Load the built-in tech-stack diagram.
pub fn builtin_stack() -> Result<DiagramConfig, ConfigError> {
	parse(TECH_STACK_JSON)
}

fn validate(config: &DiagramConfig) -> Result<(), ConfigError> {
	let mut layer_ids = HashSet::new();
	for layer in &config.layers {
		if !layer_ids.insert(layer.id) {
			return Err(ConfigError::DuplicateLayer(layer.id));
		}
		if !(0.0..=100.0).contains(&layer.x_percent) {
			return Err(ConfigError::LayerOutOfRange {
				layer: layer.id,
				x_percent: layer.x_percent,
			});
		}
	}

	let mut node_ids = HashSet::new();
	for node in &config.nodes {
		if !node_ids.insert(node.id.as_str()) {
			return Err(ConfigError::DuplicateNode(node.id.clone()));
		}
		if !layer_ids.contains(&node.layer) {
			return Err(ConfigError::UnknownLayer {
				node: node.id.clone(),
				layer: node.layer,
			});
		}
		if !(0.0..=100.0).contains(&node.pos) {
			return Err(ConfigError::PosOutOfRange {
				node: node.id.clone(),
				pos: node.pos,
			});
		}
	}

	for edge in &config.edges {
		for endpoint in [&edge.from, &edge.to] {
			if !node_ids.contains(endpoint.as_str()) {
				return Err(ConfigError::UnknownEndpoint {
					from: edge.from.clone(),
					to: edge.to.clone(),
					missing: endpoint.clone(),
				});
			}
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn minimal(edges: &str) -> String {
		format!(
			r#"{{
				"title": "t", "subtitle": "s",
				"layers": [
					{{ "id": 1, "title": "Core", "x_percent": 20 }},
					{{ "id": 2, "title": "Apps", "x_percent": 50 }}
				],
				"nodes": [
					{{ "id": "a", "label": "A", "icon": "🅰", "layer": 1, "pos": 25 }},
					{{ "id": "b", "label": "B", "icon": "🅱", "layer": 2, "pos": 25 }}
				],
				"edges": [{edges}]
			}}"#
		)
	}

	#[test]
	fn builtin_stack_is_valid() {
		let config = builtin_stack().unwrap();
		assert_eq!(config.layers.len(), 3);
		assert_eq!(config.nodes.len(), 16);
		assert_eq!(config.edges.len(), 20);
	}

	#[test]
	fn accepts_valid_edge() {
		let json = minimal(r#"{ "from": "a", "to": "b", "label": "x", "kind": "direct" }"#);
		assert!(parse(&json).is_ok());
	}

	#[test]
	fn rejects_edge_to_undeclared_node() {
		let json = minimal(r#"{ "from": "a", "to": "ghost", "label": "x", "kind": "direct" }"#);
		let err = parse(&json).unwrap_err();
		assert!(matches!(err, ConfigError::UnknownEndpoint { ref missing, .. } if missing == "ghost"));
		assert!(err.to_string().contains("ghost"));
	}

	#[test]
	fn rejects_duplicate_node_id() {
		let json = r#"{
			"title": "t", "subtitle": "s",
			"layers": [{ "id": 1, "title": "Core", "x_percent": 20 }],
			"nodes": [
				{ "id": "a", "label": "A", "icon": "x", "layer": 1, "pos": 25 },
				{ "id": "a", "label": "A2", "icon": "x", "layer": 1, "pos": 75 }
			],
			"edges": []
		}"#;
		assert!(matches!(parse(json), Err(ConfigError::DuplicateNode(id)) if id == "a"));
	}

	#[test]
	fn rejects_node_on_undeclared_layer() {
		let json = r#"{
			"title": "t", "subtitle": "s",
			"layers": [{ "id": 1, "title": "Core", "x_percent": 20 }],
			"nodes": [{ "id": "a", "label": "A", "icon": "x", "layer": 9, "pos": 25 }],
			"edges": []
		}"#;
		assert!(matches!(
			parse(json),
			Err(ConfigError::UnknownLayer { layer: 9, .. })
		));
	}

	#[test]
	fn rejects_out_of_range_pos() {
		let json = r#"{
			"title": "t", "subtitle": "s",
			"layers": [{ "id": 1, "title": "Core", "x_percent": 20 }],
			"nodes": [{ "id": "a", "label": "A", "icon": "x", "layer": 1, "pos": 120 }],
			"edges": []
		}"#;
		assert!(matches!(
			parse(json),
			Err(ConfigError::PosOutOfRange { pos, .. }) if pos == 120.0
		));
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(matches!(parse("not json"), Err(ConfigError::Json(_))));
	}
}
