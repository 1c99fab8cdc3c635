use serde::Deserialize;

/// How a connection is integrated, which decides its line style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
	/// Direct API integration, drawn as a solid line.
	Direct,
	/// Loosely coupled (Zapier/manual), drawn as a dashed line.
	Indirect,
}

/// One vertical band of the diagram.
#[derive(Clone, Debug, Deserialize)]
pub struct LayerSpec {
	pub id: u8,
	pub title: String,
	/// Horizontal position of the band as a percentage of container width.
	pub x_percent: f64,
}

/// A depicted system/service box.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeSpec {
	pub id: String,
	pub label: String,
	pub icon: String,
	/// Hubs get the emphasized box style.
	#[serde(default)]
	pub is_hub: bool,
	pub layer: u8,
	/// Vertical position as a percentage of container height.
	pub pos: f64,
}

/// A directed, labeled connection between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeSpec {
	pub from: String,
	pub to: String,
	pub label: String,
	pub kind: EdgeKind,
}

/// The whole diagram: heading strings plus the layer/node/edge tables.
#[derive(Clone, Debug, Deserialize)]
pub struct DiagramConfig {
	pub title: String,
	pub subtitle: String,
	pub layers: Vec<LayerSpec>,
	pub nodes: Vec<NodeSpec>,
	pub edges: Vec<EdgeSpec>,
}

impl DiagramConfig {
	/// Horizontal percentage for a layer id, if that layer is declared.
	pub fn layer_x_percent(&self, layer: u8) -> Option<f64> {
		self.layers.iter().find(|l| l.id == layer).map(|l| l.x_percent)
	}
}
