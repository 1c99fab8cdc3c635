mod component;
pub mod config;
pub mod geometry;
mod render;
mod state;
mod types;

pub use component::StackDiagramCanvas;
pub use config::ConfigError;
pub use types::{DiagramConfig, EdgeKind, EdgeSpec, LayerSpec, NodeSpec};
