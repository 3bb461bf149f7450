use super::params::NodeParams;
use serde::{Deserialize, Serialize};

/// Canvas coordinates. Carried for round-tripping editor state; irrelevant to
/// compilation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A placed, configured occurrence of a node definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineNode {
    #[serde(alias = "uuid")]
    pub id: String,
    #[serde(alias = "defId", alias = "definition")]
    pub def_key: String,
    #[serde(default)]
    pub params: NodeParams,
    #[serde(default)]
    pub position: Position,
}

/// The named output slot an edge leaves from. Ordinary single-output nodes use
/// `Main` (the default when absent from serialized data); `Logic` definitions
/// expose `True` and `False`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputHandle {
    #[default]
    Main,
    True,
    False,
}

/// A directed edge between two node instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConnection {
    pub id: String,
    #[serde(alias = "sourceNodeId")]
    pub source: String,
    #[serde(alias = "targetNodeId")]
    pub target: String,
    #[serde(default, alias = "sourceHandle")]
    pub handle: OutputHandle,
}

/// A snapshot of the editing surface: node instances plus directed connections.
///
/// The compiler consumes this read-only; the mutating helpers below exist for
/// programmatic construction and maintain the structural invariant that no
/// connection references a removed node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineGraph {
    pub nodes: Vec<PipelineNode>,
    #[serde(default, alias = "edges")]
    pub connections: Vec<PipelineConnection>,
}

impl PipelineGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: impl Into<String>, def_key: impl Into<String>) {
        self.add_node_with_params(id, def_key, NodeParams::None);
    }

    pub fn add_node_with_params(
        &mut self,
        id: impl Into<String>,
        def_key: impl Into<String>,
        params: NodeParams,
    ) {
        self.nodes.push(PipelineNode {
            id: id.into(),
            def_key: def_key.into(),
            params,
            position: Position::default(),
        });
    }

    /// Whole-bag replacement of a node's configuration. Returns `false` when no
    /// node carries `id`.
    pub fn set_params(&mut self, id: &str, params: NodeParams) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.params = params;
                true
            }
            None => false,
        }
    }

    /// Removes a node and every connection touching it. Returns `false` when no
    /// node carries `id`.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.connections.retain(|c| c.source != id && c.target != id);
        true
    }

    /// Connects two nodes through the `Main` output handle.
    pub fn connect(&mut self, source: &str, target: &str) {
        self.connect_handle(source, target, OutputHandle::Main);
    }

    pub fn connect_handle(&mut self, source: &str, target: &str, handle: OutputHandle) {
        let id = format!("c{}", self.connections.len() + 1);
        self.connections.push(PipelineConnection {
            id,
            source: source.to_string(),
            target: target.to_string(),
            handle,
        });
    }

    pub fn node(&self, id: &str) -> Option<&PipelineNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
