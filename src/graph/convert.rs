use super::model::PipelineGraph;
use crate::error::GraphConversionError;

/// A contract for converting a custom, user-defined data model into the
/// canonical `PipelineGraph` the compiler consumes.
///
/// Implement this for whatever structure your editor or storage layer
/// serializes, then hand the converted graph to `Compiler::builder`.
///
/// # Example
///
/// ```rust
/// use renzu::graph::{IntoPipeline, PipelineGraph};
/// use renzu::error::GraphConversionError;
///
/// struct MyExport {
///     stages: Vec<(String, String)>, // (instance id, definition key)
///     wires: Vec<(String, String)>,  // (from id, to id)
/// }
///
/// impl IntoPipeline for MyExport {
///     fn into_pipeline(self) -> Result<PipelineGraph, GraphConversionError> {
///         let mut graph = PipelineGraph::new();
///         for (id, key) in self.stages {
///             graph.add_node(id, key);
///         }
///         for (from, to) in self.wires {
///             graph.connect(&from, &to);
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoPipeline {
    fn into_pipeline(self) -> Result<PipelineGraph, GraphConversionError>;
}

/// The canonical model converts to itself.
impl IntoPipeline for PipelineGraph {
    fn into_pipeline(self) -> Result<PipelineGraph, GraphConversionError> {
        Ok(self)
    }
}
