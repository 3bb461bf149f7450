//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the renzu crate.
//! Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use renzu::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! // Load a pipeline exported from the editor
//! let json = std::fs::read_to_string("path/to/pipeline.json")?;
//! let graph: PipelineGraph = serde_json::from_str(&json)?;
//!
//! // Compile it against the built-in definition catalog
//! let registry = NodeRegistry::with_builtins();
//! let program = Compiler::builder(graph, &registry).build().compile()?;
//!
//! std::fs::write("pipeline.py", &program.source)?;
//! # Ok(())
//! # }
//! ```

// Core compilation
pub use crate::compiler::{Compiler, CompilerBuilder, GeneratedProgram};

// Graph model and node parameters
pub use crate::graph::convert::IntoPipeline;
pub use crate::graph::model::{
    OutputHandle, PipelineConnection, PipelineGraph, PipelineNode, Position,
};
pub use crate::graph::params::{Comparator, HttpMethod, MathKind, NodeParams, ParamShape};

// Definition catalog
pub use crate::registry::{NodeDefinition, NodeKind, NodeRegistry};

// Error types
pub use crate::error::{CompileError, GraphConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
