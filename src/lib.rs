//! # Renzu - Vision Pipeline Compilation Engine
//!
//! **Renzu** is a deterministic compiler that turns a directed graph of
//! vision-processing nodes (camera sources, filters, AI detectors, logic
//! branches, network sinks) into a runnable Python/OpenCV script. The graph is
//! data, the catalog of node definitions is data, and compilation is a pure
//! function of the two: the same input always yields byte-identical output.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical internal model of
//! a "pipeline graph." The primary workflow is:
//!
//! 1.  **Load Your Graph**: Deserialize an editor export directly into [`graph::PipelineGraph`] (the serde model accepts the editor's field spellings), or implement [`graph::IntoPipeline`] for your own format, or build the graph programmatically.
//! 2.  **Pick the Definitions**: Start from [`registry::NodeRegistry::with_builtins`] and register any custom [`registry::NodeDefinition`] your pipeline needs.
//! 3.  **Compile**: Use [`compiler::Compiler::builder`] to create a compiler and obtain a [`compiler::GeneratedProgram`] carrying the emitted source plus the visited and omitted node lists.
//! 4.  **Run**: Hand the emitted script to a Python interpreter with OpenCV installed; the crate itself never executes it.
//!
//! ## Quick Start
//!
//! The following example compiles a three-stage pipeline built in code.
//!
//! ```rust,no_run
//! use renzu::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let registry = NodeRegistry::with_builtins();
//!
//!     let mut graph = PipelineGraph::new();
//!     graph.add_node("cam-1", "src_webcam");
//!     graph.add_node("gray-1", "proc_grayscale");
//!     graph.add_node("disp-1", "out_display");
//!     graph.connect("cam-1", "gray-1");
//!     graph.connect("gray-1", "disp-1");
//!
//!     let compiler = Compiler::builder(graph, &registry).build();
//!     let program = compiler.compile()?;
//!
//!     println!("{}", program.source);
//!     std::fs::write("pipeline.py", &program.source)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Branching
//!
//! A `Logic` definition (such as the built-in `logic_check`) ends its template
//! in an `if ...:` line. Successors wired to its `true` handle are emitted one
//! indentation level deeper; successors on the `false` handle land under an
//! `else:`. Everything downstream of a plain node stays flat, exactly as the
//! editor's preview shows it.
//!
//! ## Custom Nodes
//!
//! Definitions are plain data, so a registry can be extended at runtime from
//! JSON or built with [`registry::NodeDefinition::new`] and the chainable
//! setters. See [`compiler::CompilerBuilder::with_definition`] for per-run
//! additions.

pub mod compiler;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod registry;
