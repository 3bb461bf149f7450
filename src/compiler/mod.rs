use log::{debug, info};

use crate::error::CompileError;
use crate::graph::model::PipelineGraph;
use crate::registry::{NodeDefinition, NodeRegistry};

mod assembler;
mod resolver;
mod template;

use assembler::assemble;
use resolver::{NodeTable, PlanStep, build_adjacency, execution_order, execution_plan};

/// The result of one compilation: the program text plus enough bookkeeping to
/// reason about what went into it.
#[derive(Debug, Clone)]
pub struct GeneratedProgram {
    /// Complete target-language source, newline-terminated.
    pub source: String,
    /// Instance ids that contributed code, in emission order.
    pub visited: Vec<String>,
    /// Instance ids present in the graph but unreachable from the entry
    /// source, in graph order. Unreachable nodes are not an error.
    pub omitted: Vec<String>,
    /// Set when `source` is a commented diagnostic instead of a pipeline.
    pub failure: Option<CompileError>,
}

pub struct Compiler {
    graph: PipelineGraph,
    registry: NodeRegistry,
}

pub struct CompilerBuilder {
    graph: PipelineGraph,
    registry: NodeRegistry,
}

impl CompilerBuilder {
    /// Starts from a snapshot of the given registry; later changes to the
    /// original do not affect this compiler.
    pub fn new(graph: PipelineGraph, registry: &NodeRegistry) -> Self {
        Self {
            graph,
            registry: registry.clone(),
        }
    }

    /// Registers an additional definition for this compilation only,
    /// replacing a catalog entry with the same key.
    pub fn with_definition(mut self, def: NodeDefinition) -> Self {
        self.registry.register(def);
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            graph: self.graph,
            registry: self.registry,
        }
    }
}

impl Compiler {
    pub fn builder(graph: PipelineGraph, registry: &NodeRegistry) -> CompilerBuilder {
        CompilerBuilder::new(graph, registry)
    }

    /// Compiles the pipeline into a runnable program.
    ///
    /// The same graph and registry always produce byte-identical output.
    /// Authoring mistakes (an unregistered definition key, a parameter bag of
    /// the wrong shape, a template token bound twice) are `Err`. A graph
    /// without any source node is not: it yields `Ok` whose source is a
    /// one-line commented diagnostic, recorded in
    /// [`failure`](GeneratedProgram::failure).
    pub fn compile(&self) -> Result<GeneratedProgram, CompileError> {
        info!(
            "Compiling pipeline: {} nodes, {} connections",
            self.graph.nodes.len(),
            self.graph.connections.len()
        );

        let table = NodeTable::build(&self.graph, &self.registry)?;
        let Some(start) = table.first_source() else {
            debug!("No source node, emitting diagnostic program");
            return Ok(GeneratedProgram {
                source: format!("# Error: {}\n", CompileError::NoSource),
                visited: Vec::new(),
                omitted: self.graph.nodes.iter().map(|n| n.id.clone()).collect(),
                failure: Some(CompileError::NoSource),
            });
        };

        let adjacency = build_adjacency(&table, &self.graph.connections);
        let steps: Vec<PlanStep> = if table.has_logic() {
            execution_plan(&table, &adjacency, start)
        } else {
            execution_order(&adjacency, start)
                .into_iter()
                .map(|entry| PlanStep::Node { entry, indent: 0 })
                .collect()
        };
        let source = assemble(&table, &self.graph.connections, &steps)?;

        let mut seen = vec![false; table.len()];
        let mut visited = Vec::new();
        for step in &steps {
            if let PlanStep::Node { entry, .. } = step {
                seen[*entry] = true;
                visited.push(table.entries[*entry].node.id.clone());
            }
        }
        let omitted: Vec<String> = table
            .entries
            .iter()
            .enumerate()
            .filter(|(at, _)| !seen[*at])
            .map(|(_, e)| e.node.id.clone())
            .collect();
        for id in &omitted {
            debug!("Node '{id}' is unreachable from the entry source, omitted");
        }

        info!(
            "Emitted {} lines covering {} of {} nodes",
            source.lines().count(),
            visited.len(),
            table.len()
        );
        Ok(GeneratedProgram {
            source,
            visited,
            omitted,
            failure: None,
        })
    }

    /// Total variant of [`compile`](Self::compile): authoring errors also
    /// degrade to a one-line commented diagnostic.
    pub fn compile_to_source(&self) -> String {
        match self.compile() {
            Ok(program) => program.source,
            Err(e) => {
                log::warn!("Compilation failed: {e}");
                format!("# Error: {e}\n")
            }
        }
    }
}
