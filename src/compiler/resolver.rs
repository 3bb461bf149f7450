use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use log::debug;

use super::template::split_sections;
use crate::error::CompileError;
use crate::graph::model::{OutputHandle, PipelineConnection, PipelineGraph, PipelineNode};
use crate::registry::{NodeDefinition, NodeKind, NodeRegistry};

/// A graph node joined with its resolved definition and the short identifier
/// its emitted variable names derive from.
#[derive(Debug)]
pub(crate) struct NodeEntry<'a> {
    pub node: &'a PipelineNode,
    pub def: &'a NodeDefinition,
    pub short: String,
}

/// Every node of a pipeline resolved against a registry, indexed by instance id.
///
/// Building the table performs the authoring-error checks: each node must name
/// a registered definition and carry parameters of the shape that definition
/// declares. Short identifiers are unique across the table; a clash gets a
/// numeric suffix in node order.
#[derive(Debug)]
pub(crate) struct NodeTable<'a> {
    pub entries: Vec<NodeEntry<'a>>,
    index: AHashMap<&'a str, usize>,
}

impl<'a> NodeTable<'a> {
    pub fn build(
        graph: &'a PipelineGraph,
        registry: &'a NodeRegistry,
    ) -> Result<Self, CompileError> {
        let mut entries = Vec::with_capacity(graph.nodes.len());
        let mut index = AHashMap::with_capacity(graph.nodes.len());
        let mut taken = AHashSet::with_capacity(graph.nodes.len());

        for node in &graph.nodes {
            let def =
                registry
                    .get(&node.def_key)
                    .ok_or_else(|| CompileError::UnknownDefinition {
                        node_id: node.id.clone(),
                        definition_key: node.def_key.clone(),
                    })?;
            if !node.params.matches(def.param_shape) {
                return Err(CompileError::ParamShapeMismatch {
                    node_id: node.id.clone(),
                    definition_key: def.key.clone(),
                    expected: def.param_shape.to_string(),
                    found: node.params.shape().to_string(),
                });
            }

            let base = short_id(&node.id);
            let mut short = base.clone();
            let mut suffix = 1usize;
            while !taken.insert(short.clone()) {
                suffix += 1;
                short = format!("{base}_{suffix}");
            }

            index.entry(node.id.as_str()).or_insert(entries.len());
            entries.push(NodeEntry { node, def, short });
        }

        Ok(Self { entries, index })
    }

    pub fn lookup(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The entry index of the first node whose definition is a `Source`.
    pub fn first_source(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.def.kind == NodeKind::Source)
    }

    pub fn has_logic(&self) -> bool {
        self.entries.iter().any(|e| e.def.kind == NodeKind::Logic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// First dash-separated segment of an instance id, restricted to identifier
/// characters. Emitted names like `frame_{short}` and `cap_{short}` build on it.
fn short_id(id: &str) -> String {
    let head = id.split('-').next().unwrap_or(id);
    let cleaned: String = head
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "node".to_string()
    } else {
        cleaned
    }
}

/// Outgoing edges per table entry, split by the handle they leave from.
/// Connection order is preserved inside each list.
#[derive(Debug)]
pub(crate) struct Adjacency {
    pub main: Vec<Vec<usize>>,
    pub on_true: Vec<Vec<usize>>,
    pub on_false: Vec<Vec<usize>>,
}

/// The endpoint entries of a connection that can carry data, or `None` for
/// one the compiler ignores: a dangling endpoint, an edge into a node without
/// inputs or out of a node without outputs, or a handle the source's kind does
/// not expose. Traversal and input-variable resolution both apply this filter,
/// so an ignored connection can not decide a downstream input name either.
pub(crate) fn live_endpoints(
    table: &NodeTable<'_>,
    conn: &PipelineConnection,
) -> Option<(usize, usize)> {
    let source = table.lookup(&conn.source)?;
    let target = table.lookup(&conn.target)?;
    let source_def = table.entries[source].def;
    if source_def.outputs == 0 || table.entries[target].def.inputs == 0 {
        return None;
    }
    let branching = source_def.kind == NodeKind::Logic;
    match conn.handle {
        OutputHandle::Main if !branching => Some((source, target)),
        OutputHandle::True | OutputHandle::False if branching => Some((source, target)),
        _ => None,
    }
}

/// Resolves connections into index lists, keeping only the ones
/// [`live_endpoints`] accepts. Dropped connections are reported on the debug
/// log, never as errors.
pub(crate) fn build_adjacency(
    table: &NodeTable<'_>,
    connections: &[PipelineConnection],
) -> Adjacency {
    let count = table.len();
    let mut adjacency = Adjacency {
        main: vec![Vec::new(); count],
        on_true: vec![Vec::new(); count],
        on_false: vec![Vec::new(); count],
    };

    for conn in connections {
        let Some((source, target)) = live_endpoints(table, conn) else {
            debug!("Dropping connection '{}': can not carry data", conn.id);
            continue;
        };
        match conn.handle {
            OutputHandle::Main => adjacency.main[source].push(target),
            OutputHandle::True => adjacency.on_true[source].push(target),
            OutputHandle::False => adjacency.on_false[source].push(target),
        }
    }

    adjacency
}

/// Breadth-first order over `Main` edges from the starting node. Used whenever
/// the pipeline contains no `Logic` node, so the emitted loop body is flat.
pub(crate) fn execution_order(adjacency: &Adjacency, start: usize) -> Vec<usize> {
    let mut order = Vec::new();
    let mut visited = vec![false; adjacency.main.len()];
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for &next in &adjacency.main[current] {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    order
}

/// One emitted step of a branching pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanStep {
    /// The node's per-iteration block, `indent` levels inside the loop body.
    Node { entry: usize, indent: usize },
    /// An `else:` line closing the conditional opened by the preceding `Logic`
    /// node at the same indent.
    Else { indent: usize },
    /// A `pass` placeholder for a branch body that produced no steps.
    Pass { indent: usize },
}

enum WorkItem {
    Visit { entry: usize, indent: usize },
    Else { indent: usize, branch: Vec<usize> },
    Guard { indent: usize, floor: usize },
}

/// Depth-first traversal that lowers `Logic` branching into indented blocks.
///
/// A `Logic` node's per-iteration block ends in an `if ...:` line, so its
/// true-handle successors run one level deeper; false-handle successors follow
/// under an `else:` at the node's own indent. A node is emitted at most once:
/// when branches rejoin, the shared tail lands inside whichever branch is
/// walked first and later arrivals skip it silently. A branch that produces no
/// per-iteration lines (its nodes were emitted elsewhere, or they carry
/// setup-only templates) still needs a statement, which the guards cover with
/// `pass`. The guards count line-producing steps, not plan steps, so a visited
/// node with an empty process section does not satisfy one.
pub(crate) fn execution_plan(
    table: &NodeTable<'_>,
    adjacency: &Adjacency,
    start: usize,
) -> Vec<PlanStep> {
    let emits: Vec<bool> = table
        .entries
        .iter()
        .map(|e| !split_sections(&e.def.template).1.is_empty())
        .collect();
    let mut steps = Vec::new();
    let mut emitted = 0usize;
    let mut visited = vec![false; table.len()];
    let mut work = vec![WorkItem::Visit {
        entry: start,
        indent: 0,
    }];

    while let Some(item) = work.pop() {
        match item {
            WorkItem::Visit { entry, indent } => {
                if visited[entry] {
                    continue;
                }
                visited[entry] = true;
                steps.push(PlanStep::Node { entry, indent });
                if emits[entry] {
                    emitted += 1;
                }

                if table.entries[entry].def.kind == NodeKind::Logic {
                    let false_branch = &adjacency.on_false[entry];
                    if !false_branch.is_empty() {
                        work.push(WorkItem::Else {
                            indent,
                            branch: false_branch.clone(),
                        });
                    }
                    work.push(WorkItem::Guard {
                        indent: indent + 1,
                        floor: emitted,
                    });
                    for &next in adjacency.on_true[entry].iter().rev() {
                        work.push(WorkItem::Visit {
                            entry: next,
                            indent: indent + 1,
                        });
                    }
                } else {
                    for &next in adjacency.main[entry].iter().rev() {
                        work.push(WorkItem::Visit {
                            entry: next,
                            indent,
                        });
                    }
                }
            }
            WorkItem::Else { indent, branch } => {
                steps.push(PlanStep::Else { indent });
                emitted += 1;
                work.push(WorkItem::Guard {
                    indent: indent + 1,
                    floor: emitted,
                });
                for &next in branch.iter().rev() {
                    work.push(WorkItem::Visit {
                        entry: next,
                        indent: indent + 1,
                    });
                }
            }
            WorkItem::Guard { indent, floor } => {
                if emitted == floor {
                    steps.push(PlanStep::Pass { indent });
                    emitted += 1;
                }
            }
        }
    }

    steps
}
