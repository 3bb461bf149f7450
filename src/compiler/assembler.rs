use itertools::Itertools;
use log::debug;

use super::resolver::{NodeTable, PlanStep, live_endpoints};
use super::template::{INDENT, Substitutions, indent_block, split_sections};
use crate::error::CompileError;
use crate::graph::model::PipelineConnection;

/// Fixed imports every emitted program starts with.
pub(crate) const PREAMBLE: &str = "import cv2\nimport numpy as np";

const LOOP_HEAD: &str = "while True:";
const BREAK_LINE: &str = "    if cv2.waitKey(1) & 0xFF == ord('q'): break";
const TEARDOWN: &str = "cv2.destroyAllWindows()";

/// Accumulates the lines of the emitted program. Blocks may span several
/// lines; an empty block contributes nothing.
#[derive(Debug, Default)]
struct Emitter {
    lines: Vec<String>,
}

impl Emitter {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn block(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        for line in text.lines() {
            self.lines.push(line.to_string());
        }
    }

    fn finish(self) -> String {
        let mut program = self.lines.join("\n");
        program.push('\n');
        program
    }
}

/// Renders one node's template into its substituted setup and process texts.
///
/// Tokens bind in a fixed order: `{id}`, `{input}`, `{output}`, then the
/// configuration tokens named by the definition's defaults (the instance's
/// parameter bag overrides a default), then any bag tokens the defaults do not
/// name. A definition whose defaults reuse a built-in token name collides here.
fn render(
    table: &NodeTable<'_>,
    connections: &[PipelineConnection],
    entry: usize,
) -> Result<(Option<String>, String), CompileError> {
    let resolved = &table.entries[entry];
    let mut subs = Substitutions::new();
    subs.bind("id", resolved.short.as_str())?;
    subs.bind("input", input_variable(table, connections, entry))?;
    subs.bind("output", format!("frame_{}", resolved.short))?;

    let overrides = resolved.node.params.tokens();
    for (token, default) in &resolved.def.defaults {
        let value = overrides
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
            .unwrap_or(default);
        subs.bind(token, value)?;
    }
    for (token, value) in &overrides {
        if !resolved.def.defaults.iter().any(|(t, _)| t == token) {
            subs.bind(token, value.as_str())?;
        }
    }

    let (setup, process) = split_sections(&resolved.def.template);
    Ok((setup.map(|s| subs.apply(&s)), subs.apply(&process)))
}

/// The frame variable feeding a node: the output variable of the source behind
/// the first connection targeting it that can carry data, in connection order.
/// Connections the traversal ignores (arity- or handle-meaningless ones) never
/// decide an input name. A source without inputs gets the inert
/// `frame_in_<short>` placeholder; a node expecting input with no live
/// connection reads `frame_missing_input`, an undefined name that fails
/// visibly when the emitted program runs.
fn input_variable(
    table: &NodeTable<'_>,
    connections: &[PipelineConnection],
    entry: usize,
) -> String {
    let resolved = &table.entries[entry];
    if resolved.def.inputs == 0 {
        return format!("frame_in_{}", resolved.short);
    }
    connections
        .iter()
        .filter(|conn| conn.target == resolved.node.id)
        .find_map(|conn| live_endpoints(table, conn))
        .map(|(source, _)| format!("frame_{}", table.entries[source].short))
        .unwrap_or_else(|| {
            debug!(
                "Node '{}' expects an input but nothing is connected",
                resolved.node.id
            );
            "frame_missing_input".to_string()
        })
}

fn satisfied_by_preamble(line: &str) -> bool {
    PREAMBLE
        .lines()
        .any(|fixed| fixed == line || fixed.starts_with(&format!("{line} ")))
}

/// Lays the rendered pieces out as a complete program: preamble imports,
/// de-duplicated extra imports, the `pipeline_data` state map, a `# Setup`
/// section with each one-time block in visitation order, the `while True:`
/// loop holding every per-iteration block at its plan indent, and the teardown
/// epilogue with one `release()` per visited capture-owning source.
pub(crate) fn assemble(
    table: &NodeTable<'_>,
    connections: &[PipelineConnection],
    steps: &[PlanStep],
) -> Result<String, CompileError> {
    let visited: Vec<usize> = steps
        .iter()
        .filter_map(|step| match step {
            PlanStep::Node { entry, .. } => Some(*entry),
            _ => None,
        })
        .collect();

    let mut rendered: Vec<Option<(Option<String>, String)>> = vec![None; table.len()];
    for &entry in &visited {
        rendered[entry] = Some(render(table, connections, entry)?);
    }

    let mut out = Emitter::default();
    out.block(PREAMBLE);
    for spelling in visited
        .iter()
        .flat_map(|&entry| table.entries[entry].def.imports.iter())
        .unique()
    {
        let line = format!("import {spelling}");
        if !satisfied_by_preamble(&line) {
            out.line(line);
        }
    }
    out.blank();
    out.line("pipeline_data = {}");
    out.blank();

    out.line("# Setup");
    let mut previous_setup = false;
    for &entry in &visited {
        if let Some((Some(setup), _)) = &rendered[entry] {
            if previous_setup {
                out.blank();
            }
            out.block(setup);
            previous_setup = true;
        }
    }
    out.blank();

    out.line(LOOP_HEAD);
    for step in steps {
        match step {
            PlanStep::Node { entry, indent } => {
                if let Some((_, process)) = &rendered[*entry] {
                    out.block(&indent_block(process, 1 + indent));
                }
            }
            PlanStep::Else { indent } => {
                out.line(format!("{}else:", INDENT.repeat(1 + indent)));
            }
            PlanStep::Pass { indent } => {
                out.line(format!("{}pass", INDENT.repeat(1 + indent)));
            }
        }
    }
    out.line(BREAK_LINE);
    out.blank();

    for &entry in &visited {
        let resolved = &table.entries[entry];
        if resolved.def.owns_capture {
            out.line(format!("cap_{}.release()", resolved.short));
        }
    }
    out.line(TEARDOWN);

    Ok(out.finish())
}
