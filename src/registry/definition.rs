use crate::graph::params::ParamShape;
use serde::{Deserialize, Serialize};

/// The category a node definition belongs to, driving traversal and emission rules.
///
/// `Logic` definitions expose two named output handles ("true"/"false") and cause the
/// compiler to emit a conditional branch; every other kind has at most one "main" output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    Source,
    Process,
    Ai,
    Utility,
    Logic,
    Output,
    Custom,
}

/// The complete, immutable description of one reusable pipeline stage.
///
/// The `template` is target-language source text. An optional one-time section is
/// separated from the per-iteration section by `# Setup` / `# Process` marker lines;
/// a template without both markers is treated as per-iteration code only. Placeholder
/// tokens (`{id}`, `{input}`, `{output}` plus any configuration tokens named in
/// `defaults`) are substituted at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub key: String,
    pub name: String,
    pub kind: NodeKind,
    /// Input arity: 0 or 1.
    pub inputs: u8,
    /// Output arity: 0, 1, or 2 (2 only for `Logic` definitions).
    pub outputs: u8,
    /// Ambient import spellings the emitted program must declare once,
    /// e.g. `"mediapipe as mp"`. Spellings already satisfied by the fixed
    /// preamble are never re-emitted.
    #[serde(default)]
    pub imports: Vec<String>,
    pub template: String,
    /// Set for sources that bind a capture device to `cap_{id}`; the assembler
    /// emits a matching `cap_{id}.release()` in the epilogue.
    #[serde(default)]
    pub owns_capture: bool,
    /// The parameter variant instances of this definition are allowed to carry.
    #[serde(default)]
    pub param_shape: ParamShape,
    /// Configuration tokens in canonical binding order, each with the literal
    /// used when the instance's parameters do not override it.
    #[serde(default)]
    pub defaults: Vec<(String, String)>,
}

impl NodeDefinition {
    pub fn new(key: &str, name: &str, kind: NodeKind) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            kind,
            inputs: 1,
            outputs: 1,
            imports: Vec::new(),
            template: String::new(),
            owns_capture: false,
            param_shape: ParamShape::None,
            defaults: Vec::new(),
        }
    }

    pub fn with_arity(mut self, inputs: u8, outputs: u8) -> Self {
        self.inputs = inputs;
        self.outputs = outputs;
        self
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.template = template.to_string();
        self
    }

    pub fn with_imports(mut self, imports: &[&str]) -> Self {
        self.imports = imports.iter().map(|i| i.to_string()).collect();
        self
    }

    pub fn with_param_shape(mut self, shape: ParamShape) -> Self {
        self.param_shape = shape;
        self
    }

    pub fn with_defaults(mut self, defaults: &[(&str, &str)]) -> Self {
        self.defaults = defaults
            .iter()
            .map(|(token, literal)| (token.to_string(), literal.to_string()))
            .collect();
        self
    }

    pub fn owning_capture(mut self) -> Self {
        self.owns_capture = true;
        self
    }
}
