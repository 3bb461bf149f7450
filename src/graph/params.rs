use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-instance configuration, one shape per node category.
///
/// `None` is always accepted: every configuration token then resolves to the
/// definition's default literal. Any other variant must match the definition's
/// declared [`ParamShape`], which is checked before code generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeParams {
    #[default]
    None,
    DroidCam {
        ip: String,
        port: String,
    },
    Onnx {
        #[serde(alias = "modelPath")]
        model_path: String,
    },
    Api {
        url: String,
        method: HttpMethod,
        timeout: u32,
    },
    Selector {
        #[serde(alias = "inputKey")]
        input_key: String,
        #[serde(alias = "outputKey")]
        output_key: String,
        index: usize,
    },
    Distance {
        #[serde(alias = "keyA")]
        key_a: String,
        #[serde(alias = "keyB")]
        key_b: String,
        #[serde(alias = "outputKey")]
        output_key: String,
    },
    MathOp {
        #[serde(alias = "keyA")]
        key_a: String,
        #[serde(alias = "keyB")]
        key_b: String,
        op: MathKind,
        #[serde(alias = "outputKey")]
        output_key: String,
    },
    Check {
        #[serde(alias = "inputKey")]
        input_key: String,
        #[serde(alias = "outputKey")]
        output_key: String,
        comparator: Comparator,
        threshold: f64,
    },
    Counter {
        #[serde(alias = "triggerKey")]
        trigger_key: String,
        #[serde(alias = "outputKey")]
        output_key: String,
    },
    Blur {
        kernel: u32,
    },
    /// Free-form token values for `NodeKind::Custom` definitions. Keys are
    /// token names; values are coerced to target-language text.
    Custom(BTreeMap<String, serde_json::Value>),
}

impl NodeParams {
    pub fn shape(&self) -> ParamShape {
        match self {
            NodeParams::None => ParamShape::None,
            NodeParams::DroidCam { .. } => ParamShape::DroidCam,
            NodeParams::Onnx { .. } => ParamShape::Onnx,
            NodeParams::Api { .. } => ParamShape::Api,
            NodeParams::Selector { .. } => ParamShape::Selector,
            NodeParams::Distance { .. } => ParamShape::Distance,
            NodeParams::MathOp { .. } => ParamShape::MathOp,
            NodeParams::Check { .. } => ParamShape::Check,
            NodeParams::Counter { .. } => ParamShape::Counter,
            NodeParams::Blur { .. } => ParamShape::Blur,
            NodeParams::Custom(_) => ParamShape::Custom,
        }
    }

    /// `None` satisfies every expected shape; anything else must match exactly.
    pub(crate) fn matches(&self, expected: ParamShape) -> bool {
        matches!(self, NodeParams::None) || self.shape() == expected
    }

    /// The `(token, replacement)` pairs this bag contributes, in a fixed order.
    pub(crate) fn tokens(&self) -> Vec<(String, String)> {
        match self {
            NodeParams::None => Vec::new(),
            NodeParams::DroidCam { ip, port } => vec![
                ("ip".to_string(), ip.clone()),
                ("port".to_string(), port.clone()),
            ],
            NodeParams::Onnx { model_path } => {
                vec![("model_path".to_string(), model_path.clone())]
            }
            NodeParams::Api {
                url,
                method,
                timeout,
            } => vec![
                ("url".to_string(), url.clone()),
                ("method".to_string(), method.to_string()),
                ("timeout".to_string(), timeout.to_string()),
            ],
            NodeParams::Selector {
                input_key,
                output_key,
                index,
            } => vec![
                ("input_key".to_string(), input_key.clone()),
                ("output_key".to_string(), output_key.clone()),
                ("index".to_string(), index.to_string()),
            ],
            NodeParams::Distance {
                key_a,
                key_b,
                output_key,
            } => vec![
                ("key_a".to_string(), key_a.clone()),
                ("key_b".to_string(), key_b.clone()),
                ("output_key".to_string(), output_key.clone()),
            ],
            NodeParams::MathOp {
                key_a,
                key_b,
                op,
                output_key,
            } => vec![
                ("key_a".to_string(), key_a.clone()),
                ("key_b".to_string(), key_b.clone()),
                ("op".to_string(), op.to_string()),
                ("output_key".to_string(), output_key.clone()),
            ],
            NodeParams::Check {
                input_key,
                output_key,
                comparator,
                threshold,
            } => vec![
                ("input_key".to_string(), input_key.clone()),
                ("output_key".to_string(), output_key.clone()),
                ("comparator".to_string(), comparator.to_string()),
                ("threshold".to_string(), threshold.to_string()),
            ],
            NodeParams::Counter {
                trigger_key,
                output_key,
            } => vec![
                ("trigger_key".to_string(), trigger_key.clone()),
                ("output_key".to_string(), output_key.clone()),
            ],
            NodeParams::Blur { kernel } => vec![("kernel".to_string(), kernel.to_string())],
            NodeParams::Custom(map) => map
                .iter()
                .map(|(token, value)| (token.clone(), python_text(value)))
                .collect(),
        }
    }
}

/// Coerces a free-form JSON value into target-language text. Strings are taken
/// verbatim (templates supply their own quoting); booleans and null become the
/// target language's literals.
fn python_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "None".to_string(),
        serde_json::Value::Bool(true) => "True".to_string(),
        serde_json::Value::Bool(false) => "False".to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Discriminator for [`NodeParams`], used by definitions to declare which
/// configuration shape their instances may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamShape {
    #[default]
    None,
    DroidCam,
    Onnx,
    Api,
    Selector,
    Distance,
    MathOp,
    Check,
    Counter,
    Blur,
    Custom,
}

impl fmt::Display for ParamShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamShape::None => "none",
            ParamShape::DroidCam => "droid_cam",
            ParamShape::Onnx => "onnx",
            ParamShape::Api => "api",
            ParamShape::Selector => "selector",
            ParamShape::Distance => "distance",
            ParamShape::MathOp => "math_op",
            ParamShape::Check => "check",
            ParamShape::Counter => "counter",
            ParamShape::Blur => "blur",
            ParamShape::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Comparison operator for the branching threshold check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
        })
    }
}

/// Arithmetic selector for the math operator stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for MathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MathKind::Add => "add",
            MathKind::Sub => "sub",
            MathKind::Mul => "mul",
            MathKind::Div => "div",
        })
    }
}

/// Request method for the HTTP sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        })
    }
}
