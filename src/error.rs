use thiserror::Error;

/// Errors that can occur while compiling a pipeline graph into a script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Pipeline contains no source node")]
    NoSource,

    #[error("Node '{node_id}' references an unregistered definition: '{definition_key}'")]
    UnknownDefinition {
        node_id: String,
        definition_key: String,
    },

    #[error(
        "Node '{node_id}' ({definition_key}) carries {found} parameters, but the definition expects {expected}"
    )]
    ParamShapeMismatch {
        node_id: String,
        definition_key: String,
        expected: String,
        found: String,
    },

    #[error("Token '{{{token}}}' is bound more than once with conflicting replacements")]
    TokenCollision { token: String },
}

/// Errors that can occur when converting a custom user format into a Renzu `PipelineGraph`.
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Failed to parse pipeline JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
