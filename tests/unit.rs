//! Unit tests for the graph model, parameter shapes, and the registry.
mod common;
use renzu::error::{CompileError, GraphConversionError};
use renzu::prelude::*;

#[test]
fn test_node_kind_wire_spelling_is_uppercase() {
    assert_eq!(serde_json::to_string(&NodeKind::Source).unwrap(), "\"SOURCE\"");
    assert_eq!(serde_json::to_string(&NodeKind::Ai).unwrap(), "\"AI\"");
    let kind: NodeKind = serde_json::from_str("\"LOGIC\"").unwrap();
    assert_eq!(kind, NodeKind::Logic);
}

#[test]
fn test_output_handle_defaults_to_main() {
    let json = r#"{ "id": "c1", "source": "a", "target": "b" }"#;
    let conn: PipelineConnection = serde_json::from_str(json).unwrap();
    assert_eq!(conn.handle, OutputHandle::Main);

    let json = r#"{ "id": "c2", "source": "a", "target": "b", "sourceHandle": "false" }"#;
    let conn: PipelineConnection = serde_json::from_str(json).unwrap();
    assert_eq!(conn.handle, OutputHandle::False);
}

#[test]
fn test_comparator_wire_spelling() {
    assert_eq!(serde_json::to_string(&Comparator::Gt).unwrap(), "\">\"");
    assert_eq!(serde_json::to_string(&Comparator::Ne).unwrap(), "\"!=\"");
    let comparator: Comparator = serde_json::from_str("\"==\"").unwrap();
    assert_eq!(comparator, Comparator::Eq);
    assert_eq!(format!("{}", Comparator::Lt), "<");
}

#[test]
fn test_params_report_their_shape() {
    assert_eq!(NodeParams::None.shape(), ParamShape::None);
    assert_eq!(
        NodeParams::Blur { kernel: 3 }.shape(),
        ParamShape::Blur
    );
    assert_eq!(format!("{}", ParamShape::DroidCam), "droid_cam");
    assert_eq!(format!("{}", ParamShape::MathOp), "math_op");
}

#[test]
fn test_params_parse_from_camel_case_export() {
    let json = r#"{ "kind": "selector", "inputKey": "hand_landmarks", "outputKey": "point", "index": 8 }"#;
    let params: NodeParams = serde_json::from_str(json).unwrap();
    assert_eq!(params, NodeParams::Selector {
        input_key: "hand_landmarks".to_string(),
        output_key: "point".to_string(),
        index: 8,
    });
}

#[test]
fn test_graph_remove_node_cascades_connections() {
    let mut graph = PipelineGraph::new();
    graph.add_node("a", "src_webcam");
    graph.add_node("b", "proc_grayscale");
    graph.add_node("c", "out_display");
    graph.connect("a", "b");
    graph.connect("b", "c");

    assert!(graph.remove_node("b"));
    assert_eq!(graph.nodes.len(), 2);
    assert!(graph.connections.is_empty());
    assert!(!graph.remove_node("b"));
}

#[test]
fn test_graph_set_params_replaces_the_whole_bag() {
    let mut graph = PipelineGraph::new();
    graph.add_node_with_params("b", "proc_blur", NodeParams::Blur { kernel: 3 });

    assert!(graph.set_params("b", NodeParams::Blur { kernel: 21 }));
    assert_eq!(graph.node("b").unwrap().params, NodeParams::Blur {
        kernel: 21
    });
    assert!(!graph.set_params("ghost", NodeParams::None));
}

#[test]
fn test_registry_replaces_on_same_key() {
    let mut registry = NodeRegistry::with_builtins();
    let count = registry.len();

    registry.register(
        NodeDefinition::new("proc_grayscale", "Custom Grayscale", NodeKind::Process)
            .with_template("{output} = {input}"),
    );
    assert_eq!(registry.len(), count);
    assert_eq!(
        registry.get("proc_grayscale").unwrap().name,
        "Custom Grayscale"
    );

    registry.register(
        NodeDefinition::new("proc_extra", "Extra", NodeKind::Process)
            .with_template("{output} = {input}"),
    );
    assert_eq!(registry.len(), count + 1);
}

#[test]
fn test_empty_registry_knows_nothing() {
    let registry = NodeRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.contains("src_webcam"));
    assert!(registry.get("src_webcam").is_none());
}

#[test]
fn test_builtin_catalog_covers_every_category() {
    let registry = NodeRegistry::with_builtins();
    for kind in [
        NodeKind::Source,
        NodeKind::Process,
        NodeKind::Ai,
        NodeKind::Utility,
        NodeKind::Logic,
        NodeKind::Output,
    ] {
        assert!(
            registry.iter().any(|def| def.kind == kind),
            "no builtin definition of kind {kind:?}"
        );
    }
    let check = registry.get("logic_check").unwrap();
    assert_eq!((check.inputs, check.outputs), (1, 2));
    let display = registry.get("out_display").unwrap();
    assert_eq!((display.inputs, display.outputs), (1, 0));
}

#[test]
fn test_into_pipeline_identity() {
    let graph = common::create_linear_graph();
    let converted = graph.clone().into_pipeline().unwrap();
    assert_eq!(converted.nodes.len(), graph.nodes.len());
    assert_eq!(converted.connections.len(), graph.connections.len());
}

#[test]
fn test_error_display() {
    let err = CompileError::UnknownDefinition {
        node_id: "node_A".to_string(),
        definition_key: "proc_missing".to_string(),
    };
    assert!(err.to_string().contains("node_A"));
    assert!(err.to_string().contains("proc_missing"));

    let err = CompileError::ParamShapeMismatch {
        node_id: "node_B".to_string(),
        definition_key: "proc_blur".to_string(),
        expected: "blur".to_string(),
        found: "onnx".to_string(),
    };
    assert!(err.to_string().contains("blur"));
    assert!(err.to_string().contains("onnx"));

    let err = CompileError::TokenCollision {
        token: "output".to_string(),
    };
    assert!(err.to_string().contains("{output}"));

    let err = GraphConversionError::JsonParseError("unexpected eof".to_string());
    assert!(err.to_string().contains("unexpected eof"));
}
