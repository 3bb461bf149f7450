//! Common test utilities for building pipeline graphs and compiling them.
use renzu::prelude::*;

/// Creates the registry every test compiles against.
#[allow(dead_code)]
pub fn registry() -> NodeRegistry {
    NodeRegistry::with_builtins()
}

/// Creates the canonical three-stage pipeline: webcam -> grayscale -> display.
#[allow(dead_code)]
pub fn create_linear_graph() -> PipelineGraph {
    let mut graph = PipelineGraph::new();
    graph.add_node("cam-1111-aaaa", "src_webcam");
    graph.add_node("gray-2222-bbbb", "proc_grayscale");
    graph.add_node("disp-3333-cccc", "out_display");
    graph.connect("cam-1111-aaaa", "gray-2222-bbbb");
    graph.connect("gray-2222-bbbb", "disp-3333-cccc");
    graph
}

/// Creates a branching pipeline. The check reads `score` against `0.5`; the
/// true branch converts to grayscale, the false branch blurs, and both feed
/// the same display node.
#[allow(dead_code)]
pub fn create_branching_graph() -> PipelineGraph {
    let mut graph = PipelineGraph::new();
    graph.add_node("cam-1111", "src_webcam");
    graph.add_node_with_params("check-2222", "logic_check", NodeParams::Check {
        input_key: "score".to_string(),
        output_key: "ok".to_string(),
        comparator: Comparator::Gt,
        threshold: 0.5,
    });
    graph.add_node("gray-3333", "proc_grayscale");
    graph.add_node("blur-4444", "proc_blur");
    graph.add_node("disp-5555", "out_display");
    graph.connect("cam-1111", "check-2222");
    graph.connect_handle("check-2222", "gray-3333", OutputHandle::True);
    graph.connect_handle("check-2222", "blur-4444", OutputHandle::False);
    graph.connect("gray-3333", "disp-5555");
    graph.connect("blur-4444", "disp-5555");
    graph
}

/// Compiles a graph against the built-in catalog.
#[allow(dead_code)]
pub fn compile(graph: PipelineGraph) -> GeneratedProgram {
    Compiler::builder(graph, &registry())
        .build()
        .compile()
        .expect("compilation failed")
}

/// An editor export in the wire spelling: `uuid`/`defId` on nodes,
/// `sourceNodeId`/`targetNodeId`/`sourceHandle` on connections, camelCase
/// parameter fields.
#[allow(dead_code)]
pub const WIRE_PIPELINE_JSON: &str = r#"{
  "nodes": [
    {
      "uuid": "cam0-9f21-4c11-b2aa",
      "defId": "src_droidcam",
      "params": { "kind": "droid_cam", "ip": "10.0.0.23", "port": "4747" },
      "position": { "x": 80.0, "y": 120.0 }
    },
    {
      "uuid": "blur-77d1-4f02-a1b3",
      "defId": "proc_blur",
      "params": { "kind": "blur", "kernel": 9 },
      "position": { "x": 320.0, "y": 120.0 }
    },
    {
      "uuid": "net0-1c55-49e0-92fe",
      "defId": "ai_onnx",
      "params": { "kind": "onnx", "modelPath": "detectors/face.onnx" },
      "position": { "x": 560.0, "y": 120.0 }
    },
    {
      "uuid": "disp-3a10-4b6c-8d77",
      "defId": "out_display",
      "position": { "x": 800.0, "y": 120.0 }
    }
  ],
  "connections": [
    { "id": "c1", "sourceNodeId": "cam0-9f21-4c11-b2aa", "targetNodeId": "blur-77d1-4f02-a1b3" },
    { "id": "c2", "sourceNodeId": "blur-77d1-4f02-a1b3", "targetNodeId": "net0-1c55-49e0-92fe" },
    { "id": "c3", "sourceNodeId": "net0-1c55-49e0-92fe", "targetNodeId": "disp-3a10-4b6c-8d77", "sourceHandle": "main" }
  ]
}"#;

/// A definition pack the way a `--defs` file carries it: plain serialized
/// `NodeDefinition` records.
#[allow(dead_code)]
pub const CUSTOM_DEFS_JSON: &str = r#"[
  {
    "key": "proc_invert",
    "name": "Invert Colors",
    "kind": "PROCESS",
    "inputs": 1,
    "outputs": 1,
    "imports": ["cv2"],
    "template": "{output} = cv2.bitwise_not({input})"
  },
  {
    "key": "proc_scale",
    "name": "Scale",
    "kind": "CUSTOM",
    "inputs": 1,
    "outputs": 1,
    "template": "{output} = cv2.resize({input}, None, fx={factor}, fy={factor})",
    "param_shape": "custom",
    "defaults": [["factor", "0.5"]]
  }
]"#;
