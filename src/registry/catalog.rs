use super::definition::{NodeDefinition, NodeKind};
use crate::graph::params::ParamShape;

/// The built-in node catalog: camera sources, classic filters, AI detectors,
/// the scalar logic pack, the branching threshold check, and the output sinks.
pub(crate) fn builtin_definitions() -> Vec<NodeDefinition> {
    vec![
        NodeDefinition::new("src_webcam", "Webcam Feed", NodeKind::Source)
            .with_arity(0, 1)
            .with_imports(&["cv2"])
            .owning_capture()
            .with_template(
                "\
# Setup
cap_{id} = cv2.VideoCapture(0)
# Process
ret_{id}, {output} = cap_{id}.read()
if not ret_{id}: break",
            ),
        NodeDefinition::new("src_droidcam", "DroidCam Feed", NodeKind::Source)
            .with_arity(0, 1)
            .with_imports(&["cv2"])
            .owning_capture()
            .with_param_shape(ParamShape::DroidCam)
            .with_defaults(&[("ip", "192.168.1.10"), ("port", "4747")])
            .with_template(
                "\
# Setup
cap_{id} = cv2.VideoCapture(\"http://{ip}:{port}/video\")
# Process
ret_{id}, {output} = cap_{id}.read()
if not ret_{id}: break",
            ),
        NodeDefinition::new("proc_grayscale", "Grayscale", NodeKind::Process)
            .with_imports(&["cv2"])
            .with_template("{output} = cv2.cvtColor({input}, cv2.COLOR_BGR2GRAY)"),
        NodeDefinition::new("proc_blur", "Gaussian Blur", NodeKind::Process)
            .with_imports(&["cv2"])
            .with_param_shape(ParamShape::Blur)
            .with_defaults(&[("kernel", "15")])
            .with_template("{output} = cv2.GaussianBlur({input}, ({kernel}, {kernel}), 0)"),
        NodeDefinition::new("proc_canny", "Canny Edges", NodeKind::Process)
            .with_imports(&["cv2"])
            .with_template("{output} = cv2.Canny({input}, 100, 200)"),
        NodeDefinition::new("proc_threshold", "Binary Threshold", NodeKind::Process)
            .with_imports(&["cv2"])
            .with_template("_, {output} = cv2.threshold({input}, 127, 255, cv2.THRESH_BINARY)"),
        NodeDefinition::new("ai_hands", "Hand Tracking", NodeKind::Ai)
            .with_imports(&["cv2", "mediapipe as mp"])
            .with_template(
                "\
# Setup
hands_{id} = mp.solutions.hands.Hands(static_image_mode=False, max_num_hands=2, min_detection_confidence=0.5)
# Process
{output} = {input}.copy()
results_{id} = hands_{id}.process(cv2.cvtColor({input}, cv2.COLOR_BGR2RGB))
if results_{id}.multi_hand_landmarks:
    pipeline_data['hand_landmarks'] = results_{id}.multi_hand_landmarks[0].landmark
    for lms_{id} in results_{id}.multi_hand_landmarks:
        mp.solutions.drawing_utils.draw_landmarks({output}, lms_{id}, mp.solutions.hands.HAND_CONNECTIONS)
else:
    pipeline_data['hand_landmarks'] = None",
            ),
        NodeDefinition::new("ai_pose", "Pose Tracking", NodeKind::Ai)
            .with_imports(&["cv2", "mediapipe as mp"])
            .with_template(
                "\
# Setup
pose_{id} = mp.solutions.pose.Pose(static_image_mode=False, min_detection_confidence=0.5)
# Process
{output} = {input}.copy()
results_{id} = pose_{id}.process(cv2.cvtColor({input}, cv2.COLOR_BGR2RGB))
if results_{id}.pose_landmarks:
    pipeline_data['pose_landmarks'] = results_{id}.pose_landmarks.landmark
    mp.solutions.drawing_utils.draw_landmarks({output}, results_{id}.pose_landmarks, mp.solutions.pose.POSE_CONNECTIONS)
else:
    pipeline_data['pose_landmarks'] = None",
            ),
        NodeDefinition::new("ai_onnx", "ONNX Model", NodeKind::Ai)
            .with_imports(&["cv2"])
            .with_param_shape(ParamShape::Onnx)
            .with_defaults(&[("model_path", "model.onnx")])
            .with_template(
                "\
# Setup
net_{id} = cv2.dnn.readNetFromONNX(\"{model_path}\")
# Process
blob_{id} = cv2.dnn.blobFromImage({input}, 1.0 / 255.0, (640, 640), swapRB=True)
net_{id}.setInput(blob_{id})
pipeline_data['onnx_output'] = net_{id}.forward()
{output} = {input}",
            ),
        NodeDefinition::new("ai_yolo", "YOLOv8 Detector", NodeKind::Ai)
            .with_imports(&["cv2"])
            .with_template(
                "\
# Setup
from ultralytics import YOLO
yolo_{id} = YOLO('yolov8n.pt')
# Process
results_{id} = yolo_{id}({input})
{output} = results_{id}[0].plot()",
            ),
        NodeDefinition::new("util_selector", "Item Selector", NodeKind::Utility)
            .with_param_shape(ParamShape::Selector)
            .with_defaults(&[
                ("input_key", "hand_landmarks"),
                ("output_key", "point"),
                ("index", "8"),
            ])
            .with_template(
                "\
{output} = {input}
if '{input_key}' in pipeline_data and pipeline_data['{input_key}'] is not None:
    try:
        pipeline_data['{output_key}'] = pipeline_data['{input_key}'][{index}]
    except IndexError:
        pass",
            ),
        NodeDefinition::new("util_distance", "Measure Distance", NodeKind::Utility)
            .with_imports(&["numpy as np"])
            .with_param_shape(ParamShape::Distance)
            .with_defaults(&[
                ("key_a", "point_a"),
                ("key_b", "point_b"),
                ("output_key", "distance"),
            ])
            .with_template(
                "\
{output} = {input}
if '{key_a}' in pipeline_data and '{key_b}' in pipeline_data:
    pa_{id} = pipeline_data['{key_a}']
    pb_{id} = pipeline_data['{key_b}']
    if hasattr(pa_{id}, 'x'):
        dist_{id} = np.linalg.norm(np.array([pa_{id}.x, pa_{id}.y]) - np.array([pb_{id}.x, pb_{id}.y]))
    else:
        dist_{id} = np.linalg.norm(np.array(pa_{id}[:2]) - np.array(pb_{id}[:2]))
    pipeline_data['{output_key}'] = dist_{id}",
            ),
        NodeDefinition::new("util_math", "Math Operator", NodeKind::Utility)
            .with_param_shape(ParamShape::MathOp)
            .with_defaults(&[
                ("key_a", "a"),
                ("key_b", "b"),
                ("op", "add"),
                ("output_key", "result"),
            ])
            .with_template(
                "\
{output} = {input}
if '{key_a}' in pipeline_data and '{key_b}' in pipeline_data:
    a_{id}, b_{id} = pipeline_data['{key_a}'], pipeline_data['{key_b}']
    if '{op}' == 'add': res_{id} = a_{id} + b_{id}
    elif '{op}' == 'sub': res_{id} = a_{id} - b_{id}
    elif '{op}' == 'mul': res_{id} = a_{id} * b_{id}
    elif '{op}' == 'div': res_{id} = a_{id} / b_{id} if b_{id} != 0 else 0
    pipeline_data['{output_key}'] = res_{id}",
            ),
        NodeDefinition::new("util_counter", "Event Counter", NodeKind::Utility)
            .with_imports(&["cv2"])
            .with_param_shape(ParamShape::Counter)
            .with_defaults(&[("trigger_key", "check"), ("output_key", "count")])
            .with_template(
                "\
# Setup
counter_{id} = 0
last_state_{id} = False
# Process
{output} = {input}
if '{trigger_key}' in pipeline_data:
    state_{id} = bool(pipeline_data['{trigger_key}'])
    if state_{id} and not last_state_{id}:
        counter_{id} += 1
    last_state_{id} = state_{id}
    pipeline_data['{output_key}'] = counter_{id}
    cv2.putText({output}, f\"Count: {counter_{id}}\", (50, 50), cv2.FONT_HERSHEY_SIMPLEX, 1, (0, 255, 0), 2)",
            ),
        NodeDefinition::new("logic_check", "Threshold Check", NodeKind::Logic)
            .with_arity(1, 2)
            .with_param_shape(ParamShape::Check)
            .with_defaults(&[
                ("input_key", "score"),
                ("output_key", "check"),
                ("comparator", ">"),
                ("threshold", "0.5"),
            ])
            .with_template(
                "\
{output} = {input}
pipeline_data['{output_key}'] = pipeline_data.get('{input_key}', 0) {comparator} {threshold}
if pipeline_data['{output_key}']:",
            ),
        NodeDefinition::new("out_display", "Display Window", NodeKind::Output)
            .with_arity(1, 0)
            .with_imports(&["cv2"])
            .with_template("cv2.imshow(\"Renzu Output\", {input})"),
        NodeDefinition::new("out_api", "HTTP Sink", NodeKind::Output)
            .with_arity(1, 0)
            .with_imports(&["cv2", "requests"])
            .with_param_shape(ParamShape::Api)
            .with_defaults(&[
                ("url", "http://localhost:8000/frame"),
                ("method", "POST"),
                ("timeout", "5"),
            ])
            .with_template(
                "\
_, buf_{id} = cv2.imencode('.jpg', {input})
requests.request(\"{method}\", \"{url}\", data=buf_{id}.tobytes(), timeout={timeout})",
            ),
    ]
}
