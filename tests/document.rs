//! Reading, re-writing and validating hand-written documents.

use obj2gltf::document;
use obj2gltf::json::{Checked, Mode, ValidationErrorKind};
use tempfile::tempdir;

const UNKNOWN_MODE: &str = r#"{
    "asset": {"version": "2.0", "generator": "hand"},
    "buffers": [{"byteLength": 12, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAIA/"}],
    "bufferViews": [{"buffer": 0, "byteLength": 12, "target": 34962}],
    "accessors": [{
        "bufferView": 0, "componentType": 5126, "count": 1, "type": "VEC3",
        "min": [0, 0, 1], "max": [0, 0, 1.5]
    }],
    "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "mode": 99}]}],
    "nodes": [{"mesh": 0}],
    "scenes": [{"nodes": [0]}],
    "scene": 0
}"#;

#[test]
fn unknown_values_survive_a_round_trip() {
    let root = document::from_str(UNKNOWN_MODE).unwrap();
    assert_eq!(root.meshes[0].primitives[0].mode, Checked::<Mode>::Invalid(99));

    let first = document::to_string(&root).unwrap();
    let second = document::to_string(&document::from_str(&first).unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("\"mode\": 99"));
    assert!(first.contains("1.5"));

    let errors = root.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ValidationErrorKind::Invalid);
    assert_eq!(errors[0].path, "mesh_0_primitive_0_mode");
}

#[test]
fn glb_and_gltf_read_the_same() {
    let dir = tempdir().unwrap();
    let root = document::from_str(UNKNOWN_MODE).unwrap();
    let buffers = document::load_buffers(&root, dir.path()).unwrap();
    assert_eq!(buffers[0].len(), 12);

    let glb = dir.path().join("model.glb");
    document::write_glb(&glb, &root, &buffers[0]).unwrap();
    let gltf = dir.path().join("model.gltf");
    document::write_gltf(&gltf, &root, &buffers[0], false).unwrap();

    let from_glb = document::read(&glb).unwrap();
    let from_gltf = document::read(&gltf).unwrap();
    assert_eq!(from_glb, from_gltf);
    assert_eq!(from_glb, root);
}

#[test]
fn validation_reports_every_problem() {
    let root = document::from_str(
        r#"{
            "asset": {"version": "2.0"},
            "meshes": [
                {"primitives": [{"attributes": {"POSITION": 4}, "material": 2}]},
                {"primitives": []},
                {"primitives": []}
            ],
            "nodes": [{}, {}, {"mesh": 5}],
            "scenes": [{"nodes": [0, 7]}]
        }"#,
    )
    .unwrap();
    let errors = root.validate();
    let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "mesh_0_primitive_0_attribute_POSITION",
            "mesh_0_primitive_0_material",
            "node_2_mesh",
            "scene_0_node_1",
        ]
    );
    assert!(errors
        .iter()
        .all(|e| e.kind == ValidationErrorKind::IndexOutOfBounds));
}
