//! Event-flow tests for the viewer session.

use approx::assert_relative_eq;
use breather_core::BreatherError;
use breather_geometry::{breather_point, SurfaceParameters};
use breather_render::{export_gltf_json, IndexBuffer, ShadingMode, Topology};
use breather_viewer::{parse_field, ParameterField, ParameterValue, Viewer, ViewerConfig};

fn small() -> SurfaceParameters {
    SurfaceParameters {
        u_segments: 2,
        v_segments: 2,
        ..SurfaceParameters::canonical()
    }
}

#[test]
fn test_two_by_two_scenario() {
    let mut viewer = Viewer::new().unwrap();
    let mesh = viewer.on_parameters_changed(small()).unwrap();

    assert_eq!(mesh.positions.len(), 9);
    assert_eq!(mesh.normals.len(), 9);
    assert_eq!(mesh.indices.len(), 24);
    assert_eq!(mesh.positions[0], breather_point(-14.0, -37.0, 0.4));
    // Middle vertex samples the domain centre
    assert_eq!(mesh.positions[4], breather_point(0.0, 0.0, 0.4));
    assert!(mesh.indices.iter().all(|&i| i < 9));
}

#[test]
fn test_invalid_edits_keep_previous_mesh() {
    let mut viewer = Viewer::new().unwrap();
    viewer.on_parameters_changed(small()).unwrap();
    let before_mesh = viewer.mesh().clone();
    let before_params = *viewer.parameters();

    let bad_coefficient = SurfaceParameters {
        shape_coefficient: 1.0,
        ..small()
    };
    assert!(matches!(
        viewer.on_parameters_changed(bad_coefficient),
        Err(BreatherError::InvalidParameter(_))
    ));

    let err = viewer
        .set_parameter(ParameterField::VSegments, ParameterValue::Count(0))
        .unwrap_err();
    assert!(err.is_parameter_rejection());

    let err = viewer
        .set_parameter(ParameterField::UMin, ParameterValue::Float(20.0))
        .unwrap_err();
    assert!(err.is_parameter_rejection());

    assert_eq!(*viewer.parameters(), before_params);
    assert_eq!(*viewer.mesh(), before_mesh);
}

#[test]
fn test_failed_generation_rolls_back() {
    let mut viewer = Viewer::new().unwrap();
    viewer.on_parameters_changed(small()).unwrap();
    let before_mesh = viewer.mesh().clone();
    let before_params = *viewer.parameters();
    let before_stats = viewer.stats();

    // Passes parameter validation, fails in the generator
    let err = viewer
        .set_parameter(ParameterField::USegments, ParameterValue::Count(usize::MAX))
        .unwrap_err();
    assert!(matches!(err, BreatherError::SegmentOverflow { .. }));

    let oversized = SurfaceParameters {
        u_segments: 27_000,
        v_segments: 27_000,
        ..small()
    };
    let err = viewer.on_parameters_changed(oversized).unwrap_err();
    assert!(err.is_parameter_rejection());

    assert_eq!(*viewer.parameters(), before_params);
    assert_eq!(*viewer.mesh(), before_mesh);
    assert_eq!(viewer.stats(), before_stats);

    // The session keeps working after the rollback
    let mesh = viewer
        .set_parameter(ParameterField::VSegments, ParameterValue::Count(3))
        .unwrap();
    assert_eq!(mesh.vertex_count(), 3 * 4);
}

#[test]
fn test_text_edit_flow() {
    let mut viewer = Viewer::new().unwrap();
    let field: ParameterField = "v-segments".parse().unwrap();
    let value = parse_field(field, "4").unwrap();
    let mesh = viewer.set_parameter(field, value).unwrap();
    assert_eq!(mesh.vertex_count(), 31 * 5);
    assert_eq!(viewer.stats().triangle_count, 30 * 4 * 2);

    assert!(parse_field(ParameterField::ShapeCoefficient, "zero").is_err());
}

#[test]
fn test_reset_restores_canonical_mesh() {
    let mut viewer = Viewer::new().unwrap();
    let canonical_mesh = viewer.mesh().clone();

    viewer
        .set_parameter(ParameterField::ShapeCoefficient, ParameterValue::Float(0.7))
        .unwrap();
    viewer
        .set_parameter(ParameterField::USegments, ParameterValue::Count(12))
        .unwrap();
    assert_ne!(*viewer.mesh(), canonical_mesh);

    viewer.reset_parameters().unwrap();
    assert_eq!(*viewer.parameters(), SurfaceParameters::canonical());
    assert_eq!(*viewer.mesh(), canonical_mesh);
}

#[test]
fn test_wheel_saturates() {
    let mut viewer = Viewer::new().unwrap();
    assert_eq!(viewer.camera().z_distance(), -50.0);

    for _ in 0..100 {
        viewer.on_wheel(120.0);
    }
    assert_eq!(viewer.camera().z_distance(), -100.0);
    assert_eq!(viewer.on_frame().view[3][2], -100.0);

    for _ in 0..100 {
        viewer.on_wheel(-3.0);
    }
    assert_eq!(viewer.camera().z_distance(), -10.0);

    viewer.on_wheel(0.0);
    assert_eq!(viewer.camera().z_distance(), -10.0);
}

#[test]
fn test_drag_rotates_only_while_pressed() {
    let mut viewer = Viewer::new().unwrap();
    let initial = viewer.on_frame().view;

    // Moves without a press are ignored
    viewer.on_pointer_move(300.0, 200.0);
    assert_eq!(viewer.on_frame().view, initial);

    viewer.on_pointer_down(100.0, 100.0);
    viewer.on_pointer_move(110.0, 100.0);
    let rotated = viewer.on_frame().view;
    assert_ne!(rotated, initial);

    viewer.on_pointer_up();
    viewer.on_pointer_move(500.0, 500.0);
    assert_eq!(viewer.on_frame().view, rotated);
}

#[test]
fn test_drag_order_matters() {
    let mut a = Viewer::new().unwrap();
    a.on_pointer_down(0.0, 0.0);
    a.on_pointer_move(10.0, 0.0);
    a.on_pointer_move(10.0, 10.0);
    a.on_pointer_up();

    let mut b = Viewer::new().unwrap();
    b.on_pointer_down(0.0, 0.0);
    b.on_pointer_move(0.0, 10.0);
    b.on_pointer_move(10.0, 10.0);
    b.on_pointer_up();

    assert_ne!(a.on_frame().view, b.on_frame().view);
}

#[test]
fn test_normal_matrix_is_rotation_part() {
    let mut viewer = Viewer::new().unwrap();
    viewer.on_pointer_down(0.0, 0.0);
    viewer.on_pointer_move(450.0, 0.0);
    let frame = viewer.on_frame();

    // Pure rotation + translation: the normal matrix equals the upper 3x3
    for col in 0..3 {
        for row in 0..3 {
            assert_relative_eq!(
                frame.normal_matrix[col][row],
                frame.view[col][row],
                epsilon = 1e-6
            );
        }
    }
}

#[test]
fn test_resize_updates_projection() {
    let mut viewer = Viewer::new().unwrap();
    let before = viewer.on_frame().projection;
    viewer.on_resize(800.0, 800.0);
    let after = viewer.on_frame().projection;
    assert_ne!(before, after);
    assert_relative_eq!(after[0][0], after[1][1], epsilon = 1e-6);

    // Degenerate sizes are ignored
    viewer.on_resize(0.0, 600.0);
    assert_eq!(viewer.on_frame().projection, after);
}

#[test]
fn test_shading_switch_changes_topology() {
    let mut viewer = Viewer::new().unwrap();
    viewer.on_parameters_changed(small()).unwrap();

    let triangles = viewer.render_mesh();
    assert_eq!(triangles.topology, Topology::TriangleList);
    assert!(matches!(triangles.indices, IndexBuffer::U16(_)));
    assert_eq!(triangles.indices.len(), 24);

    viewer.set_shading(ShadingMode::Wireframe);
    let frame = viewer.on_frame();
    assert_eq!(frame.topology, Topology::LineList);
    assert_eq!(frame.shading, ShadingMode::Wireframe);
    let lines = viewer.render_mesh();
    assert_eq!(lines.topology, Topology::LineList);
    assert_eq!(lines.indices.len() % 2, 0);

    viewer.set_shading(ShadingMode::Phong);
    assert_eq!(viewer.on_frame().topology, Topology::TriangleList);
}

#[test]
fn test_large_mesh_uses_wide_indices() {
    let mut viewer = Viewer::new().unwrap();
    let params = SurfaceParameters {
        u_segments: 300,
        v_segments: 300,
        ..SurfaceParameters::canonical()
    };
    viewer.on_parameters_changed(params).unwrap();
    assert!(matches!(viewer.render_mesh().indices, IndexBuffer::U32(_)));
}

#[test]
fn test_config_drives_initial_state() {
    let config = ViewerConfig::from_json(
        r#"{
            "parameters": { "u_segments": 4, "v_segments": 3 },
            "camera": { "z_distance": -20, "wheel_step": 5 },
            "orientation": { "pixels_per_degree": 1 },
            "shading": "wireframe"
        }"#,
    )
    .unwrap();
    let mut viewer = Viewer::with_config(&config).unwrap();

    assert_eq!(viewer.mesh().vertex_count(), 5 * 4);
    assert_eq!(viewer.on_frame().topology, Topology::LineList);
    assert_eq!(viewer.camera().z_distance(), -20.0);

    viewer.on_wheel(1.0);
    assert_eq!(viewer.camera().z_distance(), -25.0);

    // One pixel per degree: a 90 px drag is a quarter turn about Y
    viewer.on_pointer_down(0.0, 0.0);
    viewer.on_pointer_move(90.0, 0.0);
    let x_axis = viewer.on_frame().view[0];
    assert_relative_eq!(x_axis[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(x_axis[2], -1.0, epsilon = 1e-6);
}

#[test]
fn test_exported_gltf_matches_mesh() {
    let mut viewer = Viewer::new().unwrap();
    viewer.on_parameters_changed(small()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("breather.gltf");
    let json = export_gltf_json(viewer.mesh(), "Breather", viewer.lighting().base_color);
    std::fs::write(&path, &json).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let gltf: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(gltf["accessors"][0]["count"], 9);
    assert_eq!(gltf["accessors"][2]["count"], 24);
    assert_eq!(gltf["nodes"][0]["name"], "Breather");
}
