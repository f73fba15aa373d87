//! Self-contained glTF 2.0 export of a single mesh.
//!
//! Positions, normals and `u32` indices are packed back to back into one
//! buffer that is embedded as a base64 data URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use breather_mesh::TriangleMesh;
use serde_json::{json, Value};

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Serialize `mesh` as a glTF 2.0 JSON document with an embedded buffer.
pub fn export_gltf_json(mesh: &TriangleMesh, name: &str, base_color: [f32; 3]) -> String {
    gltf_document(mesh, name, base_color).to_string()
}

pub fn gltf_document(mesh: &TriangleMesh, name: &str, base_color: [f32; 3]) -> Value {
    let buffer = pack_buffer(mesh);
    let vertex_bytes = mesh.vertex_count() * 12;
    let index_bytes = mesh.indices.len() * 4;
    let bounds = mesh.bounding_box();
    let min = bounds.min.as_vec3().to_array();
    let max = bounds.max.as_vec3().to_array();

    json!({
        "asset": { "version": "2.0", "generator": "breather-render" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": name, "mesh": 0 }],
        "meshes": [{
            "name": name,
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1 },
                "indices": 2,
                "material": 0
            }]
        }],
        "materials": [{
            "name": format!("{name}_Material"),
            "pbrMetallicRoughness": {
                "baseColorFactor": [base_color[0], base_color[1], base_color[2], 1.0],
                "metallicFactor": 0.0,
                "roughnessFactor": 0.5
            },
            "doubleSided": true
        }],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": FLOAT,
                "count": mesh.vertex_count(),
                "type": "VEC3",
                "min": min,
                "max": max
            },
            {
                "bufferView": 1,
                "componentType": FLOAT,
                "count": mesh.vertex_count(),
                "type": "VEC3"
            },
            {
                "bufferView": 2,
                "componentType": UNSIGNED_INT,
                "count": mesh.indices.len(),
                "type": "SCALAR"
            }
        ],
        "bufferViews": [
            {
                "buffer": 0,
                "byteOffset": 0,
                "byteLength": vertex_bytes,
                "target": ARRAY_BUFFER
            },
            {
                "buffer": 0,
                "byteOffset": vertex_bytes,
                "byteLength": vertex_bytes,
                "target": ARRAY_BUFFER
            },
            {
                "buffer": 0,
                "byteOffset": vertex_bytes * 2,
                "byteLength": index_bytes,
                "target": ELEMENT_ARRAY_BUFFER
            }
        ],
        "buffers": [{
            "byteLength": buffer.len(),
            "uri": format!("data:application/octet-stream;base64,{}", STANDARD.encode(&buffer))
        }]
    })
}

fn pack_buffer(mesh: &TriangleMesh) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(mesh.vertex_count() * 24 + mesh.indices.len() * 4);
    for value in mesh.positions_f32().into_iter().chain(mesh.normals_f32()) {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
    for idx in &mesh.indices {
        buffer.extend_from_slice(&idx.to_le_bytes());
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use breather_geometry::SurfaceParameters;
    use breather_mesh::generate;

    #[test]
    fn test_gltf_json_valid() {
        let params = SurfaceParameters {
            u_segments: 4,
            v_segments: 6,
            ..SurfaceParameters::canonical()
        };
        let mesh = generate(&params).unwrap().mesh;
        let json = export_gltf_json(&mesh, "Breather", [0.0, 0.2, 0.6]);

        let gltf: Value = serde_json::from_str(&json).expect("Generated glTF JSON should be valid");
        assert_eq!(gltf["asset"]["version"], "2.0");
        assert_eq!(gltf["accessors"][0]["count"], 35);
        assert_eq!(gltf["accessors"][2]["count"], 4 * 6 * 6);
        assert_eq!(gltf["bufferViews"][1]["byteOffset"], 35 * 12);
        assert_eq!(gltf["buffers"][0]["byteLength"], 35 * 24 + 144 * 4);
        let uri = gltf["buffers"][0]["uri"].as_str().unwrap();
        let payload = uri
            .strip_prefix("data:application/octet-stream;base64,")
            .expect("buffer should be an embedded data URI");
        let bytes = STANDARD.decode(payload).unwrap();
        assert_eq!(bytes, pack_buffer(&mesh));
        // First position is the first vertex, little-endian f32
        let x = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(x, mesh.positions[0].x as f32);
    }
}
