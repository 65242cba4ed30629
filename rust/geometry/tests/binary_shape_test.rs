// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod common;

use approx::assert_relative_eq;
use common::{init_tracing, normal_of, BinaryShape, EAST, NORTH, SQUARE, UP};
use ifc_shape_core::Error as CoreError;
use ifc_shape_geometry::{
    read_binary, DecodeConfig, Matrix4, MeshBuffer, NormalDedup, Point3, Transform, Vector3,
};

fn decode(bytes: &[u8]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    read_binary(&mut mesh, bytes, None, &DecodeConfig::default()).expect("decode failed");
    mesh
}

fn quad() -> BinaryShape {
    BinaryShape::new(&SQUARE).planar(UP, &[0, 1, 2, 0, 2, 3])
}

#[test]
fn test_planar_face_shares_repeated_vertices() {
    let mesh = decode(&quad().to_bytes());

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    assert!(mesh.normals.iter().all(|n| *n == normal_of(UP)));
    assert_eq!(mesh.positions[2], Point3::new(1.0, 1.0, 0.0));
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_non_planar_split_and_first_seen_reuse() {
    let shape = BinaryShape::new(&SQUARE).non_planar(&[
        (0, UP),
        (1, UP),
        (2, UP),
        // Vertex 0 again with a different normal -> duplicate
        (0, EAST),
        (2, UP),
        (3, UP),
        // Vertex 0 with the first normal -> first output reused
        (0, UP),
        (3, UP),
        (1, UP),
    ]);

    let mesh = decode(&shape.to_bytes());

    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 2, 4, 0, 4, 1]);
    assert_eq!(mesh.positions[3], mesh.positions[0]);
    assert_eq!(mesh.normals[3], normal_of(EAST));
    assert_eq!(mesh.normals[0], normal_of(UP));
}

#[test]
fn test_non_planar_repeat_of_second_normal_duplicates_again() {
    let shape = BinaryShape::new(&SQUARE).non_planar(&[
        (0, UP),
        (1, UP),
        (2, UP),
        (0, EAST),
        (2, UP),
        (3, UP),
        (0, EAST),
        (3, UP),
        (1, UP),
    ]);

    let mut mesh = MeshBuffer::new();
    let summary = read_binary(&mut mesh, &shape.to_bytes(), None, &DecodeConfig::default()).unwrap();

    // Only the first-seen normal is a reuse candidate
    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 2, 4, 5, 4, 1]);
    assert_eq!(summary.duplicated_vertices, 2);
}

#[test]
fn test_any_seen_policy_merges_repeated_normals() {
    let shape = BinaryShape::new(&SQUARE).non_planar(&[
        (0, UP),
        (1, UP),
        (2, UP),
        (0, EAST),
        (2, UP),
        (3, UP),
        (0, EAST),
        (3, UP),
        (1, UP),
    ]);
    let config = DecodeConfig::default().with_normal_dedup(NormalDedup::AnySeen);

    let mut mesh = MeshBuffer::new();
    read_binary(&mut mesh, &shape.to_bytes(), None, &config).unwrap();

    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 2, 4, 3, 4, 1]);
}

#[test]
fn test_dedup_is_scoped_to_one_face() {
    // Two faces sharing an edge get their own copies of the shared vertices
    let shape = BinaryShape::new(&SQUARE)
        .planar(UP, &[0, 1, 2])
        .planar(NORTH, &[0, 2, 3]);
    let mesh = decode(&shape.to_bytes());

    assert_eq!(mesh.vertex_count(), 6);
    assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(mesh.normals[3], normal_of(NORTH));
}

#[test]
fn test_empty_faces_are_skipped() {
    let shape = BinaryShape::new(&SQUARE)
        .empty_face()
        .planar(UP, &[0, 1, 2])
        .empty_face();
    let mesh = decode(&shape.to_bytes());
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn test_second_decode_offsets_indices() {
    let bytes = quad().to_bytes();
    let mut mesh = MeshBuffer::new();
    let config = DecodeConfig::default();

    read_binary(&mut mesh, &bytes, None, &config).unwrap();
    let summary = read_binary(&mut mesh, &bytes, None, &config).unwrap();

    assert_eq!(summary.vertices_added, 4);
    assert_eq!(summary.triangles_added, 2);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    assert!(mesh.validate().is_ok());
}

#[test]
fn test_zero_faces_reads_declared_vertices() {
    let bytes = BinaryShape::new(&SQUARE).to_bytes();
    let mut mesh = decode(&quad().to_bytes());
    let before = mesh.clone();

    let summary = read_binary(&mut mesh, &bytes, None, &DecodeConfig::default()).unwrap();

    assert_eq!(summary.unique_vertices, SQUARE.len());
    assert_eq!(summary.triangles_added, 0);
    assert_eq!(mesh.indices, before.indices);
}

#[test]
fn test_empty_stream_leaves_buffer_unchanged() {
    let mut mesh = decode(&quad().to_bytes());
    let before = mesh.clone();
    let config = DecodeConfig::default();

    read_binary(&mut mesh, &BinaryShape::default().to_bytes(), None, &config).unwrap();
    read_binary(&mut mesh, &[], None, &config).unwrap();

    assert_eq!(mesh, before);
}

#[test]
fn test_two_byte_indices() {
    let vertices: Vec<[f32; 3]> = (0..300).map(|i| [i as f32, 0.0, 0.0]).collect();
    let shape = BinaryShape::new(&vertices).planar(UP, &[0, 299, 150]);
    let bytes = shape.to_bytes();

    // header + table + face count + tc + normal + 3 two-byte indices
    assert_eq!(bytes.len(), 9 + 300 * 12 + 4 + 4 + 2 + 3 * 2);

    let mesh = decode(&bytes);
    assert_eq!(mesh.positions[1], Point3::new(299.0, 0.0, 0.0));
    assert_eq!(mesh.positions[2], Point3::new(150.0, 0.0, 0.0));
}

#[test]
fn test_four_byte_indices() {
    let vertices: Vec<[f32; 3]> = (0..70_000).map(|i| [0.0, i as f32, 0.0]).collect();
    let shape = BinaryShape::new(&vertices).planar(UP, &[0, 69_999, 65_536]);
    let bytes = shape.to_bytes();

    assert_eq!(bytes.len(), 9 + 70_000 * 12 + 4 + 4 + 2 + 3 * 4);

    let mesh = decode(&bytes);
    assert_eq!(mesh.positions[1], Point3::new(0.0, 69_999.0, 0.0));
    assert_eq!(mesh.positions[2], Point3::new(0.0, 65_536.0, 0.0));
}

#[test]
fn test_truncated_face_fails_and_keeps_partial_output() {
    init_tracing();
    let mut bytes = quad().to_bytes();
    bytes.pop();

    let mut mesh = MeshBuffer::new();
    let err = read_binary(&mut mesh, &bytes, None, &DecodeConfig::default()).unwrap_err();

    assert!(matches!(
        err.stream_error(),
        Some(CoreError::UnexpectedEof { context: "vertex index", .. })
    ));
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2]);
}

#[test]
fn test_transform_moves_positions_and_rotates_normals() {
    let rotation = Matrix4::from_axis_angle(&Vector3::y_axis(), std::f64::consts::FRAC_PI_2);
    let translation = Matrix4::new_translation(&Vector3::new(100.0, 0.0, 0.0));
    let transform = Transform::from_matrix(translation * rotation);

    let mut mesh = MeshBuffer::new();
    read_binary(
        &mut mesh,
        &quad().to_bytes(),
        Some(&transform),
        &DecodeConfig::default(),
    )
    .unwrap();

    // +X rotates to -Z about Y, then the offset is added
    assert_relative_eq!(mesh.positions[1], Point3::new(100.0, 0.0, -1.0), epsilon = 1e-9);
    // +Z rotates to +X; translation never reaches normals
    assert_relative_eq!(mesh.normals[0], Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(mesh.normals[0].norm(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_mirrored_transform_flips_normals_with_positions() {
    let mirror = Transform::from_matrix(Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, -1.0)));
    let shape = BinaryShape::new(&SQUARE).planar(UP, &[0, 1, 2]);

    let mut mesh = MeshBuffer::new();
    read_binary(&mut mesh, &shape.to_bytes(), Some(&mirror), &DecodeConfig::default()).unwrap();

    assert!(mirror.is_mirrored());
    assert_relative_eq!(mesh.normals[0], Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-9);
    assert_eq!(mesh.positions[1], Point3::new(1.0, 0.0, 0.0));
}
