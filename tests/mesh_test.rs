use cgmath::{InnerSpace, Vector3};
use shape_viewer::resources::mesh::{MeshData, MeshKind, TORUS_MAIN_RADIUS, TORUS_TUBE_RADIUS};

use crate::common::test_utils::assert_close;

mod common;

const KINDS: [MeshKind; 4] = [MeshKind::Plane, MeshKind::Cone, MeshKind::Torus, MeshKind::Box];

fn triangles(mesh: &MeshData) -> impl Iterator<Item = [Vector3<f32>; 3]> + '_ {
    mesh.indices.chunks(3).map(|tri| {
        let corner = |i: u32| Vector3::from(mesh.vertices[i as usize].position);
        [corner(tri[0]), corner(tri[1]), corner(tri[2])]
    })
}

#[test]
fn indices_reference_existing_vertices() {
    for kind in KINDS {
        let mesh = kind.generate();
        assert!(!mesh.indices.is_empty(), "{} has no triangles", kind.name());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(
            mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()),
            "{} indexes past its vertices",
            kind.name()
        );
    }
}

#[test]
fn normals_are_unit_length() {
    for kind in KINDS {
        for vertex in kind.generate().vertices {
            assert_close(Vector3::from(vertex.normal).magnitude(), 1.0);
        }
    }
}

#[test]
fn plane_faces_up() {
    let plane = MeshData::plane();
    assert_eq!(plane.vertices.len(), 4);
    for vertex in &plane.vertices {
        assert_eq!(vertex.position[1], 0.0);
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.position[0].abs(), 1.0);
        assert_eq!(vertex.position[2].abs(), 1.0);
    }
    for [a, b, c] in triangles(&plane) {
        assert!((b - a).cross(c - a).y > 0.0);
    }
}

#[test]
fn cube_winds_counter_clockwise_outwards() {
    let cube = MeshData::cube();
    assert_eq!(cube.indices.len(), 36);
    for [a, b, c] in triangles(&cube) {
        let centre = (a + b + c) / 3.0;
        assert!((b - a).cross(c - a).dot(centre) > 0.0);
    }
    for vertex in &cube.vertices {
        assert!(vertex.position.iter().all(|p| p.abs() == 0.5));
    }
}

#[test]
fn cone_spans_unit_base_to_apex() {
    let cone = MeshData::cone(36);
    let max_y = cone.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
    let min_y = cone.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
    assert_eq!(max_y, 1.0);
    assert_eq!(min_y, 0.0);

    for vertex in cone.vertices.iter().filter(|v| v.position[1] == 0.0 && v.position != [0.0; 3]) {
        assert_close(Vector3::new(vertex.position[0], 0.0, vertex.position[2]).magnitude(), 1.0);
    }

    // side faces point away from the axis, the cap points down
    for [a, b, c] in triangles(&cone) {
        let normal = (b - a).cross(c - a);
        let centre = (a + b + c) / 3.0;
        if a.y == 0.0 && b.y == 0.0 && c.y == 0.0 {
            assert!(normal.y < 0.0);
        } else {
            assert!(normal.dot(Vector3::new(centre.x, 0.0, centre.z)) > 0.0);
        }
    }
}

#[test]
fn torus_lies_around_the_z_axis() {
    let torus = MeshData::torus(TORUS_MAIN_RADIUS, TORUS_TUBE_RADIUS, 48, 24);
    for vertex in &torus.vertices {
        let [x, y, z] = vertex.position;
        let ring = Vector3::new(x, y, 0.0).magnitude();
        assert!(z.abs() <= TORUS_TUBE_RADIUS + 1e-5);
        assert!(ring >= TORUS_MAIN_RADIUS - TORUS_TUBE_RADIUS - 1e-5);
        assert!(ring <= TORUS_MAIN_RADIUS + TORUS_TUBE_RADIUS + 1e-5);
    }
}
