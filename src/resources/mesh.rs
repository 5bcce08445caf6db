use std::collections::HashMap;
use std::f32::consts::TAU;

use cgmath::{InnerSpace, Vector3};
use wgpu::util::DeviceExt;

use crate::data_structures::model::{Mesh, ModelVertex};

const CONE_SEGMENTS: u32 = 36;
const TORUS_RING_SEGMENTS: u32 = 48;
const TORUS_TUBE_SEGMENTS: u32 = 24;
pub const TORUS_MAIN_RADIUS: f32 = 1.0;
pub const TORUS_TUBE_RADIUS: f32 = 0.2;

/// The primitive shapes a scene can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Cone,
    Torus,
    Box,
}

impl MeshKind {
    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Plane => "plane",
            MeshKind::Cone => "cone",
            MeshKind::Torus => "torus",
            MeshKind::Box => "box",
        }
    }

    pub fn generate(self) -> MeshData {
        match self {
            MeshKind::Plane => MeshData::plane(),
            MeshKind::Cone => MeshData::cone(CONE_SEGMENTS),
            MeshKind::Torus => MeshData::torus(
                TORUS_MAIN_RADIUS,
                TORUS_TUBE_RADIUS,
                TORUS_RING_SEGMENTS,
                TORUS_TUBE_SEGMENTS,
            ),
            MeshKind::Box => MeshData::cube(),
        }
    }
}

/// CPU-side geometry. Triangles are wound counter-clockwise seen from outside.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// 2x2 quad in the XZ plane at y = 0, facing +Y.
    pub fn plane() -> Self {
        let mut mesh = Self::default();
        mesh.push_quad(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -2.0),
        );
        mesh
    }

    /// Unit cube centred on the origin with one quad per face.
    pub fn cube() -> Self {
        let faces = [
            // centre, u, v  (u x v is the outward normal)
            ([0.5, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-0.5, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.5, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -0.5, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 0.5], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let mut mesh = Self::default();
        for (centre, u, v) in faces {
            mesh.push_quad(centre.into(), u.into(), v.into());
        }
        mesh
    }

    /// Cone with a unit-radius base at y = 0 and its apex at y = 1, closed at the bottom.
    pub fn cone(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::default();
        let ring = |i: u32| {
            let theta = TAU * i as f32 / segments as f32;
            (theta, theta.cos(), theta.sin())
        };
        // Slope normal for radius 1 and height 1.
        let side_normal = |theta: f32| Vector3::new(theta.cos(), 1.0, theta.sin()).normalize();

        // Side: base ring (with a duplicated seam vertex) followed by one apex per segment.
        for i in 0..=segments {
            let (theta, cos, sin) = ring(i);
            mesh.vertices.push(ModelVertex {
                position: [cos, 0.0, sin],
                normal: side_normal(theta).into(),
                tex_coords: [i as f32 / segments as f32, 0.0],
            });
        }
        let apex_start = mesh.vertices.len() as u32;
        for i in 0..segments {
            let theta = TAU * (i as f32 + 0.5) / segments as f32;
            mesh.vertices.push(ModelVertex {
                position: [0.0, 1.0, 0.0],
                normal: side_normal(theta).into(),
                tex_coords: [(i as f32 + 0.5) / segments as f32, 1.0],
            });
        }
        for i in 0..segments {
            mesh.indices.extend_from_slice(&[i, apex_start + i, i + 1]);
        }

        // Base cap facing -Y.
        let centre = mesh.vertices.len() as u32;
        mesh.vertices.push(ModelVertex {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, -1.0, 0.0],
            tex_coords: [0.5, 0.5],
        });
        for i in 0..=segments {
            let (_, cos, sin) = ring(i);
            mesh.vertices.push(ModelVertex {
                position: [cos, 0.0, sin],
                normal: [0.0, -1.0, 0.0],
                tex_coords: [0.5 + 0.5 * cos, 0.5 + 0.5 * sin],
            });
        }
        for i in 0..segments {
            mesh.indices
                .extend_from_slice(&[centre, centre + 1 + i, centre + 2 + i]);
        }
        mesh
    }

    /// Torus lying in the XY plane around the Z axis.
    pub fn torus(main_radius: f32, tube_radius: f32, ring_segments: u32, tube_segments: u32) -> Self {
        let ring_segments = ring_segments.max(3);
        let tube_segments = tube_segments.max(3);
        let mut mesh = Self::default();

        for i in 0..=ring_segments {
            let phi = TAU * i as f32 / ring_segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for j in 0..=tube_segments {
                let psi = TAU * j as f32 / tube_segments as f32;
                let (sin_psi, cos_psi) = psi.sin_cos();
                let distance = main_radius + tube_radius * cos_psi;
                mesh.vertices.push(ModelVertex {
                    position: [distance * cos_phi, distance * sin_phi, tube_radius * sin_psi],
                    normal: [cos_psi * cos_phi, cos_psi * sin_phi, sin_psi],
                    tex_coords: [
                        i as f32 / ring_segments as f32,
                        j as f32 / tube_segments as f32,
                    ],
                });
            }
        }

        let stride = tube_segments + 1;
        for i in 0..ring_segments {
            for j in 0..tube_segments {
                let a = i * stride + j;
                let b = (i + 1) * stride + j;
                let c = b + 1;
                let d = a + 1;
                mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
        mesh
    }

    fn push_quad(&mut self, centre: Vector3<f32>, u: Vector3<f32>, v: Vector3<f32>) {
        let normal: [f32; 3] = u.cross(v).normalize().into();
        let base = self.vertices.len() as u32;
        let corners = [
            (centre - u * 0.5 - v * 0.5, [0.0, 0.0]),
            (centre + u * 0.5 - v * 0.5, [1.0, 0.0]),
            (centre + u * 0.5 + v * 0.5, [1.0, 1.0]),
            (centre - u * 0.5 + v * 0.5, [0.0, 1.0]),
        ];
        for (position, tex_coords) in corners {
            self.vertices.push(ModelVertex {
                position: position.into(),
                normal,
                tex_coords,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn upload(&self, device: &wgpu::Device, name: &str) -> Mesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Mesh {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: self.indices.len() as u32,
        }
    }
}

/// Uploaded meshes, one per kind no matter how often a kind is drawn.
#[derive(Debug, Default)]
pub struct ShapeMeshes {
    meshes: HashMap<MeshKind, Mesh>,
}

impl ShapeMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates and uploads `kind` unless it is already loaded.
    pub fn load(&mut self, device: &wgpu::Device, kind: MeshKind) {
        if self.meshes.contains_key(&kind) {
            return;
        }
        let data = kind.generate();
        log::debug!(
            "Uploading {} mesh ({} vertices, {} indices)",
            kind.name(),
            data.vertices.len(),
            data.indices.len()
        );
        self.meshes.insert(kind, data.upload(device, kind.name()));
    }

    pub fn get(&self, kind: MeshKind) -> Option<&Mesh> {
        self.meshes.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
