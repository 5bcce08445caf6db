//! Per-draw shader parameters.
//!
//! [`ShaderParams`] translates a draw's transform, surface colour, texture
//! selection and material into the fields of an [`ObjectUniform`]. Like
//! uniforms of a bound shader program, the values are sticky: a field set
//! for one draw keeps its value for every later draw until it is set again.
//!
//! Each draw's snapshot is written into one slot of an [`ObjectBuffer`], a
//! uniform buffer addressed with dynamic offsets, so a whole frame's worth of
//! draws is uploaded with a single write before the render pass starts.

use std::collections::HashSet;

use wgpu::util::DeviceExt;

use crate::{
    data_structures::instance::Transform,
    resources::{material::MaterialRegistry, texture::TextureRegistry},
};

/// Slot value uploaded when a texture tag does not resolve.
pub const UNRESOLVED_SLOT: i32 = -1;

/// The shader's `material` struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    _padding: u32,
    pub specular_color: [f32; 3],
    pub shininess: f32,
}

/// Everything the shader reads per draw.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub texture_slot: i32,
    pub material: MaterialUniform,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let identity: [[f32; 4]; 4] = <cgmath::Matrix4<f32> as cgmath::SquareMatrix>::identity().into();
        Self {
            model: identity,
            normal_matrix: identity,
            object_color: [1.0, 1.0, 1.0, 1.0],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            texture_slot: UNRESOLVED_SLOT,
            material: MaterialUniform::default(),
        }
    }
}

impl ObjectUniform {
    pub fn uses_texture(&self) -> bool {
        self.use_texture != 0
    }

    /// The bound texture slot, if the last texture selection resolved.
    pub fn slot(&self) -> Option<usize> {
        usize::try_from(self.texture_slot).ok()
    }
}

/// Sticky per-draw uniform state.
#[derive(Debug, Default)]
pub struct ShaderParams {
    current: ObjectUniform,
    reported: HashSet<String>,
}

impl ShaderParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ObjectUniform {
        &self.current
    }

    /// Sets `model` (and the matching normal matrix) from scale, rotation and translation.
    pub fn set_transformations(&mut self, transform: &Transform) {
        self.current.model = transform.to_matrix().into();
        self.current.normal_matrix = transform.normal_matrix().into();
    }

    /// Draws with a flat colour instead of sampling a texture.
    pub fn set_shader_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.current.use_texture = 0;
        self.current.object_color = [r, g, b, a];
    }

    /// Samples the texture registered under `tag`.
    ///
    /// An unknown tag uploads [`UNRESOLVED_SLOT`] and turns sampling off, so the
    /// object falls back to its flat colour. Returns the resolved slot.
    pub fn set_shader_texture<H>(&mut self, textures: &TextureRegistry<H>, tag: &str) -> Option<usize> {
        match textures.lookup_slot(tag) {
            Some(slot) => {
                self.current.use_texture = 1;
                self.current.texture_slot = slot as i32;
                Some(slot)
            }
            None => {
                self.report_once("texture", tag);
                self.current.use_texture = 0;
                self.current.texture_slot = UNRESOLVED_SLOT;
                None
            }
        }
    }

    pub fn set_texture_uv_scale(&mut self, u: f32, v: f32) {
        self.current.uv_scale = [u, v];
    }

    /// Copies the material registered under `tag`. Does nothing when it is unknown.
    pub fn set_shader_material(&mut self, materials: &MaterialRegistry, tag: &str) -> bool {
        if materials.is_empty() {
            return false;
        }
        let Some(material) = materials.lookup(tag) else {
            self.report_once("material", tag);
            return false;
        };
        self.current.material = MaterialUniform {
            ambient_color: material.ambient_color.into(),
            ambient_strength: material.ambient_strength,
            diffuse_color: material.diffuse_color.into(),
            _padding: 0,
            specular_color: material.specular_color.into(),
            shininess: material.shininess,
        };
        true
    }

    fn report_once(&mut self, kind: &str, tag: &str) {
        if self.reported.insert(format!("{kind}:{tag}")) {
            log::warn!("Unknown {kind} tag '{tag}', drawing without it");
        }
    }
}

/// Uniform buffer holding one aligned [`ObjectUniform`] per draw.
#[derive(Debug)]
pub struct ObjectBuffer {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
}

impl ObjectBuffer {
    pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<ObjectUniform>() as u64, alignment);
        let capacity = capacity.max(1);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform Buffer"),
            contents: &vec![0u8; stride as usize * capacity],
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                },
                count: None,
            }],
            label: Some("object_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
            label: Some("object_bind_group"),
        });

        Self {
            buffer,
            bind_group,
            bind_group_layout,
            stride,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Dynamic offset of the `index`-th draw.
    pub fn offset(&self, index: usize) -> wgpu::DynamicOffset {
        (self.stride * index as u64) as wgpu::DynamicOffset
    }

    /// Uploads `uniforms` into consecutive slots. Extra uniforms beyond the capacity are dropped.
    pub fn write(&self, queue: &wgpu::Queue, uniforms: &[ObjectUniform]) {
        if uniforms.len() > self.capacity {
            log::warn!(
                "{} draws requested but the object buffer holds {}",
                uniforms.len(),
                self.capacity
            );
        }
        let bytes = pack_aligned(uniforms, self.stride as usize, self.capacity);
        queue.write_buffer(&self.buffer, 0, &bytes);
    }
}

/// Rounds `size` up to a multiple of `alignment`.
pub fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Copies up to `capacity` uniforms into a byte buffer, one every `stride` bytes.
pub fn pack_aligned(uniforms: &[ObjectUniform], stride: usize, capacity: usize) -> Vec<u8> {
    let count = uniforms.len().min(capacity);
    let mut bytes = vec![0u8; stride * count];
    for (index, uniform) in uniforms.iter().take(count).enumerate() {
        let start = index * stride;
        let raw = bytemuck::bytes_of(uniform);
        bytes[start..start + raw.len()].copy_from_slice(raw);
    }
    bytes
}
