//! The shipped scene: a fixed, ordered table of draw instructions.
//!
//! [`Scene::prepare`] loads everything the table refers to once.
//! [`Scene::update`] runs every instruction through the [`ShaderParams`]
//! bridge and uploads the resulting per-draw uniforms, and [`Scene::render`]
//! issues the draws in table order.

use crate::{
    config::ViewerConfig,
    data_structures::{instance::Transform, model::DrawMesh, texture::Texture},
    pipelines::{
        basic::{OBJECT_GROUP, TEXTURE_GROUP},
        light::{LightResources, scene_lights},
    },
    render::{ObjectBuffer, ObjectUniform, ShaderParams},
    resources::{
        material::MaterialRegistry,
        mesh::{MeshKind, ShapeMeshes},
        texture::{GpuUploader, TextureRegistry, texture_bind_group, texture_bind_group_layout},
    },
};

/// How an object's surface colour is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Appearance {
    /// Sample the texture registered under this tag.
    Texture(&'static str),
    /// Flat RGBA colour.
    Color([f32; 4]),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawInstruction {
    pub mesh: MeshKind,
    pub scale: [f32; 3],
    /// Degrees around X, Y and Z.
    pub rotation: [f32; 3],
    pub position: [f32; 3],
    pub appearance: Appearance,
    /// Only set when the instruction changes the UV scale; the previous value stays otherwise.
    pub uv_scale: Option<[f32; 2]>,
    /// Material preset to apply. The shipped table leaves every material unset.
    pub material: Option<&'static str>,
}

impl DrawInstruction {
    pub fn transform(&self) -> Transform {
        Transform::from_arrays(self.scale, self.rotation, self.position)
    }
}

const fn cone(scale: [f32; 3], position: [f32; 3]) -> DrawInstruction {
    DrawInstruction {
        mesh: MeshKind::Cone,
        scale,
        rotation: [0.0, 0.0, 0.0],
        position,
        appearance: Appearance::Texture("cone"),
        uv_scale: None,
        material: None,
    }
}

/// Every object of the scene in draw order.
pub const DRAW_TABLE: [DrawInstruction; 10] = [
    DrawInstruction {
        mesh: MeshKind::Plane,
        scale: [20.0, 1.0, 20.0],
        rotation: [0.0, 0.0, 0.0],
        position: [0.0, 0.0, 0.0],
        appearance: Appearance::Texture("floor"),
        uv_scale: Some([4.0, 4.0]),
        material: None,
    },
    cone([1.0, 2.0, 1.0], [0.0, 1.0, 3.0]),
    DrawInstruction {
        mesh: MeshKind::Torus,
        scale: [1.6, 1.6, 1.6],
        rotation: [90.0, 0.0, 0.0],
        position: [0.0, 1.0, 3.0],
        appearance: Appearance::Texture("cone"),
        uv_scale: None,
        material: None,
    },
    // front row
    cone([1.6, 2.0, 1.6], [-6.0, 0.5, 8.0]),
    cone([1.6, 2.0, 1.6], [6.0, 0.5, 8.0]),
    // middle row
    cone([1.2, 2.0, 1.2], [-4.0, 0.5, 5.0]),
    cone([1.2, 2.0, 1.2], [4.0, 0.5, 5.0]),
    // back row
    cone([0.9, 2.0, 0.9], [-2.0, 0.5, -3.0]),
    cone([0.9, 2.0, 0.9], [2.0, 0.5, -3.0]),
    DrawInstruction {
        mesh: MeshKind::Box,
        scale: [0.3, 2.0, 3.5],
        rotation: [0.0, 0.0, 0.0],
        position: [-5.0, 0.6, 6.5],
        appearance: Appearance::Texture("box"),
        uv_scale: None,
        material: None,
    },
];

/// The mesh kinds the table uses, each listed once in first-use order.
pub fn mesh_kinds(table: &[DrawInstruction]) -> Vec<MeshKind> {
    let mut kinds = Vec::new();
    for instruction in table {
        if !kinds.contains(&instruction.mesh) {
            kinds.push(instruction.mesh);
        }
    }
    kinds
}

/// A draw whose uniforms have been resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreparedDraw {
    pub mesh: MeshKind,
    /// Texture slot to bind, `None` draws with the fallback texture.
    pub slot: Option<usize>,
    pub uniform: ObjectUniform,
}

/// Runs `table` through the bridge and snapshots the uniforms after each instruction.
pub fn compose<H>(
    params: &mut ShaderParams,
    materials: &MaterialRegistry,
    textures: &TextureRegistry<H>,
    table: &[DrawInstruction],
) -> Vec<PreparedDraw> {
    table
        .iter()
        .map(|instruction| {
            params.set_transformations(&instruction.transform());
            match instruction.appearance {
                Appearance::Texture(tag) => {
                    params.set_shader_texture(textures, tag);
                }
                Appearance::Color([r, g, b, a]) => params.set_shader_color(r, g, b, a),
            }
            if let Some([u, v]) = instruction.uv_scale {
                params.set_texture_uv_scale(u, v);
            }
            if let Some(tag) = instruction.material {
                params.set_shader_material(materials, tag);
            }
            let uniform = *params.current();
            PreparedDraw {
                mesh: instruction.mesh,
                slot: uniform.uses_texture().then(|| uniform.slot()).flatten(),
                uniform,
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct Scene {
    materials: MaterialRegistry,
    textures: TextureRegistry<Texture>,
    meshes: ShapeMeshes,
    texture_layout: wgpu::BindGroupLayout,
    texture_bind_groups: Vec<wgpu::BindGroup>,
    fallback_bind_group: wgpu::BindGroup,
    params: ShaderParams,
    objects: ObjectBuffer,
    draws: Vec<PreparedDraw>,
    prepared: bool,
}

impl Scene {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture_layout = texture_bind_group_layout(device);
        let fallback = Texture::create_fallback(device, queue);
        let fallback_bind_group = texture_bind_group(device, &texture_layout, &fallback, "fallback");
        Self {
            materials: MaterialRegistry::new(),
            textures: TextureRegistry::new(),
            meshes: ShapeMeshes::new(),
            texture_layout,
            texture_bind_groups: Vec::new(),
            fallback_bind_group,
            params: ShaderParams::new(),
            objects: ObjectBuffer::new(device, DRAW_TABLE.len()),
            draws: Vec::new(),
            prepared: false,
        }
    }

    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    pub fn object_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.objects.bind_group_layout
    }

    /// Loads materials, lights, meshes and textures. Calling it again does nothing.
    ///
    /// A texture that fails to load is logged and skipped; instructions that use
    /// its tag draw with their flat colour.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        light: &mut LightResources,
        config: &ViewerConfig,
    ) {
        if self.prepared {
            return;
        }

        self.materials.populate();

        for (index, source) in scene_lights().iter().enumerate() {
            light.uniform.set_light(index, source);
        }
        light.uniform.set_lighting(true);
        light.write(queue);

        for kind in mesh_kinds(&DRAW_TABLE) {
            self.meshes.load(device, kind);
        }

        let uploader = GpuUploader { device, queue };
        for source in &config.textures {
            let path = config.asset_path(&source.file);
            // Failures are already logged by the registry.
            let _ = self.textures.load(&uploader, &path, &source.tag);
        }
        self.texture_bind_groups = self.textures.bind_all(|slot, entry| {
            log::debug!("Binding texture '{}' to slot {slot}", entry.tag);
            texture_bind_group(device, &self.texture_layout, &entry.handle, &entry.tag)
        });

        self.prepared = true;
    }

    /// Resolves this frame's draws and uploads their uniforms.
    pub fn update(&mut self, queue: &wgpu::Queue) {
        self.draws = compose(&mut self.params, &self.materials, &self.textures, &DRAW_TABLE);
        let uniforms: Vec<ObjectUniform> = self.draws.iter().map(|draw| draw.uniform).collect();
        self.objects.write(queue, &uniforms);
    }

    /// Issues the draws resolved by the last [`update`](Self::update).
    ///
    /// Camera and light bind groups must already be set on `pass`.
    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        for (index, draw) in self.draws.iter().enumerate().take(self.objects.capacity()) {
            let Some(mesh) = self.meshes.get(draw.mesh) else {
                continue;
            };
            let texture = draw
                .slot
                .and_then(|slot| self.texture_bind_groups.get(slot))
                .unwrap_or(&self.fallback_bind_group);
            pass.set_bind_group(TEXTURE_GROUP, texture, &[]);
            pass.set_bind_group(OBJECT_GROUP, &self.objects.bind_group, &[self.objects.offset(index)]);
            pass.draw_mesh(mesh);
        }
    }

    /// Frees every loaded texture. The scene can be prepared again afterwards.
    pub fn release(&mut self) {
        self.texture_bind_groups.clear();
        let released = self.textures.release_all();
        log::debug!("Released {released} textures");
        self.draws.clear();
        self.prepared = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_kind_is_loaded_once() {
        assert_eq!(
            mesh_kinds(&DRAW_TABLE),
            vec![MeshKind::Plane, MeshKind::Cone, MeshKind::Torus, MeshKind::Box]
        );
    }
}
