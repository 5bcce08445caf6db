use wgpu::util::DeviceExt;

/// Number of light sources the shader evaluates.
pub const LIGHT_COUNT: usize = 3;

/// A point light with Phong colour terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: [f32; 3],
    pub ambient_color: [f32; 3],
    pub diffuse_color: [f32; 3],
    pub specular_color: [f32; 3],
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

/// The fixed lighting setup of the scene.
pub fn scene_lights() -> [LightSource; LIGHT_COUNT] {
    [
        LightSource {
            position: [3.0, 14.0, 0.0],
            ambient_color: [0.1, 0.1, 0.1],
            diffuse_color: [0.6, 0.6, 0.6],
            specular_color: [0.0, 0.0, 0.0],
            focal_strength: 32.0,
            specular_intensity: 0.05,
        },
        LightSource {
            position: [-3.0, 14.0, 0.0],
            ambient_color: [0.1, 0.1, 0.1],
            diffuse_color: [0.6, 0.6, 0.6],
            specular_color: [0.0, 0.0, 0.0],
            focal_strength: 32.0,
            specular_intensity: 0.05,
        },
        LightSource {
            position: [0.6, 5.0, 6.0],
            ambient_color: [0.1, 0.1, 0.1],
            diffuse_color: [0.6, 0.6, 0.6],
            specular_color: [0.3, 0.3, 0.3],
            focal_strength: 12.0,
            specular_intensity: 0.5,
        },
    ]
}

/// One entry of the shader's `lightSources` array.
///
/// Scalars are packed into the 4 bytes that follow each vec3 where the
/// shader layout allows it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightSourceUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub specular_color: [f32; 3],
    _padding2: u32,
}

impl From<&LightSource> for LightSourceUniform {
    fn from(light: &LightSource) -> Self {
        Self {
            position: light.position,
            focal_strength: light.focal_strength,
            ambient_color: light.ambient_color,
            specular_intensity: light.specular_intensity,
            diffuse_color: light.diffuse_color,
            _padding: 0,
            specular_color: light.specular_color,
            _padding2: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub light_sources: [LightSourceUniform; LIGHT_COUNT],
    pub use_lighting: u32,
    _padding: [u32; 3],
}

impl LightUniform {
    pub fn set_light(&mut self, index: usize, light: &LightSource) {
        self.light_sources[index] = light.into();
    }

    pub fn set_lighting(&mut self, enabled: bool) {
        self.use_lighting = enabled as u32;
    }
}

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    /// Creates the light buffer with every light off and lighting disabled.
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform = LightUniform::default();
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
