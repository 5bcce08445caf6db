//! Named surface material presets.

use cgmath::Vector3;

/// Phong surface parameters, looked up by tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_color: Vector3<f32>,
    pub ambient_strength: f32,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn new(
        tag: &str,
        ambient_color: [f32; 3],
        ambient_strength: f32,
        diffuse_color: [f32; 3],
        specular_color: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            tag: tag.to_string(),
            ambient_color: ambient_color.into(),
            ambient_strength,
            diffuse_color: diffuse_color.into(),
            specular_color: specular_color.into(),
            shininess,
        }
    }
}

/// The presets every scene starts with.
pub fn presets() -> Vec<Material> {
    vec![
        Material::new("gold", [0.2, 0.2, 0.1], 0.4, [0.3, 0.3, 0.2], [0.6, 0.5, 0.4], 22.0),
        Material::new("cement", [0.2, 0.2, 0.2], 0.2, [0.5, 0.5, 0.5], [0.4, 0.4, 0.4], 0.5),
        Material::new("wood", [0.4, 0.3, 0.1], 0.2, [0.3, 0.2, 0.1], [0.1, 0.1, 0.1], 0.3),
        Material::new("tile", [0.2, 0.3, 0.4], 0.3, [0.3, 0.2, 0.1], [0.4, 0.5, 0.6], 25.0),
        Material::new("glass", [0.4, 0.4, 0.4], 0.3, [0.3, 0.3, 0.3], [0.6, 0.6, 0.6], 85.0),
        Material::new("clay", [0.2, 0.2, 0.3], 0.3, [0.4, 0.4, 0.5], [0.2, 0.2, 0.4], 0.5),
    ]
}

/// Read-only table of materials, filled once when the scene is prepared.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets() -> Self {
        Self {
            materials: presets(),
        }
    }

    /// Fills an empty registry with [`presets`]. Does nothing if it is already populated.
    pub fn populate(&mut self) {
        if self.materials.is_empty() {
            self.materials = presets();
        }
    }

    pub fn lookup(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
