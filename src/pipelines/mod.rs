//! Render pipelines and the uniforms bound to them.
//!
//! - `basic` builds the Phong pipeline and fixes its bind group order
//! - `light` holds the scene's light sources and their uniform buffer

pub mod basic;
pub mod light;
