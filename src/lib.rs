//! shape-viewer
//!
//! An interactive viewer for a fixed arrangement of primitive shapes (a floor
//! plane, cones, a torus and a box), textured and lit by three point lights
//! with Phong-style shading. A free-fly camera is steered with the mouse and
//! WASD/QE, P switches between perspective and orthographic projection.
//!
//! High-level modules
//! - `camera`: camera state, input controller, projection and uniforms
//! - `config`: window, asset and camera defaults
//! - `context`: GPU and window context that owns device/queue/pipeline/scene
//! - `data_structures`: meshes, transforms and GPU textures
//! - `flow`: window event loop
//! - `pipelines`: the Phong pipeline and the scene lights
//! - `render`: per-draw shader parameters and their uniform buffer
//! - `resources`: texture and material registries, procedural meshes
//! - `scene`: the draw table and the code that loads and draws it
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
