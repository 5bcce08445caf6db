//! Core data types shared by the scene and the pipelines.
//!
//! - `model` contains the vertex layout and uploaded meshes
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `instance` holds per-object transformation data

pub mod instance;
pub mod model;
pub mod texture;
