//! File format handlers for PES/WE assets

pub mod model;

// Re-export main model types
pub use model::{DecodeOptions, Mesh, MeshDecoder, Platform, decode_model};
