//! Format conversion utilities
//!
//! Decoded meshes are exported to Wavefront OBJ with an MTL material file.

pub mod obj;

pub use obj::{ObjExportOptions, export_obj, write_mtl, write_obj};
