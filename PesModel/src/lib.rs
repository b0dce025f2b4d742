#![allow(non_snake_case)]
//! # PesModel
//!
//! A pure-Rust library for decoding PES/WE face and hair models.
//!
//! ## Supported Platforms
//!
//! - **PC** - fixed 32-byte vertex records with big-endian floats
//! - **PS2** - piece-based models with packed 16-bit geometry blocks
//! - **PSP** - piece-based models with fixed 14-byte vertex records
//!
//! Every platform decodes to the same [`Mesh`](formats::model::Mesh), which
//! can be exported to OBJ/MTL.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pesmodel::prelude::*;
//!
//! // Inflate a resource archive and find the model inside it
//! let blob = read_archive("face.bin")?;
//! let model = locate_model(&blob, Platform::Pc)?;
//!
//! // Decode and export
//! let mesh = decode_model(Platform::Pc, model, &DecodeOptions::default())?;
//! export_obj(&mesh, "face.obj", &ObjExportOptions::default())?;
//! # Ok::<(), pesmodel::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `pesmodel` command-line binary

pub mod archive;
pub mod compression;
pub mod converter;
pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::archive::{inflate_archive, locate_model, read_archive};
    pub use crate::converter::{ObjExportOptions, export_obj};
    pub use crate::formats::model::{
        DecodeOptions, Mesh, MeshDecoder, MissingMarkerPolicy, Platform, PolygonalFace, Vertex,
        VertexNormal, VertexTexture, decode_model,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
