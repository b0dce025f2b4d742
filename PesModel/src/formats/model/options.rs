//! Decoder options.
//!
//! The defaults decode the common asset revisions. Options can be loaded
//! from a TOML file; missing keys keep their defaults:
//!
//! ```toml
//! [pc]
//! scale = 0.025
//!
//! [pc.correction]
//! scale = 1.0
//! offset = [0.0, 0.0, 0.0]
//!
//! [ps2]
//! missing_marker = "skip"
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// PC vertex scale.
pub const PC_VERTEX_SCALE: f32 = 0.025;

/// Default PS2 triangle strip marker: VIF `FLUSH` followed by `MSCNT`.
pub const PS2_TRIANGLE_MARKER: [u8; 8] = [0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x17];

// Default value functions for serde
fn default_pc_scale() -> f32 {
    PC_VERTEX_SCALE
}
fn default_correction_scale() -> f32 {
    1.0
}
fn default_triangle_marker() -> [u8; 8] {
    PS2_TRIANGLE_MARKER
}

/// Options for all decoders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(default)]
    pub pc: PcOptions,
    #[serde(default)]
    pub ps2: Ps2Options,
}

impl DecodeOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// PC position scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcOptions {
    #[serde(default = "default_pc_scale")]
    pub scale: f32,
    /// Extra uniform correction used by a later revision of the format.
    #[serde(default)]
    pub correction: Option<UniformCorrection>,
}

impl Default for PcOptions {
    fn default() -> Self {
        Self {
            scale: default_pc_scale(),
            correction: None,
        }
    }
}

impl PcOptions {
    /// Scale a remapped raw position and apply the correction, if any.
    pub fn transform(&self, raw: Vec3) -> Vec3 {
        let scaled = raw * self.scale;
        match &self.correction {
            Some(correction) => correction.apply(scaled),
            None => scaled,
        }
    }
}

/// `p * scale + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformCorrection {
    #[serde(default = "default_correction_scale")]
    pub scale: f32,
    #[serde(default)]
    pub offset: [f32; 3],
}

impl UniformCorrection {
    pub fn apply(&self, p: Vec3) -> Vec3 {
        p * self.scale + Vec3::from_array(self.offset)
    }
}

/// What to do with a PS2 piece whose triangle marker is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMarkerPolicy {
    /// Abort the decode with [`crate::Error::MarkerNotFound`].
    #[default]
    Fail,
    /// Keep the piece's vertices and attributes, emit no faces for it.
    Skip,
}

/// PS2 strip discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ps2Options {
    #[serde(default = "default_triangle_marker")]
    pub triangle_marker: [u8; 8],
    #[serde(default)]
    pub missing_marker: MissingMarkerPolicy,
}

impl Default for Ps2Options {
    fn default() -> Self {
        Self {
            triangle_marker: default_triangle_marker(),
            missing_marker: MissingMarkerPolicy::default(),
        }
    }
}
