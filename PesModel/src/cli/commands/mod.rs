use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::formats::model::Platform;

pub mod archive;
pub mod execute;
pub mod model;

/// Where the model comes from and how to decode it
#[derive(Args, Debug, Clone)]
pub struct ModelSource {
    /// Model file (or archive with --archive)
    pub path: PathBuf,

    /// Model platform (pc, ps2, psp)
    #[arg(short, long)]
    pub platform: Platform,

    /// Treat the input as a compressed archive and locate the model inside it
    #[arg(short, long)]
    pub archive: bool,

    /// Decoder options file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a model and print a summary
    Inspect {
        #[command(flatten)]
        source: ModelSource,

        /// Print the decoded mesh as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Decode a model and export it to OBJ + MTL
    Convert {
        #[command(flatten)]
        source: ModelSource,

        /// Output OBJ file (the MTL file is written next to it)
        destination: PathBuf,

        /// Texture referenced by the material (e.g. face.png)
        #[arg(short, long)]
        texture: Option<String>,

        /// Object name in the OBJ file (defaults to the output file stem)
        #[arg(long)]
        object: Option<String>,
    },

    /// Inflate an archive and write the raw payload
    Decompress {
        /// Archive file
        source: PathBuf,

        /// Output file (defaults to <source>_decompressed.bin)
        destination: Option<PathBuf>,
    },
}
