//! Command execution implementations

use super::{Commands, archive, model};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { source, json } => model::inspect(source, *json),
            Commands::Convert {
                source,
                destination,
                texture,
                object,
            } => model::convert(source, destination, texture.as_deref(), object.as_deref()),
            Commands::Decompress {
                source,
                destination,
            } => archive::decompress(source, destination.as_deref()),
        }
    }
}
