use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    /// The output directory does not exist.
    #[error("The path ({}) is not valid.", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("failed to write script `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `ScriptBuilder::build` was called before a name was set.
    #[error("script name must be set before build")]
    MissingName,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
