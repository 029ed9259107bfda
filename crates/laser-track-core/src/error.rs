use std::path::PathBuf;

/// Startup configuration errors. All fatal; there is no recovery path.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid frame dimensions (width={width}, height={height})")]
    InvalidFrameDimensions { width: u32, height: u32 },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
