use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad window, empty column mapping, etc.).
    ConfigValidation(String),
    /// Missing required column in the legacy extract.
    MissingColumn { column: String },
    /// CSV read error.
    Io(String),
    /// Backing-store write failed during find-or-create.
    Directory(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => write!(f, "missing column '{column}'"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Directory(msg) => write!(f, "directory error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
