use std::fmt;

#[derive(Debug)]
pub enum TaxonomyError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Rule table validation error (empty names, empty keyword sets, etc.).
    ConfigValidation(String),
    /// A rule or substitution pattern failed to compile.
    InvalidPattern {
        rule: String,
        pattern: String,
        message: String,
    },
}

impl fmt::Display for TaxonomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidPattern { rule, pattern, message } => {
                write!(f, "rule '{rule}': invalid pattern '{pattern}': {message}")
            }
        }
    }
}

impl std::error::Error for TaxonomyError {}
