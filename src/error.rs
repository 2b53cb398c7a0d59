use miette::Diagnostic;
use thiserror::Error;

/// Main error type for objgroup operations
#[derive(Error, Diagnostic, Debug)]
pub enum GroupError {
    #[error("IO error: {0}")]
    #[diagnostic(code(objgroup::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(objgroup::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(objgroup::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed flag '{flag}': {message}")]
    #[diagnostic(
        code(objgroup::flag),
        help("Numeric flags take the form `priority <int>`, `world chance <float>` or `world radius <int>`")
    )]
    FlagFormat { flag: String, message: String },

    #[error("Cannot load schematic: {group}/{file}")]
    #[diagnostic(code(objgroup::schematic))]
    SchematicLoad {
        group: String,
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(objgroup::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, GroupError>;
