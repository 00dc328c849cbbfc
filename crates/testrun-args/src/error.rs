use thiserror::Error;

/// A rejected invocation. The message is meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// Used for both the assembly and the config file token.
    #[error("config file not found: {0}")]
    FileNotFound(String),

    #[error("missing argument for {0}")]
    MissingArgument(String),

    #[error("missing filename for {0}")]
    MissingFilename(String),

    #[error("incorrect argument format for {0} (should be \"name=value\")")]
    IncorrectFormat(String),

    #[error("{message}")]
    InvalidValue { switch: String, message: String },

    #[error("must specify at least one test assembly")]
    MissingAssembly,

    #[error("only one reporter is allowed")]
    MultipleReporters,
}

pub type Result<T> = std::result::Result<T, ArgumentError>;
