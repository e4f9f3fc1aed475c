/// Guest shell error type.
#[derive(Debug)]
pub enum ShellError {
    /// The shell process could not be started or waited on.
    SpawnError {
        program: String,
        error: std::io::Error,
    },
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::SpawnError{program, error} => write!(f, "- Failed to run {}:\n{}", program, error),
            ShellError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<String> for ShellError {
    fn from(error: String) -> Self {
        ShellError::StringOnly(error)
    }
}

/// Result type for the `shell` module.
pub type ProcResult<T> = std::result::Result<T, ShellError>;

/// Create a `ShellError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(ShellError::StringOnly(error_str.to_string()))
}
