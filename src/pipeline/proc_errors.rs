/// Pipeline process error type.
/// External tools failing is not an error here; it is reported through `ExecutionResult`.
/// These errors cover the pipeline machinery itself (shell spawn, worker thread).
#[derive(Debug)]
pub enum PipelineError {
    /// IO error.
    IoError(std::io::Error),
    /// Guest shell error.
    ShellError(crate::shell::ShellError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            PipelineError::ShellError(error) => write!(f, "- Shell Error:\n{}", error),
            PipelineError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::IoError(error)
    }
}
impl From<crate::shell::ShellError> for PipelineError {
    fn from(error: crate::shell::ShellError) -> Self {
        PipelineError::ShellError(error)
    }
}
impl From<String> for PipelineError {
    fn from(error: String) -> Self {
        PipelineError::StringOnly(error)
    }
}

/// Result type for the `pipeline` module.
pub type ProcResult<T> = std::result::Result<T, PipelineError>;

/// Create a `PipelineError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(PipelineError::StringOnly(error_str.to_string()))
}
