use crate::{
    args,
    io,
    launch,
    pipeline,
    settings,
    shell,
};

/// Error-type enum for the `jdfoam` crate.
/// Wraps the error of every module so `?` works across them.
#[derive(Debug)]
pub enum JdfoamError {
    ArgError(args::ArgError),
    IoError(io::IoError),
    PipelineError(pipeline::PipelineError),
    ShellError(shell::ShellError),
    SettingsError(settings::SettingsError),
    LaunchError(launch::LaunchError),
    StringOnly(String),
}
impl std::fmt::Display for JdfoamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JdfoamError::ArgError(error) => write!(f, "! ARGUMENT ERROR:\n{}", error),
            JdfoamError::IoError(error) => write!(f, "! IO ERROR:\n{}", error),
            JdfoamError::PipelineError(error) => write!(f, "! PIPELINE ERROR:\n{}", error),
            JdfoamError::ShellError(error) => write!(f, "! SHELL ERROR:\n{}", error),
            JdfoamError::SettingsError(error) => write!(f, "! SETTINGS ERROR:\n{}", error),
            JdfoamError::LaunchError(error) => write!(f, "! LAUNCH ERROR:\n{}", error),
            JdfoamError::StringOnly(error) => write!(f, "! JDFOAM ERROR:\n- {}", error),
        }
    }
}
impl From<String> for JdfoamError {
    fn from(error: String) -> Self {
        JdfoamError::StringOnly(error)
    }
}
impl From<args::ArgError> for JdfoamError {
    fn from(error: args::ArgError) -> Self {
        JdfoamError::ArgError(error)
    }
}
impl From<io::IoError> for JdfoamError {
    fn from(error: io::IoError) -> Self {
        JdfoamError::IoError(error)
    }
}
impl From<pipeline::PipelineError> for JdfoamError {
    fn from(error: pipeline::PipelineError) -> Self {
        JdfoamError::PipelineError(error)
    }
}
impl From<shell::ShellError> for JdfoamError {
    fn from(error: shell::ShellError) -> Self {
        JdfoamError::ShellError(error)
    }
}
impl From<settings::SettingsError> for JdfoamError {
    fn from(error: settings::SettingsError) -> Self {
        JdfoamError::SettingsError(error)
    }
}
impl From<launch::LaunchError> for JdfoamError {
    fn from(error: launch::LaunchError) -> Self {
        JdfoamError::LaunchError(error)
    }
}

/// Result type for the `jdfoam` crate.
pub type JdfoamResult<T> = std::result::Result<T, JdfoamError>;

/// Create a `JdfoamResult` with an `Err` from a string.
/// Shorthand to avoid writing `Err(crate::JdfoamError::StringOnly(error_str))`.
pub fn err_str<T>(error_str: &str) -> JdfoamResult<T> {
    Err(JdfoamError::StringOnly(error_str.to_string()))
}
