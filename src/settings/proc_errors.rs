/// Settings error type.
#[derive(Debug)]
pub enum SettingsError {
    /// IO error.
    IoError(crate::io::IoError),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(f, "- IO Error:\n{}", error),
            SettingsError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<crate::io::IoError> for SettingsError {
    fn from(error: crate::io::IoError) -> Self {
        SettingsError::IoError(error)
    }
}
impl From<String> for SettingsError {
    fn from(error: String) -> Self {
        SettingsError::StringOnly(error)
    }
}

/// Result type for the `settings` module.
pub type ProcResult<T> = std::result::Result<T, SettingsError>;

/// Create a `SettingsError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(SettingsError::StringOnly(error_str.to_string()))
}
