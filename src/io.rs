use std::io::Write;

use crate::args::Format;

#[derive(Debug)]
pub enum IoErrorType {
    File(std::io::Error),
    SerdeJson(serde_json::Error),
    SerdeYaml(serde_yaml::Error),
    TomlSer(toml::ser::Error),
    TomlDe(toml::de::Error),
    StringOnly(String),
}
impl std::fmt::Display for IoErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoErrorType::File(error) => write!(f, "- File IO Error:\n{}", error),
            IoErrorType::SerdeJson(error) => write!(f, "- JSON Serialization/Deserialization Error:\n{}", error),
            IoErrorType::SerdeYaml(error) => write!(f, "- YAML Serialization/Deserialization Error:\n{}", error),
            IoErrorType::TomlSer(error) => write!(f, "- TOML Serialization Error:\n{}", error),
            IoErrorType::TomlDe(error) => write!(f, "- TOML Deserialization Error:\n{}", error),
            IoErrorType::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}

/// Custom verbose IO error struct.
#[derive(Debug)]
pub struct IoError {
    /// Filepath facing an error.
    pub file: Option<String>,
    /// Error cause.
    pub cause: IoErrorType,
}
impl IoError {
    fn on_file(path: &str, cause: IoErrorType) -> Self {
        IoError{file: Some(path.to_string()), cause}
    }
}
impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "- Error with file: {}\n- {}", file, self.cause),
            None => write!(f, "- {}", self.cause),
        }
    }
}

pub type IoResult<T> = std::result::Result<T, IoError>;

/// Open a file with verbose errors.
pub fn open(path: &str) -> IoResult<std::fs::File> {
    std::fs::File::open(path).map_err(|error| IoError::on_file(path, IoErrorType::File(error)))
}

/// Create a file with verbose errors.
pub fn create(path: &str) -> IoResult<std::fs::File> {
    std::fs::File::create(path).map_err(|error| IoError::on_file(path, IoErrorType::File(error)))
}

/// Read from string with verbose errors
pub fn read_to_string(path: &str) -> IoResult<String> {
    std::fs::read_to_string(path).map_err(|error| IoError::on_file(path, IoErrorType::File(error)))
}

/// Read a whole file as text, dropping byte sequences that are not valid UTF-8.
/// Mesh files written by older tools occasionally carry latin-1 comments.
pub fn read_to_string_lossy(path: &str) -> IoResult<String> {
    let bytes = std::fs::read(path).map_err(|error| IoError::on_file(path, IoErrorType::File(error)))?;
    Ok(String::from_utf8_lossy(&bytes).replace(char::REPLACEMENT_CHARACTER, ""))
}

/// Write string to file with verbose errors.
pub fn write_to_file(path: &str, buffer: &str) -> IoResult<()> {
    let mut f = create(path)?;
    f.write_all(buffer.as_bytes()).map_err(|error| IoError::on_file(path, IoErrorType::File(error)))
}

/// Pick the config format from the file extension.
pub fn cfg_format(path: &str) -> IoResult<Format> {
    match path.rsplit('.').next() {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => {
            let supported_filetypes = vec!["json", "toml", "yaml", "yml"];
            let error_string = format!("Unsupported filetype for config file: {}\nSupported filetypes: {:?}", path, supported_filetypes);
            Err(IoError::on_file(path, IoErrorType::StringOnly(error_string)))
        },
    }
}

/// Read in cfg files from the supported filetypes.
pub fn read_cfg_file<T>(path: &str) -> IoResult<T>
where T: serde::de::DeserializeOwned
{
    match cfg_format(path)? {
        Format::Json => serde_json::from_reader(open(path)?)
            .map_err(|error| IoError::on_file(path, IoErrorType::SerdeJson(error))),
        Format::Toml => toml::from_str(&read_to_string(path)?)
            .map_err(|error| IoError::on_file(path, IoErrorType::TomlDe(error))),
        Format::Yaml => serde_yaml::from_reader(open(path)?)
            .map_err(|error| IoError::on_file(path, IoErrorType::SerdeYaml(error))),
    }
}

/// Render a value in one of the supported cfg formats.
pub fn cfg_to_string<T>(value: &T, format: Format) -> IoResult<String>
where T: serde::Serialize
{
    match format {
        Format::Json => serde_json::to_string_pretty(value)
            .map_err(|error| IoError{file: None, cause: IoErrorType::SerdeJson(error)}),
        Format::Toml => toml::to_string_pretty(value)
            .map_err(|error| IoError{file: None, cause: IoErrorType::TomlSer(error)}),
        Format::Yaml => serde_yaml::to_string(value)
            .map_err(|error| IoError{file: None, cause: IoErrorType::SerdeYaml(error)}),
    }
}

/// Write out cfg files in the format matching the extension.
pub fn write_cfg_file<T>(path: &str, value: &T) -> IoResult<()>
where T: serde::Serialize
{
    let buffer = cfg_to_string(value, cfg_format(path)?).map_err(|error| IoError{file: Some(path.to_string()), ..error})?;
    write_to_file(path, &buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_read_drops_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.msh");
        std::fs::write(&path, b"$PhysicalNames\n\xff\xfe\"inlet\"\n").unwrap();

        let text = read_to_string_lossy(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "$PhysicalNames\n\"inlet\"\n");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = cfg_format("settings.cfg").unwrap_err();
        assert_eq!(err.file.as_deref(), Some("settings.cfg"));
        assert!(matches!(err.cause, IoErrorType::StringOnly(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = open("definitely/not/here.toml").unwrap_err();
        assert!(format!("{}", err).contains("definitely/not/here.toml"));
    }
}
