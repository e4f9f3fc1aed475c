//! Fire-and-forget launching of companion tools and Gmsh.

use std::process::{Child, Command, Stdio};

use clap::ValueEnum;
use strum::Display;

use crate::settings::{CompanionTool, Settings};

/// Launch error type.
#[derive(Debug)]
pub enum LaunchError {
    /// The process could not be started.
    SpawnError{command: String, error: std::io::Error},
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchError::SpawnError{command, error} => write!(f, "- Could not start `{}`:\n{}", command, error),
            LaunchError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<String> for LaunchError {
    fn from(error: String) -> Self {
        LaunchError::StringOnly(error)
    }
}

/// Result type for the `launch` module.
pub type ProcResult<T> = std::result::Result<T, LaunchError>;

/// Create a `LaunchError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(LaunchError::StringOnly(error_str.to_string()))
}

/// Everything the `launch` subcommand can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum LaunchTarget {
    /// TreeFoam case manager.
    Treefoam,
    /// File manager in the guest home.
    Files,
    /// Disk usage analyser.
    DiskAnalysis,
    /// Desktop appearance tweaks.
    Appearance,
    /// Gmsh on the host.
    Gmsh,
}
impl LaunchTarget {
    /// Companion tool behind this target; `None` for Gmsh.
    pub fn companion(&self) -> Option<CompanionTool> {
        match self {
            LaunchTarget::Treefoam => Some(CompanionTool::Treefoam),
            LaunchTarget::Files => Some(CompanionTool::Files),
            LaunchTarget::DiskAnalysis => Some(CompanionTool::DiskAnalysis),
            LaunchTarget::Appearance => Some(CompanionTool::Appearance),
            LaunchTarget::Gmsh => None,
        }
    }
}

/// Host shell for a full command line, as the command interpreter would run it.
fn host_shell(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(command_line);
        command
    } else {
        let mut command = Command::new("sh");
        command.arg("-c").arg(command_line);
        command
    }
}

/// Start without waiting; output is not captured.
fn start_detached(mut command: Command, command_line: &str) -> ProcResult<Child> {
    tracing::info!(command = %command_line, "launching");
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|error| LaunchError::SpawnError{command: command_line.to_string(), error})
}

/// Start a companion tool through the host shell using the active theme's command.
pub fn launch_companion(settings: &Settings, tool: CompanionTool) -> ProcResult<Child> {
    let command_line = settings.companion_command(tool);
    if command_line.is_empty() {
        return err_str(&format!("No command configured for {}", tool));
    }
    if settings.general.wsl_base.trim().is_empty() {
        tracing::warn!("wsl_base is empty, running the {} command as is", tool);
    }
    start_detached(host_shell(&command_line), &command_line)
}

/// Start Gmsh, optionally opening a mesh.
pub fn launch_gmsh(settings: &Settings, msh_path: Option<&str>) -> ProcResult<Child> {
    let gmsh_path = settings.general.gmsh_path.trim();
    if gmsh_path.is_empty() {
        return err_str("Gmsh path is not configured, set it with `config set gmsh_path <PATH>`");
    }
    let mut command = Command::new(gmsh_path);
    let mut command_line = gmsh_path.to_string();
    if let Some(msh_path) = msh_path {
        command.arg(msh_path);
        command_line = format!("{} {}", command_line, msh_path);
    }
    start_detached(command, &command_line)
}

/// Start whatever `target` names.
pub fn launch(settings: &Settings, target: LaunchTarget, msh_path: Option<&str>) -> ProcResult<Child> {
    match target.companion() {
        Some(tool) => launch_companion(settings, tool),
        None => launch_gmsh(settings, msh_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingKey;

    #[test]
    fn gmsh_needs_a_path() {
        let mut settings = Settings::default();
        settings.general.gmsh_path = "  ".to_string();
        let err = launch(&settings, LaunchTarget::Gmsh, None).unwrap_err();
        assert!(matches!(err, LaunchError::StringOnly(_)));
    }

    #[test]
    fn missing_gmsh_is_a_spawn_error() {
        let mut settings = Settings::default();
        settings.set(SettingKey::GmshPath, "/nonexistent/jdfoam/gmsh").unwrap();
        let err = launch_gmsh(&settings, Some("mesh.msh")).unwrap_err();
        match err {
            LaunchError::SpawnError{command, ..} => assert_eq!(command, "/nonexistent/jdfoam/gmsh mesh.msh"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn targets_map_to_companions() {
        assert_eq!(LaunchTarget::DiskAnalysis.companion(), Some(CompanionTool::DiskAnalysis));
        assert_eq!(LaunchTarget::Gmsh.companion(), None);
        assert_eq!(LaunchTarget::DiskAnalysis.to_string(), "disk-analysis");
    }

    #[cfg(unix)]
    #[test]
    fn companion_runs_through_the_host_shell() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("launched");
        let mut settings = Settings::default();
        settings.light.files_command = format!("touch '{}'", marker.display());
        settings.general.wsl_base = String::new();

        let mut child = launch(&settings, LaunchTarget::Files, None).unwrap();
        assert!(child.wait().unwrap().success());
        assert!(marker.exists());
    }
}
