use clap::ValueEnum;
use serde::{Serialize, Deserialize};
use strum::{Display, EnumIter, EnumString};

use crate::pipeline::DEFAULT_ENV_SOURCE;

/// UI theme; selects which set of companion commands is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Keys of the `[general]` section that can be changed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, EnumIter, Display)]
#[value(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SettingKey {
    Theme,
    CasePath,
    MshPath,
    GmshPath,
    WkhtmltopdfPath,
    OpenfoamEnvSource,
    WslBashrcPath,
    WslBase,
}

/// `[general]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default)]
    pub theme: Theme,
    /// Last used OpenFOAM case directory.
    #[serde(default)]
    pub case_path: String,
    /// Last used Gmsh mesh.
    #[serde(default)]
    pub msh_path: String,
    #[serde(default, alias = "gmsh_exe_path")]
    pub gmsh_path: String,
    #[serde(default)]
    pub wkhtmltopdf_path: String,
    /// Sourced before every pipeline step.
    #[serde(default = "GeneralSettings::default_env_source", alias = "env_source")]
    pub openfoam_env_source: String,
    #[serde(default)]
    pub wsl_bashrc_path: String,
    /// Launcher prefix for companion commands, e.g. `"C:\...\wslg.exe" -d Distro`.
    #[serde(default)]
    pub wsl_base: String,
}
impl GeneralSettings {
    pub fn default_env_source() -> String {
        DEFAULT_ENV_SOURCE.to_string()
    }
}
impl Default for GeneralSettings {
    fn default() -> Self {
        GeneralSettings{
            theme: Theme::default(),
            case_path: String::new(),
            msh_path: String::new(),
            gmsh_path: String::new(),
            wkhtmltopdf_path: String::new(),
            openfoam_env_source: Self::default_env_source(),
            wsl_bashrc_path: String::new(),
            wsl_base: String::new(),
        }
    }
}

/// Per-theme suffixes appended to `wsl_base` to start companion tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionCommands {
    #[serde(default)]
    pub treefoam_command: String,
    #[serde(default)]
    pub files_command: String,
    #[serde(default)]
    pub disk_analysis_command: String,
    #[serde(default)]
    pub appearance_command: String,
}

const TREEFOAM_SCRIPT: &str = "/usr/local/bin/start_treefoam.sh; echo '----------------'; echo 'Script execution completed'; read -p 'Press Enter to close window...'";

impl CompanionCommands {
    pub fn light_defaults() -> Self {
        CompanionCommands{
            treefoam_command: format!("-u jiedi -- bash -l -c \"{}\"", TREEFOAM_SCRIPT),
            files_command: "--cd \"~\" -- nautilus".to_string(),
            disk_analysis_command: "--cd \"~\" -- baobab".to_string(),
            appearance_command: "--cd \"~\" -- gnome-tweaks".to_string(),
        }
    }

    pub fn dark_defaults() -> Self {
        CompanionCommands{
            treefoam_command: format!(
                "-u jiedi -- env GTK_THEME=Adwaita:dark GDK_DPI_SCALE=1.25 GDK_BACKEND=x11 bash -l -c \"{}\"",
                TREEFOAM_SCRIPT,
            ),
            files_command: "--cd \"~\" -- bash -ic \"nautilus\"".to_string(),
            disk_analysis_command: "--cd \"~\" -- bash -ic \"baobab\"".to_string(),
            appearance_command: "--cd \"~\" -- bash -ic \"gnome-tweaks\"".to_string(),
        }
    }

    /// Replace empty entries with the ones from `defaults`.
    pub fn fill_empty(&mut self, defaults: &CompanionCommands) {
        let pairs = [
            (&mut self.treefoam_command, &defaults.treefoam_command),
            (&mut self.files_command, &defaults.files_command),
            (&mut self.disk_analysis_command, &defaults.disk_analysis_command),
            (&mut self.appearance_command, &defaults.appearance_command),
        ];
        for (value, default) in pairs {
            if value.trim().is_empty() {
                *value = default.clone();
            }
        }
    }
}

/// Whole settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, alias = "General")]
    pub general: GeneralSettings,
    #[serde(default = "CompanionCommands::light_defaults")]
    pub light: CompanionCommands,
    #[serde(default = "CompanionCommands::dark_defaults")]
    pub dark: CompanionCommands,
}
impl Default for Settings {
    fn default() -> Self {
        Settings{
            general: GeneralSettings::default(),
            light: CompanionCommands::light_defaults(),
            dark: CompanionCommands::dark_defaults(),
        }
    }
}

/// Companion tools started inside the guest environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum CompanionTool {
    /// TreeFoam case manager.
    Treefoam,
    /// File manager (nautilus).
    Files,
    /// Disk usage analyser (baobab).
    DiskAnalysis,
    /// GNOME tweaks.
    Appearance,
}
impl CompanionCommands {
    pub fn get(&self, tool: CompanionTool) -> &str {
        match tool {
            CompanionTool::Treefoam => &self.treefoam_command,
            CompanionTool::Files => &self.files_command,
            CompanionTool::DiskAnalysis => &self.disk_analysis_command,
            CompanionTool::Appearance => &self.appearance_command,
        }
    }
}
