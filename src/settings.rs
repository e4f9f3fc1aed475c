/*!
 * Persistent application settings.
 *
 * Loaded once at startup into a `Settings` value and passed around explicitly.
 * Nothing is written back until `Settings::save` is called.
 */

mod proc_errors;
mod cfg;
mod detect;

use std::path::{Path, PathBuf};

use crate::io;

// Re-export errors
pub use proc_errors::{
    SettingsError,
    ProcResult,
    err_str,
};
// Re-export cfg handling
pub use cfg::{
    CompanionCommands,
    CompanionTool,
    GeneralSettings,
    SettingKey,
    Settings,
    Theme,
};

/// Settings file name, looked up next to the executable.
pub const SETTINGS_FILE_NAME: &str = "jdfoam.toml";

/// Settings file next to the executable, or in the working directory if that is unknown.
pub fn default_path() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SETTINGS_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
        .to_string_lossy()
        .into_owned()
}

fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

impl Settings {
    /// Load from `path`, falling back to defaults for a missing or unreadable file
    /// and for every empty value.
    pub fn load(path: &str) -> Self {
        Self::load_with(path, &path_exists)
    }

    /// `load` with an injectable existence probe for the auto-detected paths.
    pub fn load_with(path: &str, exists: &dyn Fn(&str) -> bool) -> Self {
        let mut settings = if Path::new(path).exists() {
            match io::read_cfg_file::<Settings>(path) {
                Ok(settings) => settings,
                Err(error) => {
                    tracing::warn!("Failed to load settings, using defaults:\n{}", error);
                    Settings::default()
                },
            }
        } else {
            tracing::info!("No settings file at {}, using defaults", path);
            Settings::default()
        };
        settings.fill_defaults(exists);
        settings
    }

    /// Replace empty values with defaults or detected install locations.
    pub fn fill_defaults(&mut self, exists: &dyn Fn(&str) -> bool) {
        let general = &mut self.general;
        if general.openfoam_env_source.trim().is_empty() {
            general.openfoam_env_source = GeneralSettings::default_env_source();
        }
        if general.gmsh_path.trim().is_empty() {
            general.gmsh_path = detect::gmsh_path(exists).unwrap_or_default();
        }
        if general.wsl_base.trim().is_empty() {
            general.wsl_base = detect::wsl_base(exists).unwrap_or_default();
        }
        if general.wsl_bashrc_path.trim().is_empty() {
            general.wsl_bashrc_path = detect::wsl_bashrc_path(exists).unwrap_or_default();
        }
        self.light.fill_empty(&CompanionCommands::light_defaults());
        self.dark.fill_empty(&CompanionCommands::dark_defaults());
    }

    /// Write the whole file.
    /// Companion commands already present on disk win over the in-memory ones, so
    /// hand edits of those sections survive; unknown keys are dropped.
    pub fn save(&self, path: &str) -> ProcResult<()> {
        let mut merged = self.clone();
        if Path::new(path).exists() {
            match io::read_cfg_file::<Settings>(path) {
                Ok(on_disk) => {
                    merged.light = on_disk.light;
                    merged.dark = on_disk.dark;
                    merged.light.fill_empty(&self.light);
                    merged.dark.fill_empty(&self.dark);
                },
                Err(error) => tracing::warn!("Existing settings unreadable, overwriting:\n{}", error),
            }
        }
        io::write_cfg_file(path, &merged)?;
        tracing::debug!("settings saved to {}", path);
        Ok(())
    }

    /// Read one `[general]` value as text.
    pub fn get(&self, key: SettingKey) -> String {
        let general = &self.general;
        match key {
            SettingKey::Theme => general.theme.to_string(),
            SettingKey::CasePath => general.case_path.clone(),
            SettingKey::MshPath => general.msh_path.clone(),
            SettingKey::GmshPath => general.gmsh_path.clone(),
            SettingKey::WkhtmltopdfPath => general.wkhtmltopdf_path.clone(),
            SettingKey::OpenfoamEnvSource => general.openfoam_env_source.clone(),
            SettingKey::WslBashrcPath => general.wsl_bashrc_path.clone(),
            SettingKey::WslBase => general.wsl_base.clone(),
        }
    }

    /// Change one `[general]` value. Call `save` to persist it.
    pub fn set(&mut self, key: SettingKey, value: &str) -> ProcResult<()> {
        let general = &mut self.general;
        let value = value.trim().to_string();
        match key {
            SettingKey::Theme => {
                general.theme = match value.parse::<Theme>() {
                    Ok(theme) => theme,
                    Err(_) => return err_str(&format!("Unknown theme \"{}\", expected light or dark", value)),
                };
            },
            SettingKey::CasePath => general.case_path = value,
            SettingKey::MshPath => general.msh_path = value,
            SettingKey::GmshPath => general.gmsh_path = value,
            SettingKey::WkhtmltopdfPath => general.wkhtmltopdf_path = value,
            SettingKey::OpenfoamEnvSource => general.openfoam_env_source = value,
            SettingKey::WslBashrcPath => general.wsl_bashrc_path = value,
            SettingKey::WslBase => general.wsl_base = value,
        }
        Ok(())
    }

    /// Remember the paths of the last import.
    pub fn record_last_used(&mut self, msh_path: &str, case_path: &str) {
        self.general.msh_path = msh_path.to_string();
        self.general.case_path = case_path.to_string();
    }

    /// Companion commands for the active theme.
    pub fn companion_commands(&self) -> &CompanionCommands {
        match self.general.theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }

    /// Full command line for a companion tool: `wsl_base` followed by the theme's suffix.
    pub fn companion_command(&self, tool: CompanionTool) -> String {
        format!("{} {}", self.general.wsl_base, self.companion_commands().get(tool))
            .trim()
            .to_string()
    }
}
