mod proc_errors;

use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};

use crate::launch::LaunchTarget;
use crate::settings::SettingKey;

// Re-export errors
pub use proc_errors::{
    ArgError,
    ProcResult,
    err_str,
};

/// Gmsh to OpenFOAM mesh import through a Linux guest shell.
#[derive(Debug, Parser)]
#[command(name = "jdfoam", version)]
pub struct JdfoamCli {
    #[command(subcommand)]
    pub sub_command: Option<SubCommand>,

    #[command(flatten)]
    pub run_args: RunArgs,

    #[command(flatten)]
    pub shared_args: SharedArgs,
}

/// Subcommands of the jdfoam binary.
#[derive(Debug, Subcommand)]
pub enum SubCommand {
    #[command(subcommand, name = "config")]
    /// Inspect or change the settings file.
    Config(ConfigCommand),

    #[command(name = "launch")]
    /// Start a companion tool or Gmsh without waiting for it.
    Launch(LaunchArgs),

    #[command(name = "boundaries")]
    /// Print the boundary names of a .msh file and the patch-type edits they produce.
    Boundaries(BoundariesArgs),
}

/// Arguments for the import itself. Without any, the last used paths are imported.
#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(requires = "case_path")]
    /// Path to the Gmsh .msh file.
    pub msh_path: Option<String>,

    /// Path to the OpenFOAM case directory.
    pub case_path: Option<String>,

    #[arg(long)]
    /// Shell fragment sourced before each step (overrides the settings file).
    pub env_source: Option<String>,

    #[arg(long = "verify-timeout", value_name = "SECS")]
    /// Kill checkMesh and fail the run after this many seconds.
    pub verify_timeout: Option<u64>,

    #[arg(long)]
    /// Do not remember the paths in the settings file.
    pub no_save: bool,
}

/// Shared arguments, used in all commands. Compiled with clap.
#[derive(Debug, Args)]
pub struct SharedArgs {
    #[arg(long = "config", global = true, value_name = "FILE")]
    /// Settings file (.toml, .json or .yaml). Defaults to jdfoam.toml next to the executable.
    pub config_path: Option<String>,

    #[arg(long, global = true, value_name = "SHELL")]
    /// Guest shell used for the pipeline steps (wsl or bash). Defaults to wsl on Windows.
    pub shell: Option<String>,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    #[command(name = "show")]
    /// Print the effective settings.
    Show{
        #[arg(long, value_enum, default_value = "toml")]
        /// Output format.
        format: Format,
    },

    #[command(name = "set")]
    /// Change one value of the [general] section and save it.
    Set{
        #[arg(value_enum)]
        key: SettingKey,
        value: String,
    },

    #[command(name = "path")]
    /// Print the settings file location.
    Path,
}

/// Compiled arguments for the launch command.
#[derive(Debug, Args)]
pub struct LaunchArgs {
    #[arg(value_enum)]
    pub target: LaunchTarget,

    /// Mesh to open (gmsh only).
    pub msh_path: Option<String>,
}

/// Compiled arguments for the boundaries command.
#[derive(Debug, Args)]
pub struct BoundariesArgs {
    /// Path to the Gmsh .msh file.
    pub msh_path: String,
}

/// Serialization formats for settings files and `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

/// Parse the command line arguments for the jdfoam binary.
pub fn parse_cli_args() -> JdfoamCli {
    JdfoamCli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        JdfoamCli::command().debug_assert();
    }

    #[test]
    fn two_paths_run_the_import() {
        let cli = JdfoamCli::try_parse_from(["jdfoam", "D:\\mesh.msh", "D:\\case", "--verify-timeout", "30"]).unwrap();
        assert!(cli.sub_command.is_none());
        assert_eq!(cli.run_args.msh_path.as_deref(), Some("D:\\mesh.msh"));
        assert_eq!(cli.run_args.case_path.as_deref(), Some("D:\\case"));
        assert_eq!(cli.run_args.verify_timeout, Some(30));
    }

    #[test]
    fn mesh_without_case_is_rejected() {
        assert!(JdfoamCli::try_parse_from(["jdfoam", "mesh.msh"]).is_err());
    }

    #[test]
    fn config_set_parses_key() {
        let cli = JdfoamCli::try_parse_from(["jdfoam", "config", "set", "openfoam_env_source", "source x", "--config", "a.toml"]).unwrap();
        match cli.sub_command {
            Some(SubCommand::Config(ConfigCommand::Set{key, value})) => {
                assert_eq!(key, SettingKey::OpenfoamEnvSource);
                assert_eq!(value, "source x");
            },
            other => panic!("unexpected parse: {:?}", other),
        }
        assert_eq!(cli.shared_args.config_path.as_deref(), Some("a.toml"));
    }

    #[test]
    fn launch_target_is_kebab_case() {
        let cli = JdfoamCli::try_parse_from(["jdfoam", "launch", "disk-analysis"]).unwrap();
        assert!(matches!(
            cli.sub_command,
            Some(SubCommand::Launch(LaunchArgs{target: LaunchTarget::DiskAnalysis, ..}))
        ));
    }
}
