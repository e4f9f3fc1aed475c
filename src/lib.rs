pub mod args;
pub mod boundary;
pub mod io;
pub mod launch;
pub mod msh;
pub mod paths;
pub mod pipeline;
pub mod settings;
pub mod shell;
mod crate_errors;

use std::path::Path;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

pub use crate_errors::{
    JdfoamError,
    JdfoamResult,
    err_str,
};

use args::{ConfigCommand, RunArgs, SharedArgs, SubCommand};
use pipeline::worker::{self, PipelineEvent};
use pipeline::{ConsoleSink, ExecutionResult, PipelineRequest};
use settings::Settings;
use shell::ShellChoice;

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV_VAR: &str = "JDFOAM_LOG";

/// Install the stderr `tracing` subscriber. Filter comes from `JDFOAM_LOG`, default `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run whatever the command line asks for.
/// Returns `Ok(false)` when an import ran but failed.
pub fn run_cli(cli: args::JdfoamCli) -> JdfoamResult<bool> {
    let config_path = cli.shared_args.config_path.clone().unwrap_or_else(settings::default_path);
    let mut settings = Settings::load(&config_path);
    tracing::debug!(config = %config_path, "settings loaded");

    match cli.sub_command {
        Some(SubCommand::Config(command)) => {
            config_command(command, &mut settings, &config_path)?;
            Ok(true)
        },
        Some(SubCommand::Launch(launch_args)) => {
            launch::launch(&settings, launch_args.target, launch_args.msh_path.as_deref())?;
            println!("Started {}", launch_args.target);
            Ok(true)
        },
        Some(SubCommand::Boundaries(boundaries_args)) => {
            show_boundaries(&boundaries_args.msh_path);
            Ok(true)
        },
        None => run_import(cli.run_args, &cli.shared_args, &mut settings, &config_path),
    }
}

/// Handle the `config` subcommands.
fn config_command(command: ConfigCommand, settings: &mut Settings, config_path: &str) -> JdfoamResult<()> {
    match command {
        ConfigCommand::Show{format} => {
            println!("{}", io::cfg_to_string(&*settings, format)?);
        },
        ConfigCommand::Set{key, value} => {
            settings.set(key, &value)?;
            settings.save(config_path)?;
            println!("{} = {}", key, settings.get(key));
        },
        ConfigCommand::Path => {
            println!("{}", config_path);
        },
    }
    Ok(())
}

/// Dry run of the metadata and patch-type stages for one mesh.
fn show_boundaries(msh_path: &str) {
    let names = msh::boundary_names(Path::new(msh_path));
    if names.is_empty() {
        println!("No boundary names found in {}", msh_path);
    }
    let directives = boundary::patch_directives(&names);
    for directive in &directives {
        println!("{}: {}", directive.region, directive.patch_type);
    }
    println!();
    for directive in &directives {
        println!("{}", directive.to_sed(boundary::BOUNDARY_FILE));
    }
}

/// Paths given on the command line, or the ones remembered in the settings.
fn import_paths(run_args: &RunArgs, settings: &Settings) -> args::ProcResult<(String, String, bool)> {
    if let (Some(msh_path), Some(case_path)) = (&run_args.msh_path, &run_args.case_path) {
        return Ok((msh_path.clone(), case_path.clone(), false));
    }
    let general = &settings.general;
    if general.msh_path.trim().is_empty() || general.case_path.trim().is_empty() {
        return args::err_str(concat!(
            "No mesh and case given, and none remembered.\n",
            "Usage: jdfoam <MSH_PATH> <CASE_PATH>",
        ));
    }
    Ok((general.msh_path.clone(), general.case_path.clone(), true))
}

/// Run the import, in the foreground for explicit paths and on the worker thread
/// for remembered ones.
fn run_import(
    run_args: RunArgs,
    shared_args: &SharedArgs,
    settings: &mut Settings,
    config_path: &str,
) -> JdfoamResult<bool> {
    let shell = match &shared_args.shell {
        Some(name) => ShellChoice::from_name(name)?,
        None => ShellChoice::host_default(),
    };
    let (msh_path, case_path, remembered) = import_paths(&run_args, settings)?;

    let mut request = PipelineRequest::new(&msh_path, &case_path);
    request.env_source = run_args.env_source.clone()
        .unwrap_or_else(|| settings.general.openfoam_env_source.clone());
    request.verify_timeout = run_args.verify_timeout.map(Duration::from_secs);

    if !run_args.no_save {
        settings.record_last_used(&msh_path, &case_path);
        if let Err(error) = settings.save(config_path) {
            tracing::warn!("Could not remember the paths:\n{}", error);
        }
    }

    let result = if remembered {
        println!("Importing the last used mesh {} into {}", msh_path, case_path);
        run_in_background(request, shell)?
    } else {
        let mut log = ConsoleSink{show_progress: true};
        let mut progress = log;
        pipeline::run_pipeline(&request, &shell, &mut log, &mut progress)
    };

    println!("Result: {}", result);
    Ok(result.success)
}

/// Run on the worker thread and render its events here.
fn run_in_background(request: PipelineRequest, shell: ShellChoice) -> JdfoamResult<ExecutionResult> {
    let handle = worker::spawn(request, shell)?;
    Ok(handle.wait_with(|event| match event {
        PipelineEvent::Log(line) => println!("{}", line),
        PipelineEvent::Progress(value) => println!("[{:>3}%]", value),
        PipelineEvent::Finished(_) => {},
    }))
}
