/*!
 * Mesh import pipeline.
 *
 * Runs the fixed sequence copy -> controlDict fix -> gmshToFoam -> zone cleanup ->
 * transformPoints -> patch-type fix -> checkMesh inside the case directory, through
 * a `StepRunner` (normally a guest shell from the `shell` module).
 * Every output line is forwarded to a `LogSink` as soon as it is read.
 */

mod proc_errors;
mod sink;
mod steps;
pub mod worker;

use std::path::Path;
use std::time::Duration;

use itertools::Itertools;

use crate::{boundary, msh, paths};

// Re-export errors
pub use proc_errors::{
    PipelineError,
    ProcResult,
    err_str,
};
// Re-export sinks
pub use sink::{
    ConsoleSink,
    LogSink,
    ProgressSink,
};
// Re-export step construction
pub use steps::{
    build_steps,
    PipelineStep,
    StepPolicy,
    SCALE_FACTOR,
};

/// Environment bootstrap sourced before every step when none is configured.
pub const DEFAULT_ENV_SOURCE: &str = "source /usr/lib/openfoam/openfoam2506/etc/bashrc";

/// Everything needed to run one import.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRequest {
    /// Host path of the `.msh` file.
    pub msh_path: String,
    /// Host path of the OpenFOAM case directory.
    pub case_dir: String,
    /// Shell fragment sourced before each step. Empty to skip.
    pub env_source: String,
    /// Upper bound for `checkMesh`; exceeding it fails the run.
    pub verify_timeout: Option<Duration>,
}
impl PipelineRequest {
    pub fn new(msh_path: &str, case_dir: &str) -> Self {
        PipelineRequest{
            msh_path: msh_path.to_string(),
            case_dir: case_dir.to_string(),
            env_source: DEFAULT_ENV_SOURCE.to_string(),
            verify_timeout: None,
        }
    }
}

/// How a single step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Exited(i32),
    /// Terminated by a signal.
    Killed,
    /// Ran past its timeout and was killed.
    TimedOut,
}
impl StepStatus {
    pub fn code(&self) -> Option<i32> {
        match self {
            StepStatus::Exited(code) => Some(*code),
            _ => None,
        }
    }

    pub fn success(&self) -> bool {
        *self == StepStatus::Exited(0)
    }
}
impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Exited(code) => write!(f, "exit code {}", code),
            StepStatus::Killed => write!(f, "killed by signal"),
            StepStatus::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Runs one step's script inside the guest case directory.
/// Implementations must call `on_line` for every output line as it arrives.
pub trait StepRunner {
    fn run_step(
        &self,
        guest_case_dir: &str,
        env_source: &str,
        step: &PipelineStep,
        on_line: &mut dyn FnMut(&str),
    ) -> ProcResult<StepStatus>;
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    /// True when no fatal step failed.
    pub success: bool,
    /// Status of the last process that ran, if it exited normally.
    pub exit_code: Option<i32>,
    /// Advisory steps that exited non-zero.
    pub warnings: usize,
}
impl ExecutionResult {
    pub fn failed() -> Self {
        ExecutionResult::default()
    }
}
impl std::fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = if self.success { "success" } else { "failure" };
        match self.exit_code {
            Some(code) => write!(f, "{} (exit code {})", outcome, code)?,
            None => write!(f, "{}", outcome)?,
        }
        if self.warnings > 0 {
            write!(f, ", {} warning(s)", self.warnings)?;
        }
        Ok(())
    }
}

/// Send a transcript line to the sink and mirror it to `tracing`.
fn emit(log: &mut dyn LogSink, line: &str) {
    tracing::debug!(target: "jdfoam::transcript", "{}", line);
    log.log(line);
}

/// Check that the inputs exist before any external tool is started.
fn check_inputs(request: &PipelineRequest) -> Result<(), String> {
    if !Path::new(&request.msh_path).is_file() {
        return Err(format!("Error: MSH file does not exist - {}", request.msh_path));
    }
    if !Path::new(&request.case_dir).is_dir() {
        return Err(format!("Error: case directory does not exist - {}", request.case_dir));
    }
    Ok(())
}

/// Run the whole import.
/// Fatal steps stop the sequence; best-effort steps never do; the verification step
/// only counts as a warning unless it times out.
pub fn run_pipeline<R>(
    request: &PipelineRequest,
    runner: &R,
    log: &mut dyn LogSink,
    progress: &mut dyn ProgressSink,
) -> ExecutionResult
where R: StepRunner + ?Sized
{
    progress.progress(5);

    let guest_msh = paths::to_guest_path(&request.msh_path);
    let guest_case = paths::to_guest_path(&request.case_dir);
    tracing::info!(%guest_msh, %guest_case, "starting mesh import");

    if let Err(message) = check_inputs(request) {
        emit(log, &message);
        return ExecutionResult::failed();
    }

    let boundary_names = msh::boundary_names(Path::new(&request.msh_path));
    emit(log, &format!(">>> MSH parsed, boundaries: {}", boundary_names.iter().join(", ")));
    progress.progress(15);

    let directives = boundary::patch_directives(&boundary_names);
    progress.progress(15);

    let steps = build_steps(&guest_msh, &directives, request.verify_timeout);
    let mut result = ExecutionResult{success: false, exit_code: None, warnings: 0};

    for step in steps.iter() {
        tracing::debug!(step = step.label, script = %step.script);
        let status = {
            let mut forward = |line: &str| emit(log, line);
            runner.run_step(&guest_case, &request.env_source, step, &mut forward)
        };
        let status = match status {
            Ok(status) => status,
            Err(error) => {
                emit(log, &format!("!!! {} could not be started:\n{}", step.label, error));
                result.exit_code = None;
                return result;
            },
        };
        result.exit_code = status.code();

        if let Some(checkpoint) = step.checkpoint {
            progress.progress(checkpoint);
        }

        if status.success() {
            continue;
        }
        match (step.policy, status) {
            (StepPolicy::BestEffort, _) => {
                tracing::debug!(step = step.label, %status, "best-effort step failed");
            },
            (StepPolicy::Advisory, StepStatus::Exited(_)) => {
                emit(log, &format!("Warning: {} reported {}", step.label, status));
                result.warnings += 1;
            },
            (StepPolicy::Fatal, _) | (StepPolicy::Advisory, _) => {
                emit(log, &format!("!!! {} failed ({}), aborting", step.label, status));
                tracing::warn!(step = step.label, %status, "pipeline aborted");
                return result;
            },
        }
    }

    progress.progress(100);
    result.success = true;
    result
}
