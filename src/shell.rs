mod proc_errors;
mod methods;

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::paths;
use crate::pipeline::{self, PipelineStep, StepRunner, StepStatus};

// Re-export errors
pub use proc_errors::{
    ShellError,
    ProcResult,
    err_str,
};
// Re-export shell methods
pub use methods::{
    ShellChoice,
    ShellMethod,
};

/// Full script for one step: stderr folded into stdout, then
/// `cd <case> && <env_source> && <fragment>`.
pub fn step_script(guest_case_dir: &str, env_source: &str, fragment: &str) -> String {
    let mut parts = vec![format!("cd {}", paths::shell_quote(guest_case_dir))];
    if !env_source.trim().is_empty() {
        parts.push(env_source.trim().to_string());
    }
    parts.push(fragment.to_string());
    format!("exec 2>&1; {}", parts.join(" && "))
}

/// Read `reader` line by line on its own thread and push each line into `sender`.
fn forward_lines<R>(reader: R, sender: Sender<String>) -> JoinHandle<()>
where R: Read + Send + 'static
{
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buffer);
                    if sender.send(line.trim_end().to_string()).is_err() {
                        break;
                    }
                },
            }
        }
    })
}

/// Spawn `command` and hand every output line to `on_line` as it arrives.
/// With a timeout, the child is killed once it is exceeded.
pub fn stream_command(
    mut command: Command,
    timeout: Option<Duration>,
    on_line: &mut dyn FnMut(&str),
) -> ProcResult<StepStatus> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|error| ShellError::SpawnError{program: program.clone(), error})?;

    let (sender, receiver) = mpsc::channel();
    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(forward_lines(stdout, sender.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(forward_lines(stderr, sender.clone()));
    }
    drop(sender);

    let deadline = timeout.map(|timeout| Instant::now() + timeout);
    let mut timed_out = false;
    loop {
        let received = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    timed_out = true;
                    break;
                }
                receiver.recv_timeout(deadline - now)
            },
            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(line) => on_line(&line),
            Err(RecvTimeoutError::Timeout) => {
                timed_out = true;
                break;
            },
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if timed_out {
        tracing::warn!(%program, "step timed out, killing it");
        let _ = child.kill();
        let _ = child.wait();
        // Grandchildren may still hold the pipes open, so the readers are left detached.
        return Ok(StepStatus::TimedOut);
    }

    for reader in readers {
        let _ = reader.join();
    }
    let status = child
        .wait()
        .map_err(|error| ShellError::SpawnError{program, error})?;
    Ok(match status.code() {
        Some(code) => StepStatus::Exited(code),
        None => StepStatus::Killed,
    })
}

impl StepRunner for ShellChoice {
    fn run_step(
        &self,
        guest_case_dir: &str,
        env_source: &str,
        step: &PipelineStep,
        on_line: &mut dyn FnMut(&str),
    ) -> pipeline::ProcResult<StepStatus> {
        let script = step_script(guest_case_dir, env_source, &step.script);
        tracing::debug!(shell = %self.get_method_name(), %script);
        Ok(stream_command(self.command(&script), step.timeout, on_line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_changes_directory_and_sources_env() {
        assert_eq!(
            step_script("/mnt/d/my case", "source /opt/of/bashrc", "checkMesh"),
            "exec 2>&1; cd '/mnt/d/my case' && source /opt/of/bashrc && checkMesh"
        );
        assert_eq!(step_script("/case", "  ", "checkMesh"), "exec 2>&1; cd '/case' && checkMesh");
    }

    #[cfg(unix)]
    #[test]
    fn lines_stream_and_status_is_kept() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("echo one; echo two 1>&2; exit 3");
        let mut lines = Vec::new();
        let status = stream_command(command, None, &mut |line: &str| lines.push(line.to_string())).unwrap();

        assert_eq!(status, StepStatus::Exited(3));
        lines.sort();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kills_the_step() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("echo started; exec sleep 10");
        let mut lines = Vec::new();
        let start = Instant::now();
        let status = stream_command(command, Some(Duration::from_millis(300)), &mut |line: &str| lines.push(line.to_string())).unwrap();

        assert_eq!(status, StepStatus::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let command = Command::new("jdfoam-no-such-program");
        let err = stream_command(command, None, &mut |_: &str| {}).unwrap_err();
        assert!(matches!(err, ShellError::SpawnError{..}));
    }

    #[cfg(unix)]
    #[test]
    fn bash_runner_runs_inside_case_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here\n").unwrap();
        let step = PipelineStep{
            label: "probe",
            script: "cat marker.txt".to_string(),
            policy: pipeline::StepPolicy::Fatal,
            checkpoint: None,
            timeout: None,
        };
        let shell = ShellChoice::from_name("bash").unwrap();
        let mut lines = Vec::new();
        let status = shell
            .run_step(dir.path().to_str().unwrap(), "", &step, &mut |line: &str| lines.push(line.to_string()))
            .unwrap();

        assert_eq!(status, StepStatus::Exited(0));
        assert_eq!(lines, vec!["here"]);
    }
}
