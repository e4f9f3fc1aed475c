use std::time::Duration;

use crate::boundary::{self, PatchDirective};
use crate::paths;

/// Factor applied by `transformPoints`; Gmsh models are drawn in millimetres.
pub const SCALE_FACTOR: f64 = 0.001;

/// Zone files `gmshToFoam` leaves behind that confuse later utilities.
pub const ZONE_FILES: [&str; 3] = [
    "constant/polyMesh/cellZones",
    "constant/polyMesh/faceZones",
    "constant/polyMesh/pointZones",
];

/// How a non-zero exit of a step is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Aborts the remaining steps and fails the run.
    Fatal,
    /// Status ignored.
    BestEffort,
    /// Logged as a warning. Only a timeout fails the run.
    Advisory,
}

/// One shell fragment of the pipeline, run inside the case directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStep {
    pub label: &'static str,
    pub script: String,
    pub policy: StepPolicy,
    /// Progress reported once the step has run.
    pub checkpoint: Option<u8>,
    pub timeout: Option<Duration>,
}
impl PipelineStep {
    fn new(label: &'static str, script: String, policy: StepPolicy, checkpoint: u8) -> Self {
        PipelineStep{label, script, policy, checkpoint: Some(checkpoint), timeout: None}
    }
}

/// Wrap a fragment so it only runs when `file` exists.
fn if_exists(file: &str, fragment: &str) -> String {
    format!("if [ -f {} ]; then {}; fi", paths::shell_quote(file), fragment)
}

/// Build the fixed step sequence for one mesh import.
/// `guest_msh` must already be translated into the guest namespace.
pub fn build_steps(
    guest_msh: &str,
    directives: &[PatchDirective],
    verify_timeout: Option<Duration>,
) -> Vec<PipelineStep> {
    let msh_name = paths::file_name(guest_msh);
    let scale = format!("({0} {0} {0})", SCALE_FACTOR);

    vec![
        PipelineStep::new(
            "copy mesh",
            format!("cp -fv {} .", paths::shell_quote(guest_msh)),
            StepPolicy::Fatal,
            20,
        ),
        PipelineStep::new(
            "normalize controlDict",
            if_exists(
                "system/controlDict",
                "sed -i 's/writeControl    adjustable;/writeControl    adjustableRunTime;/g' system/controlDict",
            ),
            StepPolicy::BestEffort,
            25,
        ),
        PipelineStep::new(
            "gmshToFoam",
            format!("gmshToFoam {}", paths::shell_quote(msh_name)),
            StepPolicy::Fatal,
            50,
        ),
        PipelineStep::new(
            "remove zones",
            format!("rm -f {}", ZONE_FILES.join(" ")),
            StepPolicy::BestEffort,
            60,
        ),
        PipelineStep::new(
            "transformPoints",
            format!("transformPoints -scale {}", paths::shell_quote(&scale)),
            StepPolicy::Fatal,
            70,
        ),
        PipelineStep::new(
            "patch types",
            if_exists(boundary::BOUNDARY_FILE, &boundary::patch_script(directives, boundary::BOUNDARY_FILE)),
            StepPolicy::BestEffort,
            90,
        ),
        PipelineStep{
            timeout: verify_timeout,
            ..PipelineStep::new("checkMesh", "checkMesh".to_string(), StepPolicy::Advisory, 95)
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps() -> Vec<PipelineStep> {
        let directives = boundary::patch_directives(&["inlet".to_string(), "wallTop".to_string()]);
        build_steps("/mnt/d/Data/pipe mesh.msh", &directives, Some(Duration::from_secs(30)))
    }

    #[test]
    fn fixed_order_and_checkpoints() {
        let labels: Vec<_> = steps().iter().map(|s| (s.label, s.checkpoint)).collect();
        assert_eq!(labels, vec![
            ("copy mesh", Some(20)),
            ("normalize controlDict", Some(25)),
            ("gmshToFoam", Some(50)),
            ("remove zones", Some(60)),
            ("transformPoints", Some(70)),
            ("patch types", Some(90)),
            ("checkMesh", Some(95)),
        ]);
    }

    #[test]
    fn scripts_quote_paths() {
        let steps = steps();
        assert_eq!(steps[0].script, "cp -fv '/mnt/d/Data/pipe mesh.msh' .");
        assert_eq!(steps[2].script, "gmshToFoam 'pipe mesh.msh'");
        assert_eq!(steps[4].script, "transformPoints -scale '(0.001 0.001 0.001)'");
        assert_eq!(
            steps[3].script,
            "rm -f constant/polyMesh/cellZones constant/polyMesh/faceZones constant/polyMesh/pointZones"
        );
    }

    #[test]
    fn conditional_steps_are_best_effort() {
        let steps = steps();
        for step in steps.iter().filter(|s| s.script.starts_with("if [ -f")) {
            assert_eq!(step.policy, StepPolicy::BestEffort, "{}", step.label);
        }
        assert!(steps[5].script.starts_with("if [ -f 'constant/polyMesh/boundary' ]; then sed -i '/inlet/"));
        assert!(steps[5].script.ends_with("constant/polyMesh/boundary; fi"));
    }

    #[test]
    fn only_verification_is_bounded() {
        let steps = steps();
        assert_eq!(steps[6].policy, StepPolicy::Advisory);
        assert_eq!(steps[6].timeout, Some(Duration::from_secs(30)));
        assert!(steps[..6].iter().all(|s| s.timeout.is_none()));
    }
}
