use assert_cmd::Command;

const CHANNEL_MSH: &str = "tests/data/channel.msh";

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Command with an isolated settings file inside `dir`.
fn jdfoam(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jdfoam").unwrap();
    cmd.arg("--config").arg(dir.path().join("jdfoam.toml"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = Command::cargo_bin("jdfoam").unwrap().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Gmsh to OpenFOAM mesh import"));
    for sub_command in ["config", "launch", "boundaries"] {
        assert!(stdout.contains(sub_command), "missing {} in:\n{}", sub_command, stdout);
    }
    assert!(stdout.contains("[MSH_PATH]"));
    assert!(stdout.contains("[CASE_PATH]"));
}

#[test]
fn mesh_without_case_is_a_usage_error() {
    let output = Command::cargo_bin("jdfoam").unwrap().arg("mesh.msh").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("CASE_PATH"));
}

#[test]
fn boundaries_prints_names_and_edits() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir).arg("boundaries").arg(CHANNEL_MSH).output().unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let summary: Vec<_> = stdout.lines().take_while(|line| !line.is_empty()).collect();
    assert_eq!(summary, vec![
        "inlet: patch",
        "outlet: patch",
        "wallTop: wall",
        "fluid: patch",
        "defaultFaces: wall",
    ]);
    assert!(stdout.contains(
        "sed -i '/wallTop/,/}/ s/type[[:space:]]\\+patch;/type            wall;/' constant/polyMesh/boundary"
    ));
}

#[test]
fn boundaries_of_missing_file_only_has_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir).arg("boundaries").arg("no/such/mesh.msh").output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("No boundary names found"));
    assert!(stdout.contains("defaultFaces: wall"));
}

#[test]
fn config_set_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir).args(["config", "set", "theme", "dark"]).output().unwrap();
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert_eq!(stdout_of(&output).trim(), "theme = dark");
    assert!(dir.path().join("jdfoam.toml").exists());

    let output = jdfoam(&dir).args(["config", "show", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["general"]["theme"], "dark");
    assert_eq!(shown["general"]["openfoam_env_source"], "source /usr/lib/openfoam/openfoam2506/etc/bashrc");
}

#[test]
fn config_rejects_unknown_theme() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir).args(["config", "set", "theme", "purple"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("SETTINGS ERROR"));
    assert!(!dir.path().join("jdfoam.toml").exists());
}

#[test]
fn config_path_echoes_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir).args(["config", "path"]).output().unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).trim().ends_with("jdfoam.toml"));
}

#[test]
fn nothing_remembered_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir).args(["--shell", "bash"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("none remembered"));
}

#[test]
fn unknown_shell_lists_choices() {
    let dir = tempfile::tempdir().unwrap();
    let output = jdfoam(&dir)
        .args(["--shell", "fish", "--no-save", CHANNEL_MSH, "."])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("wsl"));
    assert!(stderr.contains("bash"));
}

#[test]
fn missing_mesh_fails_before_any_step() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.msh");
    let output = jdfoam(&dir)
        .args(["--shell", "bash", "--no-save"])
        .arg(&missing)
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Error: MSH file does not exist"));
    assert!(stdout.contains("Result: failure"));
    assert!(!stdout.contains(">>>"));
    assert!(!dir.path().join("jdfoam.toml").exists());
}
