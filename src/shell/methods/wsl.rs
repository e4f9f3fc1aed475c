use std::process::Command;

use crate::shell::methods;

/// WSL shell method.
/// `--exec` hands the arguments straight to bash, so the script needs no extra quoting layer.
#[derive(Debug, Clone, Default)]
pub struct Method {}
impl Method {
    pub fn new() -> Self {
        Method{}
    }
}

impl methods::ShellMethod for Method {
    fn get_method_name(&self) -> String {
        "WSL".to_string()
    }

    fn command(&self, script: &str) -> Command {
        let mut command = Command::new("wsl");
        command.arg("--exec").arg("bash").arg("-c").arg(script);
        command
    }
}
