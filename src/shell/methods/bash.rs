use std::process::Command;

use crate::shell::methods;

/// Native bash method.
#[derive(Debug, Clone, Default)]
pub struct Method {}
impl Method {
    pub fn new() -> Self {
        Method{}
    }
}

impl methods::ShellMethod for Method {
    fn get_method_name(&self) -> String {
        "bash".to_string()
    }

    fn command(&self, script: &str) -> Command {
        let mut command = Command::new("bash");
        command.arg("-c").arg(script);
        command
    }
}
