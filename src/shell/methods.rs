/*!
 * This is the guest shell methods module.
 * Adding new shells should be done here.
 *
 * New shells need:
 * - A struct implementing `ShellMethod`
 * - An enum variant containing that struct in `ShellChoice`
 * - A constructor arg_name and function in `SHELL_CONSTRUCTION`
 *
 */

use std::process::Command;

use enum_dispatch::enum_dispatch;

use crate::shell;

//
// ------------------------------------------------------------
// Code that requires modification to add a new shell
//      |
//      V
//

// Source files for the shells
mod wsl;
mod bash;

/// Guest shell enum.
/// To add a new shell:
/// include it here,
/// add handling for its constructor in `SHELL_CONSTRUCTION`,
/// and implement the `ShellMethod` trait for it.
#[derive(Debug, Clone)]
#[enum_dispatch(ShellMethod)]
pub enum ShellChoice {
    /// Windows Subsystem for Linux, reached through `wsl.exe`.
    Wsl(wsl::Method),
    /// Native `bash`, for hosts that run OpenFOAM directly.
    Bash(bash::Method),
}

/// Shell construction array -- Written out in once place for easy modification.
const SHELL_CONSTRUCTION: &[ShellConstructor] = &[
    ShellConstructor{
        arg_name: "wsl",
        constructor: || ShellChoice::Wsl(wsl::Method::new()),
    },
    ShellConstructor{
        arg_name: "bash",
        constructor: || ShellChoice::Bash(bash::Method::new()),
    },
];

//
// ------------------------------------------------------------
// Traits and structs that don't need modification,
// but are references for adding a new shell
//      |
//      V
//

/// Guest shell trait.
/// Builds the host-side command that runs a bash script inside the guest.
#[enum_dispatch]
pub trait ShellMethod {
    /// Get the name of the shell.
    fn get_method_name(&self) -> String;

    /// Build the command running `script` with `bash -c`.
    fn command(&self, script: &str) -> Command;
}

/// Shell constructor.
struct ShellConstructor {
    /// Name of the shell, as given on the command line.
    arg_name: &'static str,
    /// Constructor function.
    constructor: fn() -> ShellChoice,
}

//
// ------------------------------------------------------------
// Functions and structs with no modification or reference needed
//      |
//      V
//

impl ShellChoice {
    /// Construct a shell from a name (given on the command line).
    pub fn from_name(arg_name: &str) -> shell::ProcResult<Self> {
        for constructor in SHELL_CONSTRUCTION {
            if constructor.arg_name == arg_name {
                return Ok((constructor.constructor)());
            }
        }

        let mut error_str = format!("Shell not found: {arg_name}\n");
        error_str.push_str("Available shells:\n");
        for constructor in SHELL_CONSTRUCTION {
            error_str.push_str(&format!("    {}\n", constructor.arg_name));
        }
        shell::err_str(&error_str)
    }

    /// WSL on Windows hosts, bash everywhere else.
    pub fn host_default() -> Self {
        if cfg!(windows) {
            ShellChoice::Wsl(wsl::Method::new())
        } else {
            ShellChoice::Bash(bash::Method::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_construct() {
        assert!(matches!(ShellChoice::from_name("wsl"), Ok(ShellChoice::Wsl(_))));
        assert!(matches!(ShellChoice::from_name("bash"), Ok(ShellChoice::Bash(_))));
    }

    #[test]
    fn unknown_name_lists_available() {
        let err = ShellChoice::from_name("zsh").unwrap_err();
        let text = format!("{}", err);
        assert!(text.contains("Shell not found: zsh"));
        assert!(text.contains("    wsl\n"));
        assert!(text.contains("    bash\n"));
    }

    #[test]
    fn commands_wrap_script_with_bash_c() {
        let wsl = ShellChoice::from_name("wsl").unwrap().command("echo hi");
        assert_eq!(wsl.get_program(), "wsl");
        let args: Vec<_> = wsl.get_args().collect();
        assert_eq!(args, ["--exec", "bash", "-c", "echo hi"]);

        let bash = ShellChoice::from_name("bash").unwrap().command("echo hi");
        assert_eq!(bash.get_program(), "bash");
        let args: Vec<_> = bash.get_args().collect();
        assert_eq!(args, ["-c", "echo hi"]);
    }
}
