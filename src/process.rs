use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{BbError, BbResult};

/// Resolve the external tool from an explicit path or a bare program name.
///
/// Anything containing a path separator must point at an existing file; a
/// bare name is looked up on `PATH`.
pub fn resolve_tool(path_or_name: &str) -> BbResult<PathBuf> {
    let candidate = Path::new(path_or_name);
    if candidate.components().count() > 1 {
        if candidate.is_file() {
            return Ok(candidate.to_path_buf());
        }
        return Err(BbError::InvalidConfig(format!(
            "external tool path is not a file: {}",
            candidate.display()
        )));
    }
    which::which(path_or_name).map_err(|_| BbError::CommandMissing {
        command: path_or_name.to_owned(),
    })
}

/// Render a command line for logging.
#[must_use]
pub fn render_command(program: &Path, args: &[String]) -> String {
    format!("{} {}", program.display(), args.join(" "))
}

/// Run `program` with `args` and block until it exits.
///
/// stdout and stderr are captured for diagnostics; stdin is closed so the
/// child can never wait on interactive input. There is no timeout: a hung
/// tool hangs the run. A non-zero exit status is returned as data, not as an
/// error; only failing to start the process at all is an error.
pub fn run_command(program: &Path, args: &[String]) -> BbResult<Output> {
    let mut command = Command::new(program);
    command.args(args);
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        // CREATE_NO_WINDOW: no console window pops up in GUI environments.
        command.creation_flags(0x0800_0000);
    }

    command.output().map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => BbError::CommandMissing {
            command: program.display().to_string(),
        },
        _ => BbError::CommandUnlaunchable {
            command: program.display().to_string(),
            detail: err.to_string(),
        },
    })
}
