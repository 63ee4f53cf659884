use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Run an external program to completion and return its stdout
///
/// A non-zero exit status is reported as [`Error::CommandFailed`] carrying
/// the program's stderr.
pub fn run<S: AsRef<str>>(program: &str, args: &[S]) -> Result<String> {
    let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
    debug!(program, ?args, "running external command");

    let output = Command::new(program).args(&args).output()?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
