//! Running external programs for the shell-escape key.

use crate::env::Environment;
use anyhow::{Context, Result, anyhow, bail};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tracing::debug;

/// A program with its arguments, resolved against `PATH`.
#[derive(Debug)]
pub struct ExternalCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommand {
    /// Splits `line` on whitespace; the first word names the program.
    pub fn parse(env: &Environment, line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| anyhow!("no command given"))?;
        let program = resolve_program(env, name)
            .ok_or_else(|| anyhow!("command not found: {}", name))?;

        Ok(Self {
            program,
            args: words.map(OsString::from).collect(),
        })
    }

    /// Runs the program to completion and returns what it wrote to stdout.
    ///
    /// A non-zero exit is an error.
    pub fn output(&self, env: &Environment) -> Result<Vec<u8>> {
        debug!(program = ?self.program, args = ?self.args, "running external command");
        let output = std::process::Command::new(&self.program)
            .args(&self.args)
            .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&env.current_dir)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to run {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "{} exited with status {}",
                self.program.display(),
                exit_code(output.status)
            );
        }
        Ok(output.stdout)
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => 128 + signal,
        None => -1,
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> i32 {
    -1
}

/// Finds the file `name` refers to, as seen from `env`.
///
/// A name containing a path separator is taken relative to the environment's
/// working directory, since that is where the program will run. A bare name
/// is looked up in the directories of the environment's `PATH`, relative
/// entries again anchored at the working directory.
fn resolve_program(env: &Environment, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains(std::path::is_separator) {
        let candidate = env.current_dir.join(name);
        return candidate.is_file().then_some(candidate);
    }

    let search_paths = env.get_var("PATH")?;
    std::env::split_paths(search_paths)
        .map(|dir| env.current_dir.join(dir).join(name))
        .find(|candidate| candidate.is_file())
}
