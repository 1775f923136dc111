//! Character-at-a-time terminal mode around the dispatcher loop.

use anyhow::{Result, bail};
use std::process::Command;

/// Puts the terminal into key-by-key, no-echo mode and back.
pub trait Terminal {
    /// Called once before the first key is read.
    fn enter(&mut self) -> Result<()>;

    /// Called on the way out; failures are only logged.
    fn restore(&mut self) -> Result<()>;
}

/// Configures `/dev/tty` with `stty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stty;

impl Stty {
    fn run(args: &[&str]) -> Result<()> {
        // GNU stty names the device with -F, BSD and macOS with -f.
        let device_flag = if cfg!(target_os = "linux") { "-F" } else { "-f" };
        let status = Command::new("stty")
            .arg(device_flag)
            .arg("/dev/tty")
            .args(args)
            .status()?;
        if !status.success() {
            bail!("stty {} failed: {}", args.join(" "), status);
        }
        Ok(())
    }
}

impl Terminal for Stty {
    fn enter(&mut self) -> Result<()> {
        Self::run(&["cbreak", "min", "1", "-echo"])
    }

    fn restore(&mut self) -> Result<()> {
        Self::run(&["sane"])
    }
}

/// Leaves the terminal alone, for piped input and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTerminal;

impl Terminal for NoTerminal {
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        Ok(())
    }
}
