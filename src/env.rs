use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Process environment seen by programs started through shell escape.
///
/// Captured once when the dispatcher is created; hosts may adjust it before
/// handing it over with `Dispatcher::with_environment`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Variables passed to spawned programs; `PATH` is also used to find them.
    pub vars: HashMap<String, String>,
    /// Working directory of spawned programs.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Snapshot of the current process variables and working directory.
    pub fn capture() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}
