//! Keys that work on every level of the tree.
//!
//! A global key is only looked at when the current command has no child for
//! it, so any command can take over a global key for itself.

use crate::tree::{CommandTree, NodeId};
use std::collections::BTreeSet;
use std::fmt::Write;

pub const KEY_SPACE: char = ' ';
pub const KEY_ENTER: char = '\n';
pub const KEY_HELP: char = '?';
pub const KEY_CLEAR: char = '\x0c';
pub const KEY_ESCAPE: char = crate::input::ESCAPE;
pub const KEY_SHELL: char = '!';
pub const KEY_QUIT: char = 'q';

/// Clear the screen and move the cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlobalCommand {
    /// Show the current command's sub commands.
    KeyInfo,
    /// Show the current command's sub commands, recursively.
    KeyInfoRecursive,
    /// Recursive key info plus the global keys.
    DetailedHelp,
    ClearScreen,
    /// Return to the root command.
    Abort,
    /// Run an external program and show its output.
    ShellEscape,
    Quit,
}

impl GlobalCommand {
    pub const ALL: [GlobalCommand; 7] = [
        GlobalCommand::KeyInfo,
        GlobalCommand::KeyInfoRecursive,
        GlobalCommand::DetailedHelp,
        GlobalCommand::ClearScreen,
        GlobalCommand::Abort,
        GlobalCommand::ShellEscape,
        GlobalCommand::Quit,
    ];

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.key() == key)
    }

    pub fn key(self) -> char {
        match self {
            GlobalCommand::KeyInfo => KEY_SPACE,
            GlobalCommand::KeyInfoRecursive => KEY_ENTER,
            GlobalCommand::DetailedHelp => KEY_HELP,
            GlobalCommand::ClearScreen => KEY_CLEAR,
            GlobalCommand::Abort => KEY_ESCAPE,
            GlobalCommand::ShellEscape => KEY_SHELL,
            GlobalCommand::Quit => KEY_QUIT,
        }
    }

    /// Human readable name of the key.
    pub fn label(self) -> &'static str {
        match self {
            GlobalCommand::KeyInfo => "space",
            GlobalCommand::KeyInfoRecursive => "newline",
            GlobalCommand::DetailedHelp => "?",
            GlobalCommand::ClearScreen => "ctrl-l",
            GlobalCommand::Abort => "escape",
            GlobalCommand::ShellEscape => "!",
            GlobalCommand::Quit => "q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GlobalCommand::KeyInfo => "show key info for current command",
            GlobalCommand::KeyInfoRecursive => "show key info recursively",
            GlobalCommand::DetailedHelp => "display detailed help",
            GlobalCommand::ClearScreen => "clear screen",
            GlobalCommand::Abort => "abort input",
            GlobalCommand::ShellEscape => "execute shell command",
            GlobalCommand::Quit => "quit program nicely",
        }
    }
}

pub fn is_global_key(key: char) -> bool {
    GlobalCommand::from_key(key).is_some()
}

/// Display form of a trigger key: the global key's label if reserved,
/// otherwise the character itself.
pub fn key_label(key: char) -> String {
    match GlobalCommand::from_key(key) {
        Some(g) => g.label().to_string(),
        None => key.to_string(),
    }
}

const PAD: &str = "    ";

/// Key info for the sub commands of `id`, in rank order.
pub fn key_info(tree: &CommandTree, id: NodeId, recursive: bool) -> String {
    let mut out = String::from("Available command keys:\n");
    write_key_info(&mut out, tree, id, PAD, recursive);
    out
}

fn write_key_info(out: &mut String, tree: &CommandTree, id: NodeId, indent: &str, recursive: bool) {
    for (key, child) in tree.children(id) {
        let _ = writeln!(
            out,
            "{indent}[{}] {:?} - {}",
            key_label(key),
            tree.title(child),
            tree.description(child)
        );
        if recursive {
            write_key_info(out, tree, child, &format!("{indent}{PAD}"), true);
        }
    }
}

/// Recursive key info followed by the global keys and their state for `id`.
pub fn detailed_help(tree: &CommandTree, id: NodeId, disabled: &BTreeSet<GlobalCommand>) -> String {
    let mut out = key_info(tree, id, true);
    out.push_str("Global command keys:\n");
    for g in GlobalCommand::ALL {
        let text = if tree.has_child(id, g.key()) {
            "overridden for current command"
        } else if disabled.contains(&g) {
            "no function defined"
        } else {
            g.description()
        };
        let _ = writeln!(out, "{:>12} - {}", format!("[{}]", g.label()), text);
    }
    out
}
