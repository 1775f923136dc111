//! Single-keystroke command menus for terminal programs.
//!
//! The host builds a tree of [`Command`]s, each triggered by one key, and
//! hands it to a [`Dispatcher`]. The dispatcher reads one key at a time,
//! walks the tree, and runs the pre hook, handler and post hook of every
//! command it enters. A handful of global keys (help, shell escape, clear
//! screen, abort, quit) work on every level unless a command claims the key
//! for a child of its own.
//!
//! Handlers get line input through [`read_line`], [`read_int`] and
//! [`read_time`], and single keys through [`read_rune`]. Positional lists can
//! be keyed with the helpers in [`index`].

mod command;
mod dispatcher;
pub mod env;
mod error;
mod external;
pub mod global;
pub mod index;
mod input;
#[cfg(test)]
mod io_adapters;
mod prompt;
pub mod terminal;
mod tree;

pub use command::{Action, Command, Context};
pub use dispatcher::{Dispatcher, DispatcherState, Flow};
pub use error::{InputError, is_abort};
pub use global::GlobalCommand;
pub use input::{
    ESCAPE, LineReader, RustylineReader, key_input, parse_int, parse_time, read_int,
    read_int_with, read_line, read_rune, read_rune_from, read_time, read_time_with,
};
pub use prompt::{DefaultPrompter, Prompter};
pub use tree::{CommandTree, NodeId, compare_rank};
