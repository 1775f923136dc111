use crate::command::{Command, Context};
use crate::env::Environment;
use crate::error::{InputError, is_abort};
use crate::external::ExternalCommand;
use crate::global::{self, CLEAR_SCREEN, GlobalCommand, is_global_key};
use crate::input::{self, LineReader, RustylineReader};
use crate::prompt::{DefaultPrompter, Prompter};
use crate::terminal::{Stty, Terminal};
use crate::tree::{CommandTree, NodeId};
use anyhow::Context as _;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use tracing::{debug, info, warn};

/// Consecutive stream failures after which the loop gives up, so a dead
/// input stream can't spin forever. Undecodable keys don't count.
const MAX_READ_FAILURES: usize = 16;

/// Where the dispatcher currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherState {
    /// The active command; always a node of the tree.
    pub current: NodeId,
    /// Key of the last successful descent.
    pub last_key: Option<char>,
}

/// What the loop should do after one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The quit key was pressed.
    Quit,
    /// The key input ended.
    Closed,
}

#[derive(Debug, Clone, Copy)]
enum Hook {
    Pre,
    Function,
    Post,
}

/// Reads keys and walks the command tree, running the handlers it meets.
///
/// ```no_run
/// use keymenu::{Command, Dispatcher};
///
/// let root = Command::new("app").child(
///     'h',
///     Command::new("hello").function(|_| {
///         println!("hello world!");
///         Ok(())
///     }),
/// );
/// Dispatcher::new(root).run().unwrap();
/// ```
pub struct Dispatcher {
    tree: CommandTree,
    state: DispatcherState,
    prompter: Box<dyn Prompter>,
    input: Box<dyn Read>,
    output: Box<dyn Write>,
    terminal: Box<dyn Terminal>,
    lines: Box<dyn LineReader>,
    env: Environment,
    disabled: BTreeSet<GlobalCommand>,
    read_failures: usize,
}

impl Dispatcher {
    /// Creates a dispatcher on stdin/stdout with the default prompts,
    /// positioned at `root`.
    pub fn new(root: Command) -> Self {
        let tree = CommandTree::new(root);
        let state = DispatcherState {
            current: tree.root(),
            last_key: None,
        };
        Self {
            tree,
            state,
            prompter: Box::new(DefaultPrompter),
            input: input::key_input(),
            output: Box::new(io::stdout()),
            terminal: Box::new(Stty),
            lines: Box::new(RustylineReader::new()),
            env: Environment::capture(),
            disabled: BTreeSet::new(),
            read_failures: 0,
        }
    }

    pub fn with_prompter(mut self, prompter: impl Prompter + 'static) -> Self {
        self.set_prompter(prompter);
        self
    }

    pub fn set_prompter(&mut self, prompter: impl Prompter + 'static) {
        self.prompter = Box::new(prompter);
    }

    /// Reads keys from `input` and writes prompts, help and errors to `output`.
    pub fn with_io(mut self, input: impl Read + 'static, output: impl Write + 'static) -> Self {
        self.input = Box::new(input);
        self.output = Box::new(output);
        self
    }

    pub fn with_terminal(mut self, terminal: impl Terminal + 'static) -> Self {
        self.terminal = Box::new(terminal);
        self
    }

    /// Line source for the shell-escape command line.
    pub fn with_line_reader(mut self, lines: impl LineReader + 'static) -> Self {
        self.lines = Box::new(lines);
        self
    }

    /// Environment shell-escape programs run in.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Turns a global key off; pressing it reports that no function is defined.
    pub fn disable_global(mut self, command: GlobalCommand) -> Self {
        self.disabled.insert(command);
        self
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn current(&self) -> NodeId {
        self.state.current
    }

    pub fn current_title(&self) -> &str {
        self.tree.title(self.state.current)
    }

    /// Key of the last successful descent.
    pub fn current_key(&self) -> Option<char> {
        self.state.last_key
    }

    /// Child keys of the current command, reserved global keys left out.
    pub fn current_key_strings(&self) -> Vec<String> {
        self.tree
            .keys(self.state.current)
            .filter(|k| !is_global_key(*k))
            .map(String::from)
            .collect()
    }

    pub fn command_prompt(&self) -> String {
        self.prompter
            .command_prompt(self.current_title(), &self.current_key_strings())
    }

    pub fn input_prompt(&self, text: &str) -> String {
        self.prompter.input_prompt(self.current_title(), text)
    }

    pub fn rune_prompt(&self, text: &str) -> String {
        self.prompter.rune_prompt(self.current_title(), text)
    }

    /// Runs the key loop until the input ends.
    ///
    /// The terminal is switched to key-by-key mode first and the root's pre
    /// hook runs once. The quit key prints a farewell, restores the terminal
    /// and exits the process with status 0.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.terminal
            .enter()
            .context("failed to switch terminal to key input")?;

        let root = self.tree.root();
        if let Some(Err(err)) = self.invoke(root, Hook::Pre) {
            self.report(&err);
        }

        loop {
            match self.step() {
                Flow::Continue => {}
                Flow::Quit => self.quit(),
                Flow::Closed => {
                    info!("key input closed");
                    self.restore_terminal();
                    return Ok(());
                }
            }
        }
    }

    /// Reads one key and acts on it.
    pub fn step(&mut self) -> Flow {
        let prompt = self.command_prompt();
        match input::read_rune_from(self.input.as_mut(), self.output.as_mut(), &prompt) {
            Ok(key) => {
                self.read_failures = 0;
                self.handle_key(key)
            }
            Err(InputError::Abort) => {
                self.read_failures = 0;
                self.handle_escape();
                Flow::Continue
            }
            Err(InputError::Done) => Flow::Closed,
            Err(InputError::Io(err)) if err.kind() == ErrorKind::InvalidData => {
                self.read_failures = 0;
                warn!(error = %err, "skipping undecodable key");
                self.say(format_args!("Error: {err}\n"));
                Flow::Continue
            }
            Err(err) => {
                self.read_failures += 1;
                warn!(error = %err, failures = self.read_failures, "failed to read key");
                self.say(format_args!("Error: {err}\n"));
                if self.read_failures >= MAX_READ_FAILURES {
                    warn!("giving up on key input");
                    return Flow::Closed;
                }
                Flow::Continue
            }
        }
    }

    /// Escape while waiting for a key: one level up, or stay at the root.
    pub fn handle_escape(&mut self) {
        self.pop();
    }

    /// Acts on a pressed key: descend into a matching child, else try the
    /// global keys.
    pub fn handle_key(&mut self, key: char) -> Flow {
        let current = self.state.current;
        if let Some(child) = self.tree.child(current, key) {
            debug!(key = ?key, title = %self.tree.title(child), "descending");
            self.state.last_key = Some(key);
            self.tree.set_parent(child, current);
            self.state.current = child;
            self.execute(child);
            return Flow::Continue;
        }

        match GlobalCommand::from_key(key) {
            Some(command) if self.disabled.contains(&command) => {
                self.say(format_args!("No function defined\n"));
                Flow::Continue
            }
            Some(command) => self.run_global(command),
            None => {
                self.say(format_args!("Unknown command {}\n", key.escape_debug()));
                Flow::Continue
            }
        }
    }

    fn execute(&mut self, id: NodeId) {
        if let Some(Err(err)) = self.invoke(id, Hook::Pre) {
            self.report(&err);
            self.reset();
            return;
        }

        let Some(result) = self.invoke(id, Hook::Function) else {
            // Submenu: wait for one of its keys.
            return;
        };

        match result {
            Err(err) if is_abort(&err) => {
                self.pop();
                return;
            }
            Err(err) => self.report(&err),
            Ok(()) => {
                if let Some(Err(err)) = self.invoke(id, Hook::Post) {
                    self.report(&err);
                    self.reset();
                    return;
                }
            }
        }

        if !self.tree.has_children(self.state.current) {
            self.reset();
        }
    }

    fn invoke(&mut self, id: NodeId, hook: Hook) -> Option<anyhow::Result<()>> {
        let key = self.state.last_key;
        let prompter = self.prompter.as_ref();
        let node = self.tree.node_mut(id);
        let action = match hook {
            Hook::Pre => node.pre.as_mut(),
            Hook::Function => node.function.as_mut(),
            Hook::Post => node.post.as_mut(),
        }?;

        debug!(title = %node.title, ?hook, "running");
        let context = Context::new(&node.title, key, prompter);
        Some(action(&context))
    }

    fn run_global(&mut self, command: GlobalCommand) -> Flow {
        debug!(?command, "global command");
        let result = match command {
            GlobalCommand::KeyInfo => {
                let text = global::key_info(&self.tree, self.state.current, false);
                self.write_text(&text)
            }
            GlobalCommand::KeyInfoRecursive => {
                let text = global::key_info(&self.tree, self.state.current, true);
                self.write_text(&text)
            }
            GlobalCommand::DetailedHelp => {
                let text = global::detailed_help(&self.tree, self.state.current, &self.disabled);
                self.write_text(&text)
            }
            GlobalCommand::ClearScreen => self.write_text(CLEAR_SCREEN),
            GlobalCommand::Abort => {
                self.reset();
                Ok(())
            }
            GlobalCommand::ShellEscape => self.shell_escape(),
            GlobalCommand::Quit => return Flow::Quit,
        };

        if let Err(err) = result {
            self.report(&err);
        }
        Flow::Continue
    }

    fn shell_escape(&mut self) -> anyhow::Result<()> {
        let prompt = self.input_prompt("enter shell command");
        let line = self.lines.read_line(&prompt, "")?;
        let command = ExternalCommand::parse(&self.env, &line)?;
        let output = command.output(&self.env)?;
        self.output.write_all(&output)?;
        self.output.flush()?;
        Ok(())
    }

    fn quit(&mut self) -> ! {
        info!("quit");
        self.say(format_args!("bye!\n"));
        self.restore_terminal();
        std::process::exit(0)
    }

    fn restore_terminal(&mut self) {
        if let Err(err) = self.terminal.restore() {
            warn!(error = %err, "failed to restore terminal");
        }
    }

    /// Back to the parent, or the root when there is none.
    fn pop(&mut self) {
        self.state.current = self
            .tree
            .parent(self.state.current)
            .unwrap_or_else(|| self.tree.root());
    }

    fn reset(&mut self) {
        self.state.current = self.tree.root();
    }

    fn report(&mut self, err: &anyhow::Error) {
        debug!(error = %err, "command failed");
        self.say(format_args!("Error: {err:#}\n"));
    }

    fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn say(&mut self, message: fmt::Arguments<'_>) {
        let result = self
            .output
            .write_fmt(message)
            .and_then(|_| self.output.flush());
        if let Err(err) = result {
            warn!(error = %err, "failed to write output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::MemWriter;
    use crate::terminal::NoTerminal;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Cursor;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn record(log: &Log, event: &'static str) -> impl FnMut(&Context<'_>) -> anyhow::Result<()> + 'static {
        let log = log.clone();
        move |_| {
            log.borrow_mut().push(event.to_string());
            Ok(())
        }
    }

    fn fail(message: &'static str) -> impl FnMut(&Context<'_>) -> anyhow::Result<()> + 'static {
        move |_| Err(anyhow::anyhow!(message))
    }

    struct ScriptedLines(VecDeque<Result<String, InputError>>);

    impl LineReader for ScriptedLines {
        fn read_line(&mut self, _prompt: &str, _default: &str) -> Result<String, InputError> {
            self.0.pop_front().unwrap_or(Err(InputError::Done))
        }
    }

    fn sample_tree(log: &Log) -> Command {
        Command::new("root")
            .pre(record(log, "root pre"))
            .child(
                'h',
                Command::new("hello")
                    .pre(record(log, "hello pre"))
                    .function(record(log, "hello"))
                    .post(record(log, "hello post")),
            )
            .child(
                'a',
                Command::new("alpha")
                    .description("submenu")
                    .child('b', Command::new("beta").function(record(log, "beta")))
                    .child(
                        'f',
                        Command::new("bad pre")
                            .pre(fail("planned pre failure"))
                            .function(record(log, "bad pre function")),
                    )
                    .child(
                        'p',
                        Command::new("bad post")
                            .function(record(log, "bad post function"))
                            .post(fail("planned post failure")),
                    )
                    .child(
                        'x',
                        Command::new("aborting")
                            .function(|_| Err(InputError::Abort.into())),
                    )
                    .child(
                        'e',
                        Command::new("erroring")
                            .function(fail("boom"))
                            .child('z', Command::new("zeta").function(record(log, "zeta"))),
                    ),
            )
    }

    fn dispatcher(root: Command, keys: &str) -> (Dispatcher, MemWriter) {
        let out = MemWriter::new();
        let d = Dispatcher::new(root)
            .with_io(Cursor::new(keys.as_bytes().to_vec()), out.clone())
            .with_terminal(NoTerminal)
            .with_line_reader(ScriptedLines(VecDeque::new()));
        (d, out)
    }

    fn press(d: &mut Dispatcher, keys: &str) {
        for key in keys.chars() {
            assert_eq!(d.handle_key(key), Flow::Continue, "key {key:?}");
        }
    }

    #[test]
    fn leaf_runs_hooks_in_order_and_returns_to_root() {
        let log = Log::default();
        let (mut d, _) = dispatcher(sample_tree(&log), "");

        press(&mut d, "h");
        assert_eq!(*log.borrow(), vec!["hello pre", "hello", "hello post"]);
        assert_eq!(d.current(), d.tree().root());
        assert_eq!(d.current_key(), Some('h'));
    }

    #[test]
    fn submenu_is_entered_and_remembers_parent() {
        let log = Log::default();
        let (mut d, _) = dispatcher(sample_tree(&log), "");

        press(&mut d, "a");
        assert_eq!(d.current_title(), "alpha");
        assert_eq!(d.tree().parent(d.current()), Some(d.tree().root()));
        assert_eq!(d.current_key_strings(), vec!["b", "e", "f", "p", "x"]);
        assert!(log.borrow().is_empty());

        press(&mut d, "b");
        assert_eq!(*log.borrow(), vec!["beta"]);
        assert_eq!(d.current(), d.tree().root());
    }

    #[test]
    fn failing_pre_resets_to_root() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "af");
        assert_eq!(d.current(), d.tree().root());
        assert!(log.borrow().is_empty(), "function must not run after pre failed");
        assert!(out.contents().contains("Error: planned pre failure\n"));
    }

    #[test]
    fn failing_post_resets_to_root() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "ap");
        assert_eq!(d.current(), d.tree().root());
        assert_eq!(*log.borrow(), vec!["bad post function"]);
        assert!(out.contents().contains("Error: planned post failure\n"));
    }

    #[test]
    fn abort_from_function_pops_to_parent() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "ax");
        assert_eq!(d.current_title(), "alpha");
        assert!(!out.contents().contains("Error"));
    }

    #[test]
    fn function_error_keeps_node_with_children() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "ae");
        assert_eq!(d.current_title(), "erroring");
        assert!(out.contents().contains("Error: boom\n"));

        press(&mut d, "z");
        assert_eq!(*log.borrow(), vec!["zeta"]);
        assert_eq!(d.current(), d.tree().root());
    }

    #[test]
    fn unknown_key_leaves_state_alone() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "a");
        let before = d.state();
        press(&mut d, "k");
        assert_eq!(d.state(), before);
        assert!(out.contents().contains("Unknown command k\n"));
    }

    #[test]
    fn escape_pops_one_level() {
        let log = Log::default();
        let (mut d, _) = dispatcher(sample_tree(&log), "");

        press(&mut d, "ae");
        d.handle_escape();
        assert_eq!(d.current_title(), "alpha");
        d.handle_escape();
        assert_eq!(d.current(), d.tree().root());
        d.handle_escape();
        assert_eq!(d.current(), d.tree().root());
    }

    #[test]
    fn global_abort_key_resets_to_root() {
        let log = Log::default();
        let (mut d, _) = dispatcher(sample_tree(&log), "");

        press(&mut d, "ae");
        press(&mut d, "\x1b");
        assert_eq!(d.current(), d.tree().root());
    }

    #[test]
    fn quit_key_and_shadowing_child() {
        let log = Log::default();
        let (mut d, _) = dispatcher(sample_tree(&log), "");
        assert_eq!(d.handle_key('q'), Flow::Quit);

        let root = Command::new("root").child('q', Command::new("queue").function(record(&log, "queue")));
        let (mut d, _) = dispatcher(root, "");
        assert_eq!(d.handle_key('q'), Flow::Continue);
        assert_eq!(*log.borrow(), vec!["queue"]);
    }

    #[test]
    fn disabled_global_reports_no_function() {
        let log = Log::default();
        let (d, out) = dispatcher(sample_tree(&log), "");
        let mut d = d.disable_global(GlobalCommand::ShellEscape);

        press(&mut d, "!");
        assert_eq!(out.contents(), "No function defined\n");
    }

    #[test]
    fn help_keys_print_key_info() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, " ");
        let text = out.contents();
        assert!(text.starts_with("Available command keys:\n"));
        assert!(text.contains("    [a] \"alpha\" - submenu\n"));
        assert!(!text.contains("beta"));

        out.clear();
        press(&mut d, "\n");
        assert!(out.contents().contains("        [b] \"beta\" - \n"));

        out.clear();
        press(&mut d, "?");
        let help = out.contents();
        assert!(help.contains("Global command keys:\n"));
        assert!(help.contains("[escape] - abort input\n"));
        assert_eq!(d.current(), d.tree().root());
    }

    #[test]
    fn clear_screen_writes_escape_sequence() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "\x0c");
        assert_eq!(out.contents(), CLEAR_SCREEN);
    }

    #[test]
    fn handlers_see_title_key_and_prompts() {
        let seen = Log::default();
        let inner = seen.clone();
        let root = Command::new("root").child(
            'n',
            Command::new("name").function(move |ctx| {
                inner.borrow_mut().push(format!(
                    "{}|{:?}|{}|{}",
                    ctx.title(),
                    ctx.key(),
                    ctx.input_prompt("enter name"),
                    ctx.rune_prompt("pick")
                ));
                Ok(())
            }),
        );
        let (mut d, _) = dispatcher(root, "");

        press(&mut d, "n");
        assert_eq!(
            *seen.borrow(),
            vec!["name|Some('n')|name [enter name] > |name [pick] # "]
        );
    }

    #[test]
    fn step_reads_keys_until_input_closes() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "ab\x1b");

        assert_eq!(d.step(), Flow::Continue);
        assert_eq!(d.current_title(), "alpha");
        assert_eq!(d.step(), Flow::Continue);
        assert_eq!(*log.borrow(), vec!["beta"]);

        press(&mut d, "a");
        assert_eq!(d.step(), Flow::Continue, "escape is read as abort");
        assert_eq!(d.current(), d.tree().root());
        assert_eq!(d.step(), Flow::Closed);

        assert!(out.contents().starts_with("root [ah] $ \nalpha [befpx] $ \n"));
    }

    #[test]
    fn bad_key_bytes_are_reported_and_skipped() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");
        d = d.with_io(Cursor::new(vec![0xff, b'h']), out.clone());

        assert_eq!(d.step(), Flow::Continue);
        assert!(out.contents().contains("Error: keystroke is not valid UTF-8"));
        assert_eq!(d.step(), Flow::Continue);
        assert_eq!(*log.borrow(), vec!["hello pre", "hello", "hello post"]);
        assert_eq!(d.step(), Flow::Closed);
    }

    #[test]
    fn long_runs_of_bad_key_bytes_do_not_end_the_session() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");
        let mut keys = vec![0xff; MAX_READ_FAILURES * 2];
        keys.push(b'h');
        d = d.with_io(Cursor::new(keys), out);

        for _ in 0..MAX_READ_FAILURES * 2 {
            assert_eq!(d.step(), Flow::Continue);
        }
        assert_eq!(d.step(), Flow::Continue);
        assert_eq!(*log.borrow(), vec!["hello pre", "hello", "hello post"]);
        assert_eq!(d.step(), Flow::Closed);
    }

    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "input gone"))
        }
    }

    #[test]
    fn dead_input_stream_ends_the_loop() {
        let log = Log::default();
        let (d, out) = dispatcher(sample_tree(&log), "");
        let mut d = d.with_io(BrokenInput, out.clone());

        for _ in 1..MAX_READ_FAILURES {
            assert_eq!(d.step(), Flow::Continue);
        }
        assert_eq!(d.step(), Flow::Closed);
        assert!(out.contents().contains("Error: input gone\n"));
    }

    struct Arrows;

    impl Prompter for Arrows {
        fn command_prompt(&self, title: &str, keys: &[String]) -> String {
            format!("{title}({}) >> ", keys.join(","))
        }

        fn input_prompt(&self, title: &str, text: &str) -> String {
            format!("{title}: {text} >> ")
        }

        fn rune_prompt(&self, title: &str, text: &str) -> String {
            format!("{title}: {text} # ")
        }
    }

    #[test]
    fn custom_prompter_formats_prompts() {
        let log = Log::default();
        let (d, out) = dispatcher(sample_tree(&log), "a");
        let mut d = d.with_prompter(Arrows);

        assert_eq!(d.step(), Flow::Continue);
        assert_eq!(d.command_prompt(), "alpha(b,e,f,p,x) >> ");
        assert_eq!(d.input_prompt("name"), "alpha: name >> ");
        assert_eq!(d.step(), Flow::Closed);
        assert_eq!(out.contents(), "root(a,h) >> \nalpha(b,e,f,p,x) >> ");
    }

    #[test]
    fn unknown_key_is_shown_readably() {
        let log = Log::default();
        let (mut d, out) = dispatcher(sample_tree(&log), "");

        press(&mut d, "é\x01");
        assert_eq!(out.contents(), "Unknown command é\nUnknown command \\u{1}\n");
    }

    #[test]
    fn run_returns_when_input_closes() {
        let log = Log::default();
        let (mut d, _) = dispatcher(sample_tree(&log), "h");

        d.run().unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["root pre", "hello pre", "hello", "hello post"]
        );
    }

    #[test]
    fn shell_escape_errors_are_reported() {
        let log = Log::default();
        let (d, out) = dispatcher(sample_tree(&log), "");
        let mut d = d.with_line_reader(ScriptedLines(VecDeque::from([
            Err(InputError::Abort),
            Ok("keymenu-missing-program".to_string()),
        ])));

        press(&mut d, "!");
        assert!(out.contents().contains("Error: abort\n"));
        press(&mut d, "!");
        assert!(out.contents().contains("Error: command not found: keymenu-missing-program\n"));
        assert_eq!(d.current(), d.tree().root());
    }

    #[test]
    #[cfg(unix)]
    fn shell_escape_prints_program_output() {
        let log = Log::default();
        let (d, out) = dispatcher(sample_tree(&log), "");
        let mut d =
            d.with_line_reader(ScriptedLines(VecDeque::from([Ok("sh -c echo".to_string())])));

        press(&mut d, "!");
        assert_eq!(out.contents(), "\n");
    }
}
