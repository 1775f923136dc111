use crate::prompt::Prompter;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;

/// A handler, pre or post hook attached to a [`Command`].
///
/// Returning an error wrapping [`InputError::Abort`](crate::InputError::Abort)
/// is the abort signal; any other error is reported and navigation goes on.
pub type Action = Box<dyn FnMut(&Context<'_>) -> Result<()>>;

/// What a running action can see of the dispatcher.
pub struct Context<'a> {
    title: &'a str,
    key: Option<char>,
    prompter: &'a dyn Prompter,
}

impl<'a> Context<'a> {
    pub(crate) fn new(title: &'a str, key: Option<char>, prompter: &'a dyn Prompter) -> Self {
        Self {
            title,
            key,
            prompter,
        }
    }

    /// Title of the command being executed.
    pub fn title(&self) -> &str {
        self.title
    }

    /// The key that selected the command, if any key was pressed yet.
    pub fn key(&self) -> Option<char> {
        self.key
    }

    /// Prompt for line input, formatted by the installed prompter.
    pub fn input_prompt(&self, text: &str) -> String {
        self.prompter.input_prompt(self.title, text)
    }

    /// Prompt for single key input, formatted by the installed prompter.
    pub fn rune_prompt(&self, text: &str) -> String {
        self.prompter.rune_prompt(self.title, text)
    }
}

/// One node of a command tree, as built by the host.
///
/// ```
/// use keymenu::Command;
///
/// let root = Command::new("app")
///     .description("example")
///     .child('h', Command::new("hello").function(|_| {
///         println!("hello world!");
///         Ok(())
///     }));
/// assert_eq!(root.children().count(), 1);
/// ```
pub struct Command {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) rank: i32,
    pub(crate) function: Option<Action>,
    pub(crate) pre: Option<Action>,
    pub(crate) post: Option<Action>,
    pub(crate) children: BTreeMap<char, Command>,
}

impl Command {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            rank: 0,
            function: None,
            pre: None,
            post: None,
            children: BTreeMap::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the ordering rank. Rank 0 means unranked and sorts last.
    pub fn rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    /// Sets the main handler. Commands without one act as submenus.
    pub fn function<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Context<'_>) -> Result<()> + 'static,
    {
        self.function = Some(Box::new(f));
        self
    }

    /// Sets the hook run before the handler.
    pub fn pre<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Context<'_>) -> Result<()> + 'static,
    {
        self.pre = Some(Box::new(f));
        self
    }

    /// Sets the hook run after the handler succeeded.
    pub fn post<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Context<'_>) -> Result<()> + 'static,
    {
        self.post = Some(Box::new(f));
        self
    }

    /// Adds a sub command triggered by `key`, replacing any previous one.
    pub fn child(mut self, key: char, command: Command) -> Self {
        self.children.insert(key, command);
        self
    }

    /// Sub commands with their trigger keys, in key order.
    pub fn children(&self) -> impl Iterator<Item = (char, &Command)> {
        self.children.iter().map(|(k, c)| (*k, c))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("rank", &self.rank)
            .field("function", &self.function.is_some())
            .field("pre", &self.pre.is_some())
            .field("post", &self.post.is_some())
            .field("children", &self.children)
            .finish()
    }
}
