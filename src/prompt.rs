/// Formats the three prompts the dispatcher and handlers show.
///
/// Every method gets the title of the current command as context.
pub trait Prompter {
    /// Prompt shown while waiting for a command key. `keys` are the current
    /// command's non-reserved child keys, sorted.
    fn command_prompt(&self, title: &str, keys: &[String]) -> String;

    /// Prompt shown for line input.
    fn input_prompt(&self, title: &str, text: &str) -> String;

    /// Prompt shown for single key input.
    fn rune_prompt(&self, title: &str, text: &str) -> String;
}

/// `title [keys] $ `, `title [text] > ` and `title [text] # `.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPrompter;

impl Prompter for DefaultPrompter {
    fn command_prompt(&self, title: &str, keys: &[String]) -> String {
        format!("{title} [{}] $ ", keys.concat())
    }

    fn input_prompt(&self, title: &str, text: &str) -> String {
        format!("{title} [{text}] > ")
    }

    fn rune_prompt(&self, title: &str, text: &str) -> String {
        format!("{title} [{text}] # ")
    }
}
