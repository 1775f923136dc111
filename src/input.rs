//! Input helpers callable from any handler, pre or post hook.
//!
//! Line based readers go through `rustyline`, so the user can edit the
//! pre-filled default. [`read_rune`] reads a single raw keystroke from stdin,
//! never reading past it, and expects the terminal to already be in character-at-a-time mode.

use crate::error::InputError;
use regex::Regex;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, ErrorKind, Read, Write};
use std::sync::OnceLock;
use tracing::warn;

/// The key that aborts input and navigation.
pub const ESCAPE: char = '\x1b';

/// Source of edited lines of text.
///
/// The dispatcher reads shell-escape command lines through this trait so
/// that tests and hosts without a terminal can script them.
pub trait LineReader {
    /// Reads one line, showing `prompt` and pre-filling the buffer with `default`.
    fn read_line(&mut self, prompt: &str, default: &str) -> Result<String, InputError>;
}

/// [`LineReader`] backed by a `rustyline` editor.
///
/// The editor is created on first use and kept, so lines entered through it
/// share one history.
#[derive(Default)]
pub struct RustylineReader {
    editor: Option<DefaultEditor>,
}

impl RustylineReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str, default: &str) -> Result<String, InputError> {
        let editor = match self.editor.take() {
            Some(editor) => editor,
            None => DefaultEditor::new()?,
        };
        let editor = self.editor.insert(editor);
        let line = classify_line(editor.readline_with_initial(prompt, (default, "")))?;
        editor.add_history_entry(line.as_str())?;
        Ok(line)
    }
}

/// Reads a line of text, pre-filled with `default`.
///
/// Returns the text with surrounding whitespace trimmed. End of input gives
/// [`InputError::Done`], an interrupt gives [`InputError::Abort`] and blank
/// text gives [`InputError::Empty`].
pub fn read_line(prompt: &str, default: &str) -> Result<String, InputError> {
    let mut editor = DefaultEditor::new()?;
    classify_line(editor.readline_with_initial(prompt, (default, "")))
}

/// Reads an integer in `0..=max`.
///
/// Errors from [`read_line`] are returned unchanged.
pub fn read_int(prompt: &str, default: &str, max: i64) -> Result<i64, InputError> {
    read_int_with(&mut RustylineReader::new(), prompt, default, max)
}

/// [`read_int`] on lines from `lines`.
pub fn read_int_with(
    lines: &mut dyn LineReader,
    prompt: &str,
    default: &str,
    max: i64,
) -> Result<i64, InputError> {
    let input = lines.read_line(prompt, default)?;
    parse_int(&input, max)
}

/// Reads a time of day as `HH:MM` or `HHMM`, optionally followed by free text.
///
/// Returns the time formatted as zero-padded `HH:MM` and the trimmed text
/// after it (empty if none).
pub fn read_time(prompt: &str, default: &str) -> Result<(String, String), InputError> {
    read_time_with(&mut RustylineReader::new(), prompt, default)
}

/// [`read_time`] on lines from `lines`. Only parse failures become
/// [`InputError::NotATime`]; read errors pass through.
pub fn read_time_with(
    lines: &mut dyn LineReader,
    prompt: &str,
    default: &str,
) -> Result<(String, String), InputError> {
    let input = lines.read_line(prompt, default)?;
    parse_time(&input)
}

/// Stdin without read-ahead.
///
/// `std::io::Stdin` buffers whatever is available, which would swallow
/// type-ahead meant for a line editor reading the descriptor directly. On
/// Unix this reads a duplicate of descriptor 0 instead, so key reads take
/// exactly the bytes of one key.
pub fn key_input() -> Box<dyn Read> {
    #[cfg(unix)]
    {
        use std::os::fd::AsFd;
        match io::stdin().as_fd().try_clone_to_owned() {
            Ok(fd) => return Box::new(std::fs::File::from(fd)),
            Err(err) => warn!(error = %err, "falling back to buffered stdin for keys"),
        }
    }
    Box::new(io::stdin())
}

/// Reads a single keystroke from stdin.
pub fn read_rune(prompt: &str) -> Result<char, InputError> {
    read_rune_from(key_input().as_mut(), &mut io::stdout(), prompt)
}

/// Reads a single keystroke from `input`, writing `prompt` and a trailing
/// newline to `output`.
///
/// [`ESCAPE`] maps to [`InputError::Abort`]; every other character, control
/// characters included, is returned as is. A closed stream gives
/// [`InputError::Done`].
pub fn read_rune_from(
    input: &mut dyn Read,
    output: &mut dyn Write,
    prompt: &str,
) -> Result<char, InputError> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let rune = next_rune(input)?;
    writeln!(output)?;
    if rune == ESCAPE {
        return Err(InputError::Abort);
    }
    Ok(rune)
}

fn next_rune(input: &mut dyn Read) -> Result<char, InputError> {
    let mut buf = [0u8; 4];
    match input.read_exact(&mut buf[..1]) {
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Err(InputError::Done),
        result => result?,
    }

    let width = match buf[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Err(invalid_utf8()),
    };
    input.read_exact(&mut buf[1..width])?;

    std::str::from_utf8(&buf[..width])
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or_else(invalid_utf8)
}

fn invalid_utf8() -> InputError {
    InputError::Io(io::Error::new(
        ErrorKind::InvalidData,
        "keystroke is not valid UTF-8",
    ))
}

/// Classifies the raw result of a line editor read.
pub(crate) fn classify_line(result: Result<String, ReadlineError>) -> Result<String, InputError> {
    let line = result?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Parses a base-10 integer and checks it lies in `0..=max`.
pub fn parse_int(text: &str, max: i64) -> Result<i64, InputError> {
    let value: i64 = text.parse().map_err(|_| InputError::NotANumber)?;
    if !(0..=max).contains(&value) {
        return Err(InputError::OutOfRange { value, max });
    }
    Ok(value)
}

fn hour_minute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([0-9]{2}):?([0-9]{2})(.*)").expect("hour:minute pattern is valid")
    })
}

/// Parses `HH:MM` or `HHMM` followed by an optional tail.
///
/// The pattern is not anchored, so leading text before the first two digits
/// is skipped. Every failure is reported as [`InputError::NotATime`].
pub fn parse_time(text: &str) -> Result<(String, String), InputError> {
    let mut matches = hour_minute_pattern().captures_iter(text);
    let (Some(caps), None) = (matches.next(), matches.next()) else {
        return Err(InputError::NotATime);
    };

    let hour: u32 = caps[1].parse().map_err(|_| InputError::NotATime)?;
    let minute: u32 = caps[2].parse().map_err(|_| InputError::NotATime)?;
    if hour > 23 || minute > 59 {
        return Err(InputError::NotATime);
    }

    Ok((format!("{hour:02}:{minute:02}"), caps[3].trim().to_string()))
}
