use rustyline::error::ReadlineError;
use thiserror::Error;

/// Outcome classification for the input helpers.
///
/// `Done` and `Abort` are kept apart: `Done` means the input stream ended
/// (ctrl-d), `Abort` means the user asked to cancel (escape, ctrl-c). Handlers
/// usually leave the application on the first and just drop the current
/// input on the second.
#[derive(Debug, Error)]
pub enum InputError {
    /// Nothing was entered.
    #[error("empty input")]
    Empty,
    /// The input stream was closed.
    #[error("done")]
    Done,
    /// The user cancelled the current input or navigation.
    #[error("abort")]
    Abort,
    /// Text that should have been a base-10 integer wasn't.
    #[error("not a number")]
    NotANumber,
    /// An integer outside `0..=max`.
    #[error("{value} is out of range 0..={max}")]
    OutOfRange { value: i64, max: i64 },
    /// Text that doesn't start with `HH:MM` or `HHMM`.
    #[error("not a valid time value")]
    NotATime,
    /// Failure of the underlying stream, passed through unmodified.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Line editor failure that is neither end of input, interrupt nor I/O.
    #[error("line editor: {0}")]
    Readline(ReadlineError),
}

impl From<ReadlineError> for InputError {
    fn from(err: ReadlineError) -> Self {
        match err {
            ReadlineError::Eof => InputError::Done,
            ReadlineError::Interrupted => InputError::Abort,
            ReadlineError::Io(e) => InputError::Io(e),
            other => InputError::Readline(other),
        }
    }
}

/// Returns true if `err` carries the abort signal.
///
/// Handlers return `anyhow::Result`, so an `InputError::Abort` raised by an
/// input helper and forwarded with `?` is still recognised by the dispatcher.
pub fn is_abort(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<InputError>(), Some(InputError::Abort))
}
