use crate::domain::{Command, DeadLetterQueue, Error};

/// Writes every rejected command to stderr, one line each, next to the
/// reason it was refused.
#[derive(Default, Debug)]
pub struct StdErrDLQ {}

impl StdErrDLQ {
    fn entry(command: Option<&Command>, error: &Error) -> String {
        match command {
            Some(command) => format!(
                "DLQ Report - {:?}: {} [{}]",
                error.kind(),
                error,
                command
            ),
            None => format!("DLQ Report - {:?}: {}", error.kind(), error),
        }
    }
}

impl DeadLetterQueue for StdErrDLQ {
    fn report(&self, command: Option<&Command>, error: &Error) {
        eprintln!("{}", Self::entry(command, error));
    }
}
