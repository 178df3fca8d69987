use std::time::Duration;

use thiserror::Error;

/// Non-terminal outcomes of polling a [`Listener`](crate::listener::Listener).
///
/// Slot closure is not an error, it is reported as
/// [`Notification::Closed`](crate::listener::Notification::Closed).
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum WaitError {
    #[error("no notification is pending")]
    Empty,
    #[error("no notification arrived within {0:?}")]
    Timeout(Duration),
}
