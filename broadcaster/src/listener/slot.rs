use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use futures::Stream;
use tokio::sync::mpsc::error::TryRecvError;

use crate::listener::{ListenerId, Notification, Receiver, Signal, WaitError};

/// Receiving end of a listener's notification slot.
///
/// Handed out by [`Broadcaster::register`](crate::Broadcaster::register). The
/// slot holds at most one pending notification; it is closed when the
/// matching [`Broadcaster::unregister`](crate::Broadcaster::unregister) runs.
///
/// Waiting never touches the broadcaster's registry, so a parked consumer does
/// not hold up producers or other registrations.
#[derive(Debug)]
pub struct Listener {
    id: ListenerId,
    receiver: Receiver,
}

impl Listener {
    pub(crate) const fn new(id: ListenerId, receiver: Receiver) -> Self {
        Self { id, receiver }
    }

    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Wait until a notification is pending or the slot is closed.
    ///
    /// A notification that was pending when the listener got unregistered is
    /// still returned first, [`Notification::Closed`] follows.
    pub async fn wait(&mut self) -> Notification {
        Self::notification(self.receiver.recv().await)
    }

    /// Blocking counterpart of [`Self::wait`] for plain threads.
    ///
    /// # Panics
    ///
    /// If called from within an asynchronous execution context.
    pub fn blocking_wait(&mut self) -> Notification {
        Self::notification(self.receiver.blocking_recv())
    }

    /// Drain the slot without waiting.
    ///
    /// # Errors
    ///
    /// [`WaitError::Empty`] if the slot is open and nothing is pending.
    pub fn try_wait(&mut self) -> Result<Notification, WaitError> {
        match self.receiver.try_recv() {
            Ok(()) => Ok(Notification::Changed),
            Err(TryRecvError::Empty) => Err(WaitError::Empty),
            Err(TryRecvError::Disconnected) => Ok(Notification::Closed),
        }
    }

    /// Same as [`Self::wait`], bounded by `timeout_duration`.
    ///
    /// # Errors
    ///
    /// [`WaitError::Timeout`] if neither a notification nor the closed signal
    /// arrive in time.
    pub async fn wait_timeout(
        &mut self,
        timeout_duration: Duration,
    ) -> Result<Notification, WaitError> {
        tokio::time::timeout(timeout_duration, self.wait())
            .await
            .map_err(|_| WaitError::Timeout(timeout_duration))
    }

    const fn notification(signal: Option<Signal>) -> Notification {
        match signal {
            Some(()) => Notification::Changed,
            None => Notification::Closed,
        }
    }
}

/// Yields once per drained notification and ends when the slot is closed.
impl Stream for Listener {
    type Item = Signal;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
