use tokio::sync::mpsc;

pub mod errors;
pub mod id;
pub mod notification;
pub mod slot;

pub use errors::WaitError;
pub use id::ListenerId;
pub use notification::Notification;
pub use slot::Listener;

/// Payload carried by a slot. Only its presence matters.
pub type Signal = ();

/// A slot never holds more than one pending [`Signal`].
pub(crate) const SLOT_CAPACITY: usize = 1;

pub(crate) type Sender = mpsc::Sender<Signal>;
pub(crate) type Receiver = mpsc::Receiver<Signal>;
pub(crate) fn channel() -> (Sender, Receiver) {
    mpsc::channel(SLOT_CAPACITY)
}
