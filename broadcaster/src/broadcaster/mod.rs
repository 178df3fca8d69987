use std::sync::Arc;

use crate::listener::{Listener, ListenerId};

pub mod event_broadcaster;
mod registry;
pub mod settings;

pub use event_broadcaster::EventBroadcaster;
pub use settings::BroadcasterSettings;

/// Fans "something changed" signals out to any number of listeners.
///
/// Listeners are never queued more than one notification: a broadcast that
/// finds a slot already full is dropped for that slot. Producers therefore
/// never block on consumers.
pub trait Broadcaster: Send + Sync {
    /// Add a listener and return its identifier together with the slot it
    /// waits on.
    ///
    /// Every broadcast issued after this call returns attempts delivery to the
    /// new slot. A broadcast racing with this call may or may not reach it.
    fn register(&self) -> (ListenerId, Listener);

    /// Remove a listener and close its slot.
    ///
    /// Unknown or already removed identifiers are ignored.
    fn unregister(&self, id: ListenerId);

    /// Offer one notification to every registered slot without waiting.
    fn broadcast(&self);
}

impl<B> Broadcaster for Arc<B>
where
    B: Broadcaster + ?Sized,
{
    fn register(&self) -> (ListenerId, Listener) {
        (**self).register()
    }

    fn unregister(&self, id: ListenerId) {
        (**self).unregister(id);
    }

    fn broadcast(&self) {
        (**self).broadcast();
    }
}
