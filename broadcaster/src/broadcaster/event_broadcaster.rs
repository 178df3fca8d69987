use parking_lot::RwLock;
use rand::{RngCore, SeedableRng as _, rngs::StdRng};
use tracing::debug;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::{
    broadcaster::{Broadcaster, BroadcasterSettings, registry::Registry},
    listener::{Listener, ListenerId},
};

/// [`Broadcaster`] backed by a reader-writer locked registry.
///
/// Registration and removal take the write lock. Broadcasts only take the read
/// lock and use non-blocking sends, so they run alongside each other and never
/// wait on a consumer. Waiting on a [`Listener`] takes no lock at all.
///
/// Share it between producers and consumers through an
/// [`Arc`](std::sync::Arc).
#[derive(Debug)]
pub struct EventBroadcaster<R = StdRng> {
    registry: RwLock<Registry<R>>,
}

impl EventBroadcaster<StdRng> {
    #[must_use]
    pub fn new(settings: BroadcasterSettings) -> Self {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(rng, &settings)
    }
}

impl Default for EventBroadcaster<StdRng> {
    fn default() -> Self {
        Self::new(BroadcasterSettings::default())
    }
}

impl<R> EventBroadcaster<R> {
    /// Build a broadcaster drawing listener identifiers from `rng`.
    ///
    /// [`BroadcasterSettings::seed`] is ignored, `rng` is used as given.
    #[must_use]
    pub fn with_rng(rng: R, settings: &BroadcasterSettings) -> Self {
        Self {
            registry: RwLock::new(Registry::new(rng, settings.initial_capacity)),
        }
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.read().len()
    }

    #[must_use]
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.registry.read().contains(id)
    }
}

impl<R> Broadcaster for EventBroadcaster<R>
where
    R: RngCore + Send + Sync,
{
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn register(&self) -> (ListenerId, Listener) {
        let (id, listener) = self.registry.write().insert();
        debug!("Registered listener {id}");
        (id, listener)
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all, fields(listener = %id)))]
    fn unregister(&self, id: ListenerId) {
        if self.registry.write().remove(id) {
            debug!("Unregistered listener {id}");
        } else {
            debug!("Listener {id} is not registered, nothing to unregister");
        }
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn broadcast(&self) {
        let registry = self.registry.read();
        let delivery = registry.deliver();
        let listeners = registry.len();
        drop(registry);
        debug!(
            listeners,
            delivered = delivery.delivered,
            coalesced = delivery.coalesced,
            abandoned = delivery.abandoned,
            "Broadcast finished"
        );
    }
}

#[cfg(test)]
mod test {
    use std::{sync::Arc, time::Duration};

    use crate::{
        broadcaster::{
            Broadcaster, BroadcasterSettings, EventBroadcaster, registry::test::ScriptedRng,
        },
        listener::{ListenerId, Notification, WaitError},
    };

    #[test]
    fn seeded_broadcasters_assign_the_same_ids() {
        let settings = BroadcasterSettings::default().with_seed(42);
        let first = EventBroadcaster::new(settings.clone());
        let second = EventBroadcaster::new(settings);
        let (a, _a_listener) = first.register();
        let (b, _b_listener) = second.register();
        assert_eq!(a, b);
    }

    #[test]
    fn listener_reports_its_registered_id() {
        let broadcaster = EventBroadcaster::default();
        let (id, listener) = broadcaster.register();
        assert_eq!(listener.id(), id);
        assert!(broadcaster.is_registered(id));
        assert_eq!(broadcaster.listener_count(), 1);
    }

    #[test]
    fn collision_does_not_disturb_live_listener() {
        let broadcaster =
            EventBroadcaster::with_rng(ScriptedRng::new([11, 11, 12]), &Default::default());
        let (first, mut first_listener) = broadcaster.register();
        let (second, mut second_listener) = broadcaster.register();
        assert_eq!(first, ListenerId::from(11));
        assert_eq!(second, ListenerId::from(12));

        broadcaster.unregister(first);
        broadcaster.broadcast();
        assert_eq!(first_listener.try_wait(), Ok(Notification::Closed));
        assert_eq!(second_listener.try_wait(), Ok(Notification::Changed));
    }

    #[test]
    fn broadcast_without_listeners_is_a_noop() {
        let broadcaster = EventBroadcaster::default();
        broadcaster.broadcast();
        assert_eq!(broadcaster.listener_count(), 0);
    }

    #[tokio::test]
    async fn shared_through_arc() {
        let broadcaster = Arc::new(EventBroadcaster::default());
        let (id, mut listener) = broadcaster.register();

        let producer = Arc::clone(&broadcaster);
        tokio::spawn(async move { producer.broadcast() })
            .await
            .unwrap();

        assert_eq!(
            listener.wait_timeout(Duration::from_secs(1)).await,
            Ok(Notification::Changed)
        );
        assert_eq!(listener.try_wait(), Err(WaitError::Empty));

        broadcaster.unregister(id);
        assert_eq!(listener.wait().await, Notification::Closed);
    }

    #[test]
    fn usable_as_trait_object() {
        let broadcaster: Box<dyn Broadcaster> = Box::new(EventBroadcaster::default());
        let (id, mut listener) = broadcaster.register();
        broadcaster.broadcast();
        broadcaster.unregister(id);
        assert_eq!(listener.try_wait(), Ok(Notification::Changed));
        assert_eq!(listener.try_wait(), Ok(Notification::Closed));
    }
}
