use std::collections::{HashMap, hash_map::Entry};

use rand::RngCore;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, trace};

use crate::listener::{Listener, ListenerId, Sender, channel};

/// Tally of a single fan-out pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Delivery {
    pub(crate) delivered: usize,
    pub(crate) coalesced: usize,
    pub(crate) abandoned: usize,
}

/// Identifier to slot mapping.
///
/// Each entry owns the only [`Sender`] of its slot, so removing the entry is
/// what closes the slot.
#[derive(Debug)]
pub(crate) struct Registry<R> {
    listeners: HashMap<ListenerId, Sender>,
    rng: R,
}

impl<R> Registry<R> {
    pub(crate) fn new(rng: R, initial_capacity: usize) -> Self {
        Self {
            listeners: HashMap::with_capacity(initial_capacity),
            rng,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Drop the entry for `id`, closing its slot.
    ///
    /// Returns whether `id` was registered.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Offer one signal to every slot. Full slots keep their pending signal.
    pub(crate) fn deliver(&self) -> Delivery {
        let mut delivery = Delivery::default();
        for (id, sender) in &self.listeners {
            match sender.try_send(()) {
                Ok(()) => {
                    trace!("Sent to listener {id}");
                    delivery.delivered += 1;
                }
                Err(TrySendError::Full(())) => {
                    trace!("Slot full for listener {id}, coalesced");
                    delivery.coalesced += 1;
                }
                Err(TrySendError::Closed(())) => {
                    trace!("Listener {id} dropped its slot without unregistering");
                    delivery.abandoned += 1;
                }
            }
        }
        delivery
    }
}

impl<R> Registry<R>
where
    R: RngCore,
{
    /// Create a slot under a freshly drawn identifier.
    ///
    /// Draws are retried until one misses every live identifier.
    pub(crate) fn insert(&mut self) -> (ListenerId, Listener) {
        let (sender, receiver) = channel();
        loop {
            let id = ListenerId::random(&mut self.rng);
            match self.listeners.entry(id) {
                Entry::Vacant(entry) => {
                    entry.insert(sender);
                    return (id, Listener::new(id, receiver));
                }
                Entry::Occupied(_) => {
                    debug!("Listener id {id} already in use, drawing again");
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test {
    use rand::{RngCore, SeedableRng as _, rngs::StdRng};

    use super::{Delivery, Registry};
    use crate::listener::{ListenerId, Notification, WaitError};

    /// Replays a fixed sequence of draws, then repeats the last one.
    pub(crate) struct ScriptedRng {
        draws: Vec<u64>,
        next: usize,
    }

    impl ScriptedRng {
        pub(crate) fn new(draws: impl Into<Vec<u64>>) -> Self {
            Self {
                draws: draws.into(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.draws[self.next.min(self.draws.len() - 1)];
            self.next += 1;
            value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn colliding_draws_are_retried() {
        let mut registry = Registry::new(ScriptedRng::new([5, 5, 5, 9]), 0);
        let (first, _first_listener) = registry.insert();
        let (second, _second_listener) = registry.insert();
        assert_eq!(first, ListenerId::from(5));
        assert_eq!(second, ListenerId::from(9));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn removed_id_can_be_reassigned() {
        let mut registry = Registry::new(ScriptedRng::new([3]), 0);
        let (id, mut old_listener) = registry.insert();
        assert!(registry.remove(id));
        let (reused, _new_listener) = registry.insert();
        assert_eq!(id, reused);
        // The old slot stays closed even though its id is live again.
        assert_eq!(old_listener.try_wait(), Ok(Notification::Closed));
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut registry = Registry::new(StdRng::seed_from_u64(1), 0);
        let (id, _listener) = registry.insert();
        assert!(!registry.remove(ListenerId::from(id.as_u64().wrapping_add(1))));
        assert!(registry.contains(id));
        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn deliver_counts_each_outcome() {
        let mut registry = Registry::new(StdRng::seed_from_u64(2), 0);
        let (_, mut drained) = registry.insert();
        let (_, _undrained) = registry.insert();
        let (_, dropped) = registry.insert();
        drop(dropped);

        assert_eq!(
            registry.deliver(),
            Delivery {
                delivered: 2,
                coalesced: 0,
                abandoned: 1
            }
        );
        assert_eq!(drained.try_wait(), Ok(Notification::Changed));
        assert_eq!(
            registry.deliver(),
            Delivery {
                delivered: 1,
                coalesced: 1,
                abandoned: 1
            }
        );
        assert_eq!(drained.try_wait(), Ok(Notification::Changed));
        assert_eq!(drained.try_wait(), Err(WaitError::Empty));
    }
}
