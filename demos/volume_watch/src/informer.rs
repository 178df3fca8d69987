use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use broadcaster::{Broadcaster, EventBroadcaster};
use tokio::time::sleep;
use tracing::info;

/// Volumes known to be available for binding.
#[derive(Debug, Default)]
pub struct Inventory {
    available: AtomicUsize,
}

impl Inventory {
    pub fn available(&self) -> usize {
        self.available.load(Ordering::Acquire)
    }

    fn add_volume(&self) -> usize {
        self.available.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[derive(Copy, Clone, Debug)]
pub struct InformerSettings {
    pub events: usize,
    pub interval: Duration,
}

/// Publishes new volumes and wakes every binder after each one.
pub struct Informer {
    broadcaster: Arc<EventBroadcaster>,
    inventory: Arc<Inventory>,
    settings: InformerSettings,
}

impl Informer {
    pub const fn new(
        broadcaster: Arc<EventBroadcaster>,
        inventory: Arc<Inventory>,
        settings: InformerSettings,
    ) -> Self {
        Self {
            broadcaster,
            inventory,
            settings,
        }
    }

    pub async fn run(self) {
        let Self {
            broadcaster,
            inventory,
            settings: InformerSettings { events, interval },
        } = self;

        for _ in 0..events {
            sleep(interval).await;
            let available = inventory.add_volume();
            info!(
                available,
                listeners = broadcaster.listener_count(),
                "Volume added"
            );
            broadcaster.broadcast();
        }
    }
}
