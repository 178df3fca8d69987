use std::sync::Arc;

use broadcaster::{Broadcaster as _, EventBroadcaster, Listener};
use tracing::{debug, info};

use crate::informer::Inventory;

#[derive(Clone, Debug)]
pub struct PendingClaim {
    pub name: String,
    pub requested: usize,
}

#[derive(Debug)]
pub struct BinderReport {
    pub claim: String,
    pub bound: bool,
    pub evaluations: usize,
}

/// Waits on its listener and re-checks its claim after every change.
pub struct Binder {
    claim: PendingClaim,
    listener: Listener,
    broadcaster: Arc<EventBroadcaster>,
    inventory: Arc<Inventory>,
}

impl Binder {
    pub const fn new(
        claim: PendingClaim,
        listener: Listener,
        broadcaster: Arc<EventBroadcaster>,
        inventory: Arc<Inventory>,
    ) -> Self {
        Self {
            claim,
            listener,
            broadcaster,
            inventory,
        }
    }

    pub async fn run(self) -> BinderReport {
        let Self {
            claim,
            mut listener,
            broadcaster,
            inventory,
        } = self;

        let mut evaluations = 0;
        let mut bound = false;
        // Check once up front, the volumes may already be there.
        loop {
            evaluations += 1;
            let available = inventory.available();
            if available >= claim.requested {
                info!(claim = %claim.name, available, "Claim bound");
                bound = true;
                broadcaster.unregister(listener.id());
                break;
            }
            if listener.wait().await.is_closed() {
                debug!(claim = %claim.name, "Listener closed before the claim could bind");
                break;
            }
            debug!(claim = %claim.name, "Change observed, re-evaluating");
        }

        BinderReport {
            claim: claim.name,
            bound,
            evaluations,
        }
    }
}
