use std::sync::Arc;

use broadcaster::{Broadcaster as _, EventBroadcaster};
use clap::Parser as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    binder::{Binder, PendingClaim},
    errors::VolumeWatchError,
    informer::{Informer, Inventory},
    settings::Args,
};

mod binder;
mod errors;
mod informer;
mod settings;

#[tokio::main]
async fn main() -> Result<(), VolumeWatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let broadcaster = Arc::new(EventBroadcaster::new(args.broadcaster_settings()));
    let inventory = Arc::new(Inventory::default());

    let mut ids = Vec::with_capacity(args.binders);
    let mut binders = Vec::with_capacity(args.binders);
    for requested in 1..=args.binders {
        let (id, listener) = broadcaster.register();
        let claim = PendingClaim {
            name: format!("claim-{requested}"),
            requested,
        };
        let binder = Binder::new(
            claim,
            listener,
            Arc::clone(&broadcaster),
            Arc::clone(&inventory),
        );
        ids.push(id);
        binders.push(tokio::spawn(binder.run()));
    }

    Informer::new(Arc::clone(&broadcaster), inventory, args.informer_settings())
        .run()
        .await;

    // Claims that bound already removed themselves, unregistering them again is harmless.
    for id in ids {
        broadcaster.unregister(id);
    }

    for binder in binders {
        let report = binder.await?;
        info!(
            claim = %report.claim,
            bound = report.bound,
            evaluations = report.evaluations,
            "Binder finished"
        );
    }
    Ok(())
}
