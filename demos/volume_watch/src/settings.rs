use std::time::Duration;

use broadcaster::BroadcasterSettings;
use clap::Parser;

use crate::informer::InformerSettings;

/// Re-evaluate pending volume claims whenever the informer reports a change.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Number of pending claims, each waiting on its own listener.
    #[arg(short, long, default_value_t = 4)]
    pub binders: usize,

    /// Number of volume events the informer publishes.
    #[arg(short, long, default_value_t = 8)]
    pub events: usize,

    /// Delay between two volume events, in milliseconds.
    #[arg(short, long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Seed for listener identifiers.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn broadcaster_settings(&self) -> BroadcasterSettings {
        let settings = BroadcasterSettings::default().with_initial_capacity(self.binders);
        match self.seed {
            Some(seed) => settings.with_seed(seed),
            None => settings,
        }
    }

    pub const fn informer_settings(&self) -> InformerSettings {
        InformerSettings {
            events: self.events,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}
