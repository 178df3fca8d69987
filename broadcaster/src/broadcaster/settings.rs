/// Construction parameters of an
/// [`EventBroadcaster`](crate::broadcaster::EventBroadcaster).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BroadcasterSettings {
    /// Seed for the identifier generator. Draws come from OS entropy when
    /// unset.
    pub seed: Option<u64>,
    /// Number of listeners the registry is sized for up front.
    pub initial_capacity: usize,
}

impl BroadcasterSettings {
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    #[must_use]
    pub const fn with_initial_capacity(self, initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..self
        }
    }
}
