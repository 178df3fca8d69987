use std::fmt::{Display, Formatter};

use rand::RngCore;

/// Identifier of a registered listener.
///
/// Unique among the listeners currently registered with one broadcaster. Once
/// a listener is unregistered its value may be handed out again.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Draw a candidate uniformly over the whole `u64` space.
    pub(crate) fn random<R: RngCore>(rng: &mut R) -> Self {
        Self(rng.next_u64())
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for ListenerId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ListenerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
