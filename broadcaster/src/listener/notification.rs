/// Outcome of waiting on a [`Listener`](crate::listener::Listener).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Notification {
    /// Upstream state changed at least once since the slot was last drained.
    ///
    /// Several broadcasts issued before the drain collapse into this single
    /// value.
    Changed,
    /// The listener has been unregistered.
    ///
    /// This is terminal: every further wait returns [`Notification::Closed`].
    /// Register again to resume receiving notifications.
    Closed,
}

impl Notification {
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}
