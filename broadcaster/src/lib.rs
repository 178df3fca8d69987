#![doc = include_str!("../README.md")]

pub mod broadcaster;
pub mod listener;

pub use crate::{
    broadcaster::{Broadcaster, BroadcasterSettings, EventBroadcaster},
    listener::{Listener, ListenerId, Notification, WaitError},
};
