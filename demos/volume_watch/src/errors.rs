use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum VolumeWatchError {
    #[error("binder task failed: {0}")]
    Binder(#[from] JoinError),
}
