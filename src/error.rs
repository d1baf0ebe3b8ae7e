// One error type for the whole crate.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),

    #[error("Window update error: {0}")]
    WindowUpdate(String),

    #[error("Snapshot encode error: {0}")]
    SnapshotEncode(#[source] image::ImageError),

    #[error("Snapshot decode error: {0}")]
    SnapshotDecode(#[source] image::ImageError),

    #[error("Snapshot is {found:?}, surface is {expected:?}")]
    SnapshotSize {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("Expected {expected} pixels, got {found}")]
    PixelCount { expected: usize, found: usize },

    #[error("Restore worker exited before reporting a result")]
    RestoreAborted,

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
