// Background snapshot decode for undo/redo.
//
// Decoding a PNG snapshot is the only step that may take a while, so it runs
// on a worker thread. The result comes back through a oneshot channel: the
// window loop polls it once per frame, tests block on it.

use crate::error::{Error, Result};
use crate::surface::Snapshot;
use futures::channel::oneshot;
use std::thread;

#[derive(Debug)]
pub struct PendingRestore {
    /// Cursor position before the navigation, for rollback on failure.
    pub from: usize,
    /// Cursor position whose snapshot is being decoded.
    pub to: usize,
    rx: oneshot::Receiver<Result<Vec<u32>>>,
}

impl PendingRestore {
    pub fn spawn(snapshot: Snapshot, from: usize, to: usize) -> Result<Self> {
        let (tx, rx) = oneshot::channel();
        thread::Builder::new()
            .name(format!("restore-{to}"))
            .spawn(move || {
                // Receiver gone means the canvas was dropped; nothing to report to.
                let _ = tx.send(snapshot.decode());
            })?;
        Ok(Self { from, to, rx })
    }

    /// Non-blocking check. `None` while the worker is still decoding.
    pub fn try_complete(&mut self) -> Option<Result<Vec<u32>>> {
        match self.rx.try_recv() {
            Ok(Some(decoded)) => Some(decoded),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(Error::RestoreAborted)),
        }
    }

    /// Block until the worker reports.
    pub fn wait(self) -> Result<Vec<u32>> {
        futures::executor::block_on(self.rx).map_err(|_| Error::RestoreAborted)?
    }
}
