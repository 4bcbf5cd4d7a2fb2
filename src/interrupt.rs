//! Delivery of SIGINT / Ctrl-C as a channel message.
//!
//! The tree builder selects on the returned receiver next to the record stream, so an interrupt
//! is observed between two insertions and never while the tree is being modified.

use std::thread;

use anyhow::Context;
use crossbeam_channel::{bounded, Receiver};

/// Start listening for Ctrl-C.
///
/// The listener runs a current thread tokio runtime on a dedicated thread and sends a single
/// message when the signal arrives. If the listener can not be installed the receiver is
/// disconnected, which the tree builder treats as "no interrupt will come".
pub fn ctrl_c() -> Result<Receiver<()>, anyhow::Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_context(|| "build signal runtime")?;
    let (sender, receiver) = bounded(1);
    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            match runtime.block_on(tokio::signal::ctrl_c()) {
                Ok(()) => {
                    log::info!("Received Ctrl-C");
                    let _ = sender.send(());
                }
                Err(e) => {
                    log::warn!("Failed to listen for Ctrl-C: {}", e);
                }
            }
        })
        .with_context(|| "spawn interrupt listener")?;
    Ok(receiver)
}
