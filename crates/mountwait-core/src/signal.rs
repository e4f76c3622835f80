//! Blocking wait for an external termination request.
//!
//! The process handler (SIGINT, SIGTERM and SIGHUP through `ctrlc`) pushes
//! into a channel of capacity one; [`TerminationListener::wait`] blocks on
//! it without polling. The wait has no timeout and cannot be cancelled.

use std::sync::mpsc::{self, Receiver, SyncSender};

use mountwait_common::error::{MountWaitError, Result};

/// Sending half: records a termination request.
#[derive(Debug, Clone)]
pub struct TerminationTrigger {
    requests: SyncSender<()>,
}

impl TerminationTrigger {
    /// Records a termination request. Requests beyond the first pending one
    /// are dropped.
    pub fn request(&self) {
        let _ = self.requests.try_send(());
    }
}

/// Receiving half: waits for exactly one termination request.
#[derive(Debug)]
pub struct TerminationListener {
    requests: Receiver<()>,
}

impl TerminationListener {
    /// Creates a listener fed by the returned trigger instead of signals.
    #[must_use]
    pub fn channel() -> (TerminationTrigger, Self) {
        let (tx, rx) = mpsc::sync_channel(1);
        (
            TerminationTrigger { requests: tx },
            Self { requests: rx },
        )
    }

    /// Installs the process-wide signal handler and returns its listener.
    ///
    /// The handler runs on a dedicated thread spawned here.
    ///
    /// # Errors
    ///
    /// Returns [`MountWaitError::Signal`] if a handler is already installed
    /// or the signal thread cannot be started.
    pub fn install() -> Result<Self> {
        let (trigger, listener) = Self::channel();
        ctrlc::set_handler(move || trigger.request()).map_err(|e| MountWaitError::Signal {
            message: format!("failed to install termination handler: {e}"),
        })?;
        tracing::debug!("termination handler installed");
        Ok(listener)
    }

    /// Blocks until a termination request arrives.
    ///
    /// # Errors
    ///
    /// Returns [`MountWaitError::Signal`] if every trigger was dropped
    /// without sending a request.
    pub fn wait(self) -> Result<()> {
        tracing::info!("waiting for termination request");
        self.requests.recv().map_err(|_| MountWaitError::Signal {
            message: "termination channel closed before any request".into(),
        })?;
        tracing::info!("termination requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn pending_request_is_consumed() {
        let (trigger, listener) = TerminationListener::channel();
        trigger.request();
        listener.wait().expect("request was pending");
    }

    #[test]
    fn repeated_requests_do_not_block_sender() {
        let (trigger, listener) = TerminationListener::channel();
        for _ in 0..5 {
            trigger.request();
        }
        listener.wait().expect("request was pending");
    }

    #[test]
    fn dropped_trigger_fails_wait() {
        let (trigger, listener) = TerminationListener::channel();
        drop(trigger);
        let err = listener.wait().expect_err("no request can arrive");
        assert_eq!(err.stage(), "signal");
    }

    #[test]
    fn wait_blocks_until_request_from_another_thread() {
        let (trigger, listener) = TerminationListener::channel();
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            trigger.request();
        });
        listener.wait().expect("request from sender thread");
        sender.join().expect("sender thread");
    }
}
