//! Interrupt handling
//!
//! The emission loop needs a cancellable wait: block for the publish period,
//! but wake immediately when an interrupt arrives so the sentinel can be
//! published before exit. [`ShutdownToken`] wraps a mutex/condvar pair; the
//! Ctrl-C handler sets the flag and notifies the waiter.

use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Process exit code used when terminating through the interrupt path
/// (128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

struct Inner {
    triggered: Mutex<bool>,
    condvar: Condvar,
}

/// Cancellation token shared between the signal handler and the loop
#[derive(Clone)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

impl ShutdownToken {
    /// Create a new, untriggered token
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                triggered: Mutex::new(false),
                condvar: Condvar::new(),
            }),
        }
    }

    /// Request shutdown, waking any waiter
    pub fn trigger(&self) {
        let mut triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        *triggered = true;
        self.inner.condvar.notify_all();
    }

    /// Check whether shutdown has been requested
    pub fn is_triggered(&self) -> bool {
        *self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Wait up to `timeout`, returning early if shutdown is requested
    ///
    /// Returns true if shutdown was requested, false if the full timeout
    /// elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let triggered = self
            .inner
            .triggered
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let (triggered, _timed_out) = self
            .inner
            .condvar
            .wait_timeout_while(triggered, timeout, |triggered| !*triggered)
            .unwrap_or_else(|e| e.into_inner());
        *triggered
    }
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the Ctrl-C handler driving the token
///
/// A second interrupt force-exits without waiting for the sentinel path.
pub fn install(token: &ShutdownToken) -> Result<(), ctrlc::Error> {
    let token = token.clone();
    ctrlc::set_handler(move || {
        if token.is_triggered() {
            std::process::exit(EXIT_INTERRUPTED);
        }
        token.trigger();
    })
}
