//! Force-closing native windows when a deadline fires.
//!
//! A [`CloseWatcher`] is a single-owner actor running on its own thread. The
//! code that observes the dialog window (a window hook) publishes the
//! handle as a [`WatchEvent::Opened`] message; the dialog call sends
//! [`WatchEvent::Finished`] once it returns. The actor alone holds the
//! handle, so completion and expiry never race on shared state.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::deadline::Deadline;
use crate::logging::targets;

/// Opaque native window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Closes a window on request of the watcher.
pub trait WindowCloser: Send + 'static {
    /// Ask the window to close as if the user pressed its close box.
    fn close(&self, window: WindowHandle);
}

impl<F> WindowCloser for F
where
    F: Fn(WindowHandle) + Send + 'static,
{
    fn close(&self, window: WindowHandle) {
        self(window)
    }
}

/// Message to the watcher actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// The dialog window appeared.
    Opened(WindowHandle),
    /// The dialog call returned.
    Finished,
}

/// What the watcher did during the dialog's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The dialog finished before the deadline.
    Completed,
    /// The deadline fired and the window was asked to close.
    Closed(WindowHandle),
    /// The deadline fired before any window was published.
    Expired,
}

impl WatchOutcome {
    /// Whether the deadline fired.
    pub fn fired(self) -> bool {
        !matches!(self, Self::Completed)
    }
}

/// Sending half used by window hooks.
#[derive(Debug, Clone)]
pub struct WindowPublisher {
    tx: Sender<WatchEvent>,
}

impl WindowPublisher {
    /// Publish the dialog window. Only the first handle is tracked.
    pub fn opened(&self, window: WindowHandle) {
        // The actor may already be gone after `finish`.
        let _ = self.tx.send(WatchEvent::Opened(window));
    }
}

/// Watcher actor for one dialog invocation.
pub struct CloseWatcher {
    tx: Sender<WatchEvent>,
    thread: Option<JoinHandle<WatchOutcome>>,
}

impl CloseWatcher {
    /// Spawn the actor. Unbounded deadlines spawn no thread.
    pub fn spawn<C: WindowCloser>(deadline: Deadline, closer: C) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let thread = deadline
            .is_bounded()
            .then(|| thread::spawn(move || run(deadline, rx, closer)));
        Self { tx, thread }
    }

    /// Handle for the code that observes window creation.
    pub fn publisher(&self) -> WindowPublisher {
        WindowPublisher {
            tx: self.tx.clone(),
        }
    }

    /// Tell the actor the dialog returned and wait for it to stop.
    pub fn finish(mut self) -> WatchOutcome {
        self.stop()
    }

    fn stop(&mut self) -> WatchOutcome {
        let _ = self.tx.send(WatchEvent::Finished);
        match self.thread.take() {
            Some(handle) => handle.join().unwrap_or(WatchOutcome::Completed),
            None => WatchOutcome::Completed,
        }
    }
}

impl Drop for CloseWatcher {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.stop();
        }
    }
}

fn run<C: WindowCloser>(deadline: Deadline, rx: Receiver<WatchEvent>, closer: C) -> WatchOutcome {
    let mut window: Option<WindowHandle> = None;
    let mut outcome = WatchOutcome::Completed;

    loop {
        let event = match (outcome, deadline.remaining()) {
            (WatchOutcome::Completed, Some(left)) => rx.recv_timeout(left),
            _ => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match event {
            Ok(WatchEvent::Opened(handle)) => {
                if window.is_some() {
                    continue;
                }
                window = Some(handle);
                if outcome == WatchOutcome::Expired {
                    tracing::debug!(target: targets::WATCHER, ?handle, "closing late window");
                    closer.close(handle);
                    outcome = WatchOutcome::Closed(handle);
                }
            }
            Ok(WatchEvent::Finished) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                outcome = match window {
                    Some(handle) => {
                        tracing::debug!(target: targets::WATCHER, ?handle, "deadline fired, closing window");
                        closer.close(handle);
                        WatchOutcome::Closed(handle)
                    }
                    None => {
                        tracing::debug!(target: targets::WATCHER, "deadline fired before window appeared");
                        WatchOutcome::Expired
                    }
                };
            }
        }
    }

    outcome
}

static_assertions::assert_impl_all!(WindowPublisher: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<WindowHandle>>>, impl WindowCloser) {
        let closed = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&closed);
        (closed, move |h: WindowHandle| sink.lock().push(h))
    }

    #[test]
    fn test_finish_before_deadline_closes_nothing() {
        let (closed, closer) = recorder();
        let watcher = CloseWatcher::spawn(Deadline::after(Duration::from_secs(30)), closer);
        watcher.publisher().opened(WindowHandle(7));
        assert_eq!(watcher.finish(), WatchOutcome::Completed);
        assert!(closed.lock().is_empty());
    }

    #[test]
    fn test_deadline_closes_published_window() {
        let (closed, closer) = recorder();
        let watcher = CloseWatcher::spawn(Deadline::after(Duration::from_millis(50)), closer);
        watcher.publisher().opened(WindowHandle(42));
        thread::sleep(Duration::from_millis(200));
        assert_eq!(watcher.finish(), WatchOutcome::Closed(WindowHandle(42)));
        assert_eq!(*closed.lock(), vec![WindowHandle(42)]);
    }

    #[test]
    fn test_window_published_after_deadline_is_closed() {
        let (closed, closer) = recorder();
        let watcher = CloseWatcher::spawn(Deadline::after(Duration::from_millis(10)), closer);
        thread::sleep(Duration::from_millis(100));
        watcher.publisher().opened(WindowHandle(3));
        thread::sleep(Duration::from_millis(50));
        assert_eq!(watcher.finish(), WatchOutcome::Closed(WindowHandle(3)));
        assert_eq!(*closed.lock(), vec![WindowHandle(3)]);
    }

    #[test]
    fn test_unbounded_deadline_spawns_nothing() {
        let (closed, closer) = recorder();
        let watcher = CloseWatcher::spawn(Deadline::none(), closer);
        watcher.publisher().opened(WindowHandle(1));
        assert_eq!(watcher.finish(), WatchOutcome::Completed);
        assert!(closed.lock().is_empty());
    }
}
