//! Run-loop event queue and cross-thread handle.
//!
//! The loop thread is whichever thread calls
//! [`WebView::run`](crate::webview::WebView::run); everything else talks to
//! it through an unbounded channel. [`Handle::dispatch`] and
//! [`Handle::terminate`] are the only operations safe to invoke from other
//! threads.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::webview::WebView;

/// Work submitted for execution on the loop thread. Executed at most once.
pub(crate) type DispatchFn = Box<dyn FnOnce(&mut WebView) + Send + 'static>;

pub(crate) enum LoopEvent {
    /// Cross-thread work submission.
    Task(DispatchFn),
    /// One serialized script-side invocation of a bound name.
    ScriptCall(String),
    /// Stop request; the loop exits at the next iteration boundary.
    Quit,
}

pub(crate) struct EventQueue {
    tx: Sender<LoopEvent>,
    rx: Receiver<LoopEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<LoopEvent> {
        self.tx.clone()
    }

    pub fn send(&self, event: LoopEvent) {
        let _ = self.tx.send(event);
    }

    /// Blocks until the next event. Never fails while the queue owner holds
    /// its own sender.
    pub fn recv(&self) -> Option<LoopEvent> {
        self.rx.recv().ok()
    }

    #[cfg(test)]
    pub fn try_recv(&self) -> Option<LoopEvent> {
        self.rx.try_recv().ok()
    }
}

/// Cloneable cross-thread handle to one instance's run loop.
///
/// Submissions are FIFO. Tasks submitted to an instance whose loop never
/// starts, or after it has stopped, are dropped unexecuted.
#[derive(Clone)]
pub struct Handle {
    tx: Sender<LoopEvent>,
}

impl Handle {
    pub(crate) fn new(tx: Sender<LoopEvent>) -> Self {
        Self { tx }
    }

    /// Submits `work` to execute on the loop thread, enabling safe mutation
    /// of loop-affine state from background threads. Safe from any thread.
    pub fn dispatch<F>(&self, work: F)
    where
        F: FnOnce(&mut WebView) + Send + 'static,
    {
        let _ = self.tx.send(LoopEvent::Task(Box::new(work)));
    }

    /// Requests the loop to stop. Safe from any thread, including while
    /// `run()` is blocked on another thread; the loop returns at the next
    /// iteration boundary without interrupting in-flight work.
    pub fn terminate(&self) {
        let _ = self.tx.send(LoopEvent::Quit);
    }
}
