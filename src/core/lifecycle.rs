//! Instance lifecycle state machine.
//!
//! Every public operation on [`WebView`](crate::webview::WebView) is gated on
//! this single state value at its entry point, instead of repeating ad hoc
//! handle checks per call.

/// Lifecycle of one embedded surface instance.
///
/// The happy path is `Created -> Running -> Terminated -> Destroyed`.
/// Construction failure produces [`Lifecycle::Unset`], a terminal state in
/// which every mutator degrades to a silent no-op and every accessor returns
/// an empty value. Once the handle is invalidated it never becomes valid
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Native creation failed; the instance never becomes valid.
    Unset,
    /// Handle valid, run loop not yet started.
    Created,
    /// Inside `run()`.
    Running,
    /// `run()` has returned; the instance must be destroyed, not re-run.
    Terminated,
    /// After `destroy()`; the handle is invalidated.
    Destroyed,
}

impl Lifecycle {
    /// True while the underlying instance handle is valid.
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            Lifecycle::Created | Lifecycle::Running | Lifecycle::Terminated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_per_state() {
        assert!(!Lifecycle::Unset.is_valid());
        assert!(Lifecycle::Created.is_valid());
        assert!(Lifecycle::Running.is_valid());
        assert!(Lifecycle::Terminated.is_valid());
        assert!(!Lifecycle::Destroyed.is_valid());
    }
}
