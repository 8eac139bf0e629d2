//! Update-notification state, isolated from the core.
//!
//! The embedding application may run a fire-and-forget background version
//! check. [`UpdateNotifier`] owns the should-we-check state with an explicit
//! init/disable lifecycle; the binder and serializer never touch it, and no
//! correctness property depends on it.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy)]
struct UpdateState {
    enabled: bool,
    checked: bool,
}

/// Owns the "already checked for updates" state.
///
/// `mark_checked` claims the single check slot; only the first claim after
/// `init` wins, so concurrent callers cannot trigger duplicate checks.
///
/// # Example
///
/// ```rust
/// use intake::UpdateNotifier;
///
/// let notifier = UpdateNotifier::new();
/// assert!(notifier.mark_checked());
/// assert!(!notifier.mark_checked());
/// ```
#[derive(Debug, Default)]
pub struct UpdateNotifier {
    state: Mutex<UpdateState>,
}

impl Default for UpdateState {
    fn default() -> Self {
        Self {
            enabled: true,
            checked: false,
        }
    }
}

impl UpdateNotifier {
    /// A notifier that allows one check.
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that never allows a check.
    pub fn disabled() -> Self {
        let notifier = Self::default();
        notifier.disable();
        notifier
    }

    /// Resets to the initial lifecycle state: enabled, not yet checked.
    pub fn init(&self) {
        *self.state.lock() = UpdateState::default();
    }

    /// Permanently opts out of checking until the next `init`.
    pub fn disable(&self) {
        self.state.lock().enabled = false;
    }

    /// Claims the check slot. Returns true exactly once per lifecycle,
    /// and never when disabled.
    pub fn mark_checked(&self) -> bool {
        let mut state = self.state.lock();
        if !state.enabled || state.checked {
            return false;
        }
        state.checked = true;
        tracing::debug!("update check claimed");
        true
    }

    /// True once a check has been claimed in this lifecycle.
    pub fn has_checked(&self) -> bool {
        self.state.lock().checked
    }

    /// True unless `disable` was called since the last `init`.
    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_claim_per_lifecycle() {
        let notifier = UpdateNotifier::new();
        assert!(!notifier.has_checked());
        assert!(notifier.mark_checked());
        assert!(notifier.has_checked());
        assert!(!notifier.mark_checked());
    }

    #[test]
    fn test_disabled_never_claims() {
        let notifier = UpdateNotifier::disabled();
        assert!(!notifier.mark_checked());
        assert!(!notifier.has_checked());
    }

    #[test]
    fn test_init_resets_lifecycle() {
        let notifier = UpdateNotifier::new();
        assert!(notifier.mark_checked());
        notifier.init();
        assert!(!notifier.has_checked());
        assert!(notifier.mark_checked());
    }

    #[test]
    fn test_disable_after_claim_keeps_checked() {
        let notifier = UpdateNotifier::new();
        assert!(notifier.mark_checked());
        notifier.disable();
        assert!(notifier.has_checked());
        assert!(!notifier.is_enabled());
    }
}
