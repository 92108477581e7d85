//! Scanner configuration

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Options controlling a scan
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Capacity of the token channel; `None` means unbounded
    pub channel_capacity: Option<usize>,
    /// Emit the end-of-stream token even when the scan stopped on an error
    pub eof_after_error: bool,
    /// Checked before every state transition
    pub cancel: Option<CancelToken>,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    pub fn with_eof_after_error(mut self, enabled: bool) -> Self {
        self.eof_after_error = enabled;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Shared stop flag for a running scan.
///
/// Clones observe the same flag, so one clone can live in the scanner's
/// config while another is kept by whoever wants to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::new();
        assert_eq!(config.channel_capacity, None);
        assert!(!config.eof_after_error);
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let cancel = CancelToken::new();
        let config = ScanConfig::new().with_cancel(cancel.clone());
        assert!(!config.is_cancelled());
        cancel.cancel();
        assert!(config.is_cancelled());
    }
}
