//! Conversion tracking for the confirmation view.
//!
//! The session controller never records conversions itself. The
//! presentation layer calls [`ConversionTracker::record_conversion`] when it
//! shows the confirmation view, usually through [`OnceConversion`] so a
//! re-rendered view cannot double count.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use conseil_types::config::ConversionTag;

pub trait ConversionTracker: Send + Sync {
    fn record_conversion(&self);
}

/// Records through the inner tracker at most once.
pub struct OnceConversion<T> {
    inner: T,
    recorded: AtomicBool,
}

impl<T: ConversionTracker> OnceConversion<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            recorded: AtomicBool::new(false),
        }
    }

    pub fn is_recorded(&self) -> bool {
        self.recorded.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: ConversionTracker> ConversionTracker for OnceConversion<T> {
    fn record_conversion(&self) {
        if self.recorded.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.record_conversion();
    }
}

/// Emits one structured event per configured conversion tag.
#[derive(Debug, Clone, Default)]
pub struct TracingConversionTracker {
    tags: Vec<ConversionTag>,
}

impl TracingConversionTracker {
    pub fn new(tags: Vec<ConversionTag>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &[ConversionTag] {
        &self.tags
    }
}

impl ConversionTracker for TracingConversionTracker {
    fn record_conversion(&self) {
        for tag in &self.tags {
            info!(
                target: "conseil::conversion",
                send_to = %tag.send_to,
                value = tag.value,
                currency = tag.currency.as_deref(),
                "Conversion recorded"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl ConversionTracker for Counting {
        fn record_conversion(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_once_conversion_records_once() {
        let tracker = OnceConversion::new(Counting::default());
        assert!(!tracker.is_recorded());

        tracker.record_conversion();
        tracker.record_conversion();
        tracker.record_conversion();

        assert!(tracker.is_recorded());
        assert_eq!(tracker.inner().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tracing_tracker_keeps_tags() {
        let tracker = TracingConversionTracker::new(vec![ConversionTag {
            send_to: "AW-1055107787".to_string(),
            value: Some(1.0),
            currency: Some("CAD".to_string()),
        }]);
        tracker.record_conversion();
        assert_eq!(tracker.tags()[0].currency.as_deref(), Some("CAD"));
    }
}
