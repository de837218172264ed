//! BoxSummarySink -- object-safe wrapper so the sink can be picked at runtime.
//!
//! `SummarySink` uses RPITIT and cannot be a trait object. `SummarySinkDyn`
//! boxes the future, is blanket-implemented for every sink, and
//! `BoxSummarySink` implements `SummarySink` again by delegating.

use std::future::Future;
use std::pin::Pin;

use conseil_types::error::SinkError;
use conseil_types::summary::ChatSummary;

use super::sink::SummarySink;

pub trait SummarySinkDyn: Send + Sync {
    fn name(&self) -> &str;

    fn deliver_boxed<'a>(
        &'a self,
        summary: &'a ChatSummary,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + 'a>>;
}

impl<T: SummarySink> SummarySinkDyn for T {
    fn name(&self) -> &str {
        SummarySink::name(self)
    }

    fn deliver_boxed<'a>(
        &'a self,
        summary: &'a ChatSummary,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + 'a>> {
        Box::pin(self.deliver(summary))
    }
}

/// Type-erased summary sink (HTTP endpoint vs local outbox).
pub struct BoxSummarySink {
    inner: Box<dyn SummarySinkDyn>,
}

impl BoxSummarySink {
    pub fn new<T: SummarySink + 'static>(sink: T) -> Self {
        Self {
            inner: Box::new(sink),
        }
    }
}

impl SummarySink for BoxSummarySink {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn deliver(&self, summary: &ChatSummary) -> Result<(), SinkError> {
        self.inner.deliver_boxed(summary).await
    }
}
