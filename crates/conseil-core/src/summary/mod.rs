//! End-of-session summary delivery: the `SummarySink` port, its boxed
//! form, and the best-effort `SummaryDispatcher`.

pub mod box_sink;
pub mod dispatcher;
pub mod sink;
