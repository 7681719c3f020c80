//! Span helpers for formulation requests

/// Span around one formulation request.
///
/// `duration_ms` and `error` are left empty and filled by [record_duration]
/// and [record_error](crate::record_error).
///
/// ```rust
/// use odinx_observability::formulation_span;
///
/// let span = formulation_span!("formula", "gemini", "gemini-2.5-pro");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! formulation_span {
    ($mode:expr, $provider:expr, $model:expr) => {
        tracing::info_span!(
            "lab.formulation",
            lab.mode = $mode,
            llm.provider = $provider,
            llm.model = $model,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Mark the current span as failed and emit an error event.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
