//! Request-scoped trace id.
//!
//! `RequestTrace` opens the scope for every HTTP request; error rendering
//! reads it back so Problem Details bodies carry the same id as the
//! `x-trace-id` header. Domain and registry code never touch this module.

use tokio::task_local;

/// Reported when no request scope is active.
pub const UNSCOPED: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or [`UNSCOPED`].
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| UNSCOPED.to_string())
}

/// Runs `future` with `trace_id` visible to [`trace_id()`].
pub async fn with_trace_id<F>(trace_id: String, future: F) -> F::Output
where
    F: std::future::Future,
{
    TRACE_ID.scope(trace_id, future).await
}
