//! Test subscriber installed once per test binary.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a compact subscriber on the test writer.
///
/// Level precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`. Setting
/// `TEST_LOG_JSON=1` switches to the JSON formatter the server uses.
/// Safe to call from every test; only the first call does anything.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let builder = fmt().with_env_filter(filter).with_test_writer().without_time();
        if std::env::var_os("TEST_LOG_JSON").is_some() {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
