//! Test log capture shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Quiet by default; sqlx statement logging is noisy under seeding.
pub const DEFAULT_TEST_FILTER: &str = "warn,sqlx=error,sea_orm=error";

static SUBSCRIBER: OnceCell<String> = OnceCell::new();

fn resolve_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["TEST_LOG", "RUST_LOG"]
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_TEST_FILTER.to_string())
}

/// Install the test subscriber once per process and return the filter in use.
///
/// `TEST_LOG` wins over `RUST_LOG`; blank values are ignored.
pub fn init() -> &'static str {
    SUBSCRIBER.get_or_init(|| {
        let directives = resolve_filter(|name| std::env::var(name).ok());
        let filter = EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init();
        directives
    })
}
