use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset; debug mode echoes SQL.
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "info,actix_web=info,sqlx=info,sea_orm=warn"
    } else {
        "info,actix_web=info,sqlx=warn,sea_orm=warn"
    }
}

pub fn init_tracing(debug: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
