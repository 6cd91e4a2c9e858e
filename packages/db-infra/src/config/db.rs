//! Connection-string normalisation and connection-pool tuning.
//!
//! Everything here is a pure transform over strings: no network I/O happens
//! until a pool is actually built from the results.

use std::env;
use std::time::Duration;

use percent_encoding::percent_decode_str;

use crate::error::DbInfraError;

/// Local file database used when `DATABASE_URL` is absent.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://munlink_region3.db";

/// Scheme alias still handed out by Heroku/Render style hosting providers.
pub const POSTGRES_ALIAS_SCHEME: &str = "postgres://";
/// Scheme the Postgres driver expects.
pub const POSTGRES_SCHEME: &str = "postgresql://";

pub const SSL_MODE_PARAM: &str = "sslmode";
pub const SSL_MODE_REQUIRED: &str = "require";

// Hosted poolers (Supabase, Render) silently drop idle connections, so the
// pool is kept small and connections are recycled well before the cutoff.
const POOL_RECYCLE_SECS: u64 = 300;
const POOL_TIMEOUT_SECS: u64 = 60;
const POOL_SIZE: u32 = 3;
const POOL_MAX_OVERFLOW: u32 = 5;
const CONNECT_TIMEOUT_SECS: u64 = 60;
const KEEPALIVE_IDLE_SECS: u32 = 30;
const KEEPALIVE_INTERVAL_SECS: u32 = 10;
const KEEPALIVE_COUNT: u32 = 5;

const SQLITE_BUSY_TIMEOUT_MS: u32 = 5000;

/// Database flavour derived from a normalized connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Server-based Postgres (hosted or local)
    Postgres,
    /// SQLite database stored in a file
    SqliteFile,
    /// SQLite database living only as long as its connection
    SqliteMemory,
}

impl DbKind {
    /// Classify a connection string by its scheme.
    pub fn from_url(url: &str) -> Result<Self, DbInfraError> {
        match url_scheme(url)? {
            "postgresql" | "postgres" => Ok(DbKind::Postgres),
            "sqlite" if is_sqlite_memory(url) => Ok(DbKind::SqliteMemory),
            "sqlite" => Ok(DbKind::SqliteFile),
            other => Err(DbInfraError::UnsupportedScheme {
                scheme: other.to_string(),
            }),
        }
    }

    /// True for databases reached over the network.
    pub fn is_server(self) -> bool {
        matches!(self, DbKind::Postgres)
    }
}

impl From<DbKind> for sea_orm::DatabaseBackend {
    fn from(kind: DbKind) -> Self {
        match kind {
            DbKind::Postgres => sea_orm::DatabaseBackend::Postgres,
            DbKind::SqliteFile | DbKind::SqliteMemory => sea_orm::DatabaseBackend::Sqlite,
        }
    }
}

fn is_sqlite_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Extract and validate the scheme of a connection string.
fn url_scheme(url: &str) -> Result<&str, DbInfraError> {
    let invalid = |reason: &str| DbInfraError::InvalidUrl {
        url: crate::sanitize_db_url(url),
        reason: reason.to_string(),
    };

    let (scheme, _) = url.split_once(':').ok_or_else(|| invalid("missing scheme"))?;

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return Err(invalid("scheme must start with a letter")),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return Err(invalid("scheme contains invalid characters"));
    }
    Ok(scheme)
}

/// Rewrite a raw connection string into the form the driver accepts.
///
/// - `postgres://` is rewritten once to `postgresql://`.
/// - Postgres URLs get `sslmode=require` appended unless the query already
///   carries an `sslmode` directive (whatever its value).
/// - Host, path, existing query parameters and fragment are kept byte for byte.
pub fn normalize_database_url(raw: &str) -> Result<String, DbInfraError> {
    url_scheme(raw)?;

    let url = match raw.strip_prefix(POSTGRES_ALIAS_SCHEME) {
        Some(rest) => format!("{POSTGRES_SCHEME}{rest}"),
        None => raw.to_string(),
    };

    if url.starts_with(POSTGRES_SCHEME) {
        Ok(ensure_ssl_mode(&url))
    } else {
        Ok(url)
    }
}

fn ensure_ssl_mode(url: &str) -> String {
    let (body, fragment) = match url.split_once('#') {
        Some((body, fragment)) => (body, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = match body.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (body, None),
    };

    if query.is_some_and(has_ssl_mode) {
        return url.to_string();
    }

    let directive = format!("{SSL_MODE_PARAM}={SSL_MODE_REQUIRED}");
    let mut out = String::with_capacity(url.len() + directive.len() + 2);
    out.push_str(base);
    out.push('?');
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        out.push_str(query);
        if !query.ends_with('&') {
            out.push('&');
        }
    }
    out.push_str(&directive);
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

fn has_ssl_mode(query: &str) -> bool {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .any(|pair| {
            let key = pair.split_once('=').map_or(pair, |(key, _)| key);
            percent_decode_str(key).decode_utf8_lossy() == SSL_MODE_PARAM
        })
}

/// Raw and normalized forms of the configured connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub raw_url: String,
    pub normalized_url: String,
    pub kind: DbKind,
}

impl ConnectionConfig {
    pub fn parse(raw_url: impl Into<String>) -> Result<Self, DbInfraError> {
        let raw_url = raw_url.into();
        let normalized_url = normalize_database_url(&raw_url)?;
        let kind = DbKind::from_url(&normalized_url)?;
        Ok(Self {
            raw_url,
            normalized_url,
            kind,
        })
    }

    pub fn is_postgres(&self) -> bool {
        self.kind.is_server()
    }

    /// Pool tuning for this connection.
    pub fn pool_options(&self) -> EnginePoolOptions {
        engine_options(&self.normalized_url)
    }

    /// Normalized URL with the password masked, safe for logs.
    pub fn redacted(&self) -> String {
        crate::sanitize_db_url(&self.normalized_url)
    }
}

/// `DATABASE_URL`, falling back to the local SQLite file.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// `DATABASE_URL` for contexts that must not fall back to a local file.
pub fn required_database_url_from_env() -> Result<String, DbInfraError> {
    env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| DbInfraError::config("Required environment variable 'DATABASE_URL' is not set"))
}

/// TCP keepalive tuning for server connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepaliveSettings {
    pub idle_seconds: u32,
    pub interval_seconds: u32,
    pub count: u32,
}

/// Connection-pool tuning derived from the normalized URL.
///
/// Embedded databases only ever get `pre_ping`; every other field is filled in
/// for server connections only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePoolOptions {
    /// Verify a pooled connection is alive before handing it out
    pub pre_ping: bool,
    pub recycle_seconds: Option<u64>,
    pub timeout_seconds: Option<u64>,
    pub pool_size: Option<u32>,
    pub max_overflow: Option<u32>,
    pub connect_timeout: Option<u64>,
    pub keepalive: Option<KeepaliveSettings>,
}

impl EnginePoolOptions {
    /// Options for file-based or in-memory databases.
    pub fn embedded() -> Self {
        Self {
            pre_ping: true,
            recycle_seconds: None,
            timeout_seconds: None,
            pool_size: None,
            max_overflow: None,
            connect_timeout: None,
            keepalive: None,
        }
    }

    /// Options for hosted Postgres behind a connection pooler.
    pub fn server() -> Self {
        Self {
            pre_ping: true,
            recycle_seconds: Some(POOL_RECYCLE_SECS),
            timeout_seconds: Some(POOL_TIMEOUT_SECS),
            pool_size: Some(POOL_SIZE),
            max_overflow: Some(POOL_MAX_OVERFLOW),
            connect_timeout: Some(CONNECT_TIMEOUT_SECS),
            keepalive: Some(KeepaliveSettings {
                idle_seconds: KEEPALIVE_IDLE_SECS,
                interval_seconds: KEEPALIVE_INTERVAL_SECS,
                count: KEEPALIVE_COUNT,
            }),
        }
    }

    pub fn has_server_settings(&self) -> bool {
        self.recycle_seconds.is_some()
            || self.timeout_seconds.is_some()
            || self.pool_size.is_some()
            || self.max_overflow.is_some()
            || self.connect_timeout.is_some()
            || self.keepalive.is_some()
    }

    /// Hard ceiling on open connections: steady pool plus overflow.
    pub fn max_connections(&self) -> Option<u32> {
        self.pool_size
            .map(|size| size.saturating_add(self.max_overflow.unwrap_or(0)))
    }

    pub fn recycle(&self) -> Option<Duration> {
        self.recycle_seconds.map(Duration::from_secs)
    }

    pub fn acquire_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_secs)
    }
}

/// Resolve pool tuning for a normalized connection string.
pub fn engine_options(normalized_url: &str) -> EnginePoolOptions {
    if normalized_url.starts_with(POSTGRES_SCHEME) {
        EnginePoolOptions::server()
    } else {
        EnginePoolOptions::embedded()
    }
}

/// Build ordered session-level SQL statements run on every new connection.
pub fn build_session_statements(
    db_kind: DbKind,
    app_name: &str,
    options: &EnginePoolOptions,
) -> Vec<String> {
    match db_kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS};"),
        ],
        DbKind::Postgres => {
            let mut stmts = vec![
                // application_name is safe to single-quote; minimal escaping
                format!("SET application_name = '{}';", app_name.replace('\'', "''")),
                "SET timezone = 'UTC';".to_string(),
            ];
            if let Some(keepalive) = options.keepalive {
                stmts.push(format!(
                    "SET tcp_keepalives_idle = {};",
                    keepalive.idle_seconds
                ));
                stmts.push(format!(
                    "SET tcp_keepalives_interval = {};",
                    keepalive.interval_seconds
                ));
                stmts.push(format!("SET tcp_keepalives_count = {};", keepalive.count));
            }
            stmts
        }
    }
}
