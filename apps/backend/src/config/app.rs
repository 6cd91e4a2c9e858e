//! Process configuration read once from the environment.
//!
//! `AppConfig` is immutable after construction; it is built in `main` and
//! shared behind an `Arc` with the bootstrap, the mailer and the routes.

use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use db_infra::{engine_options, ConnectionConfig, EnginePoolOptions, DEFAULT_DATABASE_URL};

use crate::error::AppError;

const TESTING_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_REGION3_DATA_FILE: &str = "data/locations/region3_locations.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "default" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "testing" => Ok(Environment::Testing),
            other => Err(AppError::config(format!(
                "FLASK_ENV must be development, production or testing (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl FromStr for SameSite {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" => Ok(SameSite::None),
            other => Err(AppError::config(format!(
                "JWT_COOKIE_SAMESITE must be Lax, Strict or None (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtSettings {
    pub secret_key: String,
    pub access_token_expires: Duration,
    pub cookie_secure: bool,
    pub cookie_samesite: SameSite,
    pub cookie_domain: Option<String>,
    pub cookie_csrf_protect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub max_file_size: u64,
    pub folder: PathBuf,
    pub allowed_extensions: BTreeSet<String>,
}

/// SMTP view of the configuration used by the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

impl SmtpSettings {
    /// Credentials present; without them nothing can be sent.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupabaseSettings {
    pub url: String,
    pub key: String,
    pub service_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub debug: bool,
    pub secret_key: String,
    pub admin_secret_key: String,
    pub database: ConnectionConfig,
    pub pool: EnginePoolOptions,
    pub jwt: JwtSettings,
    pub uploads: UploadSettings,
    pub smtp: SmtpSettings,
    pub qr_base_url: String,
    pub qr_expiry_days: u32,
    pub app_name: String,
    pub web_url: String,
    pub admin_url: String,
    pub supabase: SupabaseSettings,
    pub server: ServerSettings,
    pub region3_data_file: PathBuf,
}

/// `true`, `1` and `yes` (any case) are on; everything else is off.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }

    fn string(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn flag(&self, name: &str, default: bool) -> bool {
        self.get(name).map(|v| parse_flag(&v)).unwrap_or(default)
    }

    fn number<T: FromStr>(&self, name: &str, default: T) -> Result<T, AppError> {
        match self.get(name) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::config(format!("{name} must be a number (got '{raw}')"))
            }),
            None => Ok(default),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let environment: Environment = vars.string("FLASK_ENV", "development").parse()?;
        let debug_flag = vars.flag("DEBUG", false);
        let debug = match environment {
            Environment::Development => true,
            Environment::Production => false,
            Environment::Testing => debug_flag,
        };

        let raw_url = match environment {
            Environment::Testing => TESTING_DATABASE_URL.to_string(),
            _ => vars.string("DATABASE_URL", DEFAULT_DATABASE_URL),
        };
        let database = ConnectionConfig::parse(raw_url)?;
        let pool = engine_options(&database.normalized_url);

        let jwt = JwtSettings {
            secret_key: vars.string("JWT_SECRET_KEY", "jwt-secret-key-change-in-production"),
            access_token_expires: Duration::from_secs(
                vars.number("JWT_ACCESS_TOKEN_EXPIRES", 86_400u64)?,
            ),
            cookie_secure: vars.flag("JWT_COOKIE_SECURE", !debug_flag),
            cookie_samesite: vars.string("JWT_COOKIE_SAMESITE", "Lax").parse()?,
            cookie_domain: vars.get("COOKIE_DOMAIN"),
            cookie_csrf_protect: vars.flag("JWT_COOKIE_CSRF_PROTECT", false),
        };

        let uploads = UploadSettings {
            max_file_size: vars.number("MAX_FILE_SIZE", 10 * 1024 * 1024u64)?,
            folder: PathBuf::from(vars.string("UPLOAD_FOLDER", "uploads/region3")),
            allowed_extensions: vars
                .string("ALLOWED_EXTENSIONS", "pdf,jpg,jpeg,png,doc,docx")
                .split(',')
                .map(|ext| ext.trim().to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        };

        let smtp = SmtpSettings {
            server: vars.string("SMTP_SERVER", "smtp.gmail.com"),
            port: vars.number("SMTP_PORT", 587u16)?,
            username: vars.string("SMTP_USERNAME", ""),
            password: vars.string("SMTP_PASSWORD", ""),
            from_email: vars.string("FROM_EMAIL", "noreply@munlink-region3.gov.ph"),
        };

        Ok(Self {
            environment,
            debug,
            secret_key: vars.string("SECRET_KEY", "dev-secret-key-change-in-production"),
            admin_secret_key: vars.string("ADMIN_SECRET_KEY", "admin-secret-key"),
            database,
            pool,
            jwt,
            uploads,
            smtp,
            qr_base_url: vars.string("QR_BASE_URL", "http://localhost:3000/verify"),
            qr_expiry_days: vars.number("QR_EXPIRY_DAYS", 30u32)?,
            app_name: vars.string("APP_NAME", "MunLink Region 3"),
            web_url: vars.string("WEB_URL", "http://localhost:3000"),
            admin_url: vars.string("ADMIN_URL", "http://localhost:3001"),
            supabase: SupabaseSettings {
                url: vars.string("SUPABASE_URL", ""),
                key: vars.string("SUPABASE_KEY", ""),
                service_key: vars.string("SUPABASE_SERVICE_KEY", ""),
            },
            server: ServerSettings {
                host: vars.string("BACKEND_HOST", "0.0.0.0"),
                port: vars.number("BACKEND_PORT", 5000u16)?,
            },
            region3_data_file: PathBuf::from(
                vars.string("REGION3_DATA_FILE", DEFAULT_REGION3_DATA_FILE),
            ),
        })
    }

    /// Supabase URL plus at least one API key.
    pub fn is_supabase_configured(&self) -> bool {
        !self.supabase.url.is_empty()
            && (!self.supabase.key.is_empty() || !self.supabase.service_key.is_empty())
    }

    /// The configured database is hosted by Supabase.
    pub fn is_supabase_database(&self) -> bool {
        database_host(&self.database.normalized_url).contains("supabase.co")
    }

    pub fn is_allowed_extension(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| self.uploads.allowed_extensions.contains(&ext.to_ascii_lowercase()))
            .unwrap_or(false)
    }

    /// Create the upload folder and its marketplace subfolder.
    pub fn prepare_upload_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.uploads.folder)?;
        std::fs::create_dir_all(self.uploads.folder.join("marketplace").join("items"))
    }
}

/// Lowercased host part of a connection string, without credentials or port.
fn database_host(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_port = authority.rsplit_once('@').map(|(_, h)| h).unwrap_or(authority);
    host_port
        .split(':')
        .next()
        .unwrap_or(host_port)
        .to_ascii_lowercase()
}
