pub mod app;

pub use app::{
    AppConfig, Environment, JwtSettings, SameSite, ServerSettings, SmtpSettings,
    SupabaseSettings, UploadSettings,
};
