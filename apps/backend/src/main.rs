use actix_web::{web, App, HttpServer};
use munlink_backend::config::AppConfig;
use munlink_backend::infra::state::build_state;
use munlink_backend::routes;
use munlink_backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.debug);

    if let Err(e) = config.prepare_upload_dirs() {
        eprintln!(
            "❌ Failed to create upload folder {}: {e}",
            config.uploads.folder.display()
        );
        std::process::exit(1);
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    println!("🚀 Starting {} on http://{}:{}", config.app_name, host, port);

    // Pool, schema check and seed check; READY or exit
    let app_state = match build_state().with_config(config).with_db().build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database ready");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
