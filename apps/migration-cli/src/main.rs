use clap::{Parser, ValueEnum};
use db_infra::{orchestrate_migration, required_database_url_from_env, ConnectionConfig, DbKind};
use migration::MigrationCommand;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
    /// Mark the schema as current without running migrations
    Stamp,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
            Command::Stamp => MigrationCommand::Stamp,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "MunLink database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Connection string; overrides DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let raw_url = match args.database_url {
        Some(url) => url,
        None => match required_database_url_from_env() {
            Ok(url) => url,
            Err(e) => {
                eprintln!("{e}");
                eprintln!("Set DATABASE_URL or pass --database-url.");
                std::process::exit(1);
            }
        },
    };

    let conn = match ConnectionConfig::parse(raw_url) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Invalid DATABASE_URL: {e}");
            std::process::exit(1);
        }
    };

    if conn.kind == DbKind::SqliteMemory {
        eprintln!("SQLite in-memory databases are not supported for CLI operations.");
        eprintln!("Each run would migrate a fresh database that disappears on exit.");
        std::process::exit(1);
    }

    if let Err(e) = orchestrate_migration(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
