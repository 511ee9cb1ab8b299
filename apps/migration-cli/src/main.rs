use clap::Parser;
use migration::{migrate, MigrationCommand};
use sea_orm::Database;

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Drinks database migration tool")]
struct Args {
    /// Migration command: up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Database connection URL (postgres://... or sqlite://path?mode=rwc)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    if args.database_url.starts_with("sqlite::memory:") {
        eprintln!("❌ In-memory SQLite is discarded when the CLI exits; use a file or Postgres.");
        std::process::exit(2);
    }

    let db = match Database::connect(&args.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
