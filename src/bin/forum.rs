use anyhow::Context;
use clap::{Parser, Subcommand};
use qna_forum::db::{
    self,
    queries::categories::{seed_if_empty, DEV_DEFAULTS, STARTUP_DEFAULTS},
};
use qna_forum::server::app::run_server;
use qna_forum::settings::Settings;
use qna_forum::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Seed default categories if the catalog is empty
    Seed {
        /// Use the development category set
        #[clap(long)]
        dev: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::new().context("Failed to load settings")?;
    let pool = db::establish_connection(&settings.database_url)
        .context("DATABASE_URL is not a valid sqlite connection string")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            db::prepare_store(&pool).await;
            run_server(&settings, pool).await?;
        }
        Command::Migrate => {
            db::run_migrations(&pool).await?;
            tracing::info!("Migrations applied");
            pool.close().await;
        }
        Command::Seed { dev } => {
            db::run_migrations(&pool).await?;
            let names = if dev { &DEV_DEFAULTS } else { &STARTUP_DEFAULTS };
            let count = seed_if_empty(&pool, names).await?;
            if count == 0 {
                tracing::info!("Categories already exist, nothing seeded");
            } else {
                tracing::info!(count, "Seeded default categories");
            }
            pool.close().await;
        }
    }
    Ok(())
}
