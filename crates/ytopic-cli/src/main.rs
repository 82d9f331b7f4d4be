mod keyword;
mod topics;

use clap::{Parser, Subcommand};

use crate::keyword::KeywordCommands;
use crate::topics::TopicsCommands;

#[derive(Debug, Parser)]
#[command(name = "ytopic-cli")]
#[command(about = "ytopic command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Keyword screening and one-off analysis
    Keyword {
        #[command(subcommand)]
        command: KeywordCommands,
    },
    /// Topic catalogue jobs
    Topics {
        #[command(subcommand)]
        command: TopicsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
    /// Insert sample categories and topics
    Seed,
}

async fn connect(config: &ytopic_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = ytopic_db::PoolConfig::from_app_config(config);
    Ok(ytopic_db::connect_pool(&config.database_url, pool_config).await?)
}

async fn run_db(command: DbCommands) -> anyhow::Result<()> {
    let config = ytopic_core::load_app_config()?;
    let pool = connect(&config).await?;

    match command {
        DbCommands::Migrate => {
            let applied = ytopic_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        DbCommands::Ping => {
            ytopic_db::ping(&pool).await?;
            println!("database ok");
        }
        DbCommands::Seed => {
            ytopic_db::run_migrations(&pool).await?;
            let summary = ytopic_db::seed_sample_data(&pool).await?;
            println!(
                "seeded {} categories, {} topics",
                summary.categories, summary.topics
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => run_db(command).await?,
        Some(Commands::Keyword { command }) => keyword::run(command).await?,
        Some(Commands::Topics { command }) => topics::run(command).await?,
        None => println!("ytopic-cli: try `ytopic-cli --help`"),
    }

    Ok(())
}
