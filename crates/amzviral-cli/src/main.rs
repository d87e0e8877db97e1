mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "amzviral-cli")]
#[command(about = "Discover Amazon India deals and render affiliate messages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the known product categories
    Categories,
    /// Discover products and render WhatsApp/Telegram messages for each
    Discover {
        /// A category id, `all`, or `hot`
        #[arg(long)]
        category: String,

        /// Affiliate tag appended to every product link
        #[arg(long)]
        tag: String,

        /// Maximum number of products
        #[arg(long, default_value_t = 5)]
        limit: usize,

        /// Print results as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Scrape one product page and render its messages
    Scrape {
        /// Any Amazon product URL carrying an ASIN
        url: String,

        /// Affiliate tag appended to the product link
        #[arg(long)]
        tag: String,

        /// Print the result as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = amzviral_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Categories) => run::run_categories(),
        Some(Commands::Discover {
            category,
            tag,
            limit,
            json,
        }) => run::run_discover(&config, &category, &tag, limit, json).await?,
        Some(Commands::Scrape { url, tag, json }) => {
            run::run_scrape(&config, &url, &tag, json).await?;
        }
        None => println!("amzviral-cli: try `categories`, `discover`, or `scrape`"),
    }

    Ok(())
}
