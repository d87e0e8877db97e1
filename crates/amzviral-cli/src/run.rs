//! Command handlers. Results go to stdout; logs go to stderr.

use std::sync::Arc;
use std::time::Duration;

use amzviral_core::{AppConfig, Category, ProductRecord};
use amzviral_messages::{render_messages, RenderedMessages};
use amzviral_scraper::{AmazonClient, Discovery, DiscoveryTarget};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// One product with both renderings, as printed by `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderedProduct {
    pub product: ProductRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub messages: RenderedMessages,
}

pub(crate) fn run_categories() {
    for category in Category::ALL {
        let info = category.info();
        println!(
            "{:<12} {} {} - {}",
            info.id, info.icon, info.name, info.description
        );
    }
    println!("{:<12} also: `all` (every category) and `hot` (today's deals)", "");
}

/// Discovers up to `limit` products and prints both messages for each.
///
/// # Errors
///
/// Returns an error for an unknown category, a zero limit, a blank tag, or
/// when the HTTP client cannot be built.
pub(crate) async fn run_discover(
    config: &AppConfig,
    category: &str,
    tag: &str,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let target: DiscoveryTarget = category.parse().map_err(anyhow::Error::msg)?;
    if limit == 0 {
        anyhow::bail!("--limit must be at least 1");
    }

    tracing::info!(%target, limit, "discovering products");
    let client = Arc::new(AmazonClient::from_config(config)?);
    let discovery = Discovery::new(
        client,
        Duration::from_millis(config.discovery_category_pause_ms),
    );
    let discovered = discovery.run(target, limit).await;
    if discovered.is_empty() {
        anyhow::bail!("no products found for '{target}'");
    }

    let mut rng = StdRng::from_os_rng();
    let mut rendered = Vec::with_capacity(discovered.len());
    for item in discovered {
        let messages = render_messages(&item.product, tag, &mut rng)?;
        rendered.push(RenderedProduct {
            product: item.product,
            category: Some(item.category),
            messages,
        });
    }

    print_rendered(&rendered, json)
}

/// Scrapes one product page and prints both messages.
///
/// # Errors
///
/// Returns an error when the URL carries no ASIN, the page cannot be fetched
/// or parsed, or the tag is blank.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    url: &str,
    tag: &str,
    json: bool,
) -> anyhow::Result<()> {
    tracing::info!(url, "scraping product page");
    let client = AmazonClient::from_config(config)?;
    let product = client.scrape_product(url).await?;
    let messages = render_messages(&product, tag, &mut StdRng::from_os_rng())?;

    print_rendered(
        &[RenderedProduct {
            product,
            category: None,
            messages,
        }],
        json,
    )
}

fn print_rendered(rendered: &[RenderedProduct], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rendered)?);
    } else {
        for item in rendered {
            println!("{}", format_text(item));
        }
    }
    Ok(())
}

pub(crate) fn format_text(item: &RenderedProduct) -> String {
    let header = match &item.category {
        Some(category) => format!("== {} [{category}] ==", item.product.title),
        None => format!("== {} ==", item.product.title),
    };
    format!(
        "{header}\n{}\n\n--- WhatsApp ---\n{}\n\n--- Telegram ---\n{}\n",
        item.product.canonical_url, item.messages.whatsapp_message, item.messages.telegram_message
    )
}
