// storefront-client/examples/browse.rs
// Page through a product list endpoint from the command line.

use std::time::Duration;

use anyhow::Context;
use storefront_client::{Config, StorefrontClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <base_url> <api_key> [pages]", args[0]);
        println!(
            "  Example: {} https://host/api/products/v1 my-api-key 3",
            args[0]
        );
        return Ok(());
    }

    let pages: usize = args
        .get(3)
        .map(|arg| arg.parse())
        .transpose()
        .context("pages must be a number")?
        .unwrap_or(3);

    let data_dir =
        std::env::var("STOREFRONT_DATA_DIR").unwrap_or_else(|_| "./storefront-cache".to_string());

    let config = Config::new(&args[1], &args[2], data_dir).with_timeout(Duration::from_secs(15));
    let client = StorefrontClient::new(config).await?;

    for _ in 0..pages {
        if !client.is_more_available().await {
            tracing::info!("catalog complete");
            break;
        }

        match client.fetch_next_page().await {
            Ok(items) => {
                for item in &items {
                    println!("{:<12} {:>8}  {}", item.id, item.price, item.name);
                }
                tracing::info!(
                    new = items.len(),
                    total = client.current_items().await.len(),
                    "page merged"
                );
            }
            Err(e) => {
                tracing::error!("page fetch failed: {e}");
                break;
            }
        }
    }

    Ok(())
}
