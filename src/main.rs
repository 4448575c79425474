use std::sync::Arc;

use book_recs::{
    app::{LogNotifier, Session, Shelf},
    config::Config,
    services::HttpBookService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let service = HttpBookService::from_config(&config)?;
    tracing::info!(api_url = %service.api_url(), page_size = config.page_size, "Starting session");

    let mut session = Session::new(&config, Arc::new(service), Arc::new(LogNotifier));

    let status = session.load_catalog().await.clone();
    if let Some(message) = status.message() {
        tracing::warn!(status = ?status, "{}", message);
        return Ok(());
    }

    let shelf = session.shelf(Shelf::Catalog);
    for card in &shelf.cards {
        tracing::info!(
            title = %card.title,
            authors = %card.authors,
            categories = %card.categories,
            "Book"
        );
    }
    if let Some(indicator) = shelf.indicator {
        tracing::info!("{}", indicator);
    }

    Ok(())
}
