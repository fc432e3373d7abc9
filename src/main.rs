use log::info;
use recipe_keeper::{server, AppConfig, AppState, FileStore, HttpFetcher};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    info!("Storing recipes in {}", config.recipes_dir);

    let fetcher = HttpFetcher::new(config.fetch_timeout(), &config.user_agent)?;
    let store = FileStore::new(&config.recipes_dir);
    let state = AppState::new(Arc::new(store), Arc::new(fetcher));

    server::serve(&config.bind_address, state).await?;

    Ok(())
}
