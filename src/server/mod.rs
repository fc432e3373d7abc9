//! HTTP surface: JSON endpoints for recipes plus two HTML pages.

use crate::scrape::{PageFetcher, RecipeScraper};
use crate::store::RecipeStore;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

mod handlers;
mod response;

/// Shared handles every request handler gets.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub scraper: Arc<RecipeScraper>,
}

impl AppState {
    /// Scraped recipes are saved to the same store the endpoints read from.
    pub fn new(store: Arc<dyn RecipeStore>, fetcher: Arc<dyn PageFetcher>) -> Self {
        let scraper = Arc::new(RecipeScraper::new(fetcher, store.clone()));
        Self { store, scraper }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit_recipe_form", get(handlers::submit_recipe_form))
        .route("/scrape", post(handlers::scrape))
        .route("/recipes", get(handlers::list_recipes))
        .route("/submit_recipe", post(handlers::submit_recipe))
        .route("/delete_recipe/:title", post(handlers::delete_recipe))
        .with_state(state)
}

/// Serve the app on `bind_address` until the process is stopped.
pub async fn serve(bind_address: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
