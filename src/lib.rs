//! Scrape recipes from recipe websites, keep them as JSON files and serve them
//! over HTTP.
//!
//! ```rust,no_run
//! use recipe_keeper::{AppConfig, AppState, FileStore, HttpFetcher};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let fetcher = HttpFetcher::new(config.fetch_timeout(), &config.user_agent)?;
//! let state = AppState::new(
//!     Arc::new(FileStore::new(&config.recipes_dir)),
//!     Arc::new(fetcher),
//! );
//! recipe_keeper::server::serve(&config.bind_address, state).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod instructions;
pub mod model;
pub mod scrape;
pub mod server;
pub mod store;
pub mod submission;

pub use config::AppConfig;
pub use error::RecipeError;
pub use instructions::format_instructions;
pub use model::Recipe;
pub use scrape::{FetchedPage, HttpFetcher, PageFetcher, RecipeScraper, RecipeSource, ScrapedPage};
pub use server::{router, AppState};
pub use store::{storage_key, FileStore, MemoryStore, RecipeStore};
pub use submission::recipe_from_submission;
