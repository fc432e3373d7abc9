use crate::error::RecipeError;
use crate::instructions::format_instructions;
use crate::model::Recipe;
use crate::store::RecipeStore;
use log::{info, warn};
use std::sync::Arc;

pub mod fetcher;
pub mod page;

pub use self::fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use self::page::{RecipeSource, ScrapedPage};

/// Message returned when the recipe page answers with a non-success status
pub const FETCH_FAILED: &str = "Failed to retrieve the webpage";

/// Fetches recipe pages, reads them into [`Recipe`]s and stores the result.
pub struct RecipeScraper {
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn RecipeStore>,
}

impl RecipeScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, store: Arc<dyn RecipeStore>) -> Self {
        Self { fetcher, store }
    }

    /// Scrape `url` and store the recipe found there.
    ///
    /// Fetch and extraction problems come back as [`RecipeError::Upstream`];
    /// a failed save comes back as [`RecipeError::Storage`].
    pub async fn scrape(&self, url: &str) -> Result<Recipe, RecipeError> {
        let page = self.fetcher.fetch(url).await?;
        if !page.is_success() {
            warn!("Fetching {} returned status {}", url, page.status);
            return Err(RecipeError::upstream(FETCH_FAILED));
        }

        let source = ScrapedPage::parse(&page.body, url)?;
        let recipe = recipe_from_source(&source)?;

        self.store.save(&recipe).await?;
        info!("Scraped \"{}\" from {}", recipe.title, url);
        Ok(recipe)
    }
}

/// Build a recipe from the accessors of a scraped page.
pub fn recipe_from_source(source: &dyn RecipeSource) -> Result<Recipe, RecipeError> {
    Ok(Recipe {
        title: source.title()?,
        ingredients: source.ingredients(),
        instructions: format_instructions(&source.instructions()),
        total_time: source.total_time(),
        yields: source.yields(),
        image: source.image(),
    })
}
