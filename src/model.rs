use serde::{Deserialize, Serialize};

/// A stored recipe.
///
/// Scraped recipes keep whatever the page provided, so `total_time` may be
/// `None` and `yields` may be empty. Manually submitted recipes always carry
/// every field except `image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Total time in minutes
    pub total_time: Option<u32>,
    pub yields: String,
    pub image: Option<String>,
}
