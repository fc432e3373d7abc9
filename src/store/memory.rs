use super::{checked_key, not_found, RecipeStore};
use crate::error::RecipeError;
use crate::model::Recipe;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Keeps recipes in memory. Same keying rules as [`super::FileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<BTreeMap<String, Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn save(&self, recipe: &Recipe) -> Result<(), RecipeError> {
        let key = checked_key(&recipe.title)?;
        self.recipes.write().await.insert(key, recipe.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }

    async fn delete(&self, title: &str) -> Result<(), RecipeError> {
        let key = checked_key(title)?;
        match self.recipes.write().await.remove(&key) {
            Some(_) => Ok(()),
            None => Err(not_found()),
        }
    }
}
