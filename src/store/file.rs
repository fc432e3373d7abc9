use super::{checked_key, not_found, RecipeStore, RECIPE_EXTENSION};
use crate::error::RecipeError;
use crate::model::Recipe;
use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Stores each recipe as a pretty-printed JSON file in one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file a recipe with this title is stored in.
    pub fn path_for(&self, title: &str) -> Result<PathBuf, RecipeError> {
        let key = checked_key(title)?;
        Ok(self.dir.join(format!("{key}.{RECIPE_EXTENSION}")))
    }
}

fn to_pretty_json(recipe: &Recipe) -> Result<Vec<u8>, RecipeError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    recipe.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl RecipeStore for FileStore {
    async fn save(&self, recipe: &Recipe) -> Result<(), RecipeError> {
        let path = self.path_for(&recipe.title)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, to_pretty_json(recipe)?).await?;
        info!("Recipe saved to {}", path.display());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Recipe directory {} does not exist yet", self.dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_recipe = path
                .extension()
                .is_some_and(|ext| ext == RECIPE_EXTENSION);
            if is_recipe && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        // by key, not by file name: "a.json" must list before "a-b.json"
        paths.sort_by(|a, b| a.file_stem().cmp(&b.file_stem()));

        let mut recipes = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = tokio::fs::read(&path).await?;
            let recipe: Recipe = serde_json::from_slice(&contents).map_err(|e| {
                RecipeError::Storage(format!("{}: {}", path.display(), e))
            })?;
            recipes.push(recipe);
        }
        Ok(recipes)
    }

    async fn delete(&self, title: &str) -> Result<(), RecipeError> {
        let path = self.path_for(title)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Recipe deleted: {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
