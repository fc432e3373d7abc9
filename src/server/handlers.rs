use super::response::{error_body, message_body};
use super::AppState;
use crate::error::RecipeError;
use crate::model::Recipe;
use crate::submission::recipe_from_submission;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

const INDEX_PAGE: &str = include_str!("templates/index.html");
const SUBMIT_RECIPE_PAGE: &str = include_str!("templates/submit_recipe.html");

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    url: Option<String>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn submit_recipe_form() -> Html<&'static str> {
    Html(SUBMIT_RECIPE_PAGE)
}

/// Scrape the posted URL. Failures on the remote side are reported in the
/// body with status 200; only a missing URL or a local failure changes the
/// status.
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let url = payload
        .ok()
        .and_then(|Json(request)| request.url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    let Some(url) = url else {
        return RecipeError::validation("No URL provided").into_response();
    };

    match state.scraper.scrape(&url).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(RecipeError::Upstream(message)) => {
            warn!("Scraping {} failed: {}", url, message);
            error_body(StatusCode::OK, message)
        }
        Err(e) => e.into_response(),
    }
}

pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, RecipeError> {
    Ok(Json(state.store.list().await?))
}

pub async fn submit_recipe(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, RecipeError> {
    let Json(data) = payload.map_err(|e| {
        RecipeError::validation(format!("Request body must be a JSON object: {}", e.body_text()))
    })?;

    let recipe = recipe_from_submission(&data)?;
    state.store.save(&recipe).await?;
    info!("Recipe \"{}\" submitted", recipe.title);

    Ok(message_body("Recipe saved successfully!"))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Response, RecipeError> {
    state.store.delete(&title).await?;
    Ok(message_body("Recipe deleted successfully!"))
}
