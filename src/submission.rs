//! Turning a manually submitted JSON body into a [`Recipe`].

use crate::error::RecipeError;
use crate::instructions::format_instructions;
use crate::model::Recipe;
use serde_json::{Map, Value};

/// Fields a submission must carry, checked in this order
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "ingredients", "instructions", "total_time", "yields"];

fn required(field: &str) -> RecipeError {
    RecipeError::validation(format!("{field} is required."))
}

/// `null`, `false`, zero, and empty strings, lists or objects count as missing.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Validate a submission and build the recipe it describes.
pub fn recipe_from_submission(data: &Value) -> Result<Recipe, RecipeError> {
    let fields = data
        .as_object()
        .ok_or_else(|| RecipeError::validation("Request body must be a JSON object."))?;

    for field in REQUIRED_FIELDS {
        if fields.get(field).map_or(true, is_blank) {
            return Err(required(field));
        }
    }

    let ingredients = string_list(&fields["ingredients"], "ingredients", |block| {
        block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    })?;
    let instructions = string_list(&fields["instructions"], "instructions", format_instructions)?;

    Ok(Recipe {
        title: text(fields, "title")?,
        ingredients,
        instructions,
        total_time: Some(minutes(&fields["total_time"])?),
        yields: text(fields, "yields")?,
        image: image(fields)?,
    })
}

fn text(fields: &Map<String, Value>, field: &str) -> Result<String, RecipeError> {
    match &fields[field] {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(RecipeError::validation(format!("{field} must be a string."))),
    }
}

/// A list of strings, or one string split with `split_text`.
fn string_list(
    value: &Value,
    field: &str,
    split_text: impl Fn(&str) -> Vec<String>,
) -> Result<Vec<String>, RecipeError> {
    let list = match value {
        Value::String(s) => split_text(s),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                RecipeError::validation(format!("{field} must be a list of strings."))
            })?,
        _ => {
            return Err(RecipeError::validation(format!(
                "{field} must be a list of strings."
            )))
        }
    };

    if list.is_empty() {
        return Err(required(field));
    }
    Ok(list)
}

/// Coerce `total_time` to whole minutes: integers as is, floats truncated,
/// numeric strings parsed.
fn minutes(value: &Value) -> Result<u32, RecipeError> {
    let invalid = || RecipeError::validation("total_time must be a whole number of minutes.");

    let minutes = match value {
        Value::Number(n) => match n.as_u64() {
            Some(m) => m,
            None => match n.as_f64() {
                Some(f) if f >= 0.0 => f.trunc() as u64,
                _ => return Err(invalid()),
            },
        },
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    u32::try_from(minutes).map_err(|_| invalid())
}

fn image(fields: &Map<String, Value>) -> Result<Option<String>, RecipeError> {
    match fields.get("image") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RecipeError::validation("image must be a string.")),
    }
}
