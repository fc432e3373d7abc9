use super::normalize::{
    decode_html_symbols, join_steps, normalize_yields, parse_minutes, sum_minutes,
};
use super::{selector, Extractor, ParsingContext, RecipeFields};
use crate::error::RecipeError;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<String>,
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient", alias = "ingredients")]
    recipe_ingredient: Option<Ingredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<Instructions>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    #[serde(rename = "totalTime")]
    total_time: Option<Duration>,
    #[serde(rename = "prepTime")]
    prep_time: Option<Duration>,
    #[serde(rename = "cookTime")]
    cook_time: Option<Duration>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
    #[serde(rename = "contentUrl")]
    content_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    String(String),
    Object(ImageObject),
    Multiple(Vec<ImageType>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Ingredients {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Instructions {
    String(String),
    Multiple(Vec<InstructionItem>),
    Single(InstructionItem),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionItem {
    Text(String),
    // must come before Step, which accepts any object
    Section(HowToSection),
    Nested(Vec<InstructionItem>),
    Step(HowToStep),
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<InstructionItem>,
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    String(String),
    Number(serde_json::Number),
    Array(Vec<RecipeYield>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Duration {
    String(String),
    Minutes(f64),
}

impl Duration {
    fn minutes(&self) -> Option<u32> {
        match self {
            Duration::String(s) => parse_minutes(s),
            Duration::Minutes(m) => parse_minutes(&m.to_string()),
        }
    }
}

impl ImageType {
    fn first_url(&self) -> Option<String> {
        let url = match self {
            ImageType::String(url) => Some(decode_html_symbols(url)),
            ImageType::Object(obj) => obj.url.clone().or_else(|| obj.content_url.clone()),
            ImageType::Multiple(images) => images.iter().find_map(ImageType::first_url),
        };
        url.filter(|url| !url.trim().is_empty())
    }
}

impl InstructionItem {
    fn collect_steps(self, steps: &mut Vec<String>) {
        match self {
            InstructionItem::Text(text) => steps.push(text),
            InstructionItem::Section(section) => {
                for item in section.item_list_element {
                    item.collect_steps(steps);
                }
            }
            InstructionItem::Nested(items) => {
                for item in items {
                    item.collect_steps(steps);
                }
            }
            // Prefer text over name
            InstructionItem::Step(step) => {
                if let Some(text) = step.text.or(step.name) {
                    steps.push(text);
                }
            }
        }
    }
}

impl Instructions {
    fn into_text(self) -> String {
        let mut steps = Vec::new();
        match self {
            Instructions::String(text) => return decode_html_symbols(&text),
            Instructions::Multiple(items) => {
                for item in items {
                    item.collect_steps(&mut steps);
                }
            }
            Instructions::Single(item) => item.collect_steps(&mut steps),
        }
        join_steps(steps.iter().map(|step| decode_html_symbols(step)))
    }
}

impl RecipeYield {
    fn into_text(self) -> Option<String> {
        match self {
            RecipeYield::String(s) => Some(s),
            RecipeYield::Number(n) => Some(n.to_string()),
            RecipeYield::Array(entries) => {
                let texts: Vec<String> = entries.into_iter().filter_map(Self::into_text).collect();
                // prefer the descriptive entry ("15 cookies") over a bare count
                texts
                    .iter()
                    .find(|s| s.contains(char::is_alphabetic))
                    .or_else(|| texts.first())
                    .cloned()
            }
        }
    }
}

impl From<JsonLdRecipe> for RecipeFields {
    fn from(recipe: JsonLdRecipe) -> Self {
        let ingredients = match recipe.recipe_ingredient {
            Some(Ingredients::Multiple(items)) => items,
            Some(Ingredients::Single(item)) => item.lines().map(str::to_string).collect(),
            None => Vec::new(),
        };

        let total_time = recipe
            .total_time
            .as_ref()
            .and_then(Duration::minutes)
            .or_else(|| {
                let prep = recipe.prep_time.as_ref().and_then(Duration::minutes);
                let cook = recipe.cook_time.as_ref().and_then(Duration::minutes);
                sum_minutes(prep, cook)
            });

        RecipeFields {
            name: recipe
                .name
                .map(|name| decode_html_symbols(name.trim()))
                .filter(|name| !name.is_empty()),
            ingredients: ingredients
                .iter()
                .map(|ing| decode_html_symbols(ing.trim()))
                .filter(|ing| !ing.is_empty())
                .collect(),
            instructions: recipe
                .recipe_instructions
                .map(Instructions::into_text)
                .unwrap_or_default(),
            total_time,
            yields: recipe
                .recipe_yield
                .and_then(RecipeYield::into_text)
                .map(|y| normalize_yields(&decode_html_symbols(&y)))
                .filter(|y| !y.is_empty()),
            image: recipe.image.as_ref().and_then(ImageType::first_url),
        }
    }
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Find the first Recipe node in a JSON-LD document, looking through
/// top-level arrays and `@graph` lists.
fn find_recipe(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_recipe),
        Value::Object(_) if is_recipe_type(value) => Some(value),
        Value::Object(_) => value.get("@graph").and_then(find_recipe),
        _ => None,
    }
}

fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Remove any HTML comments that might be present
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    // Remove trailing commas before closing brackets
    let mut out = String::with_capacity(cleaned.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = cleaned.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                debug!("Dropping trailing comma in JSON-LD");
                continue;
            }
        }
        out.push(c);
    }
    out
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeFields, RecipeError> {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);
        let script_selector = selector("script[type='application/ld+json']");

        for (index, script) in context.document.select(&script_selector).enumerate() {
            let cleaned_json = sanitize_json(&script.inner_html());
            let json_ld = match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json_ld) => json_ld,
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to parse JSON-LD {}: {}", index, e);
                    continue;
                }
            };

            let Some(recipe) = find_recipe(&json_ld) else {
                debug!("JsonLdExtractor: No recipe found in JSON-LD {}", index);
                continue;
            };

            match serde_json::from_value::<JsonLdRecipe>(recipe.clone()) {
                Ok(recipe) => return Ok(RecipeFields::from(recipe)),
                Err(e) => {
                    debug!("JsonLdExtractor: Failed to read recipe {}: {}", index, e);
                }
            }
        }

        Err(RecipeError::upstream(
            "No valid recipe found in any JSON-LD script",
        ))
    }
}
