//! Reading recipe fields out of a fetched HTML page.
//!
//! A page is parsed once into a [`ScrapedPage`], which then answers the
//! accessor contract of [`RecipeSource`]. Structured data is looked up in
//! JSON-LD first and schema.org microdata second.

use crate::error::RecipeError;
use log::debug;
use scraper::{Html, Selector};

mod json_ld;
mod microdata;
mod normalize;

pub use self::json_ld::JsonLdExtractor;
pub use self::microdata::MicroDataExtractor;

/// Recipe fields as found on a page, before they become a [`crate::Recipe`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFields {
    pub name: Option<String>,
    pub ingredients: Vec<String>,
    /// Instruction text, sentences separated by periods
    pub instructions: String,
    pub total_time: Option<u32>,
    pub yields: Option<String>,
    pub image: Option<String>,
}

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeFields, RecipeError>;
}

/// The accessors a scraped page offers.
pub trait RecipeSource {
    fn title(&self) -> Result<String, RecipeError>;
    fn ingredients(&self) -> Vec<String>;
    /// Instructions as one block of text
    fn instructions(&self) -> String;
    /// Total time in minutes
    fn total_time(&self) -> Option<u32>;
    fn yields(&self) -> String;
    fn image(&self) -> Option<String>;
}

/// A recipe page parsed from its HTML and source URL.
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    url: String,
    fields: RecipeFields,
}

impl ScrapedPage {
    pub fn parse(html: &str, url: &str) -> Result<Self, RecipeError> {
        let context = ParsingContext {
            url: url.to_string(),
            document: Html::parse_document(html),
        };

        let extractors: Vec<Box<dyn Extractor>> =
            vec![Box::new(JsonLdExtractor), Box::new(MicroDataExtractor)];

        for extractor in extractors {
            match extractor.parse(&context) {
                Ok(fields) => {
                    return Ok(Self {
                        url: context.url,
                        fields,
                    })
                }
                Err(e) => debug!("Extractor skipped {}: {}", context.url, e),
            }
        }

        Err(RecipeError::upstream("No recipe data found on the page"))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RecipeSource for ScrapedPage {
    fn title(&self) -> Result<String, RecipeError> {
        self.fields
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RecipeError::upstream("Recipe title not found on the page"))
    }

    fn ingredients(&self) -> Vec<String> {
        self.fields.ingredients.clone()
    }

    fn instructions(&self) -> String {
        self.fields.instructions.clone()
    }

    fn total_time(&self) -> Option<u32> {
        self.fields.total_time
    }

    fn yields(&self) -> String {
        self.fields.yields.clone().unwrap_or_default()
    }

    fn image(&self) -> Option<String> {
        self.fields.image.clone()
    }
}

pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}
