use super::normalize::{
    clean_text, decode_html_symbols, join_steps, normalize_yields, parse_minutes, sum_minutes,
};
use super::{selector, Extractor, ParsingContext, RecipeFields};
use crate::error::RecipeError;
use log::debug;
use scraper::{ElementRef, Html};

pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&selector("[itemscope]")).find(|element| {
            element.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Elements carrying `prop` that belong to `root` itself rather than to a
    /// nested item (an author's `name`, a review's `image`, ...).
    fn own_props<'a>(&self, root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
        root.select(&selector("[itemprop]"))
            .filter(|el| {
                el.value()
                    .attr("itemprop")
                    .is_some_and(|props| props.split_whitespace().any(|p| p == prop))
            })
            .filter(|el| nearest_scope(*el).is_some_and(|scope| scope.id() == root.id()))
            .collect()
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        self.own_props(root, prop)
            .into_iter()
            .map(prop_value)
            .find(|value| !value.is_empty())
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        self.own_props(root, prop)
            .into_iter()
            .map(prop_value)
            .filter(|value| !value.is_empty())
            .collect()
    }

    fn instruction_steps(&self, root: ElementRef) -> Vec<String> {
        let item_selector = selector("li");
        let mut steps = Vec::new();
        for el in self.own_props(root, "recipeInstructions") {
            let items: Vec<String> = el.select(&item_selector).map(element_text).collect();
            if items.is_empty() {
                steps.push(prop_value(el));
            } else {
                steps.extend(items);
            }
        }
        steps
    }
}

fn nearest_scope(element: ElementRef) -> Option<ElementRef> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().attr("itemscope").is_some())
}

fn element_text(element: ElementRef) -> String {
    decode_html_symbols(&clean_text(&element.text().collect::<Vec<_>>().join(" ")))
}

/// Value of a microdata property, following where schema.org puts it for
/// each element kind.
fn prop_value(element: ElementRef) -> String {
    let el = element.value();
    let attr = match el.name() {
        "meta" => el.attr("content"),
        "img" | "audio" | "video" | "source" => el.attr("src"),
        "a" | "link" => el.attr("href"),
        "time" => el.attr("datetime"),
        "data" | "meter" => el.attr("value"),
        _ => el.attr("content"),
    };
    match attr {
        Some(value) => decode_html_symbols(value.trim()),
        None => element_text(element),
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeFields, RecipeError> {
        debug!("Attempting to extract recipe using MicroData extractor");

        // Only a schema.org Recipe scope is trusted; page-wide itemprops pick up
        // site titles and author bios.
        let container = self
            .find_recipe_container(&context.document)
            .ok_or_else(|| RecipeError::upstream("No MicroData Recipe container found"))?;

        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(container, "ingredients");
        }

        let total_time = self
            .get_itemprop(container, "totalTime")
            .and_then(|t| parse_minutes(&t))
            .or_else(|| {
                let prep = self
                    .get_itemprop(container, "prepTime")
                    .and_then(|t| parse_minutes(&t));
                let cook = self
                    .get_itemprop(container, "cookTime")
                    .and_then(|t| parse_minutes(&t));
                sum_minutes(prep, cook)
            });

        let fields = RecipeFields {
            name: self.get_itemprop(container, "name"),
            ingredients,
            instructions: join_steps(self.instruction_steps(container)),
            total_time,
            yields: self
                .get_itemprop(container, "recipeYield")
                .map(|y| normalize_yields(&y))
                .filter(|y| !y.is_empty()),
            image: self.get_itemprop(container, "image"),
        };
        debug!("MicroData extractor found: {:?}", fields);
        Ok(fields)
    }
}
