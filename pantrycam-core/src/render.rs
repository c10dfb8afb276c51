//! Markup for pipeline results.
//!
//! Everything here is a pure function of its input. Injecting the markup into a
//! live display is the caller's business.

use crate::markdown::markdown_to_html;
use crate::types::{IngredientList, PipelineOutcome, RecipeResultSet, RecipeSummary};

/// Ingredient lines shown per recipe card before collapsing into "+ N more".
pub const MAX_CARD_INGREDIENTS: usize = 8;

/// Recipes requested per lookup; the heading advertises this number.
pub const TOP_RECIPES: usize = 5;

const VALIDATION_MESSAGE: &str = "Please upload a photo or describe your ingredients first.";
const NO_INGREDIENTS_MESSAGE: &str =
    "No ingredients detected. Try a clearer photo or a more detailed description.";
const NO_RECIPES_MESSAGE: &str =
    "No recipes matched these ingredients. Try adding a few more ingredients.";
const SEARCHING_MESSAGE: &str = "Ingredients detected, finding recipes...";

const TROUBLESHOOTING: &str = "### Troubleshooting
* Check that the analysis server is running and reachable.
* Make sure the photo is a common image format (JPEG or PNG).
* Try again in a few seconds; the recipe service may be busy.
---
*If the problem persists, check the client logs for details.*";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_ingredients(ingredients: &IngredientList) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"ingredients\">\n");
    out.push_str(&format!(
        "<h2>Detected Ingredients ({})</h2>\n",
        ingredients.len()
    ));
    out.push_str("<ul>\n");
    for name in ingredients.iter() {
        out.push_str(&format!("<li>{}</li>\n", escape_html(name)));
    }
    out.push_str("</ul>\n");
    out.push_str("</section>\n");
    out
}

/// Intermediate state shown between the two calls.
pub fn render_searching(ingredients: &IngredientList) -> String {
    let mut out = render_ingredients(ingredients);
    out.push_str(&notice("loading", SEARCHING_MESSAGE));
    out
}

pub fn render_recipe_card(rank: usize, recipe: &RecipeSummary) -> String {
    let mut out = String::new();
    out.push_str("<article class=\"recipe-card\">\n");
    out.push_str(&format!("<h3>{}. {}</h3>\n", rank, escape_html(&recipe.title)));
    out.push_str("<ul>\n");
    for name in recipe.ingredients.iter().take(MAX_CARD_INGREDIENTS) {
        out.push_str(&format!("<li>{}</li>\n", escape_html(name)));
    }
    let hidden = recipe.ingredients.len().saturating_sub(MAX_CARD_INGREDIENTS);
    if hidden > 0 {
        out.push_str(&format!(
            "<li class=\"more\">+ {hidden} more ingredients</li>\n"
        ));
    }
    out.push_str("</ul>\n");
    out.push_str("</article>\n");
    out
}

pub fn render_recipes(results: &RecipeResultSet) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"recipes\">\n");
    out.push_str(&format!(
        "<h2>Top {} Recipes (from {} matches)</h2>\n",
        TOP_RECIPES, results.total_found
    ));
    for (i, recipe) in results.recipes.iter().enumerate() {
        out.push_str(&render_recipe_card(i + 1, recipe));
    }
    out.push_str("</section>\n");
    out
}

/// Error panel. The hints are fixed text and never depend on the message.
pub fn render_error(message: &str) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"error\">\n");
    out.push_str("<h2>Something went wrong</h2>\n");
    out.push_str(&format!("<p>{}</p>\n", escape_html(message)));
    out.push_str(&markdown_to_html(TROUBLESHOOTING));
    out.push_str("\n</section>\n");
    out
}

pub fn render_outcome(outcome: &PipelineOutcome) -> String {
    match outcome {
        PipelineOutcome::ValidationFailed => notice("warning", VALIDATION_MESSAGE),
        PipelineOutcome::IngredientsEmpty => notice("warning", NO_INGREDIENTS_MESSAGE),
        PipelineOutcome::RecipesEmpty { ingredients } => {
            let mut out = render_ingredients(ingredients);
            out.push_str(&notice("info", NO_RECIPES_MESSAGE));
            out
        }
        PipelineOutcome::Success {
            ingredients,
            recipes,
        } => {
            let mut out = render_ingredients(ingredients);
            out.push_str(&render_recipes(recipes));
            out
        }
        PipelineOutcome::Failed { reason } => render_error(reason),
    }
}

fn notice(kind: &str, text: &str) -> String {
    format!("<p class=\"notice {kind}\">{}</p>\n", escape_html(text))
}
