//! Inventory-driven recipe generation.
//!
//! [`RecipeGenerator`] asks the model for three recipes built from the
//! ingredients on hand. When no client is available, the request fails, or
//! the reply is not the expected JSON, it falls back to a small set of
//! built-in recipes chosen from the inventory names. Generation itself never
//! fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::chat::{ChatProvider, ChatRequest, SharedChatProvider};
use crate::error::{LlmError, Result};

/// An item in the kitchen inventory.
///
/// Only the fields used to build the prompt are kept; anything else in the
/// source record (ids, categories, expiry dates) is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Item name, e.g. "Banana".
    pub name: String,
    /// Amount on hand.
    #[serde(default)]
    pub quantity: f64,
    /// Unit for `quantity`, e.g. "pcs" or "g".
    #[serde(default)]
    pub unit: String,
}

impl FoodItem {
    /// Creates a new inventory item.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A generated (or fallback) recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe title.
    pub title: String,
    /// One-line subtitle.
    pub subtitle: String,
    /// Emoji shown next to the title.
    pub emoji: String,
    /// Cooking time in minutes.
    pub cook_time: u32,
    /// Number of servings.
    pub servings: u32,
    /// Ingredient lines.
    pub ingredients: Vec<String>,
    /// Ordered cooking steps.
    pub instructions: Vec<String>,
    /// Meal category (Breakfast, Lunch, Dinner, Snack, Dessert).
    pub category: String,
    /// Difficulty (Easy, Medium, Hard).
    pub difficulty: String,
    /// Estimated rating, 4.0 to 5.0.
    pub rating: f64,
    /// Estimated number of reviews.
    pub review_count: u32,
    /// Estimated calories per serving.
    pub calories: u32,
    /// Short description.
    pub description: String,
}

/// Generates recipes from an inventory through a [`ChatProvider`].
#[derive(Debug)]
pub struct RecipeGenerator<P = SharedChatProvider> {
    provider: Option<P>,
    model: String,
    temperature: f32,
}

impl<P: ChatProvider> RecipeGenerator<P> {
    /// Model used for recipe generation.
    pub const DEFAULT_MODEL: &'static str = "hermes";
    /// Sampling temperature used for recipe generation.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Creates a generator backed by `provider`.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider: Some(provider),
            model: Self::DEFAULT_MODEL.to_owned(),
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    /// Creates a generator without a client; it always returns fallback recipes.
    #[must_use]
    pub fn disconnected() -> Self {
        Self {
            provider: None,
            model: Self::DEFAULT_MODEL.to_owned(),
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Whether a client is attached.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.provider.is_some()
    }

    /// Generates recipes, falling back to built-in ones on any failure.
    pub async fn generate(&self, items: &[FoodItem]) -> Vec<Recipe> {
        match self.try_generate(items).await {
            Ok(recipes) => recipes,
            Err(err) => {
                warn!(error = %err, "recipe generation failed, using fallback recipes");
                fallback_recipes(items)
            }
        }
    }

    /// Generates recipes without falling back.
    ///
    /// # Errors
    ///
    /// Fails when no client is attached, the request fails, or the reply is
    /// not a JSON object.
    pub async fn try_generate(&self, items: &[FoodItem]) -> Result<Vec<Recipe>> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| LlmError::internal("no completion client configured"))?;

        let request = ChatRequest::new(self.model.as_str())
            .prompt(build_prompt(items))
            .temperature(self.temperature);

        debug!(items = items.len(), model = %self.model, "requesting recipes");
        let content = provider.chat(&request).await?.into_text()?;
        let recipes = parse_recipes(&content)?;
        debug!(recipes = recipes.len(), "parsed generated recipes");

        Ok(recipes)
    }
}

/// Builds the recipe prompt for the given inventory.
#[must_use]
pub fn build_prompt(items: &[FoodItem]) -> String {
    let inventory = items
        .iter()
        .map(|item| format!("{} ({} {})", item.name, item.quantity, item.unit))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
You are a professional chef and nutritionist. Based on these available ingredients in my kitchen:

{inventory}

Generate 3 creative, delicious, and practical recipes that I can make with these ingredients. For each recipe, provide:

1. Title and subtitle
2. Appropriate emoji
3. Cook time in minutes
4. Number of servings
5. List of ingredients (use available items + common pantry staples like salt, pepper, oil, etc.)
6. Step-by-step cooking instructions
7. Category (Breakfast, Lunch, Dinner, Snack, Dessert)
8. Difficulty level (Easy, Medium, Hard)
9. Estimated rating (4.0-5.0)
10. Estimated review count (50-500)
11. Estimated calories per serving
12. Brief description

Format the response as JSON with this structure:
{{
  "recipes": [
    {{
      "title": "Recipe Title",
      "subtitle": "Brief subtitle",
      "emoji": "🍳",
      "cookTime": 20,
      "servings": 4,
      "ingredients": ["ingredient 1", "ingredient 2"],
      "instructions": ["step 1", "step 2"],
      "category": "Dinner",
      "difficulty": "Easy",
      "rating": 4.5,
      "reviewCount": 127,
      "calories": 320,
      "description": "Brief description"
    }}
  ]
}}

Make sure the recipes are practical, delicious, and use the available ingredients creatively.
"#
    )
}

/// Parses a model reply of the form `{"recipes": [...]}`.
///
/// Missing, empty, or zero fields take their defaults. A missing or falsy
/// `recipes` value yields an empty list.
///
/// # Errors
///
/// Fails when the content (after stripping Markdown code fences) is not a
/// JSON object, when `recipes` is truthy but not an array, or when an entry
/// is not an object.
pub fn parse_recipes(content: &str) -> Result<Vec<Recipe>> {
    let parsed: Value = serde_json::from_str(strip_code_fence(content))?;

    let root = match parsed {
        Value::Object(root) => root,
        other => {
            return Err(LlmError::response_format("a JSON object", json_kind(&other)).into());
        }
    };

    let entries = match root.get("recipes") {
        Some(Value::Array(entries)) => entries,
        Some(other) if is_truthy(other) => {
            return Err(
                LlmError::response_format("a `recipes` array", json_kind(other)).into(),
            );
        }
        _ => return Ok(Vec::new()),
    };

    entries
        .iter()
        .map(|entry| -> Result<Recipe> {
            if entry.is_object() {
                Ok(recipe_from_value(entry))
            } else {
                Err(LlmError::response_format("a recipe object", json_kind(entry)).into())
            }
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    match rest.split_once('\n') {
        Some((_lang, body)) => body.trim(),
        None => rest.trim(),
    }
}

fn recipe_from_value(entry: &Value) -> Recipe {
    let text = |key: &str, default: &str| {
        entry
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_owned()
    };
    let count = |key: &str, default: u32| entry.get(key).and_then(positive_u32).unwrap_or(default);
    let lines = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    };

    Recipe {
        title: text("title", "Untitled Recipe"),
        subtitle: text("subtitle", "Delicious recipe"),
        emoji: text("emoji", "🍳"),
        cook_time: count("cookTime", 30),
        servings: count("servings", 4),
        ingredients: lines("ingredients"),
        instructions: lines("instructions"),
        category: text("category", "Dinner"),
        difficulty: text("difficulty", "Medium"),
        rating: entry
            .get("rating")
            .and_then(number)
            .filter(|r| *r > 0.0)
            .unwrap_or(4.5),
        review_count: count("reviewCount", 100),
        calories: count("calories", 300),
        description: text("description", "A delicious recipe"),
    }
}

fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn positive_u32(value: &Value) -> Option<u32> {
    number(value)
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32)
}

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_owned()).collect()
}

/// Built-in recipes chosen from the inventory names.
///
/// Vegetables (carrot, onion, tomato) add a stir-fry, fruit (apple, banana,
/// orange) a fruit salad, and bread a sandwich. With no match a generic meal
/// is returned, so the list is never empty.
#[must_use]
pub fn fallback_recipes(items: &[FoodItem]) -> Vec<Recipe> {
    let names = items
        .iter()
        .map(|item| item.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    let has_any = |needles: &[&str]| needles.iter().any(|n| names.contains(n));

    let mut recipes = Vec::new();

    if has_any(&["carrot", "onion", "tomato"]) {
        recipes.push(Recipe {
            title: "Quick Vegetable Stir-Fry".to_owned(),
            subtitle: "Fresh and healthy in minutes".to_owned(),
            emoji: "🥬".to_owned(),
            cook_time: 15,
            servings: 2,
            ingredients: strings(&[
                "2 carrots, sliced",
                "1 onion, chopped",
                "2 tomatoes, diced",
                "2 tbsp olive oil",
                "Salt and pepper to taste",
                "1 tsp garlic powder",
            ]),
            instructions: strings(&[
                "Heat oil in a large pan over medium heat",
                "Add onions and cook until translucent",
                "Add carrots and cook for 3-4 minutes",
                "Add tomatoes and cook for 2-3 minutes",
                "Season with salt, pepper, and garlic powder",
                "Serve hot",
            ]),
            category: "Dinner".to_owned(),
            difficulty: "Easy".to_owned(),
            rating: 4.3,
            review_count: 89,
            calories: 180,
            description: "A quick and healthy vegetable stir-fry perfect for busy weeknights."
                .to_owned(),
        });
    }

    if has_any(&["apple", "banana", "orange"]) {
        recipes.push(Recipe {
            title: "Fresh Fruit Salad".to_owned(),
            subtitle: "Sweet and refreshing".to_owned(),
            emoji: "🍎".to_owned(),
            cook_time: 10,
            servings: 4,
            ingredients: strings(&[
                "2 apples, diced",
                "2 bananas, sliced",
                "1 orange, segmented",
                "1 tbsp honey",
                "1 tsp lemon juice",
                "Mint leaves for garnish",
            ]),
            instructions: strings(&[
                "Wash and prepare all fruits",
                "Dice apples and slice bananas",
                "Segment the orange",
                "Combine all fruits in a bowl",
                "Drizzle with honey and lemon juice",
                "Garnish with mint leaves and serve",
            ]),
            category: "Snack".to_owned(),
            difficulty: "Easy".to_owned(),
            rating: 4.7,
            review_count: 156,
            calories: 120,
            description:
                "A refreshing fruit salad that celebrates the natural sweetness of fresh fruits."
                    .to_owned(),
        });
    }

    if has_any(&["bread"]) {
        recipes.push(Recipe {
            title: "Classic Sandwich".to_owned(),
            subtitle: "Simple and satisfying".to_owned(),
            emoji: "🥪".to_owned(),
            cook_time: 5,
            servings: 1,
            ingredients: strings(&[
                "2 slices of bread",
                "Lettuce leaves",
                "Tomato slices",
                "Cheese (optional)",
                "Mayonnaise or mustard",
                "Salt and pepper",
            ]),
            instructions: strings(&[
                "Lay out two slices of bread",
                "Spread mayonnaise or mustard on both slices",
                "Add lettuce, tomato, and cheese",
                "Season with salt and pepper",
                "Close the sandwich and cut in half",
                "Serve immediately",
            ]),
            category: "Lunch".to_owned(),
            difficulty: "Easy".to_owned(),
            rating: 4.2,
            review_count: 234,
            calories: 280,
            description: "A classic sandwich that never goes out of style.".to_owned(),
        });
    }

    if recipes.is_empty() {
        recipes.push(Recipe {
            title: "Simple Meal".to_owned(),
            subtitle: "Make the most of your ingredients".to_owned(),
            emoji: "🍽️".to_owned(),
            cook_time: 20,
            servings: 2,
            ingredients: strings(&["Available ingredients", "Salt and pepper", "Cooking oil"]),
            instructions: strings(&[
                "Prepare your available ingredients",
                "Season with salt and pepper",
                "Cook using your preferred method",
                "Serve and enjoy",
            ]),
            category: "Dinner".to_owned(),
            difficulty: "Easy".to_owned(),
            rating: 4.0,
            review_count: 50,
            calories: 250,
            description: "A simple meal using your available ingredients.".to_owned(),
        });
    }

    recipes
}
