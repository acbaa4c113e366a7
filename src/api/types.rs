//! Request and response types for the recommendation service.
//!
//! These types model the JSON bodies exchanged with the remote service:
//! the recommend form payload, the returned product cards, ingredient
//! suggestions, dietary options, and the health probe.

use serde::{Deserialize, Serialize};

/// Health probe response.
///
/// Returned by `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Service status string (e.g. "healthy").
    #[serde(default)]
    pub status: String,
    /// Whether the recommendation model is loaded on the server.
    #[serde(default)]
    pub recommender_loaded: bool,
}

/// Ingredient autocomplete response.
///
/// Returned by `GET /ingredient-suggestions?q=<query>&limit=<n>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Suggested ingredient names, best match first.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// The query the suggestions were computed for (echoed by the server).
    #[serde(default)]
    pub query: String,
}

/// Nutrition filters attached to a recommend request.
///
/// Numeric limits travel as strings (the form sends raw input values and
/// the server parses them); absent filters are omitted as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilters {
    /// Upper bound for kcal per 100g.
    pub max_calories: Option<String>,
    /// Upper bound for sugar grams per 100g.
    pub max_sugar: Option<String>,
    /// Lower bound for protein grams per 100g.
    pub min_protein: Option<String>,
    /// Acceptable NutriScore grades (A..E); empty means no restriction.
    #[serde(default)]
    pub nutri_score: Vec<String>,
    /// Allergens to exclude (gluten, milk, nuts, soy, eggs).
    #[serde(default)]
    pub exclude_allergens: Vec<String>,
}

impl RecipeFilters {
    /// Check whether any filter is set.
    pub fn is_empty(&self) -> bool {
        self.max_calories.is_none()
            && self.max_sugar.is_none()
            && self.min_protein.is_none()
            && self.nutri_score.is_empty()
            && self.exclude_allergens.is_empty()
    }
}

/// Payload for `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Free-text recipe description.
    pub recipe_text: String,
    /// Selected ingredient tags, in display order.
    pub ingredients: Vec<String>,
    /// Nutrition filters.
    pub filters: RecipeFilters,
}

/// A recommended product card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    #[serde(default)]
    pub name: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Match score in 0..1.
    #[serde(default)]
    pub score: f64,
    /// Energy in kcal per 100g.
    #[serde(default)]
    pub calories: u32,
    /// Protein grams per 100g.
    #[serde(default)]
    pub protein: f64,
    /// Sugar grams per 100g.
    #[serde(default)]
    pub sugar: f64,
    /// NutriScore grade letter (A..E).
    #[serde(default = "default_nutriscore")]
    pub nutriscore: String,
    /// Health rating label (Excellent/Good/Average/Poor).
    #[serde(rename = "healthCategory", default)]
    pub health_category: String,
    /// Comma-separated category list.
    #[serde(default)]
    pub categories: String,
    /// Ingredient list text.
    #[serde(default)]
    pub ingredients: String,
    /// How many of the requested ingredients this product matched.
    #[serde(default)]
    pub matched_ingredients: u32,
}

fn default_nutriscore() -> String {
    "C".to_string()
}

impl Product {
    /// Match score as a whole percentage.
    pub fn score_percent(&self) -> u32 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Categories truncated for card display.
    pub fn categories_truncated(&self, max_len: usize) -> String {
        if self.categories.chars().count() <= max_len {
            self.categories.clone()
        } else {
            let truncated: String = self.categories.chars().take(max_len).collect();
            format!("{}...", truncated)
        }
    }
}

/// Response from `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// The recommended products, best match first.
    #[serde(default)]
    pub recommendations: Vec<Product>,
    /// Total number of matches found.
    #[serde(default)]
    pub total_found: u32,
    /// Error message when the server rejected the request.
    #[serde(default)]
    pub error: Option<String>,
}

/// Available dietary filter options.
///
/// Returned by `GET /dietary-options` under an `options` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietaryOptions {
    /// Allergens the service can exclude.
    #[serde(default)]
    pub allergens: Vec<String>,
    /// NutriScore grades the service can filter on.
    #[serde(default)]
    pub nutriscore: Vec<String>,
}

impl DietaryOptions {
    /// Static fallback used when the server call fails.
    ///
    /// Matches the server's own fallback list.
    pub fn fallback() -> Self {
        Self {
            allergens: ["gluten", "milk", "nuts", "soy", "eggs"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            nutriscore: ["A", "B", "C", "D", "E"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Wrapper for the dietary options response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietaryOptionsResponse {
    /// The options payload.
    #[serde(default = "DietaryOptions::fallback")]
    pub options: DietaryOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_field_names() {
        let request = RecommendRequest {
            recipe_text: "tomato soup".to_string(),
            ingredients: vec!["tomato".to_string()],
            filters: RecipeFilters {
                max_calories: Some("300".to_string()),
                nutri_score: vec!["A".to_string()],
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["recipeText"], "tomato soup");
        assert_eq!(json["ingredients"][0], "tomato");
        assert_eq!(json["filters"]["maxCalories"], "300");
        assert_eq!(json["filters"]["nutriScore"][0], "A");
        assert_eq!(json["filters"]["maxSugar"], serde_json::Value::Null);
    }

    #[test]
    fn test_product_deserialization() {
        let json = r#"{
            "name": "Passata",
            "brand": "Mutti",
            "score": 0.82,
            "calories": 35,
            "protein": 1.4,
            "sugar": 4.9,
            "nutriscore": "A",
            "healthCategory": "Excellent",
            "categories": "Sauces, Tomato sauces",
            "ingredients": "tomatoes, salt",
            "matched_ingredients": 1
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Passata");
        assert_eq!(product.health_category, "Excellent");
        assert_eq!(product.matched_ingredients, 1);
        assert_eq!(product.score_percent(), 82);
    }

    #[test]
    fn test_product_missing_fields_use_defaults() {
        let product: Product = serde_json::from_str(r#"{"name": "Mystery"}"#).unwrap();
        assert_eq!(product.nutriscore, "C");
        assert_eq!(product.health_category, "");
        assert_eq!(product.score_percent(), 0);
    }

    #[test]
    fn test_categories_truncated() {
        let mut product: Product = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        product.categories = "a".repeat(120);
        let truncated = product.categories_truncated(100);
        assert_eq!(truncated.chars().count(), 103);
        assert!(truncated.ends_with("..."));

        product.categories = "short".to_string();
        assert_eq!(product.categories_truncated(100), "short");
    }

    #[test]
    fn test_filters_is_empty() {
        assert!(RecipeFilters::default().is_empty());

        let filters = RecipeFilters {
            min_protein: Some("10".to_string()),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }

    #[test]
    fn test_suggestion_response_defaults() {
        let response: SuggestionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.suggestions.is_empty());
        assert!(response.query.is_empty());
    }

    #[test]
    fn test_dietary_options_fallback() {
        let options = DietaryOptions::fallback();
        assert_eq!(options.allergens.len(), 5);
        assert_eq!(options.nutriscore, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_recommend_response_with_error() {
        let json = r#"{"error": "Recommender system not loaded", "recommendations": []}"#;
        let response: RecommendResponse = serde_json::from_str(json).unwrap();
        assert!(response.recommendations.is_empty());
        assert_eq!(
            response.error.as_deref(),
            Some("Recommender system not loaded")
        );
    }
}
