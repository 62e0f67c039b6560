use serde::{Deserialize, Serialize};

/// Coarse serving-size classification of a detected food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortionSize {
    S,
    M,
    L,
}

/// Macro/calorie estimate for a detected portion. All-or-nothing: a food item
/// either carries a complete value or none at all; the wire `null` maps to an
/// absent value, never to zeroed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionValue {
    #[serde(rename = "amount_g")]
    pub amount_grams: f64,
    pub kcal: f64,
    #[serde(rename = "protein")]
    pub protein_grams: f64,
    #[serde(rename = "fat")]
    pub fat_grams: f64,
    #[serde(rename = "carb")]
    pub carb_grams: f64,
}

/// One detected food item. Constructed only from a successful analyzer
/// response; the sequence for a photo is replaced wholesale on each analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub label: String,
    pub portion_size: PortionSize,
    #[serde(default)]
    pub nutrition: Option<NutritionValue>,
}

/// Success body of the analyze endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeResponse {
    pub items: Vec<MealItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_item() {
        let body = r#"{"items":[{"label":"ご飯","portion_size":"M",
            "nutrition":{"amount_g":150,"kcal":252,"protein":3.8,"fat":0.5,"carb":55.7}}]}"#;
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.items.len(), 1);
        let item = &response.items[0];
        assert_eq!(item.label, "ご飯");
        assert_eq!(item.portion_size, PortionSize::M);
        let nutrition = item.nutrition.as_ref().unwrap();
        assert_eq!(nutrition.amount_grams, 150.0);
        assert_eq!(nutrition.kcal, 252.0);
        assert_eq!(nutrition.protein_grams, 3.8);
        assert_eq!(nutrition.fat_grams, 0.5);
        assert_eq!(nutrition.carb_grams, 55.7);
    }

    #[test]
    fn null_nutrition_maps_to_absent() {
        let body = r#"{"items":[{"label":"wakame","portion_size":"S","nutrition":null}]}"#;
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.items[0].nutrition, None);
    }

    #[test]
    fn preserves_response_order() {
        let body = r#"{"items":[
            {"label":"rice","portion_size":"M","nutrition":null},
            {"label":"miso soup","portion_size":"S","nutrition":null},
            {"label":"salmon","portion_size":"L","nutrition":null}]}"#;
        let response: AnalyzeResponse = serde_json::from_str(body).unwrap();
        let labels: Vec<&str> = response.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["rice", "miso soup", "salmon"]);
    }

    #[test]
    fn unknown_portion_size_is_rejected() {
        let body = r#"{"items":[{"label":"rice","portion_size":"XL","nutrition":null}]}"#;
        assert!(serde_json::from_str::<AnalyzeResponse>(body).is_err());
    }

    #[test]
    fn partial_nutrition_is_rejected() {
        // A nutrition object missing fields violates the all-or-nothing shape.
        let body = r#"{"items":[{"label":"rice","portion_size":"M","nutrition":{"amount_g":150}}]}"#;
        assert!(serde_json::from_str::<AnalyzeResponse>(body).is_err());
    }
}
