//! Parsing of photo-analysis model output
//!
//! The model is asked for a bare JSON object but frequently wraps it in a
//! markdown code fence or omits fields it could not determine. Parsing is
//! lenient about both: fences are stripped and unusable values become zero.

use crate::errors::EstimateError;
use crate::nutrients::NutrientTotals;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Instruction sent alongside the photo
pub const ANALYSIS_PROMPT: &str = r#"Analyze this image of food or a nutrition label.
Identify the food item and estimate its nutritional content.
If it's a nutrition label, extract the values.

Return ONLY a raw JSON object (no markdown formatting) with the following structure:
{
  "menu_name": "Food Name",
  "calories": 0,
  "carbs": 0,
  "protein": 0,
  "fat": 0,
  "sugar": 0,
  "sodium": 0
}
Units: calories in kcal, carbs/protein/fat/sugar in grams, sodium in milligrams.

If you cannot determine a value, use 0.
Ensure the response is valid JSON."#;

/// Nutrition estimated from a photo, awaiting user confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub menu_name: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NutritionEstimate {
    pub fn nutrients(&self) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories,
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
            sugar: self.sugar,
            sodium: self.sodium,
        }
    }
}

/// Parse raw model text into an estimate
pub fn parse_estimate(text: &str) -> Result<NutritionEstimate, EstimateError> {
    let body = strip_code_fences(text);
    if body.is_empty() {
        return Err(EstimateError::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| EstimateError::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| EstimateError::Malformed(format!("expected an object, got {}", kind(&value))))?;

    Ok(NutritionEstimate {
        menu_name: object
            .get("menu_name")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        calories: amount(object, "calories"),
        carbs: amount(object, "carbs"),
        protein: amount(object, "protein"),
        fat: amount(object, "fat"),
        sugar: amount(object, "sugar"),
        sodium: amount(object, "sodium"),
    })
}

/// Remove markdown code fences, keeping the content between them
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // skip an optional language tag on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) if rest[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &rest[newline + 1..],
        _ => rest.trim_start_matches("json"),
    };
    rest.trim_end().trim_end_matches("```").trim()
}

/// Numeric field, with strings parsed and everything else treated as zero
fn amount(object: &Map<String, Value>, key: &str) -> f64 {
    let raw = match object.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
