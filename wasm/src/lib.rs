//! Diet Tracker WASM Module
//!
//! Browser bindings for the calculations that need no server: daily targets,
//! catalog search and portioning, and progress percentages. Results cross the
//! boundary as JSON strings.

use diet_tracker_shared::{food_catalog, intake, ActivityLevel, UserStatsInput};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Daily targets for the given body stats, as JSON
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn compute_daily_targets(
    gender: &str,
    height_cm: f64,
    weight_kg: f64,
    birth_year: i32,
    activity_level: &str,
    goal: &str,
    reference_year: i32,
) -> Result<String, JsError> {
    let input = UserStatsInput {
        gender: gender.to_string(),
        height: height_cm,
        weight: weight_kg,
        birth_year,
        activity_level: activity_level.to_string(),
        goal: goal.to_string(),
    };
    targets_json(input, reference_year).map_err(|e| JsError::new(&e))
}

/// One entry of the activity level picker
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityOption {
    value: &'static str,
    description: &'static str,
    multiplier: f64,
}

/// Activity levels in ascending order, as JSON, for the onboarding picker
#[wasm_bindgen]
pub fn activity_levels() -> String {
    let options: Vec<ActivityOption> = ActivityLevel::ALL
        .iter()
        .map(|level| ActivityOption {
            value: level.as_str(),
            description: level.description(),
            multiplier: level.multiplier(),
        })
        .collect();
    serde_json::to_string(&options).unwrap_or_else(|_| "[]".to_string())
}

/// Catalog items matching `term`, favorites first; `favorites` is comma-separated ids
#[wasm_bindgen]
pub fn search_foods(term: &str, favorites: &str) -> String {
    let favorite_ids: Vec<&str> = favorites
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    let items: Vec<_> = food_catalog::search(term, favorite_ids.as_slice())
        .into_iter()
        .copied()
        .collect();
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

/// Nutrients for `serving_size` grams of a catalog item, as JSON
#[wasm_bindgen]
pub fn portion_food(food_id: &str, serving_size: f64) -> Result<String, JsError> {
    portion_json(food_id, serving_size).map_err(|e| JsError::new(&e))
}

/// Percent of `target` reached by `current`, capped at 100
#[wasm_bindgen]
pub fn progress_percent(current: f64, target: f64) -> f64 {
    intake::progress_percent(current, target)
}

fn targets_json(input: UserStatsInput, reference_year: i32) -> Result<String, String> {
    let stats = diet_tracker_shared::UserStats::try_from(input).map_err(|e| e.to_string())?;
    let targets = diet_tracker_shared::compute_daily_targets(&stats, reference_year)
        .map_err(|e| e.to_string())?;
    to_json(&targets)
}

fn portion_json(food_id: &str, serving_size: f64) -> Result<String, String> {
    let (_, nutrients) =
        food_catalog::portion_by_id(food_id, serving_size).map_err(|e| e.to_string())?;
    to_json(&nutrients)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn input(activity_level: &str) -> UserStatsInput {
        UserStatsInput {
            gender: "male".to_string(),
            height: 168.0,
            weight: 60.0,
            birth_year: 1984,
            activity_level: activity_level.to_string(),
            goal: "bulk".to_string(),
        }
    }

    #[test]
    fn test_targets_json() {
        let json: Value = serde_json::from_str(&targets_json(input("sedentary"), 2024).unwrap()).unwrap();
        assert_eq!(json["calories"], 2046);
        assert_eq!(json["carbs"], 258);
        assert_eq!(json["sodium"], 2000);
    }

    #[test]
    fn test_targets_json_reports_bad_field() {
        let err = targets_json(input("lazy"), 2024).unwrap_err();
        assert!(err.contains("activityLevel"));
    }

    #[test]
    fn test_activity_levels() {
        let options: Vec<Value> = serde_json::from_str(&activity_levels()).unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0]["value"], "sedentary");
        assert_eq!(options[0]["description"], "Little or no exercise");
        assert_eq!(options[4]["value"], "very_active");
        assert_eq!(options[4]["multiplier"], 1.9);
    }

    #[test]
    fn test_search_foods_with_favorites() {
        let items: Vec<Value> = serde_json::from_str(&search_foods("", " 19 ,")).unwrap();
        assert_eq!(items.len(), 20);
        assert_eq!(items[0]["name"], "Coke (Can)");
    }

    #[test]
    fn test_portion_json() {
        let json: Value = serde_json::from_str(&portion_json("20", 200.0).unwrap()).unwrap();
        assert_eq!(json["calories"], 10.0);
        assert!(portion_json("20", 600.0).is_err());
        assert!(portion_json("nope", 100.0).is_err());
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(50.0, 200.0), 25.0);
        assert_eq!(progress_percent(300.0, 200.0), 100.0);
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
    }
}
