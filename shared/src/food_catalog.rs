//! Built-in catalog of common foods
//!
//! Values are per 100 g, or per the single serving named in the item. A
//! portion scales them linearly by `serving / 100`.

use crate::errors::CatalogError;
use crate::nutrients::NutrientTotals;
use crate::validation::{validate_serving_size, MAX_SERVING_G, MIN_SERVING_G};
use serde::Serialize;

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodItem {
    pub id: &'static str,
    pub name: &'static str,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl FoodItem {
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

const fn food(
    id: &'static str,
    name: &'static str,
    calories: f64,
    carbs: f64,
    protein: f64,
    fat: f64,
    sugar: f64,
    sodium: f64,
) -> FoodItem {
    FoodItem {
        id,
        name,
        calories,
        carbs,
        protein,
        fat,
        sugar,
        sodium,
    }
}

pub static COMMON_FOODS: [FoodItem; 20] = [
    food("1", "White Rice (Bowl)", 300.0, 65.0, 6.0, 0.5, 0.0, 5.0),
    food("2", "Chicken Breast (100g)", 165.0, 0.0, 31.0, 3.6, 0.0, 74.0),
    food("3", "Boiled Egg (1 Large)", 78.0, 0.6, 6.0, 5.0, 0.6, 62.0),
    food("4", "Sweet Potato (100g)", 128.0, 30.0, 1.6, 0.1, 4.2, 55.0),
    food("5", "Banana (1 Medium)", 105.0, 27.0, 1.3, 0.3, 14.0, 1.0),
    food("6", "Oatmeal (100g)", 389.0, 66.0, 16.9, 6.9, 0.0, 2.0),
    food("7", "Greek Yogurt (100g)", 59.0, 3.6, 10.0, 0.4, 3.2, 36.0),
    food("8", "Salmon (100g)", 208.0, 0.0, 20.0, 13.0, 0.0, 59.0),
    food("9", "Almonds (30g)", 170.0, 6.0, 6.0, 15.0, 1.0, 0.0),
    food("10", "Apple (1 Medium)", 95.0, 25.0, 0.5, 0.3, 19.0, 2.0),
    food("11", "Kimchi (100g)", 15.0, 2.4, 1.1, 0.5, 0.0, 670.0),
    food("12", "Tofu (100g)", 84.0, 1.9, 8.0, 4.8, 0.0, 7.0),
    food("13", "Beef Steak (100g)", 250.0, 0.0, 26.0, 17.0, 0.0, 60.0),
    food("14", "Protein Shake (1 Scoop)", 120.0, 3.0, 24.0, 1.0, 1.0, 150.0),
    food("15", "Pizza (1 Slice)", 285.0, 36.0, 12.0, 10.0, 3.8, 640.0),
    food("16", "Pasta (Tomato, 1 Serving)", 350.0, 60.0, 12.0, 5.0, 8.0, 400.0),
    food("17", "Salad (Mixed Greens)", 20.0, 3.0, 1.0, 0.0, 1.0, 10.0),
    food("18", "Milk (200ml)", 122.0, 9.6, 6.8, 6.4, 10.0, 100.0),
    food("19", "Coke (Can)", 140.0, 39.0, 0.0, 0.0, 39.0, 45.0),
    food("20", "Americano", 5.0, 1.0, 0.0, 0.0, 0.0, 5.0),
];

/// Look up a catalog item by id
pub fn find(id: &str) -> Option<&'static FoodItem> {
    COMMON_FOODS.iter().find(|item| item.id == id)
}

/// Case-insensitive name search with favorites listed first
///
/// An empty or blank term matches everything. Within the favorite and
/// non-favorite groups, catalog order is preserved.
pub fn search<S: AsRef<str>>(term: &str, favorites: &[S]) -> Vec<&'static FoodItem> {
    let needle = term.trim().to_lowercase();
    let is_favorite = |item: &FoodItem| favorites.iter().any(|f| f.as_ref() == item.id);

    let mut matches: Vec<&'static FoodItem> = COMMON_FOODS
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect();
    // stable sort keeps catalog order inside each group
    matches.sort_by_key(|item| !is_favorite(item));
    matches
}

/// Nutrients for `serving_size` grams of `item`, each rounded to a whole number
pub fn portion(item: &FoodItem, serving_size: f64) -> Result<NutrientTotals, CatalogError> {
    validate_serving_size(serving_size).map_err(|_| CatalogError::ServingOutOfRange {
        value: serving_size,
        min: MIN_SERVING_G,
        max: MAX_SERVING_G,
    })?;
    Ok(item.nutrients().scale(serving_size / 100.0).round())
}

/// Look up `id` and portion it in one step
pub fn portion_by_id(id: &str, serving_size: f64) -> Result<(&'static FoodItem, NutrientTotals), CatalogError> {
    let item = find(id).ok_or_else(|| CatalogError::UnknownFood(id.to_string()))?;
    Ok((item, portion(item, serving_size)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    const NO_FAVORITES: &[&str] = &[];

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = COMMON_FOODS.iter().map(|f| f.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), COMMON_FOODS.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(find("2").unwrap().name, "Chicken Breast (100g)");
        assert!(find("99").is_none());
    }

    #[rstest]
    #[case("", 20)]
    #[case("   ", 20)]
    #[case("100g", 8)]
    #[case("RICE", 1)]
    #[case("egg", 1)]
    #[case("pizza", 1)]
    #[case("durian", 0)]
    fn test_search_counts(#[case] term: &str, #[case] expected: usize) {
        assert_eq!(search(term, NO_FAVORITES).len(), expected);
    }

    #[test]
    fn test_search_preserves_catalog_order() {
        let results = search("", NO_FAVORITES);
        let ids: Vec<&str> = results.iter().map(|f| f.id).collect();
        let expected: Vec<&str> = COMMON_FOODS.iter().map(|f| f.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_favorites_come_first() {
        let favorites = vec!["19".to_string(), "3".to_string()];
        let results = search("", favorites.as_slice());
        let ids: Vec<&str> = results.iter().take(3).map(|f| f.id).collect();
        assert_eq!(ids, ["3", "19", "1"]);
    }

    #[test]
    fn test_favorites_filtered_by_term() {
        let results = search("(100g)", &["8", "20"][..]);
        assert_eq!(results[0].id, "8");
        assert!(results.iter().all(|f| f.id != "20"));
    }

    #[test]
    fn test_portion_scales_and_rounds() {
        let chicken = find("2").unwrap();
        let portioned = portion(chicken, 150.0).unwrap();
        assert_eq!(portioned.calories, 248.0); // 247.5
        assert_eq!(portioned.protein, 47.0); // 46.5
        assert_eq!(portioned.fat, 5.0); // 5.4
        assert_eq!(portioned.sodium, 111.0);
    }

    #[test]
    fn test_portion_at_100_is_rounded_item() {
        let oatmeal = find("6").unwrap();
        let portioned = portion(oatmeal, 100.0).unwrap();
        assert_eq!(portioned.calories, 389.0);
        assert_eq!(portioned.protein, 17.0);
        assert_eq!(portioned.fat, 7.0);
    }

    #[rstest]
    #[case(5.0)]
    #[case(0.0)]
    #[case(-100.0)]
    #[case(501.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_portion_rejects_out_of_range(#[case] serving: f64) {
        let err = portion(find("1").unwrap(), serving).unwrap_err();
        assert!(matches!(err, CatalogError::ServingOutOfRange { .. }));
    }

    #[rstest]
    #[case(MIN_SERVING_G)]
    #[case(MAX_SERVING_G)]
    fn test_portion_accepts_range_bounds(#[case] serving: f64) {
        assert!(portion(find("20").unwrap(), serving).is_ok());
    }

    #[test]
    fn test_portion_by_unknown_id() {
        let err = portion_by_id("404", 100.0).unwrap_err();
        assert_eq!(err, CatalogError::UnknownFood("404".to_string()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: portions are whole, non-negative and grow with serving size
        #[test]
        fn prop_portion_monotonic(index in 0usize..20, steps in 1u32..49) {
            let item = &COMMON_FOODS[index];
            let smaller = portion(item, f64::from(steps * 10)).unwrap();
            let larger = portion(item, f64::from((steps + 1) * 10)).unwrap();
            for ((_, a), (_, b)) in smaller.fields().into_iter().zip(larger.fields()) {
                prop_assert!(a >= 0.0);
                prop_assert_eq!(a, a.round());
                prop_assert!(b >= a);
            }
        }
    }
}
