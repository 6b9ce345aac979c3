//! Nutrient amounts shared by meal logs, catalog portions and daily totals
//!
//! Field names and units match [`DailyTargets`](crate::targets::DailyTargets):
//! kcal for calories, grams for macros and sugar, milligrams for sodium.

use crate::targets::DailyTargets;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Six nutrient amounts tracked per meal and per day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

/// Wire names of the six tracked nutrients, in display order
pub const NUTRIENT_FIELDS: [&str; 6] = ["calories", "carbs", "protein", "fat", "sugar", "sodium"];

impl NutrientTotals {
    pub const fn zero() -> Self {
        NutrientTotals {
            calories: 0.0,
            carbs: 0.0,
            protein: 0.0,
            fat: 0.0,
            sugar: 0.0,
            sodium: 0.0,
        }
    }

    /// Multiply every field by `ratio`
    pub fn scale(&self, ratio: f64) -> Self {
        self.map(|v| v * ratio)
    }

    /// Round every field half away from zero
    pub fn round(&self) -> Self {
        self.map(f64::round)
    }

    /// Apply `f` to every field
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        NutrientTotals {
            calories: f(self.calories),
            carbs: f(self.carbs),
            protein: f(self.protein),
            fat: f(self.fat),
            sugar: f(self.sugar),
            sodium: f(self.sodium),
        }
    }

    /// Combine two totals field by field
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        NutrientTotals {
            calories: f(self.calories, other.calories),
            carbs: f(self.carbs, other.carbs),
            protein: f(self.protein, other.protein),
            fat: f(self.fat, other.fat),
            sugar: f(self.sugar, other.sugar),
            sodium: f(self.sodium, other.sodium),
        }
    }

    /// Fields paired with their wire names, in [`NUTRIENT_FIELDS`] order
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("calories", self.calories),
            ("carbs", self.carbs),
            ("protein", self.protein),
            ("fat", self.fat),
            ("sugar", self.sugar),
            ("sodium", self.sodium),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.fields().iter().all(|(_, v)| *v == 0.0)
    }
}

impl From<DailyTargets> for NutrientTotals {
    fn from(t: DailyTargets) -> Self {
        NutrientTotals {
            calories: f64::from(t.calories),
            carbs: f64::from(t.carbs),
            protein: f64::from(t.protein),
            fat: f64::from(t.fat),
            sugar: f64::from(t.sugar),
            sodium: f64::from(t.sodium),
        }
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for NutrientTotals {
    type Output = NutrientTotals;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientTotals::zero(), Add::add)
    }
}

impl<'a> Sum<&'a NutrientTotals> for NutrientTotals {
    fn sum<I: Iterator<Item = &'a NutrientTotals>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Total a day's worth of nutrient amounts
pub fn sum_totals<'a>(items: impl IntoIterator<Item = &'a NutrientTotals>) -> NutrientTotals {
    items.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(calories: f64, carbs: f64, protein: f64) -> NutrientTotals {
        NutrientTotals {
            calories,
            carbs,
            protein,
            fat: 1.0,
            sugar: 2.0,
            sodium: 100.0,
        }
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let empty: Vec<NutrientTotals> = Vec::new();
        assert_eq!(sum_totals(&empty), NutrientTotals::zero());
        assert!(sum_totals(&empty).is_zero());
    }

    #[test]
    fn test_sum_adds_each_field() {
        let meals = vec![sample(300.0, 65.0, 6.0), sample(165.0, 0.0, 31.0)];
        let total = sum_totals(&meals);
        assert_eq!(total.calories, 465.0);
        assert_eq!(total.carbs, 65.0);
        assert_eq!(total.protein, 37.0);
        assert_eq!(total.fat, 2.0);
        assert_eq!(total.sodium, 200.0);
    }

    #[test]
    fn test_scale_and_round() {
        let egg = NutrientTotals {
            calories: 78.0,
            carbs: 0.6,
            protein: 6.0,
            fat: 5.0,
            sugar: 0.6,
            sodium: 62.0,
        };
        let half = egg.scale(0.5).round();
        assert_eq!(half.calories, 39.0);
        // 0.3 rounds down, 2.5 rounds away from zero
        assert_eq!(half.carbs, 0.0);
        assert_eq!(half.fat, 3.0);
        assert_eq!(half.sodium, 31.0);
    }

    #[test]
    fn test_from_targets() {
        let targets = DailyTargets {
            calories: 2046,
            carbs: 258,
            protein: 132,
            fat: 54,
            sugar: 30,
            sodium: 2000,
        };
        let totals = NutrientTotals::from(targets);
        assert_eq!(totals.calories, 2046.0);
        assert_eq!(totals.sodium, 2000.0);
    }

    #[test]
    fn test_field_names_match_targets() {
        let value = serde_json::to_value(NutrientTotals::zero()).unwrap();
        for name in NUTRIENT_FIELDS {
            assert!(value.get(name).is_some(), "missing {name}");
        }
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    fn totals_strategy() -> impl Strategy<Value = NutrientTotals> {
        (0u32..2000, 0u32..300, 0u32..200, 0u32..150, 0u32..100, 0u32..5000).prop_map(
            |(calories, carbs, protein, fat, sugar, sodium)| NutrientTotals {
                calories: f64::from(calories),
                carbs: f64::from(carbs),
                protein: f64::from(protein),
                fat: f64::from(fat),
                sugar: f64::from(sugar),
                sodium: f64::from(sodium),
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: aggregation does not depend on log order
        #[test]
        fn prop_sum_order_independent(items in prop::collection::vec(totals_strategy(), 0..20)) {
            let forward = sum_totals(&items);
            let mut reversed = items.clone();
            reversed.reverse();
            prop_assert_eq!(forward, sum_totals(&reversed));
        }

        /// Property: totals of non-negative meals are non-negative
        #[test]
        fn prop_sum_non_negative(items in prop::collection::vec(totals_strategy(), 0..20)) {
            let total = sum_totals(&items);
            for (_, value) in total.fields() {
                prop_assert!(value >= 0.0);
            }
        }

        /// Property: subtracting what was added gives the original
        #[test]
        fn prop_add_then_sub(a in totals_strategy(), b in totals_strategy()) {
            prop_assert_eq!((a + b) - b, a);
        }
    }
}
