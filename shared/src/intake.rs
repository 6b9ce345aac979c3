//! Daily intake compared against targets

use crate::nutrients::NutrientTotals;
use crate::targets::DailyTargets;
use serde::{Deserialize, Serialize};

/// Percentage of `target` reached by `current`, capped at 100
///
/// Returns 0 when either value is not positive.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 || current <= 0.0 || !current.is_finite() || !target.is_finite() {
        return 0.0;
    }
    (current / target * 100.0).min(100.0)
}

/// Target, consumed and remaining amounts for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakeSummary {
    pub target: NutrientTotals,
    pub consumed: NutrientTotals,
    /// `target - consumed`; negative when the day went over
    pub remaining: NutrientTotals,
}

impl IntakeSummary {
    pub fn compare(targets: &DailyTargets, consumed: &NutrientTotals) -> Self {
        let target = NutrientTotals::from(*targets);
        IntakeSummary {
            target,
            consumed: *consumed,
            remaining: target - *consumed,
        }
    }

    /// Per-field progress percentages
    pub fn progress(&self) -> NutrientTotals {
        self.consumed.zip_with(&self.target, progress_percent)
    }

    /// Fields whose consumption went over target, in display order
    ///
    /// For sugar and sodium the target is a ceiling, so these are cap breaches.
    pub fn over_caps(&self) -> Vec<&'static str> {
        self.remaining
            .fields()
            .into_iter()
            .filter(|(_, remaining)| *remaining < 0.0)
            .map(|(name, _)| name)
            .collect()
    }
}
