//! Running macro-nutrient totals and the accumulation step.

use crate::error::{MacroPlanError, MacroPlanResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Running nutrient totals, threaded through successive [`accumulate`]
/// calls by the caller. Persistence is the caller's responsibility; the
/// accumulator keeps no state of its own.
///
/// The map is closed over exactly these five fields; incoming reports
/// never add new ones.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub sodium: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Merge a reported nutrient breakdown into the running totals,
/// returning a new totals value.
///
/// Reports are untrusted, externally generated JSON: only the five
/// recognized keys with genuinely numeric values contribute. Numeric
/// strings, booleans, and unrecognized keys are silently dropped, never
/// an error. Addition is plain floating point — no rounding, no
/// clamping, negative contributions accepted.
///
/// A report that is not a JSON object is `InvalidReport`; the caller
/// keeps its prior totals untouched (identity on failure).
pub fn accumulate(report: &Value, totals: &MacroTotals) -> MacroPlanResult<MacroTotals> {
    let fields = report.as_object().ok_or_else(|| {
        MacroPlanError::InvalidReport("expected a JSON object of nutrient values".to_string())
    })?;

    let mut updated = *totals;
    for (key, value) in fields {
        // as_f64 admits integer and float JSON numbers only; strings and
        // booleans fall through untouched.
        let Some(amount) = value.as_f64() else {
            continue;
        };
        match key.as_str() {
            "calories" => updated.calories += amount,
            "protein" => updated.protein += amount,
            "sodium" => updated.sodium += amount,
            "carbs" => updated.carbs += amount,
            "fat" => updated.fat += amount,
            _ => {}
        }
    }
    Ok(updated)
}
