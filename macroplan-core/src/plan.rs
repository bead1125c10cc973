//! Meal-plan orchestration: prompt templates and the model round-trips.
//!
//! Accumulation stays decoupled from the model call: [`report_macros`]
//! only obtains the report JSON. Feeding it to
//! [`crate::macros::accumulate`] is the caller's step, so a bad report
//! never disturbs the running totals.

use crate::error::{MacroPlanError, MacroPlanResult};
use crate::event::ScheduleEvent;
use crate::macros::MacroTotals;
use crate::model::ModelClient;
use serde_json::Value;

/// Build the meal-plan prompt from food availability, target macros, and
/// the normalized schedule.
pub fn meal_plan_prompt(
    food_data: &Value,
    targets: &MacroTotals,
    events: &[ScheduleEvent],
) -> MacroPlanResult<String> {
    Ok(format!(
        "Generate a balanced meal plan based on the following food availability:\n{}\n\n\
         Target macros: {}\n\n\
         User's schedule: {}\n\n\
         Return the meal plan as a valid JSON object with meal times and nutritional values.",
        to_json(food_data)?,
        to_json(targets)?,
        to_json(&events)?,
    ))
}

/// Build the macro-extraction prompt for a generated meal plan.
pub fn macro_report_prompt(meal_plan: &Value) -> MacroPlanResult<String> {
    Ok(format!(
        "Analyze the following meal plan and extract macros.\n{}\n\n\
         Return the results as a valid JSON object with numeric values for \
         calories, protein, sodium, carbs and fat.",
        to_json(meal_plan)?,
    ))
}

/// Ask the model for a meal plan covering the supplied inputs.
pub async fn generate_meal_plan(
    model: &dyn ModelClient,
    food_data: &Value,
    targets: &MacroTotals,
    events: &[ScheduleEvent],
) -> MacroPlanResult<Value> {
    let prompt = meal_plan_prompt(food_data, targets, events)?;
    model.query(&prompt).await
}

/// Ask the model for the nutrient breakdown of a meal plan.
pub async fn report_macros(model: &dyn ModelClient, meal_plan: &Value) -> MacroPlanResult<Value> {
    let prompt = macro_report_prompt(meal_plan)?;
    model.query(&prompt).await
}

fn to_json<T: serde::Serialize>(value: &T) -> MacroPlanResult<String> {
    serde_json::to_string(value).map_err(|e| MacroPlanError::Serialization(e.to_string()))
}
