//! Core library for macroplan: schedule normalization, macro
//! accumulation, and meal-plan prompting.
//!
//! The two data-model components — the schedule normalizer and the macro
//! accumulator — are pure, synchronous, and independent of each other.
//! The CLI composes them with a [`ModelClient`] collaborator; the core
//! never constructs a model client or holds state between calls.

pub mod error;
pub mod event;
pub mod macros;
pub mod model;
pub mod plan;
pub mod schedule;

pub use error::{MacroPlanError, MacroPlanResult};
pub use event::ScheduleEvent;
pub use macros::{accumulate, MacroTotals};
pub use model::ModelClient;
pub use schedule::{normalize, normalize_file, ScheduleFormat};
