//! Per-endpoint test procedures.
//!
//! Each procedure is split in two: a pure `evaluate_*` function that judges a
//! response, and a `TestRunner` method that sends the request and records the
//! verdict. The pure half is what the unit tests exercise.

mod conversations;
mod generate;
mod health;
mod preview;
mod templates;

pub use conversations::evaluate_conversations;
pub use generate::{evaluate_generation, evaluate_missing_message};
pub use health::evaluate_health;
pub use preview::{evaluate_missing_code, evaluate_preview};
pub use templates::evaluate_templates;
