//! Structured output recovery
//!
//! Models asked for JSON often wrap it in markdown fences, add prose after
//! it, or escape underscores. [`recovery`] turns such a reply into a list of
//! JSON values; [`plan_parser`] validates those values into a
//! [`Plan`](crate::tool::Plan) or a
//! [`DraftAnalysis`](crate::orchestration::value_objects::DraftAnalysis).

pub mod plan_parser;
pub mod recovery;

pub use plan_parser::{draft_schema, parse_draft, parse_plan, plan_schema};
pub use recovery::{StructuredOutputError, clean_model_output, recover_json_values};
