//! Prompt domain
//!
//! Templates for the structured-output wrapper and for each request phase.

mod template;

pub use template::PromptTemplate;
