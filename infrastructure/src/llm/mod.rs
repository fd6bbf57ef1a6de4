//! Model endpoint adapter
//!
//! - [`HttpLlmGateway`] — reqwest-based [`LlmGateway`](concierge_application::LlmGateway)
//! - [`RateLimiter`] — process-wide spacing of model calls

mod gateway;
mod rate_limiter;

pub use gateway::{ChatPayload, DEFAULT_MODEL_TIMEOUT, HttpLlmGateway, ModelEndpoint};
pub use rate_limiter::RateLimiter;
