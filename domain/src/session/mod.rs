//! Chat request types shared by the model gateway and the use cases.

pub mod entities;

pub use entities::{ChatMessage, ChatRequest, Role};
