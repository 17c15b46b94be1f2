//! Groq chat-completions backend for narrative tax advice.

mod client;
mod factory;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GroqAdvisor};
pub use factory::GroqAdvisorFactory;
