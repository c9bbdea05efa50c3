//! OpenAI-compatible chat-completions provider
//!
//! Works against any endpoint exposing `POST {base_url}/chat/completions`
//! (OpenAI, Azure-style gateways, Ollama, vLLM, llama.cpp server).
//! Spend is estimated from the `usage` block and the configured prices.

mod client;
mod types;

pub use client::{OpenAiCompatibleProvider, OpenAiSettings};
