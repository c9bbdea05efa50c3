//! Reasoning provider adapters

pub mod openai;

pub use openai::{OpenAiCompatibleProvider, OpenAiSettings};
