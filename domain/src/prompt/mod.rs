//! Prompt templates for reasoning-backed agents

pub mod template;

pub use template::CouncilPromptTemplate;
