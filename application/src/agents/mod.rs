//! Debate agents: the agent trait, its council handle, the perspective
//! registry and the two stock implementations.

pub mod agent;
pub mod perspective_agent;
pub mod registry;
pub mod scripted;

pub use agent::{AgentError, AgentHandle, DebateAgent};
pub use perspective_agent::PerspectiveAgent;
pub use registry::{AgentFactory, AgentRegistry};
pub use scripted::{RoundScript, ScriptedAgent};
