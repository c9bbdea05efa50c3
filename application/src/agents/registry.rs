//! Perspective registry: which perspectives can be debated, and how to
//! build the agent for each.

use super::agent::DebateAgent;
use super::perspective_agent::PerspectiveAgent;
use crate::ports::reasoning::ReasoningProvider;
use council_domain::{DomainError, Perspective};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds a fresh agent for a perspective
pub type AgentFactory = Arc<dyn Fn(&Perspective) -> Arc<dyn DebateAgent> + Send + Sync>;

/// Maps perspective names to agent factories.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    factories: BTreeMap<String, (Perspective, AgentFactory)>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built-in perspectives backed by `provider`
    pub fn with_reasoning_agents(provider: Arc<dyn ReasoningProvider>) -> Self {
        Self::new().with_reasoning_perspectives(provider, Perspective::builtins())
    }

    /// Register `perspectives` (built-in or custom) backed by `provider`
    pub fn with_reasoning_perspectives(
        mut self,
        provider: Arc<dyn ReasoningProvider>,
        perspectives: impl IntoIterator<Item = Perspective>,
    ) -> Self {
        for perspective in perspectives {
            let provider = provider.clone();
            self.register(perspective, move |p: &Perspective| {
                Arc::new(PerspectiveAgent::new(p.clone(), provider.clone())) as Arc<dyn DebateAgent>
            });
        }
        self
    }

    /// Register (or replace) the factory for `perspective`
    pub fn register<F>(&mut self, perspective: Perspective, factory: F) -> &mut Self
    where
        F: Fn(&Perspective) -> Arc<dyn DebateAgent> + Send + Sync + 'static,
    {
        self.factories.insert(
            perspective.as_str().to_string(),
            (perspective, Arc::new(factory)),
        );
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, perspective: Perspective, factory: F) -> Self
    where
        F: Fn(&Perspective) -> Arc<dyn DebateAgent> + Send + Sync + 'static,
    {
        self.register(perspective, factory);
        self
    }

    /// Register one shared agent instance for `perspective`
    pub fn with_agent(self, perspective: Perspective, agent: Arc<dyn DebateAgent>) -> Self {
        self.with(perspective, move |_| agent.clone())
    }

    pub fn contains(&self, perspective: &Perspective) -> bool {
        self.factories.contains_key(perspective.as_str())
    }

    /// Registered perspectives, sorted by name
    pub fn perspectives(&self) -> Vec<Perspective> {
        self.factories.values().map(|(p, _)| p.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build the agent for `perspective`
    pub fn spawn(&self, perspective: &Perspective) -> Result<Arc<dyn DebateAgent>, DomainError> {
        self.factories
            .get(perspective.as_str())
            .map(|(p, factory)| factory(p))
            .ok_or_else(|| DomainError::UnregisteredPerspective(perspective.to_string()))
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("perspectives", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
