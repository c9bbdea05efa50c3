//! Reasoning-backed agent for one perspective.

use super::agent::{AgentError, AgentHandle, DebateAgent};
use crate::ports::reasoning::{ReasoningProvider, ReasoningRequest};
use async_trait::async_trait;
use council_domain::{
    ArgumentDraft, ArgumentRecord, CouncilPromptTemplate, Perspective, Topic,
    parse_argument_response,
};
use std::sync::Arc;
use tracing::debug;

/// Passages pulled from the knowledge store per prompt
const KNOWLEDGE_LIMIT: usize = 3;

/// Asks a [`ReasoningProvider`] to argue from a fixed perspective.
///
/// Responses are parsed for a position and confidence; any `EVIDENCE:` and
/// `MESSAGE:` lines are pushed to the shared pool and the bus.
pub struct PerspectiveAgent {
    perspective: Perspective,
    provider: Arc<dyn ReasoningProvider>,
}

impl PerspectiveAgent {
    pub fn new(perspective: Perspective, provider: Arc<dyn ReasoningProvider>) -> Self {
        Self {
            perspective,
            provider,
        }
    }

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    async fn ask(&self, ctx: &AgentHandle, prompt: String) -> Result<ArgumentDraft, AgentError> {
        let request = ReasoningRequest::new(
            CouncilPromptTemplate::system(&self.perspective, ctx.agent_id()),
            prompt,
        );
        debug!(
            "{} asking {} (round {})",
            ctx.agent_id(),
            self.provider.name(),
            ctx.current_round()
        );
        let response = self.provider.complete(&request).await?;
        ctx.record_spend(response.cost_usd);

        let parsed = parse_argument_response(&response.text)
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;
        for (source, content) in parsed.evidence {
            ctx.add_evidence(source, content);
        }
        for body in parsed.messages {
            ctx.send_message(None, body);
        }
        Ok(parsed.draft)
    }

    fn knowledge(&self, ctx: &AgentHandle, topic: &Topic) -> Vec<String> {
        let query = format!("{} {}", self.perspective, topic.content());
        ctx.lookup_knowledge(&query, KNOWLEDGE_LIMIT)
            .into_iter()
            .map(|entry| entry.to_string())
            .collect()
    }
}

#[async_trait]
impl DebateAgent for PerspectiveAgent {
    async fn analyze(&self, topic: &Topic, ctx: &AgentHandle) -> Result<ArgumentDraft, AgentError> {
        let prompt = CouncilPromptTemplate::analyze(
            topic.content(),
            &ctx.evidence(),
            &self.knowledge(ctx, topic),
        );
        self.ask(ctx, prompt).await
    }

    async fn rebuttal(
        &self,
        topic: &Topic,
        ctx: &AgentHandle,
        prior_arguments: &[ArgumentRecord],
    ) -> Result<ArgumentDraft, AgentError> {
        // Round 2 is sequential: include rebuttals already posted this round
        let mut visible = prior_arguments.to_vec();
        visible.extend(ctx.arguments(Some(ctx.current_round())));
        let inbox = ctx.read_messages();

        let prompt = CouncilPromptTemplate::rebuttal(
            topic.content(),
            ctx.agent_id(),
            &visible,
            &inbox,
            &ctx.evidence(),
            &self.knowledge(ctx, topic),
        );
        self.ask(ctx, prompt).await
    }

    async fn synthesize(
        &self,
        topic: &Topic,
        ctx: &AgentHandle,
        all_arguments: &[ArgumentRecord],
    ) -> Result<ArgumentDraft, AgentError> {
        let inbox = ctx.read_messages();
        let prompt = CouncilPromptTemplate::synthesize(
            topic.content(),
            ctx.agent_id(),
            all_arguments,
            &inbox,
        );
        self.ask(ctx, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::debate_channels;
    use crate::ports::manifest::ManifestRecorder;
    use crate::ports::reasoning::{ReasoningError, ReasoningResponse};
    use council_domain::Position;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<ReasoningRequest>>,
    }

    impl CannedProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReasoningProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(
            &self,
            request: &ReasoningRequest,
        ) -> Result<ReasoningResponse, ReasoningError> {
            self.prompts.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(ReasoningResponse::new(text.clone(), 0.01)),
                Err(()) => Err(ReasoningError::Timeout),
            }
        }
    }

    fn handle() -> (AgentHandle, crate::debate::MessageBus) {
        let (ctx, bus) = debate_channels(ManifestRecorder::disabled());
        bus.register("security_analyst");
        bus.register("cost_analyst");
        ctx.advance_round();
        (
            AgentHandle::new("security_analyst", Perspective::Security, ctx, bus.clone()),
            bus,
        )
    }

    #[tokio::test]
    async fn test_analyze_parses_and_shares() {
        let provider = Arc::new(CannedProvider::replying(
            "POSITION: OPPOSE\nCONFIDENCE: 0.9\nNo audit logging is a compliance blocker.\nEVIDENCE: vendor docs | audit logs are enterprise-only\nMESSAGE: @cost_analyst does the quote include enterprise tier?",
        ));
        let agent = PerspectiveAgent::new(Perspective::Security, provider.clone());
        let (ctx, bus) = handle();
        let topic = Topic::new("Adopt VendorX").unwrap();

        let draft = agent.analyze(&topic, &ctx).await.unwrap();
        assert_eq!(draft.position, Position::Oppose);
        assert_eq!(draft.confidence, 0.9);
        assert_eq!(ctx.evidence()[0].collected_by, "security_analyst");
        assert_eq!(bus.receive("cost_analyst").len(), 1);

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].system_prompt.contains("security_analyst"));
        assert!(prompts[0].prompt.contains("Adopt VendorX"));
    }

    #[tokio::test]
    async fn test_malformed_response_is_an_error() {
        let agent = PerspectiveAgent::new(
            Perspective::Security,
            Arc::new(CannedProvider::replying("I would rather not say.")),
        );
        let (ctx, _) = handle();
        let topic = Topic::new("Adopt VendorX").unwrap();
        assert!(matches!(
            agent.analyze(&topic, &ctx).await,
            Err(AgentError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = CannedProvider {
            reply: Err(()),
            prompts: Mutex::new(Vec::new()),
        };
        let agent = PerspectiveAgent::new(Perspective::Security, Arc::new(provider));
        let (ctx, _) = handle();
        let topic = Topic::new("Adopt VendorX").unwrap();
        assert!(matches!(
            agent.synthesize(&topic, &ctx, &[]).await,
            Err(AgentError::Reasoning(ReasoningError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_synthesize_reads_late_messages() {
        let provider = Arc::new(CannedProvider::replying(
            "POSITION: SUPPORT\nCONFIDENCE: 0.7\nThe audit gap is closed by the enterprise tier.",
        ));
        let agent = PerspectiveAgent::new(Perspective::Security, provider.clone());
        let (ctx, bus) = handle();
        bus.send("cost_analyst", None, "@security_analyst the quote now includes enterprise tier");
        let topic = Topic::new("Adopt VendorX").unwrap();

        let draft = agent.synthesize(&topic, &ctx, &[]).await.unwrap();
        assert_eq!(draft.position, Position::Support);
        assert!(ctx.read_messages().is_empty());

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].prompt.contains("from @cost_analyst"));
        assert!(prompts[0].prompt.contains("enterprise tier"));
    }
}
