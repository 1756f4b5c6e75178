//! Complete chat pipeline: Retrieve -> Assemble -> Generate

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::config::PromptConfig;
use crate::errors::Result;
use crate::errors::ViaRagError;
use crate::knowledge::KnowledgeStore;
use crate::llm::ChatPrompts;
use crate::llm::CompletionProvider;
use crate::llm::LlmService;
use crate::llm::PromptTemplate;
use crate::rag::ContextAssembler;
use crate::rag::Retrieval;
use crate::rag::Retriever;
use crate::rag::Vocabulary;

/// How a reply was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The provider answered from retrieved context
    Answered,
    /// Retrieval found nothing; the provider was not called
    NoContext,
    /// The provider answered with nothing
    EmptyCompletion,
    /// The provider call failed
    ProviderError,
}

/// Reply to one chat message
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub detected_topic: Option<String>,
    pub outcome: ReplyOutcome,
}

/// Complete chat service
pub struct RagService {
    retriever: Retriever,
    context_assembler: ContextAssembler,
    completion: Arc<dyn CompletionProvider>,
    template: PromptTemplate,
    prompt: PromptConfig,
}

impl RagService {
    /// Create a new chat service: load the knowledge store and build the
    /// provider client
    ///
    /// # Errors
    /// - Knowledge data files missing or malformed
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(KnowledgeStore::load(&config.knowledge)?);
        if store.is_empty() {
            warn!("Knowledge store is empty; every question will be refused");
        }
        let llm_service = Arc::new(LlmService::new(&config.llm)?);
        Ok(Self::from_services(store, llm_service, config))
    }

    /// Create from existing services
    #[must_use]
    pub fn from_services(
        store: Arc<KnowledgeStore>,
        completion: Arc<dyn CompletionProvider>,
        config: &AppConfig,
    ) -> Self {
        let vocabulary = Arc::new(Vocabulary::new(
            &config.vocabulary,
            config.retrieval.min_token_len,
        ));
        let retriever = Retriever::new(store, vocabulary, config.retrieval.clone());
        let context_assembler = ContextAssembler::new(config.retrieval.max_context_chars);

        Self {
            retriever,
            context_assembler,
            completion,
            template: ChatPrompts::strict_knowledge_base(),
            prompt: config.prompt.clone(),
        }
    }

    /// Rank the knowledge base for a query and assemble its context
    pub fn retrieve_context(&self, query: &str, forced_topic: Option<&str>) -> Retrieval {
        let ranked = self.retriever.rank(query, forced_topic);
        self.context_assembler.assemble(&ranked.candidates)
    }

    /// Topic named by the query itself, if any
    pub fn detect_topic(&self, query: &str) -> Option<String> {
        self.retriever.vocabulary().detect_topic(query)
    }

    /// Answer a chat message.
    ///
    /// Provider failures never surface as errors: they become the configured
    /// provider-error reply.
    ///
    /// # Errors
    /// - `InvalidInput` when the message is blank
    pub async fn reply(&self, message: &str, forced_topic: Option<&str>) -> Result<ChatReply> {
        let question = message.trim();
        if question.is_empty() {
            return Err(ViaRagError::InvalidInput("No message provided".to_string()));
        }

        info!("Processing chat message ({} chars)", question.chars().count());

        let retrieval = self.retrieve_context(question, forced_topic);
        let Retrieval::Found {
            context,
            detected_topic,
            records,
        } = retrieval
        else {
            info!("No context found; refusing without calling the provider");
            return Ok(ChatReply {
                reply: self.prompt.refusal.clone(),
                detected_topic: None,
                outcome: ReplyOutcome::NoContext,
            });
        };

        debug!(
            "Context assembled from {} records, topic {}",
            records.len(),
            detected_topic
        );

        let prompt = self.build_prompt(question, &context);
        let (reply, outcome) = match self.completion.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => (text, ReplyOutcome::Answered),
            Ok(_) => {
                warn!("Completion provider returned no content");
                (self.prompt.refusal.clone(), ReplyOutcome::EmptyCompletion)
            }
            Err(e) => {
                error!("Completion call failed: {}", e);
                (
                    self.prompt.provider_error.clone(),
                    ReplyOutcome::ProviderError,
                )
            }
        };

        Ok(ChatReply {
            reply,
            detected_topic: Some(detected_topic),
            outcome,
        })
    }

    /// Build prompt for LLM
    pub fn build_prompt(&self, question: &str, context: &str) -> String {
        let values = HashMap::from([
            ("assistant", self.prompt.assistant_name.as_str()),
            ("refusal", self.prompt.refusal.as_str()),
            ("context", context),
            ("question", question),
        ]);
        self.template.render(&values)
    }

    /// Get retriever reference
    #[must_use]
    pub const fn retriever(&self) -> &Retriever {
        &self.retriever
    }
}
