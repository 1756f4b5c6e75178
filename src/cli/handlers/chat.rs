//! One-shot chat and retrieval inspection handlers

use std::sync::Arc;

use crate::cli::output::*;
use crate::knowledge::KnowledgeStore;
use crate::rag::ContextAssembler;
use crate::rag::RagService;
use crate::rag::ReplyOutcome;
use crate::rag::Retriever;
use crate::rag::Vocabulary;
use crate::AppConfig;
use crate::Result;

/// Run one question through the full pipeline and print the reply
pub async fn handle_ask_command(
    config: &AppConfig,
    question: String,
    topic: Option<String>,
) -> Result<()> {
    let service = RagService::new(config)?;

    print_info(&format!("Question: {question}"));
    let reply = service.reply(&question, topic.as_deref()).await?;

    println!();
    println!("{}", reply.reply);
    println!();

    match reply.outcome {
        ReplyOutcome::Answered => print_success(&format!(
            "Answered from {} context",
            reply.detected_topic.as_deref().unwrap_or("mixed")
        )),
        ReplyOutcome::NoContext => print_warning("No matching records; provider not called"),
        ReplyOutcome::EmptyCompletion => print_warning("Provider returned an empty answer"),
        ReplyOutcome::ProviderError => print_error("Provider call failed (see logs)"),
    }

    Ok(())
}

/// Show how a query is ranked without calling the provider
pub fn handle_retrieve_command(
    config: &AppConfig,
    query: &str,
    topic: Option<&str>,
    show_context: bool,
) -> Result<()> {
    let store = Arc::new(KnowledgeStore::load(&config.knowledge)?);
    let vocabulary = Arc::new(Vocabulary::new(
        &config.vocabulary,
        config.retrieval.min_token_len,
    ));
    let retriever = Retriever::new(store, vocabulary, config.retrieval.clone());
    let assembler = ContextAssembler::new(config.retrieval.max_context_chars);

    let ranked = retriever.rank(query, topic);
    let retrieval = assembler.assemble(&ranked.candidates);
    print_retrieval(&ranked, &retrieval, show_context);

    Ok(())
}
