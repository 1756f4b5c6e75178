//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `viarag` CLI

use crate::rag::RankedResults;
use crate::rag::Retrieval;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Returns the original string when short enough, otherwise the first
/// `max_chars` characters followed by "..."
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print ranked records and, optionally, the assembled context
pub fn print_retrieval(ranked: &RankedResults, retrieval: &Retrieval, show_context: bool) {
    println!(
        "🎯 Topic: {} | Intent: {}",
        ranked.topic.as_deref().unwrap_or("any"),
        ranked.intent.as_deref().unwrap_or("none")
    );
    println!("🔤 Tokens: {}", ranked.tokens.join(", "));
    println!();

    if ranked.candidates.is_empty() {
        println!("No records scored above the threshold.");
    } else {
        println!("Found {} records:", ranked.candidates.len());
        for (idx, candidate) in ranked.candidates.iter().enumerate() {
            println!(
                "  {}. [{:>6.1}] {} ({})",
                idx + 1,
                candidate.score,
                candidate.record.title,
                candidate.record.source
            );
            println!("     {}", truncate_str(&candidate.record.content, 100));
        }
    }

    println!();
    match retrieval.detected_topic() {
        Some(topic) => println!("📌 Context topic: {topic}"),
        None => println!("📌 Context: {}", Retrieval::NOT_FOUND_SENTINEL),
    }

    if show_context && retrieval.is_found() {
        println!();
        println!("{}", retrieval.context());
    }
}

/// Print configuration, secrets masked
pub fn print_config(config: &AppConfig) {
    let config = config.redacted();
    println!("📋 VIA Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Bind: {}", config.bind_address());
    println!("  CORS: {}", config.server.enable_cors);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Directory: {}", config.logging.directory);
    println!();

    println!("🤖 Completion provider:");
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm.model);
    println!(
        "  API key: {}",
        if config.llm.resolved_api_key().is_empty() {
            "(not set)"
        } else {
            "********"
        }
    );
    println!("  Timeout: {}s", config.llm.timeout_secs);
    println!();

    println!("📚 Knowledge sources:");
    for source in &config.knowledge.sources {
        println!("  {} -> {}", source.name, source.path.display());
    }
    println!();

    println!("🔍 Retrieval:");
    println!("  Top K: {}", config.retrieval.top_k);
    println!("  Max context chars: {}", config.retrieval.max_context_chars);
    println!("  Topic mode: {:?}", config.retrieval.topic_mode);
    println!("  Synonym expansion: {}", config.retrieval.expand_synonyms);
    println!();

    println!("💬 Sessions:");
    println!("  Max entries: {}", config.session.max_entries);
    println!("  TTL: {}s", config.session.ttl_secs);
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
