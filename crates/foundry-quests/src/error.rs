//! Error types for the quest generator.
//!
//! Uses `thiserror` for typed errors covering the generation pipeline:
//! prompt rendering, LLM calls, and response parsing. None of these ever
//! escape [`QuestGenerator::generate_quest`] -- every failure path
//! degrades to the fallback quest at that boundary.
//!
//! [`QuestGenerator::generate_quest`]: crate::generator::QuestGenerator::generate_quest

/// Errors that can occur inside the quest generation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Failed to render a prompt template.
    #[error("template render error: {0}")]
    Template(String),

    /// The LLM backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    LlmBackend(String),

    /// The LLM response could not be parsed into a well-formed quest.
    #[error("response parse error: {0}")]
    Parse(String),

    /// The generation request exceeded its deadline.
    #[error("timeout: generation request exceeded deadline")]
    Timeout,

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),
}
