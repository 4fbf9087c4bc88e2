//! Contract generation for the Orbital Artisan Foundry.
//!
//! This crate owns the generation boundary: everything between "the
//! station wants new contracts" and "here are well-formed [`Quest`]
//! values". It renders prompts with `minijinja`, talks to an LLM backend
//! over HTTP with `reqwest`, parses the response defensively, and
//! substitutes a deterministic fallback contract whenever anything in
//! that pipeline fails.
//!
//! The public surface is deliberately small: build a [`QuestGenerator`]
//! and call [`QuestGenerator::generate_offers`]. The generator never
//! returns an error from a generation call.
//!
//! [`Quest`]: foundry_types::Quest

pub mod config;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod llm;
pub mod parse;
pub mod prompt;

pub use config::{BackendType, GeneratorConfig, LlmBackendConfig};
pub use error::GeneratorError;
pub use fallback::fallback_quest;
pub use generator::QuestGenerator;
pub use prompt::{PromptEngine, RenderedPrompt};
