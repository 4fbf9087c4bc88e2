//! The quest generator: the only producer of contracts in the system.
//!
//! Wires together the prompt engine, the LLM backend, the response
//! parser, and the fallback contract behind a single infallible call:
//! [`QuestGenerator::generate_quest`] always hands back a usable
//! [`Quest`], no matter what the network or the model does.

use std::time::Duration;

use foundry_types::{Industry, Quest};
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::fallback::fallback_quest;
use crate::llm::{LlmBackend, create_backend};
use crate::parse::parse_quest_response;
use crate::prompt::PromptEngine;

/// Generates manufacturing contracts, via LLM when available.
///
/// Construct with [`QuestGenerator::new`] from environment configuration,
/// or [`QuestGenerator::offline`] for a generator that only ever produces
/// the fallback contract (useful in tests and air-gapped deployments).
pub struct QuestGenerator {
    backend: Option<LlmBackend>,
    prompts: Option<PromptEngine>,
    request_timeout: Duration,
}

impl QuestGenerator {
    /// Build a generator from configuration.
    ///
    /// When a backend is configured the prompt templates are loaded up
    /// front so a broken template directory surfaces at startup rather
    /// than silently degrading every request.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Template`] if a backend is configured
    /// but the prompt templates cannot be loaded.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let (backend, prompts) = match &config.backend {
            Some(backend_config) => {
                let backend = create_backend(backend_config);
                let prompts = PromptEngine::new(&config.templates_dir)?;
                (Some(backend), Some(prompts))
            }
            None => (None, None),
        };

        Ok(Self {
            backend,
            prompts,
            request_timeout: config.request_timeout,
        })
    }

    /// Build a generator with no LLM backend. Every call produces the
    /// fallback contract.
    #[must_use]
    pub const fn offline() -> Self {
        Self {
            backend: None,
            prompts: None,
            request_timeout: Duration::from_millis(0),
        }
    }

    /// Whether an LLM backend is configured.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate one contract for the given station level.
    ///
    /// This call is infallible: any failure in rendering, the HTTP call,
    /// the deadline, or parsing degrades to the fallback contract with a
    /// warning in the logs.
    pub async fn generate_quest(&self, station_level: u32) -> Quest {
        let industry = pick_industry();

        match self.try_generate(station_level, industry).await {
            Ok(quest) => {
                debug!(title = %quest.title, %industry, "generated contract");
                quest
            }
            Err(error) => {
                warn!(%error, %industry, "contract generation failed, using fallback");
                fallback_quest()
            }
        }
    }

    /// Generate a batch of contracts concurrently.
    ///
    /// Each contract draws its own industry. The batch completes when the
    /// slowest request completes (or times out and falls back).
    pub async fn generate_offers(&self, station_level: u32, count: usize) -> Vec<Quest> {
        let requests = (0..count).map(|_| self.generate_quest(station_level));
        futures::future::join_all(requests).await
    }

    /// The fallible inner pipeline: render, call, parse.
    async fn try_generate(
        &self,
        station_level: u32,
        industry: Industry,
    ) -> Result<Quest, GeneratorError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or_else(|| GeneratorError::Config("no LLM backend configured".to_owned()))?;
        let prompts = self
            .prompts
            .as_ref()
            .ok_or_else(|| GeneratorError::Config("no prompt templates loaded".to_owned()))?;

        let prompt = prompts.render(station_level, industry)?;

        let response = tokio::time::timeout(self.request_timeout, backend.complete(&prompt))
            .await
            .map_err(|_| GeneratorError::Timeout)??;

        parse_quest_response(&response)
    }
}

/// Pick a random industry for the next contract.
fn pick_industry() -> Industry {
    let mut rng = rand::rng();
    Industry::ALL
        .choose(&mut rng)
        .copied()
        .unwrap_or(Industry::Aerospace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foundry_types::QuestOrigin;

    #[tokio::test]
    async fn offline_generator_produces_fallback() {
        let generator = QuestGenerator::offline();
        assert!(!generator.is_online());

        let quest = generator.generate_quest(1).await;
        assert_eq!(quest.origin, QuestOrigin::Fallback);
        assert_eq!(quest.requirements.materials, 50);
    }

    #[tokio::test]
    async fn batch_generation_yields_requested_count() {
        let generator = QuestGenerator::offline();
        let offers = generator.generate_offers(1, 3).await;
        assert_eq!(offers.len(), 3);
        for offer in &offers {
            assert_eq!(offer.origin, QuestOrigin::Fallback);
        }
    }

    #[tokio::test]
    async fn batch_offers_have_distinct_ids() {
        let generator = QuestGenerator::offline();
        let offers = generator.generate_offers(1, 3).await;
        let mut ids: Vec<_> = offers.iter().map(|q| q.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn pick_industry_returns_a_known_industry() {
        for _ in 0..20 {
            let industry = pick_industry();
            assert!(Industry::ALL.contains(&industry));
        }
    }
}
