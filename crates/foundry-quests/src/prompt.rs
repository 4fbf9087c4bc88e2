//! Prompt template loading and rendering via `minijinja`.
//!
//! Templates are loaded from the filesystem (default: `templates/`
//! directory) so operators can tune contract flavor without recompiling.
//! Two templates make up a generation request: `system.j2` establishes
//! the game-designer persona, and `contract.j2` asks for one contract
//! for a given station level and industry, spelling out the required
//! JSON shape and the advisory numeric ranges.

use minijinja::Environment;

use foundry_types::Industry;

use crate::error::GeneratorError;

/// Advisory bounds passed to the generation request. These hint at the
/// expected scale; returned values are not re-validated against them.
pub mod ranges {
    /// Minimum raw materials requirement, in kilograms.
    pub const MATERIALS_MIN: u64 = 50;
    /// Maximum raw materials requirement, in kilograms.
    pub const MATERIALS_MAX: u64 = 500;
    /// Minimum manufacturing time, in days.
    pub const TIME_MIN: u64 = 5;
    /// Maximum manufacturing time, in days.
    pub const TIME_MAX: u64 = 20;
    /// Minimum cash reward, in credits.
    pub const CASH_MIN: u64 = 10_000;
    /// Maximum cash reward, in credits.
    pub const CASH_MAX: u64 = 100_000;
    /// Minimum research reward, in points.
    pub const RESEARCH_MIN: u64 = 10;
    /// Maximum research reward, in points.
    pub const RESEARCH_MAX: u64 = 100;
}

/// Manages prompt template loading and rendering.
///
/// Wraps a `minijinja` [`Environment`] with the contract prompt templates
/// pre-loaded. Templates can be edited on disk and will be picked up on
/// the next call to [`PromptEngine::new`].
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the contract-writer persona.
    pub system: String,
    /// User message describing the station, industry, ranges, and shape.
    pub user: String,
}

impl PromptEngine {
    /// Create a new prompt engine loading templates from the given
    /// directory.
    ///
    /// The directory must contain `system.j2` and `contract.j2`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Template`] if a template file cannot be
    /// read or does not compile.
    pub fn new(templates_dir: &str) -> Result<Self, GeneratorError> {
        let mut env = Environment::new();

        let system_tpl = load_template(templates_dir, "system.j2")?;
        let contract_tpl = load_template(templates_dir, "contract.j2")?;

        env.add_template_owned("system", system_tpl)
            .map_err(|e| GeneratorError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("contract", contract_tpl).map_err(|e| {
            GeneratorError::Template(format!("failed to add contract template: {e}"))
        })?;

        Ok(Self { env })
    }

    /// Render the full prompt for one contract generation request.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Template`] if rendering fails.
    pub fn render(
        &self,
        station_level: u32,
        industry: Industry,
    ) -> Result<RenderedPrompt, GeneratorError> {
        let context = minijinja::context! {
            station_level => station_level,
            industry => industry.to_string(),
            materials_min => ranges::MATERIALS_MIN,
            materials_max => ranges::MATERIALS_MAX,
            time_min => ranges::TIME_MIN,
            time_max => ranges::TIME_MAX,
            cash_min => ranges::CASH_MIN,
            cash_max => ranges::CASH_MAX,
            research_min => ranges::RESEARCH_MIN,
            research_max => ranges::RESEARCH_MAX,
        };

        let system = self
            .env
            .get_template("system")
            .map_err(|e| GeneratorError::Template(format!("missing system template: {e}")))?
            .render(&context)
            .map_err(|e| GeneratorError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("contract")
            .map_err(|e| GeneratorError::Template(format!("missing contract template: {e}")))?
            .render(&context)
            .map_err(|e| GeneratorError::Template(format!("contract render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, GeneratorError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| GeneratorError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_templates(dir: &std::path::Path) {
        std::fs::write(
            dir.join("system.j2"),
            "You are a contract writer for an orbital foundry at level {{ station_level }}.",
        )
        .ok();
        std::fs::write(
            dir.join("contract.j2"),
            "Industry: {{ industry }}\nMaterials between {{ materials_min }} and {{ materials_max }} kg.\nRespond ONLY with a JSON object.",
        )
        .ok();
    }

    fn test_dir() -> std::path::PathBuf {
        let unique = format!(
            "foundry_test_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn template_loading_and_rendering() {
        let dir = test_dir();
        write_test_templates(&dir);

        let engine = PromptEngine::new(dir.to_str().unwrap_or(""));
        assert!(engine.is_ok(), "PromptEngine::new should succeed with valid templates");

        let engine = match engine {
            Ok(e) => e,
            Err(_) => return,
        };

        let rendered = engine.render(2, Industry::Medical);
        assert!(rendered.is_ok(), "render should succeed");
        let prompt = match rendered {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(prompt.system.contains("level 2"));
        assert!(prompt.user.contains("Industry: Medical"));
        assert!(prompt.user.contains("between 50 and 500 kg"));
    }

    #[test]
    fn missing_template_directory_is_an_error() {
        let result = PromptEngine::new("/nonexistent/foundry/templates");
        assert!(result.is_err());
    }
}
