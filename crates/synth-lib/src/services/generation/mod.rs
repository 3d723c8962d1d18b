// Generation Service Module
// Orchestrates one generation request: conversation bookkeeping, the
// remote call joined with a minimum-wait timer, artifact parsing, and
// progress simulation

pub mod error;
pub mod gemini;
pub mod parser;
pub mod progress;
pub mod prompt;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

pub use error::{GenerationError, GenerationErrorCode, GenerationResult, ParseError};
pub use gemini::GeminiProvider;
pub use parser::parse_artifact;
pub use progress::{
    default_generation_steps, GenerationStep, ProgressSimulator, ProgressSnapshot,
    ProgressTimeline,
};

use crate::models::{ProviderConfig, ProviderKind};
use crate::services::session::BuildSession;

/// Minimum time a generation visibly runs, so the step simulation can
/// play out even when the remote call returns instantly
pub const MIN_GENERATION_WAIT: Duration = Duration::from_millis(2500);

/// Assistant notice appended when a generation fails
pub const GENERATION_FAILURE_MESSAGE: &str = "❌ Failed to generate website. Please try again.";

/// Sampling options for a single text request
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Disable model reasoning for short, fast responses
    pub disable_thinking: bool,
}

impl TextOptions {
    /// Options for the site-generation request
    pub fn site_generation() -> Self {
        Self {
            temperature: Some(0.1),
            max_output_tokens: None,
            disable_thinking: false,
        }
    }

    /// Options for the prompt-enhancement request
    pub fn prompt_enhancement() -> Self {
        Self {
            temperature: Some(0.7),
            max_output_tokens: Some(500),
            disable_thinking: true,
        }
    }
}

/// Trait for text-generation providers.
///
/// The provider is a black box: prompt text in, raw response text out.
/// Payload extraction happens in the parser, never in the provider.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the current configuration
    fn config(&self) -> &ProviderConfig;

    /// Send a single-turn prompt and return the raw response text
    async fn generate_text(&self, prompt: &str, options: &TextOptions) -> GenerationResult<String>;
}

/// Boxed generation provider type
pub type BoxedGenerationProvider = Box<dyn GenerationProvider>;

/// Factory function to create a generation provider from config
pub fn create_provider(
    config: ProviderConfig,
    api_key: Option<String>,
) -> GenerationResult<BoxedGenerationProvider> {
    match config.provider {
        ProviderKind::Gemini => {
            let key = api_key.ok_or_else(|| {
                GenerationError::InvalidConfig("Gemini requires an API key".to_string())
            })?;
            if key.is_empty() {
                return Err(GenerationError::InvalidConfig(
                    "Gemini API key cannot be empty".to_string(),
                ));
            }
            Ok(Box::new(GeminiProvider::new(config, key)))
        }
    }
}

/// How a generation request concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Nothing happened: empty prompt, or another generation in flight
    Skipped,
    /// Artifact produced and installed into the session
    Generated,
    /// Response parsed but carried no files; message shown, no artifact
    /// state change
    NoFiles,
}

/// Orchestrates generation requests against one provider
pub struct GenerationService {
    provider: BoxedGenerationProvider,
    steps: Vec<GenerationStep>,
    min_wait: Duration,
    progress_tx: Arc<watch::Sender<ProgressSnapshot>>,
}

impl GenerationService {
    pub fn new(provider: BoxedGenerationProvider) -> Self {
        let (progress_tx, _) = watch::channel(ProgressSnapshot::default());
        Self {
            provider,
            steps: default_generation_steps(),
            min_wait: MIN_GENERATION_WAIT,
            progress_tx: Arc::new(progress_tx),
        }
    }

    /// Override the minimum visible generation time
    pub fn with_min_wait(mut self, min_wait: Duration) -> Self {
        self.min_wait = min_wait;
        self
    }

    /// Override the simulated pipeline steps
    pub fn with_steps(mut self, steps: Vec<GenerationStep>) -> Self {
        self.steps = steps;
        self
    }

    /// Observe simulated progress across generation cycles. The value
    /// resets to zero when a new cycle starts.
    pub fn progress(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress_tx.subscribe()
    }

    /// Run one generation request against the session.
    ///
    /// The user message is appended before the remote call starts, so the
    /// log always shows the request ahead of its response. At most one
    /// generation runs per session; a second request while one is in
    /// flight is a no-op.
    pub async fn generate(
        &self,
        session: &mut BuildSession,
        prompt: &str,
    ) -> GenerationResult<GenerationOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() || session.is_generating() {
            return Ok(GenerationOutcome::Skipped);
        }

        session.set_generating(true);
        let result = self.run_generation(session, prompt).await;
        session.set_generating(false);
        result
    }

    async fn run_generation(
        &self,
        session: &mut BuildSession,
        prompt: &str,
    ) -> GenerationResult<GenerationOutcome> {
        session.conversation_mut().push_user(prompt);

        let mut simulator =
            ProgressSimulator::start(self.steps.clone(), Arc::clone(&self.progress_tx));

        let request = prompt::build_site_prompt(prompt);
        log::info!("generation started ({} chars prompt)", prompt.len());

        // Both the remote call and the minimum wait must settle before the
        // outcome is surfaced.
        let (response, _) = futures::future::join(
            self.provider
                .generate_text(&request, &TextOptions::site_generation()),
            tokio::time::sleep(self.min_wait),
        )
        .await;

        let raw = match response {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("generation failed: {err}");
                simulator.cancel();
                session.conversation_mut().push_assistant(GENERATION_FAILURE_MESSAGE);
                return Err(err);
            }
        };

        let artifact = match parser::parse_artifact(&raw) {
            Ok(artifact) => artifact,
            Err(err) => {
                log::warn!("generation payload unparsable: {err}");
                simulator.cancel();
                session.conversation_mut().push_assistant(GENERATION_FAILURE_MESSAGE);
                return Err(err.into());
            }
        };

        simulator.finish();

        if artifact.is_empty() {
            log::warn!("generation returned no files");
            session
                .conversation_mut()
                .push_completion(artifact.message, None, artifact.steps);
            return Ok(GenerationOutcome::NoFiles);
        }

        log::info!("generation produced {} files", artifact.files.len());
        session.install_artifact(&artifact);
        session.conversation_mut().push_completion(
            artifact.message.clone(),
            Some(artifact.files.clone()),
            artifact.steps.clone(),
        );

        Ok(GenerationOutcome::Generated)
    }

    /// Enhance a rough prompt into a more detailed one
    pub async fn enhance_prompt(&self, prompt: &str) -> GenerationResult<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        let raw = self
            .provider
            .generate_text(
                &prompt::build_enhance_prompt(prompt),
                &TextOptions::prompt_enhancement(),
            )
            .await?;

        let cleaned = prompt::clean_enhanced_response(&raw);
        if cleaned.is_empty() {
            return Err(GenerationError::EmptyEnhancement);
        }

        Ok(cleaned)
    }
}
