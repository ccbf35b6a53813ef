//! Core Advisor implementation

use crate::config::SelectionConfig;
use crate::error::AdvisorError;
use crate::prompt::PromptBuilder;
use crate::selector::select;
use crate::state::{RequestMachine, RequestState};
use crate::types::{PreparedPrompt, Recommendation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sommelier_domain::traits::{InventorySource, LlmProvider};
use sommelier_domain::RecommendationRequest;
use tracing::{debug, info, warn};

/// Load, select and compose without calling a model
///
/// Used for previews (`candidates`, `--dry-run`) that must work without an
/// API key.
pub fn prepare<S, R>(
    source: &S,
    request: &RecommendationRequest,
    config: &SelectionConfig,
    rng: &mut R,
) -> Result<PreparedPrompt, AdvisorError>
where
    S: InventorySource,
    S::Error: std::fmt::Display,
    R: Rng + ?Sized,
{
    let inventory = source
        .load()
        .map_err(|e| AdvisorError::SourceUnavailable(e.to_string()))?;

    if inventory.is_empty() {
        return Err(AdvisorError::SourceUnavailable(
            "inventory has no rows".to_string(),
        ));
    }

    let selection = select(&inventory, request.bucket, config, rng);
    let prompt = PromptBuilder::new(&selection.rows, request)
        .with_fallback(selection.is_fallback)
        .build();

    debug!(
        candidates = selection.len(),
        prompt_chars = prompt.chars().count(),
        "Prompt composed"
    );

    Ok(PreparedPrompt {
        request: request.clone(),
        selection,
        prompt,
    })
}

/// Runs recommendation requests one at a time
pub struct Advisor<S, L>
where
    S: InventorySource,
    L: LlmProvider,
{
    source: S,
    llm: L,
    config: SelectionConfig,
    rng: StdRng,
    machine: RequestMachine,
}

impl<S, L> Advisor<S, L>
where
    S: InventorySource,
    L: LlmProvider,
    S::Error: std::fmt::Display,
    L::Error: std::fmt::Display,
{
    /// Create a new Advisor, shuffling from OS entropy
    pub fn new(source: S, llm: L, config: SelectionConfig) -> Self {
        Self {
            source,
            llm,
            config,
            rng: StdRng::from_entropy(),
            machine: RequestMachine::new(),
        }
    }

    /// Use a fixed shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current request state
    pub fn state(&self) -> RequestState {
        self.machine.state()
    }

    /// Outcome of the most recent request
    pub fn last_outcome(&self) -> Option<RequestState> {
        self.machine.last_outcome()
    }

    /// Inventory source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Selection limits
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Name of the model answering requests
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Mark that the user started filling in the form
    ///
    /// Does nothing if a form is already open.
    pub fn begin(&mut self) -> Result<(), AdvisorError> {
        if self.machine.state() == RequestState::Idle {
            self.machine.transition(RequestState::CollectingPreferences)?;
        }
        Ok(())
    }

    /// Preview the candidates and prompt for a request
    pub fn prepare(&mut self, request: &RecommendationRequest) -> Result<PreparedPrompt, AdvisorError> {
        prepare(&self.source, request, &self.config, &mut self.rng)
    }

    /// Run one request end to end
    ///
    /// Always leaves the advisor back in [`RequestState::Idle`].
    pub fn recommend(
        &mut self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, AdvisorError> {
        self.begin()?;
        self.machine.transition(RequestState::Building)?;

        let prepared = match prepare(&self.source, request, &self.config, &mut self.rng) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!("Request failed while building: {}", e);
                self.finish(RequestState::Failed)?;
                return Err(e);
            }
        };

        self.machine.transition(RequestState::Requesting)?;
        info!(
            bucket = request.bucket.as_str(),
            candidates = prepared.selection.len(),
            is_fallback = prepared.selection.is_fallback,
            model = self.llm.model_name(),
            "Requesting recommendation"
        );

        match self.llm.generate(&prepared.prompt) {
            Ok(text) => {
                self.finish(RequestState::Success)?;
                Ok(Recommendation {
                    text,
                    is_fallback: prepared.selection.is_fallback,
                    candidates: prepared.selection.len(),
                    bucket: request.bucket,
                    model: self.llm.model_name().to_string(),
                })
            }
            Err(e) => {
                warn!("Model call failed: {}", e);
                self.finish(RequestState::Failed)?;
                Err(AdvisorError::ModelUnavailable(e.to_string()))
            }
        }
    }

    fn finish(&mut self, outcome: RequestState) -> Result<(), AdvisorError> {
        self.machine.transition(outcome)?;
        self.machine.transition(RequestState::Idle)?;
        Ok(())
    }
}
