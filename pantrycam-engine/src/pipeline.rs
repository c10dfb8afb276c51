use crate::backoff;
use crate::encoder::encode_image;
use crate::session::{BusyFlag, PipelineError, PipelineState};
use crate::traits::{HttpTransport, OutputSurface};
use pantrycam_core::config::PipelineConfig;
use pantrycam_core::render::{render_outcome, render_searching};
use pantrycam_core::types::{
    AnalysisRequest, IngredientList, PipelineOutcome, RecipeResultSet, RecipeSummary, RunId,
};
use pantrycam_providers::detection::{ImagePayload, build_detection_request};
use pantrycam_providers::parse::{
    RecipeResponse, error_message, parse_detection_response, parse_recipe_response,
};
use pantrycam_providers::recipes::build_recipe_request;
use pantrycam_providers::request::HttpRequest;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const UNKNOWN_BACKEND_ERROR: &str = "Unknown error from backend";

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a pipeline run is already in progress")]
    Busy,
}

pub struct PipelineController {
    cfg: PipelineConfig,
    transport: Arc<dyn HttpTransport>,
    surface: Arc<dyn OutputSurface>,
    busy: BusyFlag,
}

impl PipelineController {
    pub fn new(
        cfg: PipelineConfig,
        transport: Arc<dyn HttpTransport>,
        surface: Arc<dyn OutputSurface>,
    ) -> Self {
        Self {
            cfg,
            transport,
            surface,
            busy: BusyFlag::new(),
        }
    }

    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Runs one request through detection and recipe lookup and renders the result.
    pub async fn run(&self, req: AnalysisRequest) -> Result<PipelineOutcome, EngineError> {
        self.run_with_hook(req, |_state| async {}).await
    }

    /// Same as `run`, but reports every state transition to `on_state`.
    ///
    /// The hook is for progress display and must be fast.
    pub async fn run_with_hook<F, Fut>(
        &self,
        req: AnalysisRequest,
        on_state: F,
    ) -> Result<PipelineOutcome, EngineError>
    where
        F: Fn(PipelineState) -> Fut,
        Fut: Future<Output = ()>,
    {
        let _busy = self
            .busy
            .try_acquire(self.surface.clone())
            .ok_or(EngineError::Busy)?;

        let run = RunId::new();
        log::debug!("[{run}] {}", PipelineState::Validating.label());
        on_state(PipelineState::Validating).await;

        let outcome = match self.drive(run, &req, &on_state).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("[{run}] pipeline error: {e:?}");
                e.into()
            }
        };

        on_state(PipelineState::Terminal).await;
        match &outcome {
            PipelineOutcome::Failed { reason } => log::warn!("[{run}] failed: {reason}"),
            other => log::info!("[{run}] finished: {}", other.label()),
        }

        self.surface.show(&render_outcome(&outcome));
        Ok(outcome)
    }

    async fn drive<F, Fut>(
        &self,
        run: RunId,
        req: &AnalysisRequest,
        on_state: &F,
    ) -> Result<PipelineOutcome, PipelineError>
    where
        F: Fn(PipelineState) -> Fut,
        Fut: Future<Output = ()>,
    {
        if req.is_empty() {
            return Err(PipelineError::Validation);
        }

        let image = match &req.image {
            Some(file) => Some(encode_image(file).await?),
            None => None,
        };

        log::debug!("[{run}] {}", PipelineState::Stage1InFlight.label());
        on_state(PipelineState::Stage1InFlight).await;
        let ingredients = self.detect(image.as_ref(), req.prompt()).await?;

        if ingredients.is_empty() {
            return Ok(PipelineOutcome::IngredientsEmpty);
        }

        log::debug!("[{run}] detected {} ingredients", ingredients.len());
        on_state(PipelineState::Stage1Done).await;
        self.surface.show(&render_searching(&ingredients));

        log::debug!("[{run}] {}", PipelineState::Stage2InFlight.label());
        on_state(PipelineState::Stage2InFlight).await;
        let recipes = self.lookup_recipes(run).await?;

        if recipes.recipes.is_empty() {
            Ok(PipelineOutcome::RecipesEmpty { ingredients })
        } else {
            Ok(PipelineOutcome::Success {
                ingredients,
                recipes,
            })
        }
    }

    /// Stage 1. A single attempt; any failure ends the run.
    async fn detect(
        &self,
        image: Option<&ImagePayload>,
        prompt: Option<&str>,
    ) -> Result<IngredientList, PipelineError> {
        let req = build_detection_request(self.cfg.detection_endpoint.as_str(), image, prompt);
        let resp = self
            .transport
            .execute(&req)
            .await
            .map_err(|e| PipelineError::Transport(format!("Request failed: {e:#}")))?;

        if !resp.is_success() {
            let msg = error_message(&resp.body).unwrap_or_else(|| {
                format!("Server error: {} {}", resp.status, resp.status_text)
                    .trim_end()
                    .to_string()
            });
            return Err(PipelineError::Transport(msg));
        }

        let parsed = parse_detection_response(&resp.body)
            .map_err(|e| PipelineError::Transport(format!("Invalid server response: {e:#}")))?;

        match (parsed.success, parsed.ingredients) {
            (true, Some(list)) => Ok(IngredientList::new(list)),
            _ => Err(PipelineError::Semantic(semantic_message(parsed.error))),
        }
    }

    /// Stage 2. Transport failures, non-2xx and non-JSON bodies are retried
    /// with backoff. Anything decodable as JSON is judged once, after the loop.
    async fn lookup_recipes(&self, run: RunId) -> Result<RecipeResultSet, PipelineError> {
        let req = build_recipe_request(self.cfg.recipe_endpoint.as_str());
        let base = Duration::from_millis(self.cfg.retry.base_delay_ms);

        let parsed = backoff::execute_with_base(
            || self.fetch_recipes_once(&req),
            self.cfg.retry.max_attempts,
            base,
        )
        .await
        .map_err(|e| PipelineError::Transport(format!("Recipe fetch failed: {e}")))?;

        if !parsed.success {
            return Err(PipelineError::Semantic(semantic_message(parsed.error)));
        }
        let entries = match parsed.entries() {
            Ok(Some(entries)) => entries,
            Ok(None) => return Err(PipelineError::Semantic(semantic_message(parsed.error))),
            Err(e) => {
                return Err(PipelineError::Semantic(format!("Invalid recipe data: {e:#}")));
            }
        };

        if entries.is_empty() {
            if let Some(msg) = parsed.message.as_deref() {
                log::info!("[{run}] recipe service: {msg}");
            }
        }

        let recipes = entries
            .into_iter()
            .map(|r| RecipeSummary {
                title: r.title,
                ingredients: r.ingredients,
                instructions: r.instructions,
            })
            .collect();
        Ok(RecipeResultSet::new(recipes, parsed.total_found))
    }

    async fn fetch_recipes_once(&self, req: &HttpRequest) -> Result<RecipeResponse, String> {
        let resp = self
            .transport
            .execute(req)
            .await
            .map_err(|e| format!("{e:#}"))?;

        if !resp.is_success() {
            return Err(if resp.status_text.is_empty() {
                resp.status.to_string()
            } else {
                resp.status_text
            });
        }

        parse_recipe_response(&resp.body).map_err(|e| format!("{e:#}"))
    }
}

fn semantic_message(error: Option<String>) -> String {
    error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_BACKEND_ERROR.to_string())
}
