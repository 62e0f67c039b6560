use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use tracing::{debug, info, warn};

use super::state::{WorkflowPhase, WorkflowSnapshot};
use crate::analyzer::service::{build_stack, into_analysis_error, AnalyzerStack};
use crate::analyzer::MealAnalyzer;
use crate::capture::{CaptureState, CapturedImage};
use crate::error::{AppError, CaptureError};

struct WorkflowInner {
    capture: CaptureState,
    phase: WorkflowPhase,
    // Bumped on every new selection; an analysis outcome is applied only if
    // the generation it was submitted under is still current.
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl WorkflowInner {
    fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            phase: self.phase.clone(),
            preview: self.capture.preview_frame(),
        }
    }
}

impl Drop for WorkflowInner {
    fn drop(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.capture.clear();
    }
}

/// Owns the meal-photo analysis state machine for one workflow instance:
/// Idle -> Ready -> Analyzing -> Succeeded | Failed, with any new selection
/// resetting to Ready.
///
/// Stale-response policy: a selection made while a request is in flight
/// invalidates it immediately. The in-flight token is cancelled, the workflow
/// moves to Ready with the new image, and a response that still arrives for
/// the old generation is discarded. Results therefore always correspond to
/// the image currently selected.
#[derive(Clone)]
pub struct MealWorkflow {
    inner: Arc<Mutex<WorkflowInner>>,
    analyzer: AnalyzerStack,
}

impl MealWorkflow {
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Installs a validated image as the current selection. Clears any prior
    /// results or error, releases the previous preview handle, supersedes an
    /// in-flight analysis, and moves to Ready. On invalid input the workflow
    /// state is left untouched.
    pub async fn select_image(&self, image: CapturedImage) -> Result<WorkflowSnapshot, CaptureError> {
        let mut inner = self.inner.lock().await;
        let image_id = image.id();
        inner.capture.select(image)?;

        if let Some(token) = inner.in_flight.take() {
            debug!(image_id = %image_id, "superseding in-flight analysis");
            token.cancel();
        }
        inner.generation = inner.generation.wrapping_add(1);
        inner.phase = WorkflowPhase::Ready;

        info!(image_id = %image_id, "image selected, workflow ready");
        Ok(inner.snapshot())
    }

    /// Submits the current selection to the analyzer and suspends until the
    /// outcome resolves. A call while a request is already in flight is a
    /// no-op returning the current snapshot, so at most one request is
    /// outstanding per workflow instance.
    pub async fn submit(&self) -> Result<WorkflowSnapshot, AppError> {
        let (image, generation, token) = {
            let mut inner = self.inner.lock().await;
            if inner.phase.is_analyzing() {
                debug!("submit ignored: analysis already in flight");
                return Ok(inner.snapshot());
            }
            let image = inner
                .capture
                .selected()
                .cloned()
                .ok_or_else(|| AppError::Workflow("no image selected".to_string()))?;

            let token = CancellationToken::new();
            inner.in_flight = Some(token.clone());
            inner.phase = WorkflowPhase::Analyzing;
            (image, inner.generation, token)
        };

        info!(image_id = %image.id(), "submitting image for analysis");
        let analyzer = self.analyzer.clone();
        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            result = analyzer.oneshot(image.clone()) => Some(result),
        };

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!(image_id = %image.id(), "discarding stale analysis outcome");
            return Ok(inner.snapshot());
        }
        inner.in_flight = None;

        match outcome {
            Some(Ok(items)) => {
                info!(image_id = %image.id(), count = items.len(), "analysis succeeded");
                inner.phase = WorkflowPhase::Succeeded(items);
            }
            Some(Err(err)) => {
                let err = into_analysis_error(err);
                warn!(image_id = %image.id(), error = %err, "analysis failed");
                inner.phase = WorkflowPhase::Failed(err.to_string());
            }
            // Cancelled during teardown; nothing left to record.
            None => {}
        }
        Ok(inner.snapshot())
    }
}

/// Wires an analyzer and request policy into a workflow instance.
pub struct WorkflowBuilder {
    analyzer: Option<Arc<dyn MealAnalyzer>>,
    analyzer_timeout: Option<Duration>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            analyzer: None,
            analyzer_timeout: None,
        }
    }

    pub fn analyzer(mut self, analyzer: Arc<dyn MealAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    // Upper bound on one analysis round-trip, this will layer a timeout in
    // front of the analyzer.
    pub fn analyzer_timeout(mut self, timeout: Duration) -> Self {
        self.analyzer_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<MealWorkflow, AppError> {
        let analyzer = self
            .analyzer
            .ok_or_else(|| AppError::Workflow("analyzer not set".to_string()))?;

        Ok(MealWorkflow {
            inner: Arc::new(Mutex::new(WorkflowInner {
                capture: CaptureState::empty(),
                phase: WorkflowPhase::Idle,
                generation: 0,
                in_flight: None,
            })),
            analyzer: build_stack(analyzer, self.analyzer_timeout),
        })
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
