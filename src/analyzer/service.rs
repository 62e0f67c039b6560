use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::task::{Context, Poll};
use futures::Future;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneSyncService;
use tower::{Service, ServiceBuilder};

use super::{MealAnalyzer, MealItem};
use crate::capture::CapturedImage;
use crate::error::AnalysisError;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
// Sync is required so a workflow holding the stack can be shared across
// tasks by reference.
pub(crate) type AnalyzerStack = BoxCloneSyncService<CapturedImage, Vec<MealItem>, BoxError>;

/// Tower wrapper around a `MealAnalyzer`, so the workflow can layer request
/// policies (currently a timeout) in front of the analyzer call.
#[derive(Clone)]
pub struct AnalyzerService {
    inner: Arc<dyn MealAnalyzer>,
}

impl AnalyzerService {
    pub fn new(inner: Arc<dyn MealAnalyzer>) -> Self {
        Self { inner }
    }
}

impl Service<CapturedImage> for AnalyzerService {
    type Response = Vec<MealItem>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, image: CapturedImage) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let items = inner.analyze(&image).await?;
            Ok(items)
        })
    }
}

/// Builds the boxed analyzer stack used by the workflow.
pub(crate) fn build_stack(
    analyzer: Arc<dyn MealAnalyzer>,
    timeout: Option<Duration>,
) -> AnalyzerStack {
    let service = ServiceBuilder::new()
        .option_layer(timeout.map(TimeoutLayer::new))
        .service(AnalyzerService::new(analyzer));

    BoxCloneSyncService::new(service)
}

/// Collapses stack errors back into the analysis taxonomy. A timeout elapsing
/// counts as a transport failure.
pub(crate) fn into_analysis_error(err: BoxError) -> AnalysisError {
    match err.downcast::<AnalysisError>() {
        Ok(analysis) => *analysis,
        Err(err) if err.is::<Elapsed>() => {
            AnalysisError::Transport("analysis request timed out".to_string())
        }
        Err(err) => AnalysisError::Transport(err.to_string()),
    }
}
