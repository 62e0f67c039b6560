use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mealsnap::{
    AppError, CaptureError, Configuration, FileSource, ImageSource, MealWorkflow, RemoteAnalyzer,
    WorkflowPhase,
};
use tracing::{error, info, Level};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let configuration = Configuration::from_env();

    let path: PathBuf = std::env::args()
        .nth(1)
        .ok_or_else(|| AppError::Workflow("usage: mealsnap <image-path>".to_string()))?
        .into();

    let (picked_tx, mut picked_rx) = tokio::sync::mpsc::channel(configuration.capture_buffer_size);
    let source = FileSource::new(path, picked_tx);

    let analyzer = Arc::new(RemoteAnalyzer::new(&configuration));
    let workflow = MealWorkflow::builder()
        .analyzer(analyzer)
        .analyzer_timeout(Duration::from_secs(configuration.request_timeout_secs))
        .build()?;

    source.open().await?;
    let image = picked_rx.recv().await.ok_or(CaptureError::ChannelClosed)?;
    workflow.select_image(image).await?;

    let snapshot = workflow.submit().await?;
    match &snapshot.phase {
        WorkflowPhase::Succeeded(items) => {
            info!(count = items.len(), "analysis complete");
            for item in items {
                match &item.nutrition {
                    Some(nutrition) => info!(
                        label = %item.label,
                        portion = ?item.portion_size,
                        amount_g = nutrition.amount_grams,
                        kcal = nutrition.kcal,
                        "detected item"
                    ),
                    None => info!(
                        label = %item.label,
                        portion = ?item.portion_size,
                        "detected item without registered nutrition"
                    ),
                }
            }
        }
        WorkflowPhase::Failed(description) => error!(%description, "analysis failed"),
        phase => info!(phase = phase.name(), "workflow ended early"),
    }

    Ok(())
}
