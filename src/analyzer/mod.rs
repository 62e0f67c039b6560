pub mod model;
pub mod remote;
pub mod service;

use async_trait::async_trait;

use crate::capture::CapturedImage;
use crate::error::AnalysisError;

pub use model::{MealItem, NutritionValue, PortionSize};
pub use remote::RemoteAnalyzer;
pub use service::AnalyzerService;

/// Boundary to the food analyzer. Implementations take one captured image and
/// return the detected items in the analyzer's own order.
#[async_trait]
pub trait MealAnalyzer: Send + Sync {
    async fn analyze(&self, image: &CapturedImage) -> Result<Vec<MealItem>, AnalysisError>;
}
