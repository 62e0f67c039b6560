pub mod analyzer;
pub mod capture;
pub mod config;
pub mod error;
pub mod workflow;

pub use error::{AnalysisError, AppError, CaptureError};

pub use analyzer::{MealAnalyzer, MealItem, NutritionValue, PortionSize, RemoteAnalyzer};
pub use capture::{CaptureState, CapturedImage, FileSource, ImageSource, PreviewFrame};
pub use config::Configuration;
pub use workflow::{MealWorkflow, WorkflowBuilder, WorkflowPhase, WorkflowSnapshot};
