use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Capture Error: {0}")]
    Capture(#[from] CaptureError),
    #[error("Analysis Error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Workflow Error: {0}")]
    Workflow(String),
}

// Raised synchronously at capture time. The workflow must not advance to
// Ready when selection fails.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Invalid image input: {0}")]
    InvalidImage(String),
    #[error("Failed to read image from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("The capture channel is closed")]
    ChannelClosed,
}

// Surfaced after the asynchronous round-trip to the analyzer. Every kind
// collapses into the Failed workflow state; callers distinguish them only
// through the rendered description.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to reach the analyzer: {0}")]
    Transport(String),
    #[error("Analyzer returned status {status}: {message}")]
    Analyzer { status: u16, message: String },
    #[error("Failed to parse analyzer response: {0}")]
    Parse(String),
}
