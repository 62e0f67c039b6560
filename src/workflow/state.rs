use crate::analyzer::MealItem;
use crate::capture::PreviewFrame;

/// Tagged union of the analysis workflow. One phase at a time makes the
/// illegal flag combinations (loading and succeeded at once, results and
/// error at once) unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowPhase {
    /// No image selected.
    Idle,
    /// Image selected, not yet submitted.
    Ready,
    /// Analysis request in flight.
    Analyzing,
    /// Last analysis finished; items in analyzer response order.
    Succeeded(Vec<MealItem>),
    /// Last analysis failed; human-readable description.
    Failed(String),
}

impl WorkflowPhase {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowPhase::Idle => "Idle",
            WorkflowPhase::Ready => "Ready",
            WorkflowPhase::Analyzing => "Analyzing",
            WorkflowPhase::Succeeded(_) => "Succeeded",
            WorkflowPhase::Failed(_) => "Failed",
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, WorkflowPhase::Analyzing)
    }

    pub fn results(&self) -> Option<&[MealItem]> {
        match self {
            WorkflowPhase::Succeeded(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowPhase::Failed(description) => Some(description),
            _ => None,
        }
    }
}

/// Read-only view handed to presenters.
#[derive(Debug, Clone)]
pub struct WorkflowSnapshot {
    pub phase: WorkflowPhase,
    pub preview: Option<PreviewFrame>,
}

impl WorkflowSnapshot {
    pub fn results(&self) -> Option<&[MealItem]> {
        self.phase.results()
    }

    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }
}
