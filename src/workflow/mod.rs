pub mod orchestrator;
pub mod state;

pub use orchestrator::{MealWorkflow, WorkflowBuilder};
pub use state::{WorkflowPhase, WorkflowSnapshot};
