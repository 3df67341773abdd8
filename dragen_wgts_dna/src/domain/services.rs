//! The transformations behind each handler

pub mod casing;
mod fastq;
mod metrics;
mod project;
mod run_name;
pub mod wes_request;
mod wes_state_change;

pub use fastq::FastqService;
pub use metrics::{MetricsService, PostAnalysisRequest};
pub use project::ProjectService;
pub use run_name::{RunName, RunNameService, WorkflowIdentity};
pub use wes_state_change::{WesEventService, derive_outputs};
