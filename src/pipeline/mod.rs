pub mod orchestrator;

pub use orchestrator::{GenerationOrchestrator, GenerationOutcome, GenerationReport};
