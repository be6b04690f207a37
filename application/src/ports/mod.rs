//! Port definitions (interfaces for external adapters)

pub mod llm_provider;
pub mod progress;
