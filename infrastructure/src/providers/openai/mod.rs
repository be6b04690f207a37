//! OpenAI-compatible chat completions provider

mod adapter;
pub mod types;

pub use adapter::OpenAiProvider;
