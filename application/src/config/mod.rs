//! Application configuration

mod deliberation;

pub use deliberation::DeliberationConfig;
