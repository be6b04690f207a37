//! Use cases (application services)

pub mod run_discussion;
pub mod run_proposals;
pub mod run_session;
pub mod run_voting;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
