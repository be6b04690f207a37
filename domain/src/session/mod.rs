//! Deliberation session domain
//!
//! - [`entities::Session`] — the session aggregate and its phase state machine
//! - [`entities::Message`] — an append-only transcript entry
//! - [`persona::AgentPersona`] — an immutable participant definition

pub mod entities;
pub mod persona;

pub use entities::{Message, Session, SessionPhase, summarize_transcript};
pub use persona::AgentPersona;
