//! Domain layer containing the screening rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `screening` - Interview phases, candidate profile, conversation state and report

pub mod foundation;
pub mod screening;
