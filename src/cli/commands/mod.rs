//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod check;
pub mod collect;
pub mod completions;
pub mod dispatcher;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
