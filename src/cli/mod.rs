//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod bulk;
mod columns;
mod inspect;
mod next;
mod profile;

pub use bulk::run_bulk;
pub use columns::run_columns;
pub use inspect::run_inspect;
pub use next::{parse_change, run_next};
pub use profile::{run_profile, run_profile_error};
