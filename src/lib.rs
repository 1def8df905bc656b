//! **Filter-state reconciliation for a device-management hosts console.**
//!
//! `hosts-console` models the filtered hosts view of a fleet console: the
//! decoded filter state, the rules that keep its many dimensions coherent,
//! and the canonical query-parameter sets derived from it for navigation and
//! for API calls. It powers both a command-line interface for inspecting and
//! stepping filter states and a Rust library for embedding the same rules in
//! other frontends.
//!
//! ## Key Features
//!
//! - **Typed filter state**: Decodes a URL or query string into
//!   [`HostFilters`], with every dimension a typed value rather than a raw
//!   string.
//! - **Mutual exclusion**: Most filter dimensions cannot combine. A fixed
//!   priority cascade ([`ExclusiveFilter`]) picks the single survivor, so a
//!   URL pasted with conflicting parameters always lands on one coherent
//!   view.
//! - **Pure reconciliation**: Every interaction is a [`FilterChange`];
//!   [`reconcile`] turns it into a [`NavigationRequest`] without touching
//!   the location. Side effects stay behind the [`Router`] trait.
//! - **API parameter derivation**: The [`query`] module builds the parameter
//!   sets for list, count, transfer, and delete calls, plus cache keys and
//!   stale-response gating ([`QueryGate`]).
//! - **Bulk-action gating**: The [`bulk`] module decides which bulk
//!   operations the current filters support and produces the exact refusal
//!   messages shown to the user.
//! - **Profile upload helpers**: The [`profiles`] module parses uploaded
//!   configuration-profile file names and maps raw API failures to the
//!   user-facing messages of the upload flow.
//!
//! ## Core Concepts & Modules
//!
//! - **[`filters`]**: The decoded [`HostFilters`] state, its typed
//!   dimensions, and the exclusive-filter cascade.
//! - **[`navigation`]**: [`FilterChange`], the [`reconcile`] function, and
//!   the [`SavedPaths`] bookkeeping that lets sibling console pages link
//!   back to their last filtered view.
//! - **[`query`]**: Canonical API parameter sets and [`QueryKey`] cache
//!   keys derived from a filter state.
//! - **[`bulk`]**: Eligibility rules for bulk host actions.
//! - **[`profiles`]**: Configuration-profile upload helpers.
//! - **[`settings`]**: Persisted hosts-table column preferences.
//!
//! ## Getting Started: Stepping a Filter State
//!
//! Decode the current query string, apply a change, and read off the next
//! location:
//!
//! ```
//! use hosts_console::{reconcile, FilterChange, HostFilters, Tier, ViewContext};
//!
//! let filters = HostFilters::from_query_string("team_id=3&status=online");
//! let ctx = ViewContext::new(Tier::Free);
//! let request = reconcile(&filters, &FilterChange::Search("db-".into()), &ctx);
//!
//! assert_eq!(
//!     request.full_path(),
//!     "/hosts/manage?query=db-&page=0&order_key=hostname&order_direction=asc&team_id=3&status=online",
//! );
//! ```
//!
//! ## Example: Parsing a Profile Upload
//!
//! ```
//! use hosts_console::profiles::{parse_file_name, ProfilePlatform};
//!
//! let parsed = parse_file_name("com.acme.wifi.mobileconfig")?;
//! assert_eq!(parsed.name, "com.acme.wifi");
//! assert_eq!(parsed.platform, ProfilePlatform::Apple);
//! # Ok::<(), hosts_console::ConsoleError>(())
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `hosts-console` library crate. The binary
//! of the same name exposes the reconciler, bulk gating, and profile
//! helpers as subcommands; see the project's README.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Types are named for the domain, not the module tree
    clippy::module_name_repetitions,
    // Filter fields like `os_name`/`os_version` are clear in context
    clippy::similar_names
)]

pub mod bulk;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod labels;
pub mod license;
pub mod navigation;
pub mod params;
pub mod profiles;
pub mod query;
pub mod settings;
pub mod sort;
pub mod teams;

// Re-export main types for convenience
pub use bulk::{
    script_batch_eligibility, select_all_matching_supported, BulkContext, ScriptBatchEligibility,
};
pub use error::{ConsoleError, ErrorContext, OptionContext, Result};
pub use fetch::{QueryGate, Ticket};
pub use filters::{ExclusiveFilter, HostFilters, HostStatus};
pub use labels::{label_id_from_path, Label, MANAGE_HOSTS_PATH};
pub use license::Tier;
pub use navigation::{
    apply, canonical_params, reconcile, FilterChange, NavigationRequest, Router, SavedPaths,
    ViewContext,
};
pub use params::QueryParams;
pub use query::{QueryKey, QueryScope};
pub use settings::ColumnPreferences;
pub use sort::{SortDirection, SortSpec};
pub use teams::TeamFilter;
