//! Filter state for the hosts view.
//!
//! The hosts list is filtered along many dimensions, four of which (team,
//! free-text query, label, status) combine freely while the rest are
//! mutually exclusive. This module provides the typed dimensions, the
//! decoded [`HostFilters`] state, and the priority cascade that picks the
//! single surviving exclusive dimension.
//!
//! ## Usage
//!
//! ```
//! use hosts_console::filters::{ExclusiveFilter, HostFilters};
//! use hosts_console::license::Tier;
//!
//! let filters = HostFilters::from_query_string(
//!     "team_id=2&policy_id=5&policy_response=failing&mdm_id=9",
//! );
//! // Policy outranks MDM, so the canonical state keeps only the policy pair.
//! assert_eq!(
//!     ExclusiveFilter::resolve(&filters, Tier::Premium),
//!     Some(ExclusiveFilter::Policy),
//! );
//! ```

pub mod dimensions;
mod exclusive;
mod state;

pub use dimensions::{
    BootstrapPackageStatus, DiskEncryptionStatus, HostStatus, MdmEnrollmentStatus,
    MdmProfileStatus, PolicyResponse, ScriptBatchExecutionStatus, SoftwareAggregateStatus,
};
pub use exclusive::ExclusiveFilter;
pub use state::{HostFilters, DEFAULT_PAGE_INDEX, LOW_DISK_SPACE_RANGE};
