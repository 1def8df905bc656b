//! Eligibility rules for bulk host operations.
//!
//! Bulk operations act on every host matching the current filters, so they
//! refuse to run under filters their backing endpoints cannot express.
//! Refusals carry the exact message the console surfaces on the disabled
//! action.

use crate::filters::HostFilters;
use crate::license::Tier;
use serde::{Deserialize, Serialize};

/// Ceiling on hosts targeted by one script batch.
pub const MAX_SCRIPT_BATCH_TARGETS: u32 = 5_000;

/// Org and license settings the eligibility checks read.
#[derive(Debug, Clone, Copy, Default)]
pub struct BulkContext {
    pub tier: Tier,
    /// Script execution switched off in organization settings.
    pub scripts_disabled: bool,
}

/// Why (or whether) a bulk script run may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptBatchEligibility {
    Eligible,
    ScriptsDisabled,
    NoTeamSelected,
    UnsupportedFilters,
    TargetCountOutOfRange,
}

impl ScriptBatchEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Message shown on the disabled action, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Eligible => None,
            Self::ScriptsDisabled => {
                Some("Running scripts is disabled in organization settings.")
            }
            Self::NoTeamSelected => Some("Select a team to run a script"),
            Self::UnsupportedFilters => Some("Choose different filters to run a script"),
            Self::TargetCountOutOfRange => {
                Some("Target at most 5,000 hosts to run a script")
            }
        }
    }
}

/// Decide whether "run script" may target the current filter set.
///
/// Refusals are checked in a fixed order so the surfaced message is
/// stable: disabled scripting, then team scope, then filters, then the
/// target count. `matching_hosts` is the total from the count endpoint;
/// `None` while it is still loading, which blocks the action.
pub fn script_batch_eligibility(
    filters: &HostFilters,
    ctx: BulkContext,
    matching_hosts: Option<u32>,
) -> ScriptBatchEligibility {
    if ctx.scripts_disabled {
        return ScriptBatchEligibility::ScriptsDisabled;
    }
    if ctx.tier.is_premium() && filters.team.is_all_teams() {
        return ScriptBatchEligibility::NoTeamSelected;
    }
    if !script_batch_filters_supported(filters) {
        return ScriptBatchEligibility::UnsupportedFilters;
    }
    match matching_hosts {
        Some(count) if count > 0 && count <= MAX_SCRIPT_BATCH_TARGETS => {
            ScriptBatchEligibility::Eligible
        }
        _ => ScriptBatchEligibility::TargetCountOutOfRange,
    }
}

/// Whether the run-script endpoint can express the current filters.
///
/// Only free text, label, status, and team survive into a batch run; any
/// exclusive dimension, even half-set, is unsupported, and so is the
/// missing-hosts status.
pub fn script_batch_filters_supported(filters: &HostFilters) -> bool {
    !filters.any_exclusive_set()
}

/// Whether "select all matching hosts" can represent the current filters.
///
/// Transfer and delete by filter use the same rule. Unlike script runs,
/// the missing-hosts status and the config-profile and script-batch pairs
/// are accepted here.
pub fn select_all_matching_supported(filters: &HostFilters) -> bool {
    let unsupported = filters.policy_id.is_some()
        || filters.policy_response.is_some()
        || filters.macos_settings.is_some()
        || filters.software_id.is_some()
        || filters.software_version_id.is_some()
        || filters.software_title_id.is_some()
        || filters.mdm_id.is_some()
        || filters.mdm_enrollment_status.is_some()
        || filters.munki_issue_id.is_some()
        || filters.low_disk_space.is_some()
        || filters.os_version_id.is_some()
        || filters.os_name.is_some()
        || filters.os_version.is_some()
        || filters.vulnerability.is_some()
        || filters.os_settings.is_some()
        || filters.disk_encryption.is_some()
        || filters.bootstrap_package.is_some();
    !unsupported
}
