//! Canonical filter state of the hosts view.
//!
//! [`HostFilters`] is rebuilt from the incoming navigation parameters on
//! every transition and never mutated in place: changes go through the
//! reconciler, which produces a brand-new parameter set.

use crate::filters::dimensions::{
    BootstrapPackageStatus, DiskEncryptionStatus, HostStatus, MdmEnrollmentStatus,
    MdmProfileStatus, PolicyResponse, ScriptBatchExecutionStatus, SoftwareAggregateStatus,
};
use crate::params::{names, QueryParams};
use crate::sort::SortSpec;
use crate::teams::TeamFilter;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

/// Page index used when the URL does not carry one.
pub const DEFAULT_PAGE_INDEX: u32 = 0;

/// Accepted low-disk-space thresholds, in gigabytes.
pub const LOW_DISK_SPACE_RANGE: RangeInclusive<u32> = 1..=100;

/// Every filter dimension of the hosts view, decoded from query parameters.
///
/// Four dimensions (team, free-text query, label, status) combine freely;
/// the rest are mutually exclusive and reconciled by priority (see
/// [`crate::filters::ExclusiveFilter`]). Decoding is lenient throughout:
/// malformed numbers and unknown enum values become absent filters, as do
/// low-disk-space thresholds outside [`LOW_DISK_SPACE_RANGE`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostFilters {
    // Always-compatible dimensions
    pub team: TeamFilter,
    pub query: Option<String>,
    pub status: Option<HostStatus>,

    // Exclusive dimensions
    pub policy_id: Option<u32>,
    pub policy_response: Option<PolicyResponse>,
    pub macos_settings: Option<MdmProfileStatus>,
    pub software_id: Option<u32>,
    pub software_version_id: Option<u32>,
    pub software_title_id: Option<u32>,
    pub software_status: Option<SoftwareAggregateStatus>,
    pub mdm_id: Option<u32>,
    pub mdm_enrollment_status: Option<MdmEnrollmentStatus>,
    pub munki_issue_id: Option<u32>,
    pub low_disk_space: Option<u32>,
    pub os_version_id: Option<u32>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub vulnerability: Option<String>,
    pub os_settings: Option<MdmProfileStatus>,
    pub disk_encryption: Option<DiskEncryptionStatus>,
    pub bootstrap_package: Option<BootstrapPackageStatus>,
    pub profile_status: Option<MdmProfileStatus>,
    pub profile_uuid: Option<String>,
    pub script_batch_execution_id: Option<String>,
    pub script_batch_execution_status: Option<ScriptBatchExecutionStatus>,

    // Pagination and sort
    pub page: u32,
    pub sort: SortSpec,
}

impl HostFilters {
    /// Create an empty filter state (all teams, no filters, default sort).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the filter state from a query-parameter map.
    ///
    /// A batch execution id without a status implies the `ran` status.
    /// Low-disk-space thresholds outside [`LOW_DISK_SPACE_RANGE`] are
    /// dropped.
    pub fn from_params(params: &QueryParams) -> Self {
        let script_batch_execution_id = params
            .get_non_empty(names::SCRIPT_BATCH_EXECUTION_ID)
            .map(str::to_string);
        let script_batch_execution_status = params
            .get_non_empty(names::SCRIPT_BATCH_EXECUTION_STATUS)
            .and_then(ScriptBatchExecutionStatus::from_param)
            .or_else(|| {
                script_batch_execution_id
                    .is_some()
                    .then(ScriptBatchExecutionStatus::default)
            });
        let low_disk_space = params.get_u32(names::LOW_DISK_SPACE).filter(|gb| {
            let in_range = LOW_DISK_SPACE_RANGE.contains(gb);
            if !in_range {
                debug!(gigabytes = *gb, "ignoring out-of-range low disk space threshold");
            }
            in_range
        });

        Self {
            team: TeamFilter::from_params(params),
            query: params.get_non_empty(names::QUERY).map(str::to_string),
            status: params
                .get_non_empty(names::STATUS)
                .and_then(HostStatus::from_param),
            policy_id: params.get_u32(names::POLICY_ID),
            policy_response: params
                .get_non_empty(names::POLICY_RESPONSE)
                .and_then(PolicyResponse::from_param),
            macos_settings: params
                .get_non_empty(names::MACOS_SETTINGS)
                .and_then(MdmProfileStatus::from_param),
            software_id: params.get_u32(names::SOFTWARE_ID),
            software_version_id: params.get_u32(names::SOFTWARE_VERSION_ID),
            software_title_id: params.get_u32(names::SOFTWARE_TITLE_ID),
            software_status: params
                .get_non_empty(names::SOFTWARE_STATUS)
                .and_then(SoftwareAggregateStatus::from_param),
            mdm_id: params.get_u32(names::MDM_ID),
            mdm_enrollment_status: params
                .get_non_empty(names::MDM_ENROLLMENT_STATUS)
                .and_then(MdmEnrollmentStatus::from_param),
            munki_issue_id: params.get_u32(names::MUNKI_ISSUE_ID),
            low_disk_space,
            os_version_id: params.get_u32(names::OS_VERSION_ID),
            os_name: params.get_non_empty(names::OS_NAME).map(str::to_string),
            os_version: params.get_non_empty(names::OS_VERSION).map(str::to_string),
            vulnerability: params
                .get_non_empty(names::VULNERABILITY)
                .map(str::to_string),
            os_settings: params
                .get_non_empty(names::OS_SETTINGS)
                .and_then(MdmProfileStatus::from_param),
            disk_encryption: params
                .get_non_empty(names::DISK_ENCRYPTION)
                .and_then(DiskEncryptionStatus::from_param),
            bootstrap_package: params
                .get_non_empty(names::BOOTSTRAP_PACKAGE)
                .and_then(BootstrapPackageStatus::from_param),
            profile_status: params
                .get_non_empty(names::PROFILE_STATUS)
                .and_then(MdmProfileStatus::from_param),
            profile_uuid: params
                .get_non_empty(names::PROFILE_UUID)
                .map(str::to_string),
            script_batch_execution_id,
            script_batch_execution_status,
            page: params.get_u32(names::PAGE).unwrap_or(DEFAULT_PAGE_INDEX),
            sort: SortSpec::from_params(params),
        }
    }

    /// Decode the filter state from a raw query string.
    pub fn from_query_string(query: &str) -> Self {
        Self::from_params(&QueryParams::from_query_string(query))
    }

    /// Whether the dedicated missing-hosts filter is selected.
    ///
    /// Only the `missing` status qualifies; the legacy `mia` value is a
    /// plain status filter.
    pub fn missing_hosts(&self) -> bool {
        self.status.is_some_and(|s| s.is_missing())
    }

    /// Whether the policy filter is active (id and response both present).
    pub fn policy_filter(&self) -> Option<(u32, PolicyResponse)> {
        Some((self.policy_id?, self.policy_response?))
    }

    /// Whether the config-profile filter is active (status and uuid both
    /// present).
    pub fn config_profile_filter(&self) -> Option<(MdmProfileStatus, &str)> {
        Some((self.profile_status?, self.profile_uuid.as_deref()?))
    }

    /// Whether the script-batch filter is active (status and id both
    /// present).
    pub fn script_batch_filter(&self) -> Option<(ScriptBatchExecutionStatus, &str)> {
        Some((
            self.script_batch_execution_status?,
            self.script_batch_execution_id.as_deref()?,
        ))
    }

    /// Whether an OS version filter is active, by id or by name+version.
    pub fn os_version_filter_active(&self) -> bool {
        self.os_version_id.is_some() || (self.os_name.is_some() && self.os_version.is_some())
    }

    /// Check if no filters are active (ignoring pagination and sort).
    pub fn is_empty(&self) -> bool {
        self.team.is_all_teams()
            && self.query.is_none()
            && self.status.is_none()
            && !self.any_exclusive_set()
    }

    /// Whether any exclusive dimension carries a value, active or not.
    ///
    /// Half-set pairs count: a lone `policy_id` is enough, matching how the
    /// original view treats partially-set filters when deciding what is
    /// incompatible.
    pub fn any_exclusive_set(&self) -> bool {
        self.policy_id.is_some()
            || self.policy_response.is_some()
            || self.macos_settings.is_some()
            || self.software_id.is_some()
            || self.software_version_id.is_some()
            || self.software_title_id.is_some()
            || self.software_status.is_some()
            || self.mdm_id.is_some()
            || self.mdm_enrollment_status.is_some()
            || self.munki_issue_id.is_some()
            || self.low_disk_space.is_some()
            || self.missing_hosts()
            || self.os_version_id.is_some()
            || self.os_name.is_some()
            || self.os_version.is_some()
            || self.vulnerability.is_some()
            || self.os_settings.is_some()
            || self.disk_encryption.is_some()
            || self.bootstrap_package.is_some()
            || self.profile_status.is_some()
            || self.profile_uuid.is_some()
            || self.script_batch_execution_id.is_some()
            || self.script_batch_execution_status.is_some()
    }

    /// Count active filters (team and pagination excluded).
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if self.query.is_some() {
            count += 1;
        }
        if self.status.is_some() {
            count += 1;
        }
        if self.policy_filter().is_some() {
            count += 1;
        }
        if self.macos_settings.is_some() {
            count += 1;
        }
        if self.software_id.is_some()
            || self.software_version_id.is_some()
            || self.software_title_id.is_some()
        {
            count += 1;
        }
        if self.mdm_id.is_some() {
            count += 1;
        }
        if self.mdm_enrollment_status.is_some() {
            count += 1;
        }
        if self.munki_issue_id.is_some() {
            count += 1;
        }
        if self.low_disk_space.is_some() {
            count += 1;
        }
        if self.os_version_filter_active() {
            count += 1;
        }
        if self.vulnerability.is_some() {
            count += 1;
        }
        if self.os_settings.is_some() {
            count += 1;
        }
        if self.disk_encryption.is_some() {
            count += 1;
        }
        if self.bootstrap_package.is_some() {
            count += 1;
        }
        if self.config_profile_filter().is_some() {
            count += 1;
        }
        if self.script_batch_filter().is_some() {
            count += 1;
        }
        count
    }

    /// Get summary of active filters
    pub fn summary(&self) -> String {
        let count = self.active_filter_count();
        if count == 0 {
            return format!("{}: no filters active", self.team);
        }
        let mut parts = Vec::new();
        if let Some(query) = &self.query {
            parts.push(format!("\"{query}\""));
        }
        if let Some(status) = &self.status {
            parts.push(status.label().to_string());
        }
        if let Some((id, response)) = self.policy_filter() {
            parts.push(format!("policy {id} {response}"));
        }
        if let Some(status) = &self.macos_settings {
            parts.push(format!("macOS settings {status}"));
        }
        if let Some(id) = self.software_id.or(self.software_version_id) {
            parts.push(format!("software {id}"));
        }
        if let Some(id) = self.software_title_id {
            match self.software_status {
                Some(status) => parts.push(format!("software {id} ({status})")),
                None => parts.push(format!("software {id}")),
            }
        }
        if let Some(id) = self.mdm_id {
            parts.push(format!("MDM solution {id}"));
        }
        if let Some(status) = &self.mdm_enrollment_status {
            parts.push(status.label().to_string());
        }
        if let Some(id) = self.munki_issue_id {
            parts.push(format!("Munki issue {id}"));
        }
        if let Some(gb) = self.low_disk_space {
            parts.push(format!("disk space < {gb} GB"));
        }
        if let Some(id) = self.os_version_id {
            parts.push(format!("OS version {id}"));
        } else if let (Some(name), Some(version)) = (&self.os_name, &self.os_version) {
            parts.push(format!("{name} {version}"));
        }
        if let Some(cve) = &self.vulnerability {
            parts.push(cve.clone());
        }
        if let Some(status) = &self.os_settings {
            parts.push(format!("OS settings {status}"));
        }
        if let Some(status) = &self.disk_encryption {
            parts.push(format!("disk encryption: {status}"));
        }
        if let Some(status) = &self.bootstrap_package {
            parts.push(format!("bootstrap package {status}"));
        }
        if let Some((status, uuid)) = self.config_profile_filter() {
            parts.push(format!("profile {uuid} {status}"));
        }
        if let Some((status, id)) = self.script_batch_filter() {
            parts.push(format!("script batch {id} {status}"));
        }
        format!("{}: {}", self.team, parts.join(", "))
    }

    /// Set the team scope
    #[must_use]
    pub fn with_team(mut self, team: TeamFilter) -> Self {
        self.team = team;
        self
    }

    /// Set the free-text search
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the status filter
    #[must_use]
    pub fn with_status(mut self, status: HostStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the policy filter
    #[must_use]
    pub fn with_policy(mut self, id: u32, response: PolicyResponse) -> Self {
        self.policy_id = Some(id);
        self.policy_response = Some(response);
        self
    }

    /// Set the software title filter
    #[must_use]
    pub fn with_software_title(mut self, id: u32) -> Self {
        self.software_title_id = Some(id);
        self
    }

    /// Set the script batch filter
    #[must_use]
    pub fn with_script_batch(
        mut self,
        id: impl Into<String>,
        status: ScriptBatchExecutionStatus,
    ) -> Self {
        self.script_batch_execution_id = Some(id.into());
        self.script_batch_execution_status = Some(status);
        self
    }
}
