//! Mutual exclusion among filter dimensions.
//!
//! Only one exclusive dimension survives into the canonical parameter set.
//! Which one is decided by a fixed priority order, evaluated first-match-wins
//! over (predicate, serializer) pairs. The order is authoritative: reordering
//! it changes observable behavior.

use crate::filters::state::HostFilters;
use crate::license::Tier;
use crate::params::{names, QueryParams};
use serde::{Deserialize, Serialize};

/// The exclusive filter dimensions, one of which may be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusiveFilter {
    Policy,
    MacSettings,
    SoftwareId,
    SoftwareVersionId,
    SoftwareTitleId,
    MdmId,
    MdmEnrollment,
    MunkiIssue,
    MissingStatus,
    LowDiskSpace,
    OsVersion,
    Vulnerability,
    OsSettings,
    DiskEncryption,
    BootstrapPackage,
    ConfigProfile,
    ScriptBatch,
}

/// Priority order of the exclusive dimensions, highest first.
const PRIORITY: &[ExclusiveFilter] = &[
    ExclusiveFilter::Policy,
    ExclusiveFilter::MacSettings,
    ExclusiveFilter::SoftwareId,
    ExclusiveFilter::SoftwareVersionId,
    ExclusiveFilter::SoftwareTitleId,
    ExclusiveFilter::MdmId,
    ExclusiveFilter::MdmEnrollment,
    ExclusiveFilter::MunkiIssue,
    ExclusiveFilter::MissingStatus,
    ExclusiveFilter::LowDiskSpace,
    ExclusiveFilter::OsVersion,
    ExclusiveFilter::Vulnerability,
    ExclusiveFilter::OsSettings,
    ExclusiveFilter::DiskEncryption,
    ExclusiveFilter::BootstrapPackage,
    ExclusiveFilter::ConfigProfile,
    ExclusiveFilter::ScriptBatch,
];

impl ExclusiveFilter {
    /// All exclusive dimensions in priority order, highest first.
    pub fn priority_order() -> &'static [Self] {
        PRIORITY
    }

    /// Pick the winning dimension for a filter state, if any.
    ///
    /// Pair dimensions (policy, config profile, script batch) require both
    /// halves; premium-gated dimensions lose on free tier and the cascade
    /// falls through to the next match.
    pub fn resolve(filters: &HostFilters, tier: Tier) -> Option<Self> {
        PRIORITY
            .iter()
            .copied()
            .find(|dim| dim.is_active(filters, tier))
    }

    /// Whether this dimension would win its slot in the cascade.
    pub fn is_active(&self, filters: &HostFilters, tier: Tier) -> bool {
        match self {
            Self::Policy => filters.policy_filter().is_some(),
            Self::MacSettings => filters.macos_settings.is_some(),
            Self::SoftwareId => filters.software_id.is_some(),
            Self::SoftwareVersionId => filters.software_version_id.is_some(),
            Self::SoftwareTitleId => filters.software_title_id.is_some(),
            Self::MdmId => filters.mdm_id.is_some(),
            Self::MdmEnrollment => filters.mdm_enrollment_status.is_some(),
            Self::MunkiIssue => filters.munki_issue_id.is_some(),
            Self::MissingStatus => filters.missing_hosts(),
            Self::LowDiskSpace => filters.low_disk_space.is_some() && tier.is_premium(),
            Self::OsVersion => filters.os_version_filter_active(),
            Self::Vulnerability => filters.vulnerability.is_some(),
            Self::OsSettings => filters.os_settings.is_some(),
            Self::DiskEncryption => filters.disk_encryption.is_some() && tier.is_premium(),
            Self::BootstrapPackage => filters.bootstrap_package.is_some() && tier.is_premium(),
            Self::ConfigProfile => filters.config_profile_filter().is_some(),
            Self::ScriptBatch => filters.script_batch_filter().is_some(),
        }
    }

    /// Serialize this dimension's parameters into the canonical set.
    ///
    /// Callers only invoke this for the dimension [`Self::resolve`] picked,
    /// so the winning values are known to be present.
    pub fn write_params(&self, filters: &HostFilters, params: &mut QueryParams) {
        match self {
            Self::Policy => {
                if let Some((id, response)) = filters.policy_filter() {
                    params.set_u32(names::POLICY_ID, id);
                    params.set(names::POLICY_RESPONSE, response.as_param());
                }
            }
            Self::MacSettings => {
                if let Some(status) = filters.macos_settings {
                    params.set(names::MACOS_SETTINGS, status.as_param());
                }
            }
            Self::SoftwareId => {
                if let Some(id) = filters.software_id {
                    params.set_u32(names::SOFTWARE_ID, id);
                }
            }
            Self::SoftwareVersionId => {
                if let Some(id) = filters.software_version_id {
                    params.set_u32(names::SOFTWARE_VERSION_ID, id);
                }
            }
            Self::SoftwareTitleId => {
                if let Some(id) = filters.software_title_id {
                    params.set_u32(names::SOFTWARE_TITLE_ID, id);
                    // The install status is scoped to a concrete team.
                    if let Some(status) = filters.software_status {
                        if !filters.team.is_all_teams() {
                            params.set(names::SOFTWARE_STATUS, status.as_param());
                        }
                    }
                }
            }
            Self::MdmId => {
                if let Some(id) = filters.mdm_id {
                    params.set_u32(names::MDM_ID, id);
                }
            }
            Self::MdmEnrollment => {
                if let Some(status) = filters.mdm_enrollment_status {
                    params.set(names::MDM_ENROLLMENT_STATUS, status.as_param());
                }
            }
            Self::MunkiIssue => {
                if let Some(id) = filters.munki_issue_id {
                    params.set_u32(names::MUNKI_ISSUE_ID, id);
                }
            }
            Self::MissingStatus => {
                // Re-asserts the status the always-compatible slot already
                // carries; the dimension's real effect is blocking lower
                // priorities.
                params.set(names::STATUS, "missing");
            }
            Self::LowDiskSpace => {
                if let Some(gb) = filters.low_disk_space {
                    params.set_u32(names::LOW_DISK_SPACE, gb);
                }
            }
            Self::OsVersion => {
                if let Some(id) = filters.os_version_id {
                    params.set_u32(names::OS_VERSION_ID, id);
                }
                if let Some(name) = &filters.os_name {
                    params.set(names::OS_NAME, name);
                }
                if let Some(version) = &filters.os_version {
                    params.set(names::OS_VERSION, version);
                }
            }
            Self::Vulnerability => {
                if let Some(cve) = &filters.vulnerability {
                    params.set(names::VULNERABILITY, cve);
                }
            }
            Self::OsSettings => {
                if let Some(status) = filters.os_settings {
                    params.set(names::OS_SETTINGS, status.as_param());
                }
            }
            Self::DiskEncryption => {
                if let Some(status) = filters.disk_encryption {
                    params.set(names::DISK_ENCRYPTION, status.as_param());
                }
            }
            Self::BootstrapPackage => {
                if let Some(status) = filters.bootstrap_package {
                    params.set(names::BOOTSTRAP_PACKAGE, status.as_param());
                }
            }
            Self::ConfigProfile => {
                if let Some((status, uuid)) = filters.config_profile_filter() {
                    params.set(names::PROFILE_STATUS, status.as_param());
                    params.set(names::PROFILE_UUID, uuid);
                }
            }
            Self::ScriptBatch => {
                if let Some((status, id)) = filters.script_batch_filter() {
                    params.set(names::SCRIPT_BATCH_EXECUTION_STATUS, status.as_param());
                    params.set(names::SCRIPT_BATCH_EXECUTION_ID, id);
                }
            }
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::MacSettings => "macOS settings",
            Self::SoftwareId => "software",
            Self::SoftwareVersionId => "software version",
            Self::SoftwareTitleId => "software title",
            Self::MdmId => "MDM solution",
            Self::MdmEnrollment => "MDM enrollment",
            Self::MunkiIssue => "Munki issue",
            Self::MissingStatus => "missing hosts",
            Self::LowDiskSpace => "low disk space",
            Self::OsVersion => "OS version",
            Self::Vulnerability => "vulnerability",
            Self::OsSettings => "OS settings",
            Self::DiskEncryption => "disk encryption",
            Self::BootstrapPackage => "bootstrap package",
            Self::ConfigProfile => "configuration profile",
            Self::ScriptBatch => "script batch",
        }
    }
}

impl std::fmt::Display for ExclusiveFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
