//! Typed filter dimensions for the hosts view.
//!
//! Each dimension parses from its raw query-parameter value with a
//! parse-or-undefined policy: unknown values are dropped, never errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Host online/lifecycle status.
///
/// `mia` is a legacy wire value still accepted on parse; it round-trips
/// unchanged but does not behave as the dedicated missing-hosts filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    New,
    Online,
    Offline,
    Missing,
    Mia,
}

impl HostStatus {
    /// Parse a raw query-parameter value.
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "new" => Some(Self::New),
            "online" => Some(Self::Online),
            "offline" => Some(Self::Offline),
            "missing" => Some(Self::Missing),
            "mia" => Some(Self::Mia),
            other => {
                debug!(status = other, "ignoring unknown host status");
                None
            }
        }
    }

    /// Wire form of this status.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Missing => "missing",
            Self::Mia => "mia",
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Missing | Self::Mia => "Missing",
        }
    }

    /// Whether this status selects the dedicated missing-hosts filter.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// All accepted statuses.
    pub fn all() -> &'static [Self] {
        &[
            Self::New,
            Self::Online,
            Self::Offline,
            Self::Missing,
            Self::Mia,
        ]
    }
}

impl std::fmt::Display for HostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pass/fail response to a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyResponse {
    Passing,
    Failing,
}

impl PolicyResponse {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "passing" => Some(Self::Passing),
            "failing" => Some(Self::Failing),
            other => {
                debug!(response = other, "ignoring unknown policy response");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Passing => "passing",
            Self::Failing => "failing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passing => "Passing",
            Self::Failing => "Failing",
        }
    }
}

impl std::fmt::Display for PolicyResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Aggregate install state of a software title on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftwareAggregateStatus {
    Installed,
    Pending,
    Failed,
}

impl SoftwareAggregateStatus {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "installed" => Some(Self::Installed),
            "pending" => Some(Self::Pending),
            "failed" => Some(Self::Failed),
            other => {
                debug!(status = other, "ignoring unknown software status");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Installed => "Installed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for SoftwareAggregateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a host is enrolled in MDM, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdmEnrollmentStatus {
    Automatic,
    Manual,
    Personal,
    Unenrolled,
    Pending,
}

impl MdmEnrollmentStatus {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "automatic" => Some(Self::Automatic),
            "manual" => Some(Self::Manual),
            "personal" => Some(Self::Personal),
            "unenrolled" => Some(Self::Unenrolled),
            "pending" => Some(Self::Pending),
            other => {
                debug!(status = other, "ignoring unknown MDM enrollment status");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
            Self::Personal => "personal",
            Self::Unenrolled => "unenrolled",
            Self::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Automatic => "MDM on (automatic)",
            Self::Manual => "MDM on (manual)",
            Self::Personal => "MDM on (personal)",
            Self::Unenrolled => "MDM off",
            Self::Pending => "MDM pending",
        }
    }
}

impl std::fmt::Display for MdmEnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Delivery status of MDM-managed settings or a single configuration profile.
///
/// Shared by the macOS settings, OS settings, and config-profile filters,
/// which all report the same four aggregate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MdmProfileStatus {
    Verified,
    Verifying,
    Pending,
    Failed,
}

impl MdmProfileStatus {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "verified" => Some(Self::Verified),
            "verifying" => Some(Self::Verifying),
            "pending" => Some(Self::Pending),
            "failed" => Some(Self::Failed),
            other => {
                debug!(status = other, "ignoring unknown profile status");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Verifying => "verifying",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Verifying => "Verifying",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Verified, Self::Verifying, Self::Pending, Self::Failed]
    }
}

impl std::fmt::Display for MdmProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Enforcement state of disk encryption on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskEncryptionStatus {
    Verified,
    Verifying,
    ActionRequired,
    Enforcing,
    Failed,
    RemovingEnforcement,
}

impl DiskEncryptionStatus {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "verified" => Some(Self::Verified),
            "verifying" => Some(Self::Verifying),
            "action_required" => Some(Self::ActionRequired),
            "enforcing" => Some(Self::Enforcing),
            "failed" => Some(Self::Failed),
            "removing_enforcement" => Some(Self::RemovingEnforcement),
            other => {
                debug!(status = other, "ignoring unknown disk encryption status");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Verifying => "verifying",
            Self::ActionRequired => "action_required",
            Self::Enforcing => "enforcing",
            Self::Failed => "failed",
            Self::RemovingEnforcement => "removing_enforcement",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Verifying => "Verifying",
            Self::ActionRequired => "Action required",
            Self::Enforcing => "Enforcing",
            Self::Failed => "Failed",
            Self::RemovingEnforcement => "Removing enforcement",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Verified,
            Self::Verifying,
            Self::ActionRequired,
            Self::Enforcing,
            Self::Failed,
            Self::RemovingEnforcement,
        ]
    }
}

impl std::fmt::Display for DiskEncryptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Install state of the MDM bootstrap package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPackageStatus {
    Installed,
    Pending,
    Failed,
}

impl BootstrapPackageStatus {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "installed" => Some(Self::Installed),
            "pending" => Some(Self::Pending),
            "failed" => Some(Self::Failed),
            other => {
                debug!(status = other, "ignoring unknown bootstrap package status");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Installed => "Installed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for BootstrapPackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-host outcome within a batch script execution.
///
/// Defaults to `Ran`, the status implied when a batch execution id arrives
/// without an explicit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptBatchExecutionStatus {
    #[default]
    Ran,
    Pending,
    Errored,
}

impl ScriptBatchExecutionStatus {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "ran" => Some(Self::Ran),
            "pending" => Some(Self::Pending),
            "errored" => Some(Self::Errored),
            other => {
                debug!(status = other, "ignoring unknown script batch status");
                None
            }
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Ran => "ran",
            Self::Pending => "pending",
            Self::Errored => "errored",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ran => "Ran",
            Self::Pending => "Pending",
            Self::Errored => "Errored",
        }
    }
}

impl std::fmt::Display for ScriptBatchExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
