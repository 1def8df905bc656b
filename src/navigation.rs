//! Reconciliation of filter changes into navigation requests.
//!
//! Every interaction that alters the hosts view is expressed as a
//! [`FilterChange`]. The reconciler applies the change to a copy of the
//! decoded [`HostFilters`], then rebuilds the parameter set from scratch:
//! base dimensions first, then the single exclusive dimension that wins the
//! priority cascade. The result is a plain [`NavigationRequest`] value;
//! touching the actual location happens behind the [`Router`] trait, so the
//! whole transition stays testable without one.

use crate::filters::dimensions::{
    BootstrapPackageStatus, DiskEncryptionStatus, HostStatus, MdmProfileStatus, PolicyResponse,
    ScriptBatchExecutionStatus, SoftwareAggregateStatus,
};
use crate::filters::{ExclusiveFilter, HostFilters};
use crate::labels::{Label, MANAGE_HOSTS_PATH};
use crate::license::Tier;
use crate::params::{names, QueryParams};
use crate::sort::SortSpec;
use crate::teams::{apply_team_change, TeamFilter};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single change to one dimension of the hosts view.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    /// Replace the free-text search (empty clears it).
    Search(String),
    /// Replace the sort order.
    Sort(SortSpec),
    /// Move to a page of the current result set.
    Page(u32),
    /// Select a status, or clear the status dropdown.
    Status(Option<HostStatus>),
    /// Switch the policy response, keeping the current policy id.
    PolicyResponse(PolicyResponse),
    /// Switch the macOS settings status.
    MacSettings(MdmProfileStatus),
    /// Switch the software install status, keeping the current title.
    SoftwareStatus(SoftwareAggregateStatus),
    /// Switch the OS settings status.
    OsSettings(MdmProfileStatus),
    /// Switch the disk encryption status.
    DiskEncryption(DiskEncryptionStatus),
    /// Switch the bootstrap package status.
    BootstrapPackage(BootstrapPackageStatus),
    /// Switch the config-profile status, keeping the current profile uuid.
    ConfigProfileStatus(MdmProfileStatus),
    /// Switch the script-batch status, keeping the current execution id.
    ScriptBatchStatus(ScriptBatchExecutionStatus),
    /// Switch the team scope.
    Team(TeamFilter),
    /// Select a label; selecting the active label deselects it.
    Label(Label),
    /// Deselect the active label, keeping every query parameter.
    ClearLabel,
    /// Drop the named parameters (filter pill dismissal).
    Clear(Vec<String>),
}

/// Everything the reconciler needs beyond the filter state itself.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub tier: Tier,
    /// Label currently selected via the route path.
    pub label: Option<Label>,
}

impl ViewContext {
    pub fn new(tier: Tier) -> Self {
        Self { tier, label: None }
    }

    #[must_use]
    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }
}

/// A navigation target: path plus canonical query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub path: String,
    pub params: QueryParams,
}

impl NavigationRequest {
    /// Path and query string combined, as handed to the location API.
    pub fn full_path(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.params.to_query_string())
        }
    }
}

impl std::fmt::Display for NavigationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

/// Side-effect boundary of the reconciler.
///
/// Reconciliation itself is pure; only a router implementation touches the
/// location. Tests substitute a recording implementation.
pub trait Router {
    /// Replace the current location with the reconciled target.
    fn replace(&mut self, request: &NavigationRequest);
}

/// Apply a filter change and produce the next navigation request.
///
/// The parameter set is rebuilt canonically on every call: free text, page,
/// sort, team, and status first, then whichever exclusive dimension wins
/// the priority cascade. Every change resets the page to zero except plain
/// pagination.
pub fn reconcile(
    filters: &HostFilters,
    change: &FilterChange,
    ctx: &ViewContext,
) -> NavigationRequest {
    let mut next = filters.clone();
    let mut path = ctx
        .label
        .as_ref()
        .map_or_else(|| MANAGE_HOSTS_PATH.to_string(), Label::path);
    next.page = 0;

    match change {
        FilterChange::Search(query) => {
            next.query = (!query.is_empty()).then(|| query.clone());
        }
        FilterChange::Sort(sort) => next.sort = sort.clone(),
        FilterChange::Page(page) => next.page = *page,
        FilterChange::Status(status) => next.status = *status,
        FilterChange::PolicyResponse(response) => next.policy_response = Some(*response),
        FilterChange::MacSettings(status) => next.macos_settings = Some(*status),
        FilterChange::SoftwareStatus(status) => next.software_status = Some(*status),
        FilterChange::OsSettings(status) => next.os_settings = Some(*status),
        FilterChange::DiskEncryption(status) => next.disk_encryption = Some(*status),
        FilterChange::BootstrapPackage(status) => next.bootstrap_package = Some(*status),
        FilterChange::ConfigProfileStatus(status) => next.profile_status = Some(*status),
        FilterChange::ScriptBatchStatus(status) => {
            next.script_batch_execution_status = Some(*status);
        }
        FilterChange::Team(team) => apply_team_change(&mut next, *team),
        FilterChange::Label(label) => {
            // Selecting the active label toggles it off.
            if ctx.label.as_ref().is_some_and(|l| l.id == label.id) {
                path = MANAGE_HOSTS_PATH.to_string();
            } else {
                path = label.path();
            }
            clear_exclusive(&mut next);
        }
        FilterChange::ClearLabel => path = MANAGE_HOSTS_PATH.to_string(),
        FilterChange::Clear(params) => {
            for name in params {
                clear_param(&mut next, name);
            }
        }
    }

    NavigationRequest {
        path,
        params: canonical_params(&next, ctx.tier),
    }
}

/// Rebuild the canonical parameter set for a filter state.
///
/// Base dimensions are written in a fixed order, then at most one exclusive
/// dimension. This is the parameter set the URL carries between renders.
pub fn canonical_params(filters: &HostFilters, tier: Tier) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(query) = &filters.query {
        params.set(names::QUERY, query);
    }
    params.set_u32(names::PAGE, filters.page);
    filters.sort.write_params(&mut params);
    filters.team.write_params(&mut params);
    if let Some(status) = filters.status {
        params.set(names::STATUS, status.as_param());
    }
    if let Some(dim) = ExclusiveFilter::resolve(filters, tier) {
        dim.write_params(filters, &mut params);
    }
    params
}

/// Drop every exclusive dimension from the state.
fn clear_exclusive(filters: &mut HostFilters) {
    filters.policy_id = None;
    filters.policy_response = None;
    filters.macos_settings = None;
    filters.software_id = None;
    filters.software_version_id = None;
    filters.software_title_id = None;
    filters.software_status = None;
    filters.mdm_id = None;
    filters.mdm_enrollment_status = None;
    filters.munki_issue_id = None;
    filters.low_disk_space = None;
    filters.os_version_id = None;
    filters.os_name = None;
    filters.os_version = None;
    filters.vulnerability = None;
    filters.os_settings = None;
    filters.disk_encryption = None;
    filters.bootstrap_package = None;
    filters.profile_status = None;
    filters.profile_uuid = None;
    filters.script_batch_execution_id = None;
    filters.script_batch_execution_status = None;
}

/// Drop the dimension a wire parameter name refers to.
fn clear_param(filters: &mut HostFilters, name: &str) {
    match name {
        names::QUERY => filters.query = None,
        names::STATUS => filters.status = None,
        names::TEAM_ID => filters.team = TeamFilter::AllTeams,
        names::POLICY_ID => filters.policy_id = None,
        names::POLICY_RESPONSE => filters.policy_response = None,
        names::MACOS_SETTINGS => filters.macos_settings = None,
        names::SOFTWARE_ID => filters.software_id = None,
        names::SOFTWARE_VERSION_ID => filters.software_version_id = None,
        names::SOFTWARE_TITLE_ID => filters.software_title_id = None,
        names::SOFTWARE_STATUS => filters.software_status = None,
        names::MDM_ID => filters.mdm_id = None,
        names::MDM_ENROLLMENT_STATUS => filters.mdm_enrollment_status = None,
        names::MUNKI_ISSUE_ID => filters.munki_issue_id = None,
        names::LOW_DISK_SPACE => filters.low_disk_space = None,
        names::OS_VERSION_ID => filters.os_version_id = None,
        names::OS_NAME => filters.os_name = None,
        names::OS_VERSION => filters.os_version = None,
        names::VULNERABILITY => filters.vulnerability = None,
        names::OS_SETTINGS => filters.os_settings = None,
        names::DISK_ENCRYPTION => filters.disk_encryption = None,
        names::BOOTSTRAP_PACKAGE => filters.bootstrap_package = None,
        names::PROFILE_STATUS => filters.profile_status = None,
        names::PROFILE_UUID => filters.profile_uuid = None,
        names::SCRIPT_BATCH_EXECUTION_ID => filters.script_batch_execution_id = None,
        names::SCRIPT_BATCH_EXECUTION_STATUS => {
            filters.script_batch_execution_status = None;
        }
        _ => debug!(param = name, "ignoring clear of unknown parameter"),
    }
}

/// Last-visited filtered paths remembered across console pages.
///
/// Sibling pages (software, queries, policies) link back to their last
/// filtered view; the hosts path does the same in reverse. All four are
/// plain strings of the form returned by [`NavigationRequest::full_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPaths {
    pub hosts: Option<String>,
    pub software: Option<String>,
    pub queries: Option<String>,
    pub policies: Option<String>,
}

impl SavedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the hosts path, unless a software filter is in the URL.
    ///
    /// Software-filtered hosts views are reached from the software page;
    /// remembering them would bounce the user back into the filter they
    /// just left.
    pub fn record_hosts(&mut self, request: &NavigationRequest) {
        const SOFTWARE_PARAMS: &[&str] = &[
            names::SOFTWARE_ID,
            names::SOFTWARE_VERSION_ID,
            names::SOFTWARE_TITLE_ID,
            names::SOFTWARE_STATUS,
        ];
        if SOFTWARE_PARAMS.iter().any(|p| request.params.contains(p)) {
            return;
        }
        self.hosts = Some(request.full_path());
    }

    /// Drop the paths that depend on the team scope.
    pub fn reset_team_scoped(&mut self) {
        self.software = None;
        self.queries = None;
        self.policies = None;
    }
}

/// Reconcile a change and push the result through the router, keeping the
/// remembered paths in step.
///
/// This is the single boundary where a filter change becomes observable:
/// a team switch resets the team-scoped paths, the new hosts path is
/// recorded, and the router replaces the location.
pub fn apply(
    filters: &HostFilters,
    change: &FilterChange,
    ctx: &ViewContext,
    paths: &mut SavedPaths,
    router: &mut dyn Router,
) -> NavigationRequest {
    let request = reconcile(filters, change, ctx);
    if matches!(change, FilterChange::Team(_)) {
        paths.reset_team_scoped();
    }
    paths.record_hosts(&request);
    router.replace(&request);
    request
}
