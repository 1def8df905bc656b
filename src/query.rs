//! API query construction for the hosts view.
//!
//! The navigation URL only ever carries the winning exclusive dimension,
//! but API calls are keyed by the full filter tuple so the list, count,
//! and bulk endpoints stay consistent with each other. Builders here
//! serialize a [`HostFilters`] state as-is; callers normalize through the
//! reconciler first.

use crate::filters::HostFilters;
use crate::labels::Label;
use crate::params::{names, QueryParams};
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Hosts fetched per page of the list endpoint.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Write the full filter tuple shared by every host API call.
///
/// Unlike the canonical navigation set, this writes every dimension that
/// carries a value, half-set pairs included.
fn write_filter_tuple(filters: &HostFilters, label: Option<&Label>, params: &mut QueryParams) {
    if let Some(query) = &filters.query {
        params.set(names::QUERY, query);
    }
    filters.team.write_params(params);
    if let Some(label) = label {
        params.set_u32(names::LABEL_ID, label.id);
    }
    if let Some(status) = filters.status {
        params.set(names::STATUS, status.as_param());
    }
    write_exclusive_dims(filters, params);
}

fn write_exclusive_dims(filters: &HostFilters, params: &mut QueryParams) {
    if let Some(id) = filters.policy_id {
        params.set_u32(names::POLICY_ID, id);
    }
    if let Some(response) = filters.policy_response {
        params.set(names::POLICY_RESPONSE, response.as_param());
    }
    if let Some(status) = filters.macos_settings {
        params.set(names::MACOS_SETTINGS, status.as_param());
    }
    if let Some(id) = filters.software_id {
        params.set_u32(names::SOFTWARE_ID, id);
    }
    if let Some(id) = filters.software_version_id {
        params.set_u32(names::SOFTWARE_VERSION_ID, id);
    }
    if let Some(id) = filters.software_title_id {
        params.set_u32(names::SOFTWARE_TITLE_ID, id);
    }
    if let Some(status) = filters.software_status {
        params.set(names::SOFTWARE_STATUS, status.as_param());
    }
    if let Some(id) = filters.mdm_id {
        params.set_u32(names::MDM_ID, id);
    }
    if let Some(status) = filters.mdm_enrollment_status {
        params.set(names::MDM_ENROLLMENT_STATUS, status.as_param());
    }
    if let Some(id) = filters.munki_issue_id {
        params.set_u32(names::MUNKI_ISSUE_ID, id);
    }
    if let Some(gb) = filters.low_disk_space {
        params.set_u32(names::LOW_DISK_SPACE, gb);
    }
    if let Some(id) = filters.os_version_id {
        params.set_u32(names::OS_VERSION_ID, id);
    }
    if let Some(name) = &filters.os_name {
        params.set(names::OS_NAME, name);
    }
    if let Some(version) = &filters.os_version {
        params.set(names::OS_VERSION, version);
    }
    if let Some(cve) = &filters.vulnerability {
        params.set(names::VULNERABILITY, cve);
    }
    if let Some(status) = filters.os_settings {
        params.set(names::OS_SETTINGS, status.as_param());
    }
    if let Some(status) = filters.disk_encryption {
        params.set(names::DISK_ENCRYPTION, status.as_param());
    }
    if let Some(status) = filters.bootstrap_package {
        params.set(names::BOOTSTRAP_PACKAGE, status.as_param());
    }
    if let Some(status) = filters.profile_status {
        params.set(names::PROFILE_STATUS, status.as_param());
    }
    if let Some(uuid) = &filters.profile_uuid {
        params.set(names::PROFILE_UUID, uuid);
    }
    if let Some(id) = &filters.script_batch_execution_id {
        params.set(names::SCRIPT_BATCH_EXECUTION_ID, id);
    }
    if let Some(status) = filters.script_batch_execution_status {
        params.set(names::SCRIPT_BATCH_EXECUTION_STATUS, status.as_param());
    }
}

/// Parameters for the paged hosts-list call.
///
/// Adds pagination and asks the API for device-mapping data, which the
/// table renders in the "used by" column.
pub fn list_params(filters: &HostFilters, label: Option<&Label>) -> QueryParams {
    let mut params = QueryParams::new();
    write_filter_tuple(filters, label, &mut params);
    filters.sort.write_params(&mut params);
    params.set_u32(names::PAGE, filters.page);
    params.set_u32(names::PER_PAGE, DEFAULT_PAGE_SIZE);
    params.set(names::DEVICE_MAPPING, "true");
    params
}

/// Parameters for the matching-hosts count call.
///
/// Same tuple as the list, without pagination or sort, so every page of a
/// result set shares one count.
pub fn count_params(filters: &HostFilters, label: Option<&Label>) -> QueryParams {
    let mut params = QueryParams::new();
    write_filter_tuple(filters, label, &mut params);
    params
}

/// Filter payload for transferring every matching host to another team.
///
/// Config-profile and script-batch dimensions never ride along: the bulk
/// endpoints do not accept them.
pub fn transfer_params(filters: &HostFilters, label: Option<&Label>) -> QueryParams {
    let mut scoped = filters.clone();
    scoped.profile_status = None;
    scoped.profile_uuid = None;
    scoped.script_batch_execution_id = None;
    scoped.script_batch_execution_status = None;

    let mut params = QueryParams::new();
    write_filter_tuple(&scoped, label, &mut params);
    params
}

/// Filter payload for deleting every matching host.
///
/// Same shape as [`transfer_params`].
pub fn delete_params(filters: &HostFilters, label: Option<&Label>) -> QueryParams {
    transfer_params(filters, label)
}

/// Filter payload for running a script on every matching host.
///
/// The run endpoint only understands free text, label, status, and team;
/// eligibility checks (see [`crate::bulk`]) refuse anything else before a
/// request is built.
pub fn run_script_batch_params(filters: &HostFilters, label: Option<&Label>) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(query) = &filters.query {
        params.set(names::QUERY, query);
    }
    filters.team.write_params(&mut params);
    if let Some(label) = label {
        params.set_u32(names::LABEL_ID, label.id);
    }
    if let Some(status) = filters.status {
        params.set(names::STATUS, status.as_param());
    }
    params
}

/// Cache scope a query key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryScope {
    List,
    Count,
}

impl QueryScope {
    fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Count => "count",
        }
    }
}

/// Stable identity of an API request, for dedupe and cache keys.
///
/// Two keys are equal exactly when the scope and the serialized parameter
/// tuple agree; the digest is an xxh3 of the encoded query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    scope: QueryScope,
    digest: u64,
}

impl QueryKey {
    /// Key of the paged list request for this state.
    pub fn list(filters: &HostFilters, label: Option<&Label>) -> Self {
        Self::of(QueryScope::List, &list_params(filters, label))
    }

    /// Key of the count request for this state.
    pub fn count(filters: &HostFilters, label: Option<&Label>) -> Self {
        Self::of(QueryScope::Count, &count_params(filters, label))
    }

    fn of(scope: QueryScope, params: &QueryParams) -> Self {
        Self {
            scope,
            digest: xxh3_64(params.to_query_string().as_bytes()),
        }
    }

    pub fn scope(&self) -> QueryScope {
        self.scope
    }

    pub fn digest(&self) -> u64 {
        self.digest
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:016x}", self.scope.name(), self.digest)
    }
}

/// Whether a returned page is the final one for its result set.
pub fn is_last_page(page_index: u32, page_size: u32, returned: usize, total: u32) -> bool {
    u64::from(page_size) * u64::from(page_index) + returned as u64 >= u64::from(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::dimensions::{PolicyResponse, ScriptBatchExecutionStatus};

    #[test]
    fn test_list_params_add_pagination_and_mapping() {
        let filters = HostFilters::from_query_string("team_id=2&status=online&page=3");
        let params = list_params(&filters, None);
        assert_eq!(
            params.to_query_string(),
            "team_id=2&status=online&order_key=hostname&order_direction=asc\
             &page=3&per_page=20&device_mapping=true"
        );
    }

    #[test]
    fn test_count_params_drop_pagination() {
        let filters = HostFilters::from_query_string("team_id=2&status=online&page=3");
        let params = count_params(&filters, None);
        assert!(!params.contains(names::PAGE));
        assert!(!params.contains(names::PER_PAGE));
        assert!(!params.contains(names::ORDER_KEY));
        assert_eq!(params.get(names::STATUS), Some("online"));
    }

    #[test]
    fn test_label_rides_in_the_tuple() {
        let label = Label::new(12, "Servers");
        let params = count_params(&HostFilters::new(), Some(&label));
        assert_eq!(params.get_u32(names::LABEL_ID), Some(12));
    }

    #[test]
    fn test_full_tuple_carries_every_set_dimension() {
        // Query keys are not cascade-filtered; they reflect the raw state.
        let filters = HostFilters::from_query_string(
            "policy_id=3&policy_response=failing&mdm_id=4&vulnerability=CVE-2024-1",
        );
        let params = count_params(&filters, None);
        assert!(params.contains(names::POLICY_ID));
        assert!(params.contains(names::MDM_ID));
        assert!(params.contains(names::VULNERABILITY));
    }

    #[test]
    fn test_transfer_params_exclude_profile_and_script_batch() {
        let filters = HostFilters::new()
            .with_policy(3, PolicyResponse::Failing)
            .with_script_batch("b1", ScriptBatchExecutionStatus::Ran);
        let params = transfer_params(&filters, None);
        assert!(params.contains(names::POLICY_ID));
        assert!(!params.contains(names::SCRIPT_BATCH_EXECUTION_ID));
        assert!(!params.contains(names::SCRIPT_BATCH_EXECUTION_STATUS));

        let filters =
            HostFilters::from_query_string("profile_status=verified&profile_uuid=u-9");
        let params = delete_params(&filters, None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_run_script_batch_params_keep_only_supported_dims() {
        let filters = HostFilters::from_query_string("query=mac&team_id=2&status=online&page=4");
        let label = Label::new(8, "Laptops");
        let params = run_script_batch_params(&filters, Some(&label));
        assert_eq!(
            params.to_query_string(),
            "query=mac&team_id=2&label_id=8&status=online"
        );
    }

    #[test]
    fn test_query_key_identity() {
        let a = HostFilters::from_query_string("team_id=2&status=online");
        let b = HostFilters::from_query_string("team_id=2&status=online");
        let c = HostFilters::from_query_string("team_id=3&status=online");

        assert_eq!(QueryKey::list(&a, None), QueryKey::list(&b, None));
        assert_ne!(QueryKey::list(&a, None), QueryKey::list(&c, None));
        // Same tuple, different endpoint.
        assert_ne!(QueryKey::list(&a, None), QueryKey::count(&a, None));
    }

    #[test]
    fn test_query_key_changes_with_page() {
        let mut filters = HostFilters::from_query_string("team_id=2");
        let first = QueryKey::list(&filters, None);
        filters.page = 1;
        assert_ne!(first, QueryKey::list(&filters, None));
        // The count is page-independent.
        let counted = QueryKey::count(&filters, None);
        filters.page = 0;
        assert_eq!(counted, QueryKey::count(&filters, None));
    }

    #[test]
    fn test_display_names_scope() {
        let key = QueryKey::count(&HostFilters::new(), None);
        assert!(key.to_string().starts_with("count:"));
    }

    #[test]
    fn test_is_last_page() {
        assert!(is_last_page(0, 20, 7, 7));
        assert!(!is_last_page(0, 20, 20, 41));
        assert!(!is_last_page(1, 20, 20, 41));
        assert!(is_last_page(2, 20, 1, 41));
        // Empty page past the end still terminates.
        assert!(is_last_page(3, 20, 0, 41));
    }
}
