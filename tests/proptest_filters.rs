//! Property-based tests for filter decoding and reconciliation.
//!
//! Feeds arbitrary and structured query strings through the decoder and the
//! reconciler, checking the invariants that hold regardless of input: the
//! canonical parameter set never carries two exclusive dimensions, every
//! change except pagination lands on page zero, and canonicalization is a
//! fixed point.

use hosts_console::bulk::script_batch_filters_supported;
use hosts_console::filters::{
    DiskEncryptionStatus, HostStatus, MdmProfileStatus, PolicyResponse,
};
use hosts_console::{
    canonical_params, reconcile, select_all_matching_supported, ExclusiveFilter, FilterChange,
    HostFilters, Label, QueryKey, QueryParams, TeamFilter, Tier, ViewContext,
};
use proptest::prelude::*;
use std::collections::HashSet;

/// One plausible `name=value` pair drawn from the dimensions the view knows.
///
/// Values are drawn from the real wire vocabulary so generated states hit
/// the typed decoding paths, not just the lenient-drop fallbacks. The
/// low-disk-space alternation mixes in out-of-range thresholds, which must
/// decode to nothing.
const KNOWN_PAIR: &str = concat!(
    "(query=[a-z0-9]{1,8}",
    "|page=[0-9]{1,2}",
    "|order_key=(hostname|last_restarted_at|memory)",
    "|order_direction=(asc|desc)",
    "|team_id=[0-9]{1,2}",
    "|status=(online|offline|new|missing|mia)",
    "|policy_id=[1-9][0-9]{0,2}",
    "|policy_response=(passing|failing)",
    "|macos_settings=(verified|verifying|pending|failed)",
    "|software_id=[1-9][0-9]{0,2}",
    "|software_version_id=[1-9][0-9]{0,2}",
    "|software_title_id=[1-9][0-9]{0,2}",
    "|software_status=(installed|pending|failed)",
    "|mdm_id=[1-9][0-9]{0,2}",
    "|mdm_enrollment_status=(automatic|manual|personal|unenrolled|pending)",
    "|munki_issue_id=[1-9][0-9]{0,2}",
    "|low_disk_space=(0|8|16|32|64|500)",
    "|os_version_id=[1-9][0-9]{0,2}",
    "|os_name=(macOS|Windows|Ubuntu)",
    "|os_version=1[0-5]\\.[0-9]",
    "|vulnerability=CVE-20[0-9]{2}-[0-9]{4,5}",
    "|os_settings=(verified|verifying|pending|failed)",
    "|disk_encryption=(verified|verifying|action_required|enforcing|failed|removing_enforcement)",
    "|bootstrap_package=(installed|pending|failed)",
    "|profile_status=(verified|verifying|pending|failed)",
    "|profile_uuid=[a-f0-9]{8}",
    "|script_batch_execution_id=[a-f0-9]{8}",
    "|script_batch_execution_status=(ran|pending|errored))",
);

/// Wire parameters of the exclusive dimensions, grouped by the dimension
/// they belong to. A pair's two halves, or the three OS version spellings,
/// are one slot, not a conflict.
const EXCLUSIVE_SLOTS: &[(&str, ExclusiveFilter)] = &[
    ("policy_id", ExclusiveFilter::Policy),
    ("policy_response", ExclusiveFilter::Policy),
    ("macos_settings", ExclusiveFilter::MacSettings),
    ("software_id", ExclusiveFilter::SoftwareId),
    ("software_version_id", ExclusiveFilter::SoftwareVersionId),
    ("software_title_id", ExclusiveFilter::SoftwareTitleId),
    ("software_status", ExclusiveFilter::SoftwareTitleId),
    ("mdm_id", ExclusiveFilter::MdmId),
    ("mdm_enrollment_status", ExclusiveFilter::MdmEnrollment),
    ("munki_issue_id", ExclusiveFilter::MunkiIssue),
    ("low_disk_space", ExclusiveFilter::LowDiskSpace),
    ("os_version_id", ExclusiveFilter::OsVersion),
    ("os_name", ExclusiveFilter::OsVersion),
    ("os_version", ExclusiveFilter::OsVersion),
    ("vulnerability", ExclusiveFilter::Vulnerability),
    ("os_settings", ExclusiveFilter::OsSettings),
    ("disk_encryption", ExclusiveFilter::DiskEncryption),
    ("bootstrap_package", ExclusiveFilter::BootstrapPackage),
    ("profile_status", ExclusiveFilter::ConfigProfile),
    ("profile_uuid", ExclusiveFilter::ConfigProfile),
    ("script_batch_execution_id", ExclusiveFilter::ScriptBatch),
    ("script_batch_execution_status", ExclusiveFilter::ScriptBatch),
];

fn arb_known_query() -> impl Strategy<Value = String> {
    prop::collection::vec(KNOWN_PAIR, 0..10).prop_map(|pairs| pairs.join("&"))
}

/// Any filter change except pagination, which is the one change allowed to
/// keep a nonzero page.
fn arb_change() -> impl Strategy<Value = FilterChange> {
    prop_oneof![
        "[a-z]{0,6}".prop_map(FilterChange::Search),
        Just(FilterChange::Status(Some(HostStatus::Online))),
        Just(FilterChange::Status(None)),
        Just(FilterChange::PolicyResponse(PolicyResponse::Failing)),
        Just(FilterChange::MacSettings(MdmProfileStatus::Pending)),
        Just(FilterChange::DiskEncryption(DiskEncryptionStatus::Enforcing)),
        prop_oneof![
            Just(TeamFilter::AllTeams),
            (1u32..9).prop_map(TeamFilter::Team),
        ]
        .prop_map(FilterChange::Team),
        Just(FilterChange::ClearLabel),
        (1u32..50).prop_map(|id| FilterChange::Label(Label::new(id, "Generated"))),
    ]
}

fn tier_of(premium: bool) -> Tier {
    if premium {
        Tier::Premium
    } else {
        Tier::Free
    }
}

fn exclusive_slots_in(params: &QueryParams) -> HashSet<ExclusiveFilter> {
    EXCLUSIVE_SLOTS
        .iter()
        .filter(|(name, _)| params.contains(name))
        .map(|(_, slot)| *slot)
        .collect()
}

proptest! {
    // 1000 cases: decoding and reconciliation are pure and cheap, so broad
    // input coverage is free.
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn decoding_and_reconciling_never_panic(qs in "\\PC{0,200}") {
        let filters = HostFilters::from_query_string(&qs);
        let ctx = ViewContext::new(Tier::Premium);
        let _ = reconcile(&filters, &FilterChange::Search("x".into()), &ctx);
        let _ = canonical_params(&filters, Tier::Free);
        let _ = filters.summary();
        let _ = filters.active_filter_count();
    }

    #[test]
    fn canonical_set_keeps_at_most_one_exclusive_dimension(
        qs in arb_known_query(),
        premium in any::<bool>(),
    ) {
        let filters = HostFilters::from_query_string(&qs);
        let params = canonical_params(&filters, tier_of(premium));
        let slots = exclusive_slots_in(&params);
        prop_assert!(
            slots.len() <= 1,
            "canonical set carries {} exclusive dimensions: {}",
            slots.len(),
            params.to_query_string()
        );
    }

    #[test]
    fn canonicalization_is_a_fixed_point(qs in arb_known_query(), premium in any::<bool>()) {
        let tier = tier_of(premium);
        let once = canonical_params(&HostFilters::from_query_string(&qs), tier);
        let twice =
            canonical_params(&HostFilters::from_query_string(&once.to_query_string()), tier);
        prop_assert_eq!(once.to_query_string(), twice.to_query_string());
    }

    #[test]
    fn free_tier_never_surfaces_premium_dimensions(qs in arb_known_query()) {
        let params = canonical_params(&HostFilters::from_query_string(&qs), Tier::Free);
        prop_assert!(!params.contains("low_disk_space"));
        prop_assert!(!params.contains("disk_encryption"));
        prop_assert!(!params.contains("bootstrap_package"));
    }

    #[test]
    fn every_change_but_pagination_lands_on_page_zero(
        qs in arb_known_query(),
        change in arb_change(),
    ) {
        let ctx = ViewContext::new(Tier::Premium);
        let request = reconcile(&HostFilters::from_query_string(&qs), &change, &ctx);
        prop_assert_eq!(request.params.get("page"), Some("0"));
    }

    #[test]
    fn pagination_keeps_the_requested_page(qs in arb_known_query(), page in 0u32..500) {
        let ctx = ViewContext::new(Tier::Premium);
        let request =
            reconcile(&HostFilters::from_query_string(&qs), &FilterChange::Page(page), &ctx);
        prop_assert_eq!(request.params.get_u32("page"), Some(page));
    }

    #[test]
    fn search_text_leads_the_canonical_set(
        qs in arb_known_query(),
        text in "[a-z][a-z0-9-]{0,11}",
    ) {
        let ctx = ViewContext::new(Tier::Premium);
        let request = reconcile(
            &HostFilters::from_query_string(&qs),
            &FilterChange::Search(text.clone()),
            &ctx,
        );
        prop_assert_eq!(request.params.get("query"), Some(text.as_str()));
        let expected = format!("query={text}");
        prop_assert!(request.params.to_query_string().starts_with(&expected));
    }

    #[test]
    fn navigation_params_never_carry_label_id(qs in arb_known_query(), change in arb_change()) {
        // Labels ride in the route path; only API tuples use label_id.
        let ctx = ViewContext::new(Tier::Premium).with_label(Label::new(3, "Generated"));
        let request = reconcile(&HostFilters::from_query_string(&qs), &change, &ctx);
        prop_assert!(!request.params.contains("label_id"));
    }

    #[test]
    fn count_keys_ignore_pagination(qs in arb_known_query(), page in 0u32..200) {
        let base = HostFilters::from_query_string(&qs);
        let mut paged = base.clone();
        paged.page = page;
        prop_assert_eq!(QueryKey::count(&base, None), QueryKey::count(&paged, None));
    }

    #[test]
    fn script_supported_filters_are_also_selectable(qs in arb_known_query()) {
        // Script runs accept a strict subset of what select-all accepts, so
        // support for the former must imply support for the latter.
        let filters = HostFilters::from_query_string(&qs);
        if script_batch_filters_supported(&filters) {
            prop_assert!(select_all_matching_supported(&filters));
        }
    }
}
