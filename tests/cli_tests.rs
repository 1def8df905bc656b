//! Integration tests for the command-line handlers.
//!
//! Exercises the public handler functions end to end: state parsing from
//! both query strings and full URLs, the change-spec grammar, bulk-action
//! reporting, profile helpers, and the column-preferences file round trip.

use hosts_console::cli::{
    parse_change, run_bulk, run_columns, run_inspect, run_next, run_profile, run_profile_error,
};
use hosts_console::{ColumnPreferences, FilterChange, TeamFilter, Tier};

#[test]
fn test_change_grammar_is_reachable_through_the_public_surface() {
    assert_eq!(
        parse_change("search=db-").expect("valid change"),
        FilterChange::Search("db-".to_string())
    );
    assert_eq!(
        parse_change("team=all").expect("valid change"),
        FilterChange::Team(TeamFilter::AllTeams)
    );
    assert!(parse_change("colour=red").is_err());
}

#[test]
fn test_inspect_accepts_query_strings_and_full_urls() {
    run_inspect("team_id=2&status=online".to_string(), Tier::Free, false)
        .expect("query-string input should succeed");

    run_inspect(
        "https://fleet.example.com/hosts/manage/labels/7?team_id=2&policy_id=3&policy_response=failing"
            .to_string(),
        Tier::Premium,
        true,
    )
    .expect("URL input should succeed");
}

#[test]
fn test_inspect_rejects_malformed_urls() {
    assert!(run_inspect("https://".to_string(), Tier::Free, false).is_err());
}

#[test]
fn test_next_steps_a_state_in_both_output_modes() {
    run_next(
        "team_id=2&page=3".to_string(),
        "status=online".to_string(),
        Tier::Premium,
        None,
        false,
    )
    .expect("plain output should succeed");

    run_next(
        "https://fleet.example.com/hosts/manage?query=db".to_string(),
        "team=all".to_string(),
        Tier::Premium,
        Some("9:Servers".to_string()),
        true,
    )
    .expect("JSON output should succeed");
}

#[test]
fn test_next_rejects_a_malformed_change_spec() {
    let err = run_next(
        String::new(),
        "sort=uptime:sideways".to_string(),
        Tier::Free,
        None,
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains("sort direction"));
}

#[test]
fn test_bulk_reports_support_without_exiting_when_no_targets_given() {
    // The policy filter blocks script runs, but without a target count the
    // handler only reports filter support and must return normally.
    run_bulk(
        "team_id=2&policy_id=3&policy_response=failing".to_string(),
        Tier::Premium,
        false,
        None,
        false,
    )
    .expect("report-only run should succeed");
}

#[test]
fn test_bulk_eligible_run_with_targets() {
    run_bulk(
        "team_id=2&status=online".to_string(),
        Tier::Premium,
        false,
        Some(120),
        true,
    )
    .expect("eligible run should succeed");
}

#[test]
fn test_profile_handlers_accept_and_reject() {
    run_profile("com.acme.wifi.mobileconfig".to_string(), false).expect("valid upload name");
    run_profile_error(
        "Secret variable \"$FLEET_SECRET_WIFI\" missing".to_string(),
        true,
    )
    .expect("error mapping always succeeds");

    assert!(run_profile("notes.txt".to_string(), false).is_err());
}

#[test]
fn test_columns_round_trip_through_a_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let file = dir.path().join("columns.json");

    // Hiding a column not in the default set forces a save.
    run_columns(
        vec!["last_restarted_at".to_string()],
        vec![],
        false,
        Some(file.clone()),
        false,
    )
    .expect("hide should succeed");

    run_columns(
        vec![],
        vec!["uptime".to_string()],
        false,
        Some(file.clone()),
        true,
    )
    .expect("unhide should succeed");

    let prefs = ColumnPreferences::load_from(&file);
    assert!(prefs.is_hidden("last_restarted_at"));
    assert!(!prefs.is_hidden("uptime"));
    // Untouched defaults survive both edits.
    assert!(prefs.is_hidden("cpu_type"));
}
