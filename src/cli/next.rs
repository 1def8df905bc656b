//! Next command handler.
//!
//! Implements the `next` subcommand: apply a single filter change to a
//! decoded state and print the navigation request the console would issue.

use crate::filters::dimensions::{
    BootstrapPackageStatus, DiskEncryptionStatus, HostStatus, MdmProfileStatus, PolicyResponse,
    ScriptBatchExecutionStatus, SoftwareAggregateStatus,
};
use crate::labels::Label;
use crate::license::Tier;
use crate::navigation::{reconcile, FilterChange, ViewContext};
use crate::sort::{SortDirection, SortSpec};
use crate::teams::TeamFilter;
use anyhow::{bail, Result};
use serde::Serialize;

/// Run the next command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_next(
    state: String,
    change: String,
    tier: Tier,
    label: Option<String>,
    json: bool,
) -> Result<()> {
    let (filters, url_label_id) = super::inspect::parse_state(&state)?;
    let change = parse_change(&change)?;

    let mut ctx = ViewContext::new(tier);
    if let Some(spec) = label {
        ctx.label = Some(parse_label(&spec)?);
    } else if let Some(id) = url_label_id {
        ctx.label = Some(Label::new(id, String::new()));
    }

    let request = reconcile(&filters, &change, &ctx);

    if json {
        let report = NextReport {
            path: &request.path,
            query_string: request.params.to_query_string(),
            full_path: request.full_path(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{request}");
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct NextReport<'a> {
    path: &'a str,
    query_string: String,
    full_path: String,
}

/// Parse a change spec of the form `name=value` (or a bare `clear-label`).
///
/// Value-less dimension specs clear the dimension where clearing makes
/// sense (`search=`, `status=`); enum-valued specs take the wire value the
/// URL itself would carry (`disk-encryption=action_required`).
pub fn parse_change(spec: &str) -> Result<FilterChange> {
    if spec == "clear-label" {
        return Ok(FilterChange::ClearLabel);
    }

    let Some((name, value)) = spec.split_once('=') else {
        bail!("Invalid change '{spec}': expected name=value");
    };

    let change = match name {
        "search" => FilterChange::Search(value.to_string()),
        "sort" => {
            let (key, direction) = match value.split_once(':') {
                Some((key, raw)) => match SortDirection::from_param(raw) {
                    Some(direction) => (key, direction),
                    None => bail!("Invalid sort direction '{raw}': expected asc or desc"),
                },
                None => (value, SortDirection::Asc),
            };
            if key.is_empty() {
                bail!("Invalid change '{spec}': sort key is empty");
            }
            FilterChange::Sort(SortSpec::new(key, direction))
        }
        "page" => FilterChange::Page(parse_number(spec, value)?),
        "status" => {
            if value.is_empty() {
                FilterChange::Status(None)
            } else {
                FilterChange::Status(Some(parse_dimension(
                    spec,
                    value,
                    HostStatus::from_param,
                )?))
            }
        }
        "policy-response" => {
            FilterChange::PolicyResponse(parse_dimension(spec, value, PolicyResponse::from_param)?)
        }
        "macos-settings" => {
            FilterChange::MacSettings(parse_dimension(spec, value, MdmProfileStatus::from_param)?)
        }
        "software-status" => FilterChange::SoftwareStatus(parse_dimension(
            spec,
            value,
            SoftwareAggregateStatus::from_param,
        )?),
        "os-settings" => {
            FilterChange::OsSettings(parse_dimension(spec, value, MdmProfileStatus::from_param)?)
        }
        "disk-encryption" => FilterChange::DiskEncryption(parse_dimension(
            spec,
            value,
            DiskEncryptionStatus::from_param,
        )?),
        "bootstrap-package" => FilterChange::BootstrapPackage(parse_dimension(
            spec,
            value,
            BootstrapPackageStatus::from_param,
        )?),
        "profile-status" => FilterChange::ConfigProfileStatus(parse_dimension(
            spec,
            value,
            MdmProfileStatus::from_param,
        )?),
        "script-batch-status" => FilterChange::ScriptBatchStatus(parse_dimension(
            spec,
            value,
            ScriptBatchExecutionStatus::from_param,
        )?),
        "team" => FilterChange::Team(match value {
            "all" => TeamFilter::AllTeams,
            "none" => TeamFilter::NoTeam,
            id => TeamFilter::Team(parse_number(spec, id)?),
        }),
        "label" => FilterChange::Label(parse_label(value)?),
        "clear" => FilterChange::Clear(
            value
                .split(',')
                .filter(|p| !p.is_empty())
                .map(ToString::to_string)
                .collect(),
        ),
        _ => bail!(
            "Unknown change '{name}'. Valid changes: search, sort, page, status, \
             policy-response, macos-settings, software-status, os-settings, \
             disk-encryption, bootstrap-package, profile-status, script-batch-status, \
             team, label, clear, clear-label"
        ),
    };

    Ok(change)
}

/// Parse a label spec of the form `id` or `id:name`.
pub(crate) fn parse_label(spec: &str) -> Result<Label> {
    let (id, name) = match spec.split_once(':') {
        Some((id, name)) => (id, name),
        None => (spec, ""),
    };
    match id.parse::<u32>() {
        Ok(id) => Ok(Label::new(id, name)),
        Err(_) => bail!("Invalid label '{spec}': expected id or id:name"),
    }
}

fn parse_number(spec: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(value) => Ok(value),
        Err(_) => bail!("Invalid change '{spec}': '{value}' is not a number"),
    }
}

fn parse_dimension<T>(spec: &str, value: &str, from_param: fn(&str) -> Option<T>) -> Result<T> {
    match from_param(value) {
        Some(parsed) => Ok(parsed),
        None => bail!("Invalid change '{spec}': unknown value '{value}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_and_page() {
        assert_eq!(
            parse_change("search=db-").unwrap(),
            FilterChange::Search("db-".to_string())
        );
        assert_eq!(
            parse_change("search=").unwrap(),
            FilterChange::Search(String::new())
        );
        assert_eq!(parse_change("page=4").unwrap(), FilterChange::Page(4));
        assert!(parse_change("page=four").is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_change("sort=uptime:desc").unwrap(),
            FilterChange::Sort(SortSpec::new("uptime", SortDirection::Desc))
        );
        assert_eq!(
            parse_change("sort=memory").unwrap(),
            FilterChange::Sort(SortSpec::new("memory", SortDirection::Asc))
        );
        assert!(parse_change("sort=uptime:sideways").is_err());
        assert!(parse_change("sort=").is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_change("status=offline").unwrap(),
            FilterChange::Status(Some(HostStatus::Offline))
        );
        assert_eq!(parse_change("status=").unwrap(), FilterChange::Status(None));
        assert!(parse_change("status=away").is_err());
    }

    #[test]
    fn test_parse_team() {
        assert_eq!(
            parse_change("team=all").unwrap(),
            FilterChange::Team(TeamFilter::AllTeams)
        );
        assert_eq!(
            parse_change("team=none").unwrap(),
            FilterChange::Team(TeamFilter::NoTeam)
        );
        assert_eq!(
            parse_change("team=12").unwrap(),
            FilterChange::Team(TeamFilter::Team(12))
        );
        assert!(parse_change("team=red").is_err());
    }

    #[test]
    fn test_parse_label_specs() {
        assert_eq!(
            parse_change("label=7:Laptops").unwrap(),
            FilterChange::Label(Label::new(7, "Laptops"))
        );
        assert_eq!(
            parse_change("label=7").unwrap(),
            FilterChange::Label(Label::new(7, ""))
        );
        assert_eq!(parse_change("clear-label").unwrap(), FilterChange::ClearLabel);
        assert!(parse_change("label=Laptops").is_err());
    }

    #[test]
    fn test_parse_clear_list() {
        assert_eq!(
            parse_change("clear=policy_id,policy_response").unwrap(),
            FilterChange::Clear(vec![
                "policy_id".to_string(),
                "policy_response".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_enum_dimensions() {
        assert_eq!(
            parse_change("disk-encryption=action_required").unwrap(),
            FilterChange::DiskEncryption(DiskEncryptionStatus::ActionRequired)
        );
        assert_eq!(
            parse_change("script-batch-status=errored").unwrap(),
            FilterChange::ScriptBatchStatus(ScriptBatchExecutionStatus::Errored)
        );
        assert!(parse_change("profile-status=unknown").is_err());
    }

    #[test]
    fn test_unknown_change_is_rejected() {
        let err = parse_change("colour=red").unwrap_err();
        assert!(err.to_string().contains("Unknown change"));
        assert!(parse_change("just-words").is_err());
    }
}
