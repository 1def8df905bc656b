//! Inspect command handler.
//!
//! Implements the `inspect` subcommand: decode a query string or full URL
//! into the filter state it represents and report what the console would
//! actually show, including which conflicting filters get dropped.

use crate::error::ConsoleError;
use crate::filters::{ExclusiveFilter, HostFilters};
use crate::labels::{label_id_from_path, Label, MANAGE_HOSTS_PATH};
use crate::license::Tier;
use crate::navigation::canonical_params;
use crate::params::QueryParams;
use crate::query::{count_params, list_params, QueryKey};
use anyhow::Result;
use serde::Serialize;

/// Run the inspect command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_inspect(input: String, tier: Tier, json: bool) -> Result<()> {
    let (filters, label_id) = parse_state(&input)?;
    let report = build_report(&filters, label_id, tier);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}

/// Decode a raw query string or a full URL into a filter state.
///
/// A URL also carries the selected label in its path; a bare query string
/// never does.
pub(crate) fn parse_state(input: &str) -> Result<(HostFilters, Option<u32>)> {
    if input.contains("://") {
        let url = url::Url::parse(input)
            .map_err(|e| ConsoleError::invalid_url(format!("{input} ({e})")))?;
        let params = QueryParams::from_query_string(url.query().unwrap_or_default());
        Ok((HostFilters::from_params(&params), label_id_from_path(url.path())))
    } else {
        let query = input.strip_prefix('?').unwrap_or(input);
        Ok((HostFilters::from_query_string(query), None))
    }
}

/// Everything the inspect command reports about a filter state.
#[derive(Debug, Serialize)]
pub(crate) struct InspectReport {
    pub summary: String,
    pub active_filters: usize,
    pub label_id: Option<u32>,
    /// Exclusive dimension that wins the priority cascade, if any.
    pub winner: Option<String>,
    /// Exclusive dimensions that carry values but lose to the winner.
    pub dropped: Vec<String>,
    pub canonical_path: String,
    pub list_params: String,
    pub count_params: String,
    pub list_key: String,
    pub count_key: String,
}

pub(crate) fn build_report(
    filters: &HostFilters,
    label_id: Option<u32>,
    tier: Tier,
) -> InspectReport {
    let winner = ExclusiveFilter::resolve(filters, tier);
    let dropped: Vec<String> = ExclusiveFilter::priority_order()
        .iter()
        .filter(|dim| Some(**dim) != winner && dim.is_active(filters, tier))
        .map(|dim| dim.label().to_string())
        .collect();

    let label = label_id.map(|id| Label::new(id, String::new()));
    let path = label
        .as_ref()
        .map_or_else(|| MANAGE_HOSTS_PATH.to_string(), Label::path);
    let canonical = canonical_params(filters, tier);
    let canonical_path = if canonical.is_empty() {
        path
    } else {
        format!("{path}?{}", canonical.to_query_string())
    };

    InspectReport {
        summary: filters.summary(),
        active_filters: filters.active_filter_count(),
        label_id,
        winner: winner.map(|dim| dim.label().to_string()),
        dropped,
        canonical_path,
        list_params: list_params(filters, label.as_ref()).to_query_string(),
        count_params: count_params(filters, label.as_ref()).to_query_string(),
        list_key: QueryKey::list(filters, label.as_ref()).to_string(),
        count_key: QueryKey::count(filters, label.as_ref()).to_string(),
    }
}

fn format_report(report: &InspectReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Filters:   {}\n", report.summary));
    if let Some(id) = report.label_id {
        out.push_str(&format!("Label:     {id}\n"));
    }
    match &report.winner {
        Some(winner) if report.dropped.is_empty() => {
            out.push_str(&format!("Exclusive: {winner}\n"));
        }
        Some(winner) => {
            out.push_str(&format!(
                "Exclusive: {winner} (dropped: {})\n",
                report.dropped.join(", ")
            ));
        }
        None => out.push_str("Exclusive: none\n"),
    }
    out.push_str(&format!("Canonical: {}\n", report.canonical_path));
    out.push('\n');
    out.push_str(&format!("List params:  {}\n", report.list_params));
    out.push_str(&format!("Count params: {}\n", report.count_params));
    out.push_str(&format!(
        "Query keys:   {} / {}\n",
        report.list_key, report.count_key
    ));

    out
}
