//! Bulk command handler.
//!
//! Implements the `bulk` subcommand: report which bulk host operations the
//! current filters support, with the exact refusal message the console
//! would show on a blocked action.

use crate::bulk::{
    script_batch_eligibility, script_batch_filters_supported, select_all_matching_supported,
    BulkContext, ScriptBatchEligibility,
};
use crate::filters::HostFilters;
use crate::labels::Label;
use crate::license::Tier;
use crate::query::{run_script_batch_params, transfer_params};
use anyhow::Result;
use serde::Serialize;

/// Run the bulk command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_bulk(
    state: String,
    tier: Tier,
    scripts_disabled: bool,
    targets: Option<u32>,
    json: bool,
) -> Result<()> {
    let (filters, label_id) = super::inspect::parse_state(&state)?;
    let label = label_id.map(|id| Label::new(id, String::new()));
    let ctx = BulkContext {
        tier,
        scripts_disabled,
    };

    let report = build_report(&filters, label.as_ref(), ctx, targets);
    let blocked = report.script_eligibility.is_some_and(|e| !e.is_eligible());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }

    // Exit code 1 when a requested script run would be refused
    if targets.is_some() && blocked {
        std::process::exit(1);
    }

    Ok(())
}

/// Bulk-action support for one filter state.
#[derive(Debug, Serialize)]
pub(crate) struct BulkReport {
    pub summary: String,
    /// Select all matching hosts, transfer, and delete share this rule.
    pub select_all_matching: bool,
    pub script_filters_supported: bool,
    /// Full script-run verdict; only present when a target count was given.
    pub script_eligibility: Option<ScriptBatchEligibility>,
    pub script_message: Option<&'static str>,
    pub transfer_params: String,
    pub script_params: String,
}

pub(crate) fn build_report(
    filters: &HostFilters,
    label: Option<&Label>,
    ctx: BulkContext,
    targets: Option<u32>,
) -> BulkReport {
    let script_eligibility =
        targets.map(|count| script_batch_eligibility(filters, ctx, Some(count)));

    BulkReport {
        summary: filters.summary(),
        select_all_matching: select_all_matching_supported(filters),
        script_filters_supported: script_batch_filters_supported(filters),
        script_eligibility,
        script_message: script_eligibility.and_then(|e| e.message()),
        transfer_params: transfer_params(filters, label).to_query_string(),
        script_params: run_script_batch_params(filters, label).to_query_string(),
    }
}

fn format_report(report: &BulkReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("Filters: {}\n", report.summary));
    out.push_str(&format!(
        "Select all / transfer / delete: {}\n",
        supported(report.select_all_matching)
    ));

    match report.script_eligibility {
        Some(eligibility) if eligibility.is_eligible() => {
            out.push_str("Run script: eligible\n");
        }
        Some(_) => {
            out.push_str("Run script: blocked\n");
            if let Some(message) = report.script_message {
                out.push_str(&format!("  {message}\n"));
            }
        }
        None => {
            out.push_str(&format!(
                "Run script filters: {}\n",
                supported(report.script_filters_supported)
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!("Transfer params: {}\n", report.transfer_params));
    out.push_str(&format!("Script params:   {}\n", report.script_params));

    out
}

fn supported(flag: bool) -> &'static str {
    if flag {
        "supported"
    } else {
        "unsupported"
    }
}
