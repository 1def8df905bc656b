//! Columns command handler.
//!
//! Implements the `columns` subcommand for viewing and editing the hidden
//! hosts-table columns that persist across sessions.

use crate::settings::ColumnPreferences;
use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

/// Run the columns command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_columns(
    hide: Vec<String>,
    unhide: Vec<String>,
    reset: bool,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let path = file.or_else(ColumnPreferences::config_path);
    let mut prefs = path
        .as_deref()
        .map_or_else(ColumnPreferences::default, ColumnPreferences::load_from);

    let changed = edit(&mut prefs, &hide, &unhide, reset);
    if changed {
        let Some(path) = path.as_deref() else {
            bail!("No config directory available to save column settings");
        };
        prefs
            .save_to(path)
            .map_err(|e| anyhow!("Couldn't save column settings. Please try again. ({e})"))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
    } else if prefs.hidden_columns.is_empty() {
        println!("No hidden columns");
    } else {
        println!("Hidden columns:");
        for column in &prefs.hidden_columns {
            println!("  {column}");
        }
    }

    Ok(())
}

/// Apply the requested edits, reporting whether anything changed.
fn edit(prefs: &mut ColumnPreferences, hide: &[String], unhide: &[String], reset: bool) -> bool {
    let mut changed = false;

    if reset && *prefs != ColumnPreferences::default() {
        prefs.reset();
        changed = true;
    }
    for column in hide {
        if !prefs.is_hidden(column) {
            prefs.hide(column);
            changed = true;
        }
    }
    for column in unhide {
        if prefs.is_hidden(column) {
            prefs.unhide(column);
            changed = true;
        }
    }

    changed
}
