//! Profile command handlers.
//!
//! Implements the `profile` and `profile-error` subcommands: parse an
//! uploaded configuration-profile file name, and map a raw API failure
//! reason to the message the console shows.

use crate::profiles::{parse_file_name, upload_error_message};
use anyhow::Result;

/// Run the profile command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_profile(file_name: String, json: bool) -> Result<()> {
    let parsed = parse_file_name(&file_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("Name:     {}", parsed.name);
        println!("Platform: {}", parsed.platform);
    }

    Ok(())
}

/// Run the profile-error command.
#[allow(clippy::needless_pass_by_value)]
pub fn run_profile_error(reason: String, json: bool) -> Result<()> {
    let message = upload_error_message(&reason);

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!("{message}");
    }

    Ok(())
}
