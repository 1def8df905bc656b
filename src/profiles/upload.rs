//! File-name parsing for profile uploads.

use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Platforms a profile file can target, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilePlatform {
    /// `.xml` profiles apply to Windows hosts.
    Windows,
    /// `.mobileconfig` and `.json` profiles apply to Apple hosts.
    Apple,
}

impl ProfilePlatform {
    /// Platform list shown next to the uploaded profile.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Apple => "macOS, iOS, iPadOS",
        }
    }
}

impl std::fmt::Display for ProfilePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A profile upload accepted by [`parse_file_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProfile {
    /// Display name: the file name with its final extension removed.
    pub name: String,
    pub platform: ProfilePlatform,
}

/// Derive the display name and platform from an uploaded file name.
///
/// The name is everything before the last dot, dots included; the final
/// extension picks the platform. A file name without a separable extension
/// (no dot at all) is an invalid file type, reported under its whole name.
pub fn parse_file_name(file_name: &str) -> Result<ParsedProfile> {
    let (name, ext) = match file_name.rsplit_once('.') {
        Some(split) => split,
        None => ("", file_name),
    };

    let platform = match ext {
        "xml" => ProfilePlatform::Windows,
        "mobileconfig" | "json" => ProfilePlatform::Apple,
        other => {
            debug!(extension = other, "rejecting profile upload");
            return Err(ConsoleError::invalid_file_type(other));
        }
    };

    Ok(ParsedProfile {
        name: name.to_string(),
        platform,
    })
}
