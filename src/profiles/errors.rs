//! Mapping of API failure reasons to user-facing upload messages.
//!
//! The profiles API reports failures as free-form reason strings. A fixed,
//! ordered list of substring matchers rewrites the known ones into curated
//! messages; anything unrecognized falls back to the raw reason, or to
//! [`DEFAULT_ERROR_MESSAGE`] when even that is empty. The match order is
//! authoritative: earlier entries win.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Shown when the API gives nothing better to work with.
pub const DEFAULT_ERROR_MESSAGE: &str = "Couldn't add configuration profile. Please try again.";

const USER_CHANNEL_LEARN_MORE: &str =
    "https://fleetdm.com/learn-more-about/configuration-profiles-user-channel";

/// `$FLEET_VAR_…`-style token inside a failure reason.
static VARIABLE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Z0-9_]+").expect("static regex"));

/// The known failure classes, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadErrorKind {
    /// Profile tries to manage BitLocker, which the console owns.
    BitLockerSettings,
    /// Profile tries to manage FileVault, which the console owns.
    FileVaultSettings,
    /// Profile tries to manage Windows update settings.
    WindowsUpdateSettings,
    /// Profile references a secret variable that does not exist.
    SecretVariable,
    /// Profile references a variable unsupported in profiles.
    UnsupportedVariable,
    /// Certificate authority used without SCEP URL/Challenge variables.
    ScepVariablesMissing,
    /// Custom SCEP profile missing a required variable.
    CustomScepRequirement,
    /// NDES SCEP profile missing its challenge variable.
    NdesScepRequirement,
    /// Profile sets a `PayloadScope` the user channel does not allow.
    UserChannelScope,
    /// Anything else: the raw reason (or the default message).
    Fallback,
}

impl UploadErrorKind {
    /// Classify a raw API reason.
    pub fn classify(reason: &str) -> Self {
        if reason.contains("BitLocker") {
            Self::BitLockerSettings
        } else if reason.contains("FileVault") {
            Self::FileVaultSettings
        } else if reason.contains("The configuration profile can't include Windows update settings.")
        {
            Self::WindowsUpdateSettings
        } else if reason.contains("Secret variable") {
            Self::SecretVariable
        } else if reason.contains("Fleet variable")
            && reason.contains("not supported in configuration profiles")
        {
            Self::UnsupportedVariable
        } else if reason
            .contains("can't be used if variables for SCEP URL and Challenge are not specified")
        {
            Self::ScepVariablesMissing
        } else if reason.contains("SCEP profile for custom SCEP certificate authority requires") {
            Self::CustomScepRequirement
        } else if reason
            .contains("SCEP profile for NDES certificate authority requires: $FLEET_VAR_NDES_SCEP_CHALLENGE")
        {
            Self::NdesScepRequirement
        } else if reason.contains("\"PayloadScope\"") {
            Self::UserChannelScope
        } else {
            Self::Fallback
        }
    }
}

/// A user-facing upload failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadErrorMessage {
    pub kind: UploadErrorKind,
    pub text: String,
    /// Documentation link appended after the text, when one exists.
    pub learn_more_url: Option<&'static str>,
}

impl std::fmt::Display for UploadErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.learn_more_url {
            Some(url) => write!(f, "{} Learn more: {url}", self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

/// Map a raw API failure reason to the message the console shows.
pub fn upload_error_message(reason: &str) -> UploadErrorMessage {
    let kind = UploadErrorKind::classify(reason);
    match kind {
        UploadErrorKind::BitLockerSettings => constant(kind, disk_encryption_text("BitLocker")),
        UploadErrorKind::FileVaultSettings => constant(kind, disk_encryption_text("FileVault")),
        UploadErrorKind::WindowsUpdateSettings => UploadErrorMessage {
            kind,
            text: format!("{reason} To control these settings, go to OS updates."),
            learn_more_url: None,
        },
        UploadErrorKind::SecretVariable => variable_message(kind, reason, "Secret variable"),
        UploadErrorKind::UnsupportedVariable => variable_message(kind, reason, "Variable"),
        UploadErrorKind::ScepVariablesMissing => scep_message(
            kind,
            reason,
            "https://fleetdm.com/learn-more-about/certificate-authorities",
        ),
        UploadErrorKind::CustomScepRequirement => scep_message(
            kind,
            reason,
            "https://fleetdm.com/learn-more-about/custom-scep-configuration-profile",
        ),
        UploadErrorKind::NdesScepRequirement => scep_message(
            kind,
            reason,
            "https://fleetdm.com/learn-more-about/ndes-scep-configuration-profile",
        ),
        UploadErrorKind::UserChannelScope => {
            // The API text already opens with "Couldn't add"/"Couldn't edit"
            // and carries its own learn-more link, which is replaced here.
            let text = match reason.find(" Learn more: https://") {
                Some(idx) if idx > 0 => &reason[..idx],
                _ => reason,
            };
            UploadErrorMessage {
                kind,
                text: text.to_string(),
                learn_more_url: Some(USER_CHANNEL_LEARN_MORE),
            }
        }
        UploadErrorKind::Fallback => {
            let text = if reason.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                reason.to_string()
            };
            UploadErrorMessage {
                kind,
                text,
                learn_more_url: None,
            }
        }
    }
}

fn constant(kind: UploadErrorKind, text: String) -> UploadErrorMessage {
    UploadErrorMessage {
        kind,
        text,
        learn_more_url: None,
    }
}

fn disk_encryption_text(product: &str) -> String {
    format!(
        "Couldn't add. The configuration profile can't include {product} settings. \
         To control these settings, go to Disk encryption."
    )
}

/// Build the `doesn't exist` message around the `$TOKEN` the reason names.
///
/// A reason with no extractable token falls back to the default message;
/// there is nothing useful to tell the user without the name.
fn variable_message(kind: UploadErrorKind, reason: &str, noun: &str) -> UploadErrorMessage {
    let text = match VARIABLE_TOKEN.find(reason) {
        Some(token) => format!("Couldn't add. {noun} \"{}\" doesn't exist.", token.as_str()),
        None => DEFAULT_ERROR_MESSAGE.to_string(),
    };
    constant(kind, text)
}

fn scep_message(kind: UploadErrorKind, reason: &str, url: &'static str) -> UploadErrorMessage {
    UploadErrorMessage {
        kind,
        text: format!("Couldn't add. {reason}"),
        learn_more_url: Some(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitlocker_reason_points_to_disk_encryption() {
        let msg = upload_error_message(
            "Validation Failed: The configuration profile can't include BitLocker settings.",
        );
        assert_eq!(msg.kind, UploadErrorKind::BitLockerSettings);
        assert_eq!(
            msg.text,
            "Couldn't add. The configuration profile can't include BitLocker settings. \
             To control these settings, go to Disk encryption."
        );
        assert_eq!(msg.text.matches("Disk encryption").count(), 1);
    }

    #[test]
    fn test_any_bitlocker_mention_maps_to_guidance() {
        let msg = upload_error_message("unexpected BitLocker payload");
        assert_eq!(msg.kind, UploadErrorKind::BitLockerSettings);
        assert_eq!(msg.text.matches("Disk encryption").count(), 1);
    }

    #[test]
    fn test_filevault_reason_points_to_disk_encryption() {
        let msg = upload_error_message(
            "The configuration profile can't include FileVault settings.",
        );
        assert_eq!(msg.kind, UploadErrorKind::FileVaultSettings);
        assert!(msg.text.contains("FileVault"));
        assert_eq!(msg.text.matches("Disk encryption").count(), 1);
    }

    #[test]
    fn test_windows_update_appends_os_updates_guidance() {
        let reason = "The configuration profile can't include Windows update settings.";
        let msg = upload_error_message(reason);
        assert_eq!(msg.kind, UploadErrorKind::WindowsUpdateSettings);
        assert_eq!(
            msg.text,
            format!("{reason} To control these settings, go to OS updates.")
        );
    }

    #[test]
    fn test_secret_variable_names_the_token() {
        let msg = upload_error_message("Secret variable \"$FLEET_SECRET_WIFI\" missing");
        assert_eq!(msg.kind, UploadErrorKind::SecretVariable);
        assert_eq!(
            msg.text,
            "Couldn't add. Secret variable \"$FLEET_SECRET_WIFI\" doesn't exist."
        );
    }

    #[test]
    fn test_unsupported_variable_names_the_token() {
        let msg = upload_error_message(
            "Fleet variable $FLEET_VAR_HOST_UUID is not supported in configuration profiles",
        );
        assert_eq!(msg.kind, UploadErrorKind::UnsupportedVariable);
        assert_eq!(
            msg.text,
            "Couldn't add. Variable \"$FLEET_VAR_HOST_UUID\" doesn't exist."
        );
    }

    #[test]
    fn test_variable_reason_without_token_falls_back() {
        let msg = upload_error_message(
            "Fleet variable (unnamed) not supported in configuration profiles",
        );
        assert_eq!(msg.kind, UploadErrorKind::UnsupportedVariable);
        assert_eq!(msg.text, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_scep_reasons_carry_learn_more_links() {
        let msg = upload_error_message(
            "Certificate authority can't be used if variables for SCEP URL and Challenge are not specified.",
        );
        assert_eq!(msg.kind, UploadErrorKind::ScepVariablesMissing);
        assert_eq!(
            msg.learn_more_url,
            Some("https://fleetdm.com/learn-more-about/certificate-authorities")
        );
        assert!(msg.text.starts_with("Couldn't add. Certificate authority"));

        let msg = upload_error_message(
            "SCEP profile for custom SCEP certificate authority requires $FLEET_VAR_CUSTOM_SCEP_CHALLENGE",
        );
        assert_eq!(
            msg.learn_more_url,
            Some("https://fleetdm.com/learn-more-about/custom-scep-configuration-profile")
        );

        let msg = upload_error_message(
            "SCEP profile for NDES certificate authority requires: $FLEET_VAR_NDES_SCEP_CHALLENGE",
        );
        assert_eq!(
            msg.learn_more_url,
            Some("https://fleetdm.com/learn-more-about/ndes-scep-configuration-profile")
        );
        assert_eq!(
            msg.to_string(),
            "Couldn't add. SCEP profile for NDES certificate authority requires: \
             $FLEET_VAR_NDES_SCEP_CHALLENGE Learn more: \
             https://fleetdm.com/learn-more-about/ndes-scep-configuration-profile"
        );
    }

    #[test]
    fn test_payload_scope_replaces_embedded_link() {
        let msg = upload_error_message(
            "Couldn't edit. The \"PayloadScope\" key must be set to \"User\". \
             Learn more: https://example.com/old-link",
        );
        assert_eq!(msg.kind, UploadErrorKind::UserChannelScope);
        assert_eq!(
            msg.text,
            "Couldn't edit. The \"PayloadScope\" key must be set to \"User\"."
        );
        assert_eq!(msg.learn_more_url, Some(USER_CHANNEL_LEARN_MORE));
    }

    #[test]
    fn test_payload_scope_without_link_keeps_reason() {
        let msg = upload_error_message("Couldn't add. \"PayloadScope\" must be \"System\".");
        assert_eq!(msg.text, "Couldn't add. \"PayloadScope\" must be \"System\".");
        assert_eq!(msg.learn_more_url, Some(USER_CHANNEL_LEARN_MORE));
    }

    #[test]
    fn test_unknown_reason_passes_through() {
        let msg = upload_error_message("Couldn't add. Something very specific went wrong.");
        assert_eq!(msg.kind, UploadErrorKind::Fallback);
        assert_eq!(msg.text, "Couldn't add. Something very specific went wrong.");
        assert_eq!(msg.learn_more_url, None);
    }

    #[test]
    fn test_empty_reason_uses_default_message() {
        let msg = upload_error_message("");
        assert_eq!(msg.kind, UploadErrorKind::Fallback);
        assert_eq!(msg.text, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_match_order_bitlocker_before_windows_update() {
        // A reason naming both products maps by the first matcher.
        let msg = upload_error_message(
            "The configuration profile can't include BitLocker settings. \
             The configuration profile can't include Windows update settings.",
        );
        assert_eq!(msg.kind, UploadErrorKind::BitLockerSettings);
    }
}
