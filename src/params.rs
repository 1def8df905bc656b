//! Query-parameter decoding and encoding for the hosts view.
//!
//! Navigation state travels as URL query parameters. This module provides an
//! order-preserving parameter map with lenient accessors: malformed numeric
//! values become absent filters rather than errors.

use crate::error::{ConsoleError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Wire names of the hosts-view query parameters.
pub mod names {
    pub const QUERY: &str = "query";
    pub const PAGE: &str = "page";
    pub const ORDER_KEY: &str = "order_key";
    pub const ORDER_DIRECTION: &str = "order_direction";
    pub const TEAM_ID: &str = "team_id";
    pub const STATUS: &str = "status";
    pub const POLICY_ID: &str = "policy_id";
    pub const POLICY_RESPONSE: &str = "policy_response";
    pub const MACOS_SETTINGS: &str = "macos_settings";
    pub const SOFTWARE_ID: &str = "software_id";
    pub const SOFTWARE_VERSION_ID: &str = "software_version_id";
    pub const SOFTWARE_TITLE_ID: &str = "software_title_id";
    pub const SOFTWARE_STATUS: &str = "software_status";
    pub const MDM_ID: &str = "mdm_id";
    pub const MDM_ENROLLMENT_STATUS: &str = "mdm_enrollment_status";
    pub const MUNKI_ISSUE_ID: &str = "munki_issue_id";
    pub const LOW_DISK_SPACE: &str = "low_disk_space";
    pub const OS_VERSION_ID: &str = "os_version_id";
    pub const OS_NAME: &str = "os_name";
    pub const OS_VERSION: &str = "os_version";
    pub const VULNERABILITY: &str = "vulnerability";
    pub const OS_SETTINGS: &str = "os_settings";
    pub const DISK_ENCRYPTION: &str = "disk_encryption";
    pub const BOOTSTRAP_PACKAGE: &str = "bootstrap_package";
    pub const PROFILE_STATUS: &str = "profile_status";
    pub const PROFILE_UUID: &str = "profile_uuid";
    pub const SCRIPT_BATCH_EXECUTION_ID: &str = "script_batch_execution_id";
    pub const SCRIPT_BATCH_EXECUTION_STATUS: &str = "script_batch_execution_status";

    // API-only parameters, never part of the navigation state.
    pub const LABEL_ID: &str = "label_id";
    pub const PER_PAGE: &str = "per_page";
    pub const DEVICE_MAPPING: &str = "device_mapping";
}

/// Parameters that cannot survive a label selection.
///
/// Selecting a label strips every exclusive dimension from the query string;
/// only team, free text, status, pagination, and sort carry over.
pub const LABEL_INCOMPATIBLE_PARAMS: &[&str] = &[
    names::POLICY_ID,
    names::POLICY_RESPONSE,
    names::MACOS_SETTINGS,
    names::SOFTWARE_ID,
    names::SOFTWARE_VERSION_ID,
    names::SOFTWARE_TITLE_ID,
    names::SOFTWARE_STATUS,
    names::MDM_ID,
    names::MDM_ENROLLMENT_STATUS,
    names::MUNKI_ISSUE_ID,
    names::LOW_DISK_SPACE,
    names::OS_VERSION_ID,
    names::OS_NAME,
    names::OS_VERSION,
    names::VULNERABILITY,
    names::OS_SETTINGS,
    names::DISK_ENCRYPTION,
    names::BOOTSTRAP_PACKAGE,
    names::PROFILE_STATUS,
    names::PROFILE_UUID,
    names::SCRIPT_BATCH_EXECUTION_ID,
    names::SCRIPT_BATCH_EXECUTION_STATUS,
];

/// An order-preserving map of query parameters.
///
/// Insertion order is observable in the serialized query string, so the map
/// is backed by an [`IndexMap`]. Values are stored decoded; encoding happens
/// on [`QueryParams::to_query_string`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(IndexMap<String, String>);

impl QueryParams {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string (without the leading `?`).
    ///
    /// Decoding is lenient: duplicate keys keep the last value, and keys
    /// without a value decode to the empty string.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = IndexMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
        Self(params)
    }

    /// Decode the query portion of a full URL.
    pub fn from_url(raw: &str) -> Result<Self> {
        let url =
            Url::parse(raw).map_err(|e| ConsoleError::invalid_url(format!("{raw} ({e})")))?;
        Ok(Self::from_query_string(url.query().unwrap_or_default()))
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a non-empty parameter value.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Look up a numeric parameter, coercing malformed input to `None`.
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        let raw = self.get_non_empty(key)?;
        match raw.parse::<u32>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(param = key, value = raw, "dropping malformed numeric parameter");
                None
            }
        }
    }

    /// Insert or replace a parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert or replace a numeric parameter.
    pub fn set_u32(&mut self, key: impl Into<String>, value: u32) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Remove a parameter, returning its previous value.
    ///
    /// Removal preserves the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Remove every listed parameter.
    pub fn remove_all(&mut self, keys: &[&str]) {
        for key in keys {
            self.0.shift_remove(*key);
        }
    }

    /// Check whether a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode the map as a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.0 {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_round_trip() {
        let params = QueryParams::from_query_string("team_id=3&query=serial%20123&page=2");
        assert_eq!(params.get(names::TEAM_ID), Some("3"));
        assert_eq!(params.get(names::QUERY), Some("serial 123"));
        assert_eq!(params.get_u32(names::PAGE), Some(2));
        assert_eq!(
            params.to_query_string(),
            "team_id=3&query=serial+123&page=2"
        );
    }

    #[test]
    fn test_decode_from_url() {
        let params = QueryParams::from_url("https://fleet.example.com/hosts/manage?policy_id=5")
            .expect("valid URL");
        assert_eq!(params.get_u32(names::POLICY_ID), Some(5));

        assert!(QueryParams::from_url("not a url").is_err());
    }

    #[test]
    fn test_malformed_numeric_becomes_none() {
        let params = QueryParams::from_query_string("software_id=abc&mdm_id=12");
        assert_eq!(params.get_u32(names::SOFTWARE_ID), None);
        assert_eq!(params.get_u32(names::MDM_ID), Some(12));
    }

    #[test]
    fn test_empty_value_is_absent_for_numeric() {
        let params = QueryParams::from_query_string("munki_issue_id=");
        assert!(params.contains(names::MUNKI_ISSUE_ID));
        assert_eq!(params.get_u32(names::MUNKI_ISSUE_ID), None);
        assert_eq!(params.get_non_empty(names::MUNKI_ISSUE_ID), None);
    }

    #[test]
    fn test_duplicate_keys_keep_last() {
        let params = QueryParams::from_query_string("status=online&status=offline");
        assert_eq!(params.get(names::STATUS), Some("offline"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut params = QueryParams::from_query_string("a=1&b=2&c=3");
        params.remove("b");
        assert_eq!(params.to_query_string(), "a=1&c=3");
    }

    #[test]
    fn test_remove_all_label_incompatible() {
        let mut params =
            QueryParams::from_query_string("team_id=1&policy_id=2&policy_response=failing&query=x");
        params.remove_all(LABEL_INCOMPATIBLE_PARAMS);
        assert_eq!(params.to_query_string(), "team_id=1&query=x");
    }
}
