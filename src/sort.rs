//! Sort order for the hosts table.

use crate::params::{names, QueryParams};
use serde::{Deserialize, Serialize};

/// Column the hosts list sorts by when the URL does not say otherwise.
pub const DEFAULT_SORT_KEY: &str = "hostname";

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_param(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// Sort key/direction pair carried through every navigation change.
///
/// Persists across filter changes unless explicitly changed; defaults to
/// (`hostname`, ascending) when the incoming parameters omit it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: DEFAULT_SORT_KEY.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

impl SortSpec {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Read the sort from query parameters, falling back to the default.
    pub fn from_params(params: &QueryParams) -> Self {
        let key = params
            .get_non_empty(names::ORDER_KEY)
            .unwrap_or(DEFAULT_SORT_KEY)
            .to_string();
        let direction = params
            .get_non_empty(names::ORDER_DIRECTION)
            .and_then(SortDirection::from_param)
            .unwrap_or_default();
        Self { key, direction }
    }

    /// Write the sort into a parameter map.
    pub fn write_params(&self, params: &mut QueryParams) {
        params.set(names::ORDER_KEY, &self.key);
        params.set(names::ORDER_DIRECTION, self.direction.as_param());
    }
}

impl std::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key, self.direction)
    }
}
