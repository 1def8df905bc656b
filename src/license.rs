//! License tier of the console.
//!
//! A handful of filters (low disk space, disk encryption, bootstrap
//! package) only exist on premium licenses; the reconciler drops them on
//! free tier.

use serde::{Deserialize, Serialize};

/// License tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Free,
    Premium,
}

impl Tier {
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Premium => "Premium",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
