//! Label selection for the hosts view.
//!
//! Labels are the one filter carried in the route path instead of the query
//! string: selecting a label navigates to `/hosts/manage/labels/<id>`.
//! Label selection is compatible with team, free text, and status, but
//! strips every exclusive dimension (see
//! [`crate::params::LABEL_INCOMPATIBLE_PARAMS`]).

use serde::{Deserialize, Serialize};

/// Base path of the hosts view.
pub const MANAGE_HOSTS_PATH: &str = "/hosts/manage";

/// Route-segment prefix that introduces a label id.
pub const LABEL_SLUG_PREFIX: &str = "labels/";

/// A host label the view can scope to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub id: u32,
    pub name: String,
}

impl Label {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Route segment for this label, e.g. `labels/42`.
    pub fn slug(&self) -> String {
        format!("{LABEL_SLUG_PREFIX}{}", self.id)
    }

    /// Full hosts-view path with this label selected.
    pub fn path(&self) -> String {
        format!("{MANAGE_HOSTS_PATH}/{}", self.slug())
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.slug())
    }
}

/// Extract the selected label id from a hosts-view path, if any.
///
/// Only well-formed trailing segments count; a malformed id means no label
/// is selected, mirroring the lenient numeric decoding used for query
/// parameters.
pub fn label_id_from_path(path: &str) -> Option<u32> {
    let rest = path.strip_prefix(MANAGE_HOSTS_PATH)?;
    let rest = rest.strip_prefix('/')?;
    let id = rest.strip_prefix(LABEL_SLUG_PREFIX)?;
    let id = id.strip_suffix('/').unwrap_or(id);
    id.parse().ok()
}
