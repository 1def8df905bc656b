//! Team scoping for the hosts view.
//!
//! The team dimension is always compatible with every other filter, but
//! switching teams invalidates a couple of team-scoped filters, handled
//! here so the reconciler stays a plain priority cascade.

use crate::filters::HostFilters;
use crate::params::{names, QueryParams};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The team scope of the hosts view.
///
/// Wire form: absent = all teams, `0` = hosts outside any team, a positive
/// id = that team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamFilter {
    #[default]
    AllTeams,
    NoTeam,
    Team(u32),
}

impl TeamFilter {
    /// Read the team scope from query parameters.
    ///
    /// Malformed ids fall back to all teams.
    pub fn from_params(params: &QueryParams) -> Self {
        match params.get_non_empty(names::TEAM_ID) {
            None => Self::AllTeams,
            Some(_) => match params.get_u32(names::TEAM_ID) {
                Some(0) => Self::NoTeam,
                Some(id) => Self::Team(id),
                None => Self::AllTeams,
            },
        }
    }

    /// Wire form of this scope, if it has one.
    pub fn as_param(&self) -> Option<String> {
        match self {
            Self::AllTeams => None,
            Self::NoTeam => Some("0".to_string()),
            Self::Team(id) => Some(id.to_string()),
        }
    }

    /// Numeric id sent to the API, where all teams means no id at all.
    pub fn api_id(&self) -> Option<u32> {
        match self {
            Self::AllTeams => None,
            Self::NoTeam => Some(0),
            Self::Team(id) => Some(*id),
        }
    }

    pub fn is_all_teams(&self) -> bool {
        matches!(self, Self::AllTeams)
    }

    /// Write the team id into a parameter map (no-op for all teams).
    pub fn write_params(&self, params: &mut QueryParams) {
        if let Some(id) = self.as_param() {
            params.set(names::TEAM_ID, id);
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::AllTeams => "All teams".to_string(),
            Self::NoTeam => "No team".to_string(),
            Self::Team(id) => format!("Team {id}"),
        }
    }
}

impl std::fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Apply a team switch to the filter state, dropping filters that do not
/// survive it.
///
/// The software install status is scoped to a concrete team, so it is
/// dropped when the view widens to all teams. Script batch executions are
/// team-scoped as well and dropped on any actual switch.
pub fn apply_team_change(filters: &mut HostFilters, next: TeamFilter) {
    if next.is_all_teams() && filters.software_status.is_some() {
        debug!("dropping software_status: not available across all teams");
        filters.software_status = None;
    }
    if next != filters.team {
        filters.script_batch_execution_id = None;
        filters.script_batch_execution_status = None;
    }
    filters.team = next;
}
