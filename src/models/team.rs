//! Team, team secret and membership documents.

use serde::{Deserialize, Serialize};

/// A team taking part in a quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub quiz_id: String,
    pub name: String,
    pub created_at: String,
}

/// Passcode holder for a team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSecret {
    pub team_id: String,
    pub passcode: String,
}

/// Membership linking a principal to a team and, through it, a quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeam {
    pub id: String,
    pub player_id: String,
    pub team_id: String,
    pub quiz_id: String,
    pub created_at: String,
}

/// Request body for creating a team in a quiz.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[serde(default)]
    pub quiz_passcode: Option<String>,
    pub team_name: String,
    #[serde(default)]
    pub use_team_passcode: bool,
    #[serde(default)]
    pub team_passcode: Option<String>,
}

/// Request body for joining an existing team.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinTeamRequest {
    #[serde(default)]
    pub quiz_passcode: Option<String>,
    #[serde(default)]
    pub team_passcode: Option<String>,
}

/// Result of a successful join.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedTeam {
    pub team: Team,
    pub player_team: PlayerTeam,
    pub redirect_to: String,
}
