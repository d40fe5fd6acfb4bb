//! In-progress state for "wall" questions.

use serde::{Deserialize, Serialize};

/// One team's selection state on one clue of a wall question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WallInProgress {
    pub id: String,
    pub team_id: String,
    pub clue_id: String,
    pub question_id: String,
    #[serde(default)]
    pub selected_texts: Vec<String>,
}

/// Request body for starting a wall attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWallRequest {
    pub team_id: String,
    pub clue_id: String,
    pub question_id: String,
}

/// Request body replacing the selected texts of a wall attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSelectionsRequest {
    pub selected_texts: Vec<String>,
}
