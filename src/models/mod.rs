//! Document models for the quiz application.
//!
//! Field names serialize in camelCase to match the documents the web client reads and writes.

mod permission;
mod quiz;
mod team;
mod wall;

pub use permission::*;
pub use quiz::*;
pub use team::*;
pub use wall::*;

/// Collection names. These double as route segments and must not change.
pub mod collections {
    pub const QUIZZES: &str = "quizzes";
    pub const QUIZ_SECRETS: &str = "quizSecrets";
    pub const TEAMS: &str = "teams";
    pub const TEAM_SECRETS: &str = "teamSecrets";
    pub const PLAYER_TEAMS: &str = "playerTeams";
    pub const USER_PERMISSIONS: &str = "userPermissions";
    pub const WALL_IN_PROGRESS: &str = "wallInProgress";
}
