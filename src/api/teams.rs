//! Team and membership API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateTeamRequest, JoinTeamRequest, JoinedTeam, PlayerTeam, Team};
use crate::policy::Principal;
use crate::AppState;

/// GET /api/quizzes/:id/teams - List the teams of a quiz (owner).
pub async fn list_teams(
    State(state): State<AppState>,
    principal: Principal,
    Path(quiz_id): Path<String>,
) -> ApiResult<Vec<Team>> {
    success(state.store.list_teams(&principal, &quiz_id).await?)
}

/// POST /api/quizzes/:id/teams - Create a team and join it.
pub async fn create_team(
    State(state): State<AppState>,
    principal: Principal,
    Path(quiz_id): Path<String>,
    Json(request): Json<CreateTeamRequest>,
) -> ApiResult<JoinedTeam> {
    success(state.store.create_team(&principal, &quiz_id, &request).await?)
}

/// GET /api/teams/:id - Get a team.
pub async fn get_team(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Team> {
    success(state.store.get_team(&principal, &id).await?)
}

/// POST /api/teams/:id/join - Join an existing team.
pub async fn join_team(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(request): Json<JoinTeamRequest>,
) -> ApiResult<JoinedTeam> {
    success(state.store.join_team(&principal, &id, &request).await?)
}

/// GET /api/playerTeams - List the requester's memberships.
pub async fn list_player_teams(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Vec<PlayerTeam>> {
    success(state.store.list_player_teams(&principal).await?)
}

/// GET /api/playerTeams/:id - Get one of the requester's memberships.
pub async fn get_player_team(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<PlayerTeam> {
    success(state.store.get_player_team(&principal, &id).await?)
}
