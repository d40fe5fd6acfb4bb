//! Wall-in-progress API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{CreateWallRequest, UpdateSelectionsRequest, WallInProgress};
use crate::policy::Principal;
use crate::AppState;

/// POST /api/wallInProgress - Start a wall attempt.
pub async fn create_wall(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreateWallRequest>,
) -> ApiResult<WallInProgress> {
    success(state.store.create_wall(&principal, &request).await?)
}

/// GET /api/wallInProgress/:id - Get a wall attempt.
pub async fn get_wall(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<WallInProgress> {
    success(state.store.get_wall(&principal, &id).await?)
}

/// PUT /api/wallInProgress/:id/selectedTexts - Replace the selected texts.
pub async fn update_wall_selections(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(request): Json<UpdateSelectionsRequest>,
) -> ApiResult<WallInProgress> {
    success(
        state
            .store
            .update_wall_selections(&principal, &id, request.selected_texts)
            .await?,
    )
}
