//! User permission API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{PutUserPermissionRequest, UserPermission};
use crate::policy::Principal;
use crate::AppState;

/// GET /api/userPermissions - List permission documents (never admitted).
pub async fn list_user_permissions(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Vec<UserPermission>> {
    success(state.store.list_user_permissions(&principal).await?)
}

/// GET /api/userPermissions/:owner_id - Get a principal's own permissions.
pub async fn get_user_permission(
    State(state): State<AppState>,
    principal: Principal,
    Path(owner_id): Path<String>,
) -> ApiResult<UserPermission> {
    success(state.store.get_user_permission(&principal, &owner_id).await?)
}

/// PUT /api/userPermissions/:owner_id - Create or update permissions (admin).
pub async fn put_user_permission(
    State(state): State<AppState>,
    principal: Principal,
    Path(owner_id): Path<String>,
    Json(request): Json<PutUserPermissionRequest>,
) -> ApiResult<UserPermission> {
    let permission = UserPermission {
        owner_id,
        some_permission: request.some_permission,
    };
    success(state.store.put_user_permission(&principal, &permission).await?)
}

/// DELETE /api/userPermissions/:owner_id - Delete permissions (admin).
pub async fn delete_user_permission(
    State(state): State<AppState>,
    principal: Principal,
    Path(owner_id): Path<String>,
) -> ApiResult<()> {
    state
        .store
        .delete_user_permission(&principal, &owner_id)
        .await?;
    success(())
}
