//! Quiz API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, ApiResult};
use crate::models::{
    CreateQuizRequest, CreatedQuiz, JoinFormInfo, ListQuizzesQuery, Quiz, QuizSecret,
    UpdateQuizRequest,
};
use crate::policy::Principal;
use crate::AppState;

/// GET /api/quizzes?ownerId= - List quizzes owned by the requester.
pub async fn list_quizzes(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<ListQuizzesQuery>,
) -> ApiResult<Vec<Quiz>> {
    // An unscoped listing defaults to the requester's own quizzes.
    let owner_id = query.owner_id.unwrap_or_else(|| principal.id.clone());
    success(state.store.list_quizzes(&principal, Some(owner_id.as_str())).await?)
}

/// POST /api/quizzes - Create a quiz.
pub async fn create_quiz(
    State(state): State<AppState>,
    principal: Principal,
    Json(request): Json<CreateQuizRequest>,
) -> ApiResult<CreatedQuiz> {
    success(state.store.create_quiz(&principal, &request).await?)
}

/// GET /api/quizzes/:id - Get a quiz.
pub async fn get_quiz(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<Quiz> {
    success(state.store.get_quiz(&principal, &id).await?)
}

/// PUT /api/quizzes/:id - Edit a quiz (owner).
pub async fn update_quiz(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(request): Json<UpdateQuizRequest>,
) -> ApiResult<Quiz> {
    success(state.store.update_quiz(&principal, &id, &request).await?)
}

/// GET /api/quizzes/:id/join-form - Whether joining needs a quiz passcode.
pub async fn get_join_form(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> ApiResult<JoinFormInfo> {
    success(state.store.join_form(&principal, &id).await?)
}

/// GET /api/quizSecrets/:quiz_id - Read a quiz passcode (owner). Data is null without one.
pub async fn get_quiz_secret(
    State(state): State<AppState>,
    principal: Principal,
    Path(quiz_id): Path<String>,
) -> ApiResult<Option<QuizSecret>> {
    success(state.store.get_quiz_secret(&principal, &quiz_id).await?)
}
